//! Shared identifiers currently under construction, and the threads waiting on them.
//!
//! The thread-local resolution stack only sees one thread's chain. When two
//! threads each build one half of a cycle of shared services, each ends up
//! waiting for the other. This table records who builds what and who waits on
//! what, so a thread can follow the wait-for chain before blocking and report
//! the cycle instead of sleeping forever.

use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::thread::{self, ThreadId};

#[derive(Default)]
struct State {
  /// identifier -> thread constructing it
  builders: HashMap<String, ThreadId>,
  /// thread -> identifier it is blocked on
  waiting: HashMap<ThreadId, String>,
}

/// What a caller should do after [`InFlight::claim`].
pub(crate) enum Claim<'a> {
  /// The caller now owns construction. Dropping the ticket releases it.
  Build(BuildTicket<'a>),
  /// Another thread finished (or gave up on) the identifier; check the cache again.
  Retry,
}

#[derive(Default)]
pub(crate) struct InFlight {
  state: Mutex<State>,
  finished: Condvar,
}

impl InFlight {
  /// Claims construction of `service` for the current thread, or waits for the
  /// thread that holds it.
  ///
  /// Fails with [`Error::CircularDependency`] when the holder is, directly or
  /// through other threads, waiting on something the current thread builds.
  pub(crate) fn claim(&self, service: &str) -> Result<Claim<'_>> {
    let me = thread::current().id();
    let mut state = self.state.lock();

    let holder = match state.builders.get(service) {
      None => {
        state.builders.insert(service.to_owned(), me);
        return Ok(Claim::Build(BuildTicket {
          table: self,
          service: service.to_owned(),
        }));
      }
      Some(holder) => *holder,
    };

    if let Some(path) = wait_cycle(&state, service, holder, me) {
      return Err(Error::CircularDependency {
        service: service.to_owned(),
        path,
      });
    }

    state.waiting.insert(me, service.to_owned());
    while state.builders.get(service) == Some(&holder) {
      self.finished.wait(&mut state);
    }
    state.waiting.remove(&me);
    Ok(Claim::Retry)
  }
}

/// Follows the wait-for chain starting at `holder`. Returns the identifiers
/// on it, closed into a loop, if it ends at `me`.
fn wait_cycle(state: &State, service: &str, holder: ThreadId, me: ThreadId) -> Option<Vec<String>> {
  let mut chain = vec![service.to_owned()];
  let mut current = holder;

  // The chain visits each waiting thread at most once.
  for _ in 0..=state.waiting.len() {
    if current == me {
      let mut path = Vec::with_capacity(chain.len() + 1);
      path.extend(chain.last().cloned());
      path.extend(chain);
      return Some(path);
    }
    let awaited = state.waiting.get(&current)?;
    current = *state.builders.get(awaited)?;
    chain.push(awaited.clone());
  }
  None
}

/// Ownership of one identifier's construction.
pub(crate) struct BuildTicket<'a> {
  table: &'a InFlight,
  service: String,
}

impl Drop for BuildTicket<'_> {
  fn drop(&mut self) {
    let mut state = self.table.state.lock();
    state.builders.remove(&self.service);
    self.table.finished.notify_all();
  }
}
