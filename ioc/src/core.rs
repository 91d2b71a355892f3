//! Core, non-public plumbing: identifier normalization and the resolution guard.

use crate::error::{Error, Result};
use std::cell::RefCell;

/// The namespace separator that may prefix an identifier.
const NAMESPACE_SEPARATOR: char = '\\';

thread_local! {
  // The chain of services currently being resolved on this thread, outermost
  // first. Each entry is tagged with the address of the container doing the work.
  static RESOLVING_STACK: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// Strips any leading namespace separators, so `\Foo` and `Foo` share a key.
pub(crate) fn normalize(identifier: &str) -> &str {
  identifier.trim_start_matches(NAMESPACE_SEPARATOR)
}

/// An RAII guard that detects circular dependencies and runaway recursion.
///
/// Entering pushes the service onto the thread-local resolution stack and fails
/// if the same container is already resolving it further up the chain, or if
/// the chain is already `limit` entries deep. Dropping the guard pops it again.
pub(crate) struct ResolutionGuard {
  _private: (),
}

impl ResolutionGuard {
  pub(crate) fn enter(owner: usize, service: &str, limit: usize) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let in_progress = stack
        .iter()
        .any(|(container, name)| *container == owner && name == service);

      if in_progress {
        let mut path: Vec<String> = stack
          .iter()
          .filter(|(container, _)| *container == owner)
          .map(|(_, name)| name.clone())
          .collect();
        path.push(service.to_owned());
        return Err(Error::CircularDependency {
          service: service.to_owned(),
          path,
        });
      }

      let depth = stack.iter().filter(|(container, _)| *container == owner).count();
      if depth >= limit {
        return Err(Error::DepthExceeded {
          service: service.to_owned(),
          limit,
        });
      }

      stack.push((owner, service.to_owned()));
      Ok(Self { _private: () })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    // Guards are created and dropped in strict LIFO order on a single thread.
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}
