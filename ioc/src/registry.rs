//! The binding registry and the instance cache.

use crate::container::Container;
use crate::core::normalize;
use crate::error::Result;
use crate::inflight::InFlight;
use crate::instance::Instance;
use crate::parameters::Parameters;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// The signature of a factory bound through [`Concrete::Factory`].
pub type FactoryFn = dyn Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync;

/// What an abstract identifier is bound to.
#[derive(Clone)]
pub enum Concrete {
  /// Another identifier, resolved in turn. Binding an identifier to itself
  /// marks it as directly buildable.
  Identifier(String),
  /// A factory receiving the container and the caller's explicit parameters.
  Factory(Arc<FactoryFn>),
}

impl Concrete {
  pub fn factory(
    factory: impl Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
  ) -> Self {
    Concrete::Factory(Arc::new(factory))
  }

  pub fn is_factory(&self) -> bool {
    matches!(self, Concrete::Factory(_))
  }

  pub fn identifier(&self) -> Option<&str> {
    match self {
      Concrete::Identifier(id) => Some(id),
      Concrete::Factory(_) => None,
    }
  }
}

impl From<&str> for Concrete {
  fn from(id: &str) -> Self {
    Concrete::Identifier(normalize(id).to_owned())
  }
}

impl From<String> for Concrete {
  fn from(id: String) -> Self {
    Concrete::from(id.as_str())
  }
}

impl fmt::Debug for Concrete {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Concrete::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
      Concrete::Factory(_) => f.write_str("Factory(..)"),
    }
  }
}

#[derive(Clone, Debug)]
pub(crate) struct Binding {
  pub(crate) concrete: Concrete,
  pub(crate) shared: bool,
}

/// Bindings and cached singletons, both keyed by normalized identifier.
///
/// Map guards are never held while user code runs. Where a binding and the
/// cache must change together, the binding's shard lock is taken first.
#[derive(Default)]
pub(crate) struct Registry {
  bindings: DashMap<String, Binding>,
  instances: DashMap<String, Instance>,
  pub(crate) in_flight: InFlight,
}

impl Registry {
  /// Binds `abstract_id` to `concrete` (or to itself), evicting any cached instance.
  pub(crate) fn bind(&self, abstract_id: &str, concrete: Option<Concrete>, shared: bool) {
    let abstract_id = normalize(abstract_id);
    let binding = Binding {
      concrete: concrete.unwrap_or_else(|| Concrete::from(abstract_id)),
      shared,
    };

    // The eviction happens under the binding's shard lock.
    match self.bindings.entry(abstract_id.to_owned()) {
      Entry::Occupied(mut occupied) => {
        self.instances.remove(abstract_id);
        occupied.insert(binding);
      }
      Entry::Vacant(vacant) => {
        self.instances.remove(abstract_id);
        vacant.insert(binding);
      }
    }
  }

  /// The bound concrete, or the identifier itself when unbound.
  pub(crate) fn concrete(&self, abstract_id: &str) -> Concrete {
    let abstract_id = normalize(abstract_id);
    match self.bindings.get(abstract_id) {
      Some(binding) => binding.concrete.clone(),
      None => Concrete::from(abstract_id),
    }
  }

  pub(crate) fn cached(&self, abstract_id: &str) -> Option<Instance> {
    self
      .instances
      .get(normalize(abstract_id))
      .map(|instance| instance.value().clone())
  }

  pub(crate) fn is_shared(&self, abstract_id: &str) -> bool {
    let abstract_id = normalize(abstract_id);
    if self.cached(abstract_id).is_some() {
      return true;
    }
    self
      .bindings
      .get(abstract_id)
      .map_or(false, |binding| binding.shared)
  }

  pub(crate) fn is_bound(&self, abstract_id: &str) -> bool {
    let abstract_id = normalize(abstract_id);
    self.bindings.contains_key(abstract_id) || self.cached(abstract_id).is_some()
  }

  /// Caches a pre-built instance, replacing whatever was cached before.
  pub(crate) fn store(&self, abstract_id: &str, instance: Instance) {
    self.instances.insert(normalize(abstract_id).to_owned(), instance);
  }

  /// Caches a freshly built instance if `abstract_id` is still bound as shared.
  ///
  /// The binding is read-locked while the instance is inserted, so a
  /// concurrent rebind either evicts the instance afterwards or is seen here.
  pub(crate) fn store_if_shared(&self, abstract_id: &str, instance: &Instance) -> bool {
    let abstract_id = normalize(abstract_id);
    match self.bindings.get(abstract_id) {
      Some(binding) if binding.shared => {
        self.instances.insert(abstract_id.to_owned(), instance.clone());
        true
      }
      _ => false,
    }
  }

  pub(crate) fn forget_instance(&self, abstract_id: &str) -> bool {
    self.instances.remove(normalize(abstract_id)).is_some()
  }

  pub(crate) fn unbind(&self, abstract_id: &str) {
    let abstract_id = normalize(abstract_id);
    // Binding first: `store_if_shared` must not see it once the instance is gone.
    self.bindings.remove(abstract_id);
    self.instances.remove(abstract_id);
  }
}
