//! The introspection capability the resolver builds against.

use crate::core::normalize;
use crate::descriptor::TypeDescriptor;
use dashmap::DashMap;
use std::sync::Arc;

/// Answers "how is this type built?" for the resolver.
///
/// The container ships with [`Catalog`], filled through
/// [`Container::register`](crate::Container::register). Implement this trait
/// to plug in descriptors generated elsewhere (a build script, a plugin
/// manifest) and install it with
/// [`ContainerBuilder::catalog`](crate::ContainerBuilder::catalog).
pub trait TypeCatalog: Send + Sync {
  /// Returns the descriptor for a normalized type identifier.
  fn describe(&self, name: &str) -> Option<Arc<TypeDescriptor>>;
}

/// A thread-safe, registration-based [`TypeCatalog`].
#[derive(Default)]
pub struct Catalog {
  types: DashMap<String, Arc<TypeDescriptor>>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a descriptor, replacing any previous one with the same name.
  pub fn register(&self, descriptor: TypeDescriptor) {
    self
      .types
      .insert(descriptor.name().to_owned(), Arc::new(descriptor));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.types.contains_key(normalize(name))
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }
}

impl TypeCatalog for Catalog {
  fn describe(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
    self
      .types
      .get(normalize(name))
      .map(|entry| entry.value().clone())
  }
}
