//! Configuration for `Container` instances.

use crate::catalog::TypeCatalog;
use crate::container::{Container, DEFAULT_MAX_RESOLUTION_DEPTH};
use crate::descriptor::TypeDescriptor;
use crate::error::BuildError;
use std::fmt;
use std::sync::Arc;

/// A builder for creating a configured `Container`.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{Container, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Clock;
///
/// let container = Container::builder()
///   .max_resolution_depth(32)
///   .register(TypeDescriptor::of_default::<Clock>("Clock"))
///   .build()
///   .unwrap();
///
/// assert!(container.make("Clock").is_ok());
/// ```
pub struct ContainerBuilder {
  max_depth: usize,
  catalog: Option<Arc<dyn TypeCatalog>>,
  types: Vec<TypeDescriptor>,
}

impl fmt::Debug for ContainerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContainerBuilder")
      .field("max_depth", &self.max_depth)
      .field("has_catalog", &self.catalog.is_some())
      .field("types", &self.types.len())
      .finish()
  }
}

impl Default for ContainerBuilder {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
      catalog: None,
      types: Vec::new(),
    }
  }
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets how many services a single resolution chain may nest before it
  /// fails with `Error::DepthExceeded`.
  pub fn max_resolution_depth(mut self, depth: usize) -> Self {
    self.max_depth = depth;
    self
  }

  /// Installs an external catalog, consulted for any type the container's
  /// own catalog does not know.
  pub fn catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
    self.catalog = Some(Arc::new(catalog));
    self
  }

  /// Registers a type descriptor up front.
  pub fn register(mut self, descriptor: TypeDescriptor) -> Self {
    self.types.push(descriptor);
    self
  }

  pub fn build(self) -> Result<Container, BuildError> {
    if self.max_depth == 0 {
      return Err(BuildError::ZeroDepth);
    }

    let container = Container::from_parts(self.catalog, self.max_depth);
    for descriptor in self.types {
      container.register(descriptor);
    }
    Ok(container)
  }
}
