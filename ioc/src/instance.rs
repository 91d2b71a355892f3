//! The type-erased handle the container passes around.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased object produced or stored by the container.
///
/// Cloning an `Instance` clones the handle, not the object: two clones are
/// identity-equal under [`Instance::ptr_eq`].
///
/// Concrete values are stored as `Arc<T>`. Trait objects are stored the same
/// way `fibre_ioc` stores them, as an `Arc<I>` inside the erased box, and are
/// read back with [`Instance::downcast_trait`].
#[derive(Clone)]
pub struct Instance {
  value: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
  class: Option<Arc<str>>,
}

impl Instance {
  /// Wraps a concrete value.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an already shared concrete value without re-allocating.
  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      value,
      type_name: type_name::<T>(),
      class: None,
    }
  }

  /// Wraps a trait object, e.g. `Instance::from_trait::<dyn Mailer>(Arc::new(Smtp))`.
  pub fn from_trait<I: ?Sized + Any + Send + Sync>(value: Arc<I>) -> Self {
    Self {
      value: Arc::new(value),
      type_name: type_name::<I>(),
      class: None,
    }
  }

  /// The value returned by callables that produce nothing.
  pub fn unit() -> Self {
    Self::new(())
  }

  /// Tags the instance with the type identifier it was built as.
  ///
  /// The container tags everything it builds from a descriptor. Instances made
  /// by factories carry no tag unless the factory adds one, and an untagged
  /// instance cannot be the receiver of a method call.
  pub fn with_class(mut self, class: &str) -> Self {
    self.class = Some(Arc::from(crate::core::normalize(class)));
    self
  }

  /// The type identifier this instance was built as, if known.
  pub fn class(&self) -> Option<&str> {
    self.class.as_deref()
  }

  /// The Rust type name of the stored value.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn is<T: Any>(&self) -> bool {
    (*self.value).is::<T>()
  }

  /// Returns the stored concrete value, or `None` if it is not a `T`.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.value.clone().downcast::<T>().ok()
  }

  /// Returns the stored trait object, or `None` if it was not stored as `I`.
  pub fn downcast_trait<I: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<I>> {
    (*self.value).downcast_ref::<Arc<I>>().cloned()
  }

  /// Identity comparison: `true` if both handles point at the same object.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(&a.value), Arc::as_ptr(&b.value))
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("type", &self.type_name)
      .field("class", &self.class)
      .finish()
  }
}
