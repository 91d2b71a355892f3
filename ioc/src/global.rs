//! The process-wide container instance and its accessor.

use crate::container::Container;
use once_cell::sync::Lazy;

// The one and only process-wide container.
// It will be created on its first access in a thread-safe manner.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container, creating it on first use.
///
/// Bootstrap code can bind here and pass the reference on to the parts of the
/// application that resolve services; nothing is torn down before process exit.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, Instance};
///
/// global().instance("app.name", Instance::new(String::from("fibre")));
///
/// let name = global().resolve::<String>("app.name").unwrap();
/// assert_eq!(*name, "fibre");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
