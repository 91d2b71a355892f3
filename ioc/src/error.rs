//! Error types returned by the container.

use thiserror::Error;

/// The error type for every resolution performed by the container.
///
/// `NotInstantiable`, `UnresolvableParameter` and `UnknownMethod` form the
/// binding-resolution class: they are the only failures a service-typed
/// parameter with a default value can recover from. Everything else always
/// reaches the caller.
#[derive(Debug, Error)]
pub enum Error {
  #[error("target [{0}] is not instantiable")]
  NotInstantiable(String),

  #[error("unresolvable dependency resolving [{parameter}] in class {class}")]
  UnresolvableParameter { parameter: String, class: String },

  #[error("target [{target}] has no method [{method}]")]
  UnknownMethod { target: String, method: String },

  #[error("circular dependency detected while resolving [{service}]: {}", .path.join(" -> "))]
  CircularDependency { service: String, path: Vec<String> },

  #[error("resolution depth limit of {limit} exceeded while resolving [{service}]")]
  DepthExceeded { service: String, limit: usize },

  #[error("argument [{parameter}] of {class} is not a {expected}")]
  ArgumentType {
    parameter: String,
    class: String,
    expected: &'static str,
  },

  #[error("service [{service}] is not a {expected}")]
  TypeMismatch {
    service: String,
    expected: &'static str,
  },

  #[error("constructing [{class}] failed: {reason}")]
  Construction { class: String, reason: String },
}

impl Error {
  /// Creates a `Construction` error. Intended for use inside constructor and
  /// factory bodies.
  pub fn construction(class: impl Into<String>, reason: impl ToString) -> Self {
    Error::Construction {
      class: class.into(),
      reason: reason.to_string(),
    }
  }

  /// Returns `true` for the failures an optional service parameter falls back from.
  pub fn is_binding_resolution(&self) -> bool {
    matches!(
      self,
      Error::NotInstantiable(_) | Error::UnresolvableParameter { .. } | Error::UnknownMethod { .. }
    )
  }
}

/// Errors that can occur when building a `Container`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  /// The resolution depth limit was set to zero, which would reject every `make`.
  #[error("maximum resolution depth cannot be zero")]
  ZeroDepth,
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
