//! Method-call injection.

use crate::container::Container;
use crate::core::normalize;
use crate::descriptor::{Function, MethodDescriptor};
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::parameters::Parameters;
use std::sync::Arc;
use tracing::trace;

/// Something [`Container::call_method`] can invoke.
#[derive(Clone, Debug)]
pub enum Callable {
  /// A free-standing function.
  Function(Arc<Function>),
  /// A method looked up on the receiver's class.
  Method { target: Instance, method: String },
  /// A method called without a receiver, e.g. from `"Class::method"`.
  Static { class: String, method: String },
}

impl Callable {
  /// The `[object, method]` pair form.
  pub fn method(target: &Instance, method: impl Into<String>) -> Self {
    Callable::Method {
      target: target.clone(),
      method: method.into(),
    }
  }

  pub fn function(function: Function) -> Self {
    Callable::Function(Arc::new(function))
  }

  /// Parses the `"Class::method"` string form.
  pub fn parse(callable: &str) -> Option<Self> {
    let (class, method) = callable.split_once("::")?;
    if class.is_empty() || method.is_empty() {
      return None;
    }
    Some(Callable::Static {
      class: normalize(class).to_owned(),
      method: method.to_owned(),
    })
  }
}

impl From<Function> for Callable {
  fn from(function: Function) -> Self {
    Callable::function(function)
  }
}

impl Container {
  /// Invokes `callable` with no explicit parameters.
  pub fn call(&self, callable: &Callable) -> Result<Instance> {
    self.call_method(callable, &Parameters::new())
  }

  /// Resolves the callable's parameters exactly like constructor parameters,
  /// then invokes it. Results are never cached.
  pub fn call_method(&self, callable: &Callable, parameters: &Parameters) -> Result<Instance> {
    match callable {
      Callable::Function(function) => {
        let arguments = self.resolve_arguments(function.name(), function.signature(), parameters)?;
        trace!(function = function.name(), "calling function");
        function.invoke(arguments)
      }
      Callable::Method { target, method } => {
        let class = target.class().ok_or_else(|| Error::UnknownMethod {
          target: target.type_name().to_owned(),
          method: method.clone(),
        })?;
        let descriptor = self.method_of(class, method)?;
        self.invoke_method(class, &descriptor, Some(target), parameters)
      }
      Callable::Static { class, method } => {
        let descriptor = self.method_of(class, method)?;
        self.invoke_method(class, &descriptor, None, parameters)
      }
    }
  }

  fn method_of(&self, class: &str, method: &str) -> Result<Arc<MethodDescriptor>> {
    self
      .describe(class)
      .and_then(|descriptor| descriptor.get_method(method))
      .ok_or_else(|| Error::UnknownMethod {
        target: normalize(class).to_owned(),
        method: method.to_owned(),
      })
  }

  fn invoke_method(
    &self,
    class: &str,
    method: &MethodDescriptor,
    receiver: Option<&Instance>,
    parameters: &Parameters,
  ) -> Result<Instance> {
    let owner = format!("{}::{}", class, method.name());
    let arguments = self.resolve_arguments(&owner, method.signature(), parameters)?;
    trace!(method = %owner, "calling method");
    method.invoke(receiver, arguments)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_static_form() {
    match Callable::parse("\\App\\Clock::now") {
      Some(Callable::Static { class, method }) => {
        assert_eq!(class, "App\\Clock");
        assert_eq!(method, "now");
      }
      other => panic!("unexpected parse result: {:?}", other),
    }
  }

  #[test]
  fn test_parse_rejects_malformed_input() {
    assert!(Callable::parse("Clock").is_none());
    assert!(Callable::parse("::now").is_none());
    assert!(Callable::parse("Clock::").is_none());
  }
}
