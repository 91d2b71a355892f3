//! Explicit parameters supplied by callers, and the resolved argument list
//! handed to constructors and callables.

use crate::descriptor::Signature;
use crate::error::{Error, Result};
use crate::instance::Instance;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Caller-supplied values that take precedence over autowiring.
///
/// Values may be keyed by parameter name, given positionally, or both.
/// Positional values are matched to the target's parameters by declaration
/// order; a positional value wins over a named one for the same parameter.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
  named: HashMap<String, Option<Instance>>,
  positional: Vec<Option<Instance>>,
}

impl Parameters {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
    self.with_instance(name, Instance::new(value))
  }

  pub fn with_instance(mut self, name: impl Into<String>, instance: Instance) -> Self {
    self.named.insert(name.into(), Some(instance));
    self
  }

  /// Supplies an explicit empty value for `name`.
  pub fn with_null(mut self, name: impl Into<String>) -> Self {
    self.named.insert(name.into(), None);
    self
  }

  pub fn push<T: Any + Send + Sync>(self, value: T) -> Self {
    self.push_instance(Instance::new(value))
  }

  pub fn push_instance(mut self, instance: Instance) -> Self {
    self.positional.push(Some(instance));
    self
  }

  pub fn push_null(mut self) -> Self {
    self.positional.push(None);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.named.is_empty() && self.positional.is_empty()
  }

  /// The number of raw entries supplied, named plus positional. A parameter
  /// given both ways counts twice; how many parameters the values end up
  /// covering depends on the target's signature.
  pub fn len(&self) -> usize {
    self.named.len() + self.positional.len()
  }

  /// Re-keys positional values by the name of the parameter at the same index.
  pub(crate) fn key_by(&self, owner: &str, signature: &Signature) -> HashMap<String, Option<Instance>> {
    let mut keyed = self.named.clone();
    for (index, value) in self.positional.iter().enumerate() {
      match signature.get(index) {
        Some(param) => {
          keyed.insert(param.name().to_owned(), value.clone());
        }
        None => warn!(
          target_name = owner,
          index,
          arity = signature.len(),
          "ignoring positional parameter beyond the declared signature"
        ),
      }
    }
    keyed
  }
}

impl From<Vec<Instance>> for Parameters {
  fn from(values: Vec<Instance>) -> Self {
    Self {
      named: HashMap::new(),
      positional: values.into_iter().map(Some).collect(),
    }
  }
}

impl From<HashMap<String, Instance>> for Parameters {
  fn from(values: HashMap<String, Instance>) -> Self {
    Self {
      named: values.into_iter().map(|(name, value)| (name, Some(value))).collect(),
      positional: Vec::new(),
    }
  }
}

/// The resolved, ordered argument list of a constructor or callable.
///
/// Accessors look arguments up by parameter name and fail with
/// [`Error::ArgumentType`] when the slot is missing, empty, or holds a
/// different type.
#[derive(Clone, Debug)]
pub struct Arguments {
  owner: String,
  names: Vec<String>,
  values: Vec<Option<Instance>>,
}

impl Arguments {
  pub(crate) fn new(owner: &str, names: Vec<String>, values: Vec<Option<Instance>>) -> Self {
    debug_assert_eq!(names.len(), values.len());
    Self {
      owner: owner.to_owned(),
      names,
      values,
    }
  }

  pub(crate) fn empty(owner: &str) -> Self {
    Self::new(owner, Vec::new(), Vec::new())
  }

  /// The type or callable these arguments were resolved for.
  pub fn owner(&self) -> &str {
    &self.owner
  }

  /// The number of raw entries supplied, named plus positional. A parameter
  /// given both ways counts twice; how many parameters the values end up
  /// covering depends on the target's signature.
  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The argument slot for `name`: `None` if there is no such parameter,
  /// `Some(None)` if the parameter resolved to an empty default.
  pub fn slot(&self, name: &str) -> Option<Option<&Instance>> {
    let index = self.names.iter().position(|n| n == name)?;
    Some(self.values[index].as_ref())
  }

  /// The argument at declaration position `index`.
  pub fn at(&self, index: usize) -> Option<&Instance> {
    self.values.get(index).and_then(Option::as_ref)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Instance>)> {
    self
      .names
      .iter()
      .map(String::as_str)
      .zip(self.values.iter().map(Option::as_ref))
  }

  pub fn instance(&self, name: &str) -> Result<&Instance> {
    self
      .slot(name)
      .flatten()
      .ok_or_else(|| self.type_error(name, "present value"))
  }

  pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self
      .instance(name)?
      .downcast::<T>()
      .ok_or_else(|| self.type_error(name, type_name::<T>()))
  }

  pub fn get_trait<I: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<I>> {
    self
      .instance(name)?
      .downcast_trait::<I>()
      .ok_or_else(|| self.type_error(name, type_name::<I>()))
  }

  /// Like [`get`](Self::get), but an empty slot yields `Ok(None)`.
  pub fn optional<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
    match self.slot(name) {
      None => Err(self.type_error(name, type_name::<T>())),
      Some(None) => Ok(None),
      Some(Some(_)) => self.get::<T>(name).map(Some),
    }
  }

  pub fn optional_trait<I: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<I>>> {
    match self.slot(name) {
      None => Err(self.type_error(name, type_name::<I>())),
      Some(None) => Ok(None),
      Some(Some(_)) => self.get_trait::<I>(name).map(Some),
    }
  }

  /// Clones a plain value out of its slot.
  pub fn value<T: Clone + Any + Send + Sync>(&self, name: &str) -> Result<T> {
    self.get::<T>(name).map(|value| (*value).clone())
  }

  fn type_error(&self, name: &str, expected: &'static str) -> Error {
    Error::ArgumentType {
      parameter: name.to_owned(),
      class: self.owner.clone(),
      expected,
    }
  }
}
