//! Introspection descriptors: what the container knows about a type or callable.
//!
//! Rust has no runtime reflection, so every type the container should be able
//! to autowire declares its constructor signature up front, once, through a
//! [`TypeDescriptor`]. The resolver only ever reads these descriptors.

use crate::core::normalize;
use crate::error::Result;
use crate::instance::Instance;
use crate::parameters::Arguments;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub(crate) type ConstructFn = dyn Fn(Arguments) -> Result<Instance> + Send + Sync;
pub(crate) type MethodFn = dyn Fn(Option<&Instance>, Arguments) -> Result<Instance> + Send + Sync;

/// The declared default of an optional parameter.
#[derive(Clone, Debug)]
pub enum DefaultValue {
  /// The parameter defaults to "nothing"; its argument slot is left empty.
  Null,
  Value(Instance),
}

impl DefaultValue {
  pub(crate) fn to_argument(&self) -> Option<Instance> {
    match self {
      DefaultValue::Null => None,
      DefaultValue::Value(instance) => Some(instance.clone()),
    }
  }
}

/// A single formal parameter of a constructor, method or function.
#[derive(Clone, Debug)]
pub struct Parameter {
  name: String,
  service: Option<String>,
  default: Option<DefaultValue>,
}

impl Parameter {
  /// A primitive parameter. Without an explicit value it must fall back to its default.
  pub fn value(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      service: None,
      default: None,
    }
  }

  /// A parameter typed as another service, resolved recursively through the container.
  pub fn service(name: impl Into<String>, service: &str) -> Self {
    Self {
      name: name.into(),
      service: Some(normalize(service).to_owned()),
      default: None,
    }
  }

  pub fn default_value<T: Any + Send + Sync>(self, value: T) -> Self {
    self.default_instance(Instance::new(value))
  }

  pub fn default_instance(mut self, instance: Instance) -> Self {
    self.default = Some(DefaultValue::Value(instance));
    self
  }

  pub fn default_null(mut self) -> Self {
    self.default = Some(DefaultValue::Null);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The service identifier this parameter is typed as, if any.
  pub fn service_type(&self) -> Option<&str> {
    self.service.as_deref()
  }

  pub fn default(&self) -> Option<&DefaultValue> {
    self.default.as_ref()
  }

  pub fn is_optional(&self) -> bool {
    self.default.is_some()
  }
}

impl fmt::Display for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.service {
      Some(service) => write!(f, "{} ${}", service, self.name)?,
      None => write!(f, "${}", self.name)?,
    }
    if self.is_optional() {
      write!(f, " = <default>")?;
    }
    Ok(())
  }
}

/// An ordered formal parameter list.
#[derive(Clone, Debug, Default)]
pub struct Signature {
  params: Vec<Parameter>,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, param: Parameter) -> Self {
    self.params.push(param);
    self
  }

  pub fn push(&mut self, param: Parameter) {
    self.params.push(param);
  }

  pub fn get(&self, index: usize) -> Option<&Parameter> {
    self.params.get(index)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
    self.params.iter()
  }

  pub fn len(&self) -> usize {
    self.params.len()
  }

  pub fn is_empty(&self) -> bool {
    self.params.is_empty()
  }
}

/// A method a type exposes to [`Container::call_method`](crate::Container::call_method).
///
/// The body receives the receiver instance, or `None` when called statically
/// through the `"Class::method"` form.
#[derive(Clone)]
pub struct MethodDescriptor {
  name: String,
  signature: Signature,
  body: Arc<MethodFn>,
}

impl MethodDescriptor {
  pub fn new(
    name: impl Into<String>,
    body: impl Fn(Option<&Instance>, Arguments) -> Result<Instance> + Send + Sync + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      signature: Signature::new(),
      body: Arc::new(body),
    }
  }

  pub fn param(mut self, param: Parameter) -> Self {
    self.signature.push(param);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub(crate) fn invoke(&self, receiver: Option<&Instance>, arguments: Arguments) -> Result<Instance> {
    (self.body)(receiver, arguments)
  }
}

impl fmt::Debug for MethodDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MethodDescriptor")
      .field("name", &self.name)
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}

/// A free-standing callable with a declared signature.
#[derive(Clone)]
pub struct Function {
  name: String,
  signature: Signature,
  body: Arc<ConstructFn>,
}

impl Function {
  pub fn new(
    name: impl Into<String>,
    body: impl Fn(Arguments) -> Result<Instance> + Send + Sync + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      signature: Signature::new(),
      body: Arc::new(body),
    }
  }

  pub fn param(mut self, param: Parameter) -> Self {
    self.signature.push(param);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub(crate) fn invoke(&self, arguments: Arguments) -> Result<Instance> {
    (self.body)(arguments)
  }
}

impl fmt::Debug for Function {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Function")
      .field("name", &self.name)
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeKind {
  Concrete,
  Abstract,
}

/// Everything the container needs to know to build a type.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{Instance, Parameter, TypeDescriptor};
///
/// struct Mailer {
///   retries: u32,
/// }
///
/// let descriptor = TypeDescriptor::concrete("App\\Mailer")
///   .param(Parameter::value("retries").default_value(3_u32))
///   .construct(|args| {
///     Ok(Instance::new(Mailer {
///       retries: args.value::<u32>("retries")?,
///     }))
///   });
///
/// assert!(descriptor.is_instantiable());
/// assert_eq!(descriptor.name(), "App\\Mailer");
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
  name: String,
  kind: TypeKind,
  constructor: Option<Signature>,
  construct: Option<Arc<ConstructFn>>,
  methods: HashMap<String, Arc<MethodDescriptor>>,
}

impl TypeDescriptor {
  /// Describes a concrete type. It becomes instantiable once given a construct function.
  pub fn concrete(name: &str) -> Self {
    Self::with_kind(name, TypeKind::Concrete)
  }

  /// Describes an interface. It can be bound to, but never built directly.
  pub fn interface(name: &str) -> Self {
    Self::with_kind(name, TypeKind::Abstract)
  }

  /// Describes an abstract type. Like an interface, it can never be built directly.
  pub fn abstract_type(name: &str) -> Self {
    Self::with_kind(name, TypeKind::Abstract)
  }

  /// Describes a concrete type without a constructor, built from `T::default()`.
  pub fn of_default<T: Default + Any + Send + Sync>(name: &str) -> Self {
    Self::concrete(name).construct(|_| Ok(Instance::new(T::default())))
  }

  fn with_kind(name: &str, kind: TypeKind) -> Self {
    Self {
      name: normalize(name).to_owned(),
      kind,
      constructor: None,
      construct: None,
      methods: HashMap::new(),
    }
  }

  /// Appends a constructor parameter. The first call declares the constructor.
  pub fn param(mut self, param: Parameter) -> Self {
    self.constructor.get_or_insert_with(Signature::new).push(param);
    self
  }

  /// Declares an explicit constructor with an empty parameter list.
  pub fn with_constructor(mut self) -> Self {
    self.constructor.get_or_insert_with(Signature::new);
    self
  }

  /// Sets the function that assembles the instance from its resolved arguments.
  pub fn construct(
    mut self,
    construct: impl Fn(Arguments) -> Result<Instance> + Send + Sync + 'static,
  ) -> Self {
    self.construct = Some(Arc::new(construct));
    self
  }

  pub fn method(mut self, method: MethodDescriptor) -> Self {
    self.methods.insert(method.name().to_owned(), Arc::new(method));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// `true` for a concrete type that has a construct function.
  pub fn is_instantiable(&self) -> bool {
    self.kind == TypeKind::Concrete && self.construct.is_some()
  }

  /// The constructor signature, or `None` if the type declares no constructor.
  pub fn constructor(&self) -> Option<&Signature> {
    self.constructor.as_ref()
  }

  pub fn get_method(&self, name: &str) -> Option<Arc<MethodDescriptor>> {
    self.methods.get(name).cloned()
  }

  pub(crate) fn construct_fn(&self) -> Option<&Arc<ConstructFn>> {
    self.construct.as_ref()
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("constructor", &self.constructor)
      .field("methods", &self.methods.keys().collect::<Vec<_>>())
      .finish_non_exhaustive()
  }
}
