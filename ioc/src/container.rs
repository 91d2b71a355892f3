//! The main `Container` struct: binding API and the resolver.

use crate::builder::ContainerBuilder;
use crate::catalog::{Catalog, TypeCatalog};
use crate::core::{normalize, ResolutionGuard};
use crate::descriptor::{Parameter, Signature, TypeDescriptor};
use crate::error::{Error, Result};
use crate::inflight::Claim;
use crate::instance::Instance;
use crate::parameters::{Arguments, Parameters};
use crate::registry::{Concrete, Registry};
use std::any::{type_name, Any};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default cap on how many services one resolution chain may nest.
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

/// The Inversion of Control (IoC) container.
///
/// Maps abstract identifiers to concretes and builds object graphs on demand,
/// autowiring constructor parameters from the [`TypeDescriptor`]s it knows.
/// It is thread-safe: bindings may be added from anywhere at any time, and a
/// shared identifier is only ever constructed once even under contention.
pub struct Container {
  registry: Registry,
  catalog: Catalog,
  external: Option<Arc<dyn TypeCatalog>>,
  max_depth: usize,
}

impl Default for Container {
  fn default() -> Self {
    Self {
      registry: Registry::default(),
      catalog: Catalog::new(),
      external: None,
      max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
    }
  }
}

impl Container {
  /// Creates a new, empty `Container` with default settings.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_parts(external: Option<Arc<dyn TypeCatalog>>, max_depth: usize) -> Self {
    Self {
      external,
      max_depth,
      ..Self::default()
    }
  }

  pub fn max_resolution_depth(&self) -> usize {
    self.max_depth
  }

  // --- Type Registration ---

  /// Makes a type known to the resolver.
  pub fn register(&self, descriptor: TypeDescriptor) {
    debug!(
      class = descriptor.name(),
      instantiable = descriptor.is_instantiable(),
      "registering type"
    );
    self.catalog.register(descriptor);
  }

  /// Looks a type up in the container's own catalog, then in the external one.
  pub fn describe(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
    let name = normalize(name);
    self
      .catalog
      .describe(name)
      .or_else(|| self.external.as_ref().and_then(|external| external.describe(name)))
  }

  // --- Binding ---

  /// Binds `abstract_id` to `concrete`. Any cached instance of `abstract_id`
  /// is evicted, whatever the previous binding was.
  pub fn bind(&self, abstract_id: &str, concrete: impl Into<Concrete>, shared: bool) {
    let concrete = concrete.into();
    debug!(service = normalize(abstract_id), ?concrete, shared, "binding");
    self.registry.bind(abstract_id, Some(concrete), shared);
  }

  /// Binds `abstract_id` to itself, e.g. to mark a concrete type as shared.
  pub fn bind_self(&self, abstract_id: &str, shared: bool) {
    debug!(service = normalize(abstract_id), shared, "binding to self");
    self.registry.bind(abstract_id, None, shared);
  }

  pub fn bind_factory(
    &self,
    abstract_id: &str,
    factory: impl Fn(&Container, &Parameters) -> Result<Instance> + Send + Sync + 'static,
    shared: bool,
  ) {
    self.bind(abstract_id, Concrete::factory(factory), shared);
  }

  /// Shorthand for a shared `bind`.
  pub fn singleton(&self, abstract_id: &str, concrete: impl Into<Concrete>) {
    self.bind(abstract_id, concrete, true);
  }

  /// Places an already constructed instance in the cache.
  ///
  /// The binding, if any, is left alone; the cached instance wins over it
  /// until the identifier is rebound or unbound.
  pub fn instance(&self, abstract_id: &str, instance: Instance) {
    debug!(service = normalize(abstract_id), "caching instance");
    self.registry.store(abstract_id, instance);
  }

  /// Removes both the binding and any cached instance.
  pub fn unbind(&self, abstract_id: &str) {
    debug!(service = normalize(abstract_id), "unbinding");
    self.registry.unbind(abstract_id);
  }

  /// Drops the cached instance only, keeping the binding.
  pub fn forget_instance(&self, abstract_id: &str) -> bool {
    self.registry.forget_instance(abstract_id)
  }

  /// `true` if an instance is cached, or the binding is declared shared.
  pub fn is_shared(&self, abstract_id: &str) -> bool {
    self.registry.is_shared(abstract_id)
  }

  /// `true` if the identifier has a binding or a cached instance.
  pub fn is_bound(&self, abstract_id: &str) -> bool {
    self.registry.is_bound(abstract_id)
  }

  /// The bound concrete, or the identifier itself when it is unbound.
  pub fn get_concrete(&self, abstract_id: &str) -> Concrete {
    self.registry.concrete(abstract_id)
  }

  // --- Named accessors ---

  pub fn get(&self, key: &str) -> Result<Instance> {
    self.make(key)
  }

  /// Binds `key` to a factory that always returns `instance`.
  pub fn set(&self, key: &str, instance: Instance) {
    self.bind_factory(key, move |_, _| Ok(instance.clone()), false);
  }

  pub fn has(&self, key: &str) -> bool {
    self.is_bound(key)
  }

  // --- Resolution ---

  /// Resolves `abstract_id` with no explicit parameters.
  pub fn make(&self, abstract_id: &str) -> Result<Instance> {
    self.make_with(abstract_id, &Parameters::new())
  }

  /// Resolves `abstract_id`, with `parameters` taking precedence over autowiring.
  ///
  /// A cached instance is returned as is. Otherwise the bound concrete is
  /// built directly when it is the identifier itself or a factory, or
  /// resolved in turn when it names another identifier. The result is cached
  /// if the identifier is shared.
  pub fn make_with(&self, abstract_id: &str, parameters: &Parameters) -> Result<Instance> {
    let abstract_id = normalize(abstract_id);

    if let Some(instance) = self.registry.cached(abstract_id) {
      trace!(service = abstract_id, "resolved from cache");
      return Ok(instance);
    }

    let _guard = ResolutionGuard::enter(self.id(), abstract_id, self.max_depth)?;

    if !self.registry.is_shared(abstract_id) {
      return self.resolve_concrete(abstract_id, parameters);
    }

    // One thread builds; the others wait for it and then read the cache.
    loop {
      if let Some(instance) = self.registry.cached(abstract_id) {
        return Ok(instance);
      }
      let _ticket = match self.registry.in_flight.claim(abstract_id)? {
        Claim::Build(ticket) => ticket,
        Claim::Retry => continue,
      };
      if let Some(instance) = self.registry.cached(abstract_id) {
        return Ok(instance);
      }

      let instance = self.resolve_concrete(abstract_id, parameters)?;
      if !self.registry.store_if_shared(abstract_id, &instance) {
        debug!(service = abstract_id, "binding changed during construction, not caching");
      }
      return Ok(instance);
    }
  }

  /// Resolves `abstract_id` and downcasts the result to `T`.
  pub fn resolve<T: Any + Send + Sync>(&self, abstract_id: &str) -> Result<Arc<T>> {
    self.resolve_with(abstract_id, &Parameters::new())
  }

  pub fn resolve_with<T: Any + Send + Sync>(
    &self,
    abstract_id: &str,
    parameters: &Parameters,
  ) -> Result<Arc<T>> {
    self
      .make_with(abstract_id, parameters)?
      .downcast::<T>()
      .ok_or_else(|| Error::TypeMismatch {
        service: normalize(abstract_id).to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Resolves `abstract_id` and reads the result back as the trait object `I`.
  pub fn resolve_trait<I: ?Sized + Any + Send + Sync>(&self, abstract_id: &str) -> Result<Arc<I>> {
    self
      .make(abstract_id)?
      .downcast_trait::<I>()
      .ok_or_else(|| Error::TypeMismatch {
        service: normalize(abstract_id).to_owned(),
        expected: type_name::<I>(),
      })
  }

  fn resolve_concrete(&self, abstract_id: &str, parameters: &Parameters) -> Result<Instance> {
    match self.registry.concrete(abstract_id) {
      Concrete::Factory(factory) => {
        trace!(service = abstract_id, "building from factory");
        factory(self, parameters)
      }
      Concrete::Identifier(concrete) if concrete == abstract_id => {
        self.build_type(&concrete, parameters)
      }
      Concrete::Identifier(concrete) => {
        trace!(service = abstract_id, concrete = %concrete, "following binding");
        self.make_with(&concrete, parameters)
      }
    }
  }

  /// Instantiates `concrete` directly, bypassing bindings and the cache.
  ///
  /// A factory is called with the container and `parameters` and its result
  /// returned verbatim. An identifier must name an instantiable type.
  pub fn build(&self, concrete: impl Into<Concrete>, parameters: &Parameters) -> Result<Instance> {
    match concrete.into() {
      Concrete::Factory(factory) => factory(self, parameters),
      Concrete::Identifier(name) => self.build_type(&name, parameters),
    }
  }

  fn build_type(&self, name: &str, parameters: &Parameters) -> Result<Instance> {
    let name = normalize(name);
    let descriptor = self
      .describe(name)
      .filter(|descriptor| descriptor.is_instantiable())
      .ok_or_else(|| Error::NotInstantiable(name.to_owned()))?;
    let construct = descriptor
      .construct_fn()
      .ok_or_else(|| Error::NotInstantiable(name.to_owned()))?;

    let arguments = match descriptor.constructor() {
      None => Arguments::empty(name),
      Some(signature) => self.resolve_arguments(name, signature, parameters)?,
    };

    trace!(class = name, arguments = arguments.len(), "building");
    Ok(construct(arguments)?.with_class(name))
  }

  /// Resolves every formal parameter of `signature`, in declaration order.
  pub(crate) fn resolve_arguments(
    &self,
    owner: &str,
    signature: &Signature,
    parameters: &Parameters,
  ) -> Result<Arguments> {
    let explicit = parameters.key_by(owner, signature);
    let mut names = Vec::with_capacity(signature.len());
    let mut values = Vec::with_capacity(signature.len());

    for param in signature.iter() {
      let value = match explicit.get(param.name()) {
        Some(value) => value.clone(),
        None => match param.service_type() {
          Some(service) => self.resolve_service(owner, param, service)?,
          None => Self::resolve_primitive(owner, param)?,
        },
      };
      names.push(param.name().to_owned());
      values.push(value);
    }

    Ok(Arguments::new(owner, names, values))
  }

  fn resolve_primitive(owner: &str, param: &Parameter) -> Result<Option<Instance>> {
    match param.default() {
      Some(default) => Ok(default.to_argument()),
      None => Err(Error::UnresolvableParameter {
        parameter: param.to_string(),
        class: owner.to_owned(),
      }),
    }
  }

  fn resolve_service(&self, owner: &str, param: &Parameter, service: &str) -> Result<Option<Instance>> {
    match self.make(service) {
      Ok(instance) => Ok(Some(instance)),
      Err(err) if err.is_binding_resolution() => match param.default() {
        Some(default) => {
          debug!(
            class = owner,
            parameter = param.name(),
            error = %err,
            "dependency unresolvable, using default"
          );
          Ok(default.to_argument())
        }
        None => Err(err),
      },
      Err(err) => Err(err),
    }
  }

  fn id(&self) -> usize {
    self as *const Container as usize
  }
}
