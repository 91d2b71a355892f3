#![allow(dead_code)]

use fibre_autowire::{Container, Instance, MethodDescriptor, Parameter, TypeDescriptor};
use std::sync::Arc;

// --- Shared Test Fixtures ---

// Every fixture implements this so tests can read any of them uniformly.
pub trait ValueService: Send + Sync {
  fn value(&self) -> String;
}

pub struct SingleService;
impl ValueService for SingleService {
  fn value(&self) -> String {
    "single".to_string()
  }
}

pub struct Concrete1;
impl ValueService for Concrete1 {
  fn value(&self) -> String {
    "concrete1".to_string()
  }
}

pub struct Concrete2;
impl ValueService for Concrete2 {
  fn value(&self) -> String {
    "concrete2".to_string()
  }
}

// A subtype of Concrete1 that carries a primitive constructor argument.
pub struct SubConcrete1 {
  pub value: String,
}
impl ValueService for SubConcrete1 {
  fn value(&self) -> String {
    self.value.clone()
  }
}

pub struct InjectService;
impl ValueService for InjectService {
  fn value(&self) -> String {
    "inject".to_string()
  }
}

// Delegates to the service injected through its constructor.
pub struct Concrete3 {
  pub inner: Arc<dyn ValueService>,
}
impl ValueService for Concrete3 {
  fn value(&self) -> String {
    self.inner.value()
  }
}

pub struct InjectCallMethod;
impl ValueService for InjectCallMethod {
  fn value(&self) -> String {
    "call method".to_string()
  }
}

pub struct CallMethod;

pub fn as_value(instance: &Instance) -> String {
  instance
    .downcast_trait::<dyn ValueService>()
    .expect("instance is not a ValueService")
    .value()
}

fn value_service(service: impl ValueService + 'static) -> Instance {
  Instance::from_trait::<dyn ValueService>(Arc::new(service))
}

/// A container that knows every fixture type.
pub fn fixtures() -> Container {
  let container = Container::new();
  register_fixtures(&container);
  container
}

pub fn register_fixtures(container: &Container) {
  container.register(TypeDescriptor::concrete("SingleService").construct(|_| Ok(value_service(SingleService))));
  container.register(TypeDescriptor::abstract_type("AbstractService"));
  container.register(TypeDescriptor::concrete("Concrete1").construct(|_| Ok(value_service(Concrete1))));
  container.register(TypeDescriptor::concrete("Concrete2").construct(|_| Ok(value_service(Concrete2))));
  container.register(
    TypeDescriptor::concrete("SubConcrete1")
      .param(Parameter::value("value").default_value(String::new()))
      .construct(|args| {
        Ok(value_service(SubConcrete1 {
          value: args.value::<String>("value")?,
        }))
      }),
  );
  container.register(TypeDescriptor::concrete("InjectService").construct(|_| Ok(value_service(InjectService))));
  container.register(
    TypeDescriptor::concrete("Concrete3")
      .param(Parameter::service("obj", "InjectService"))
      .construct(|args| {
        Ok(value_service(Concrete3 {
          inner: args.get_trait::<dyn ValueService>("obj")?,
        }))
      }),
  );
  container.register(TypeDescriptor::concrete("InjectCallMethod").construct(|_| Ok(value_service(InjectCallMethod))));
  container.register(
    TypeDescriptor::concrete("CallMethod")
      .construct(|_| Ok(Instance::new(CallMethod)))
      .method(
        MethodDescriptor::new("getValue", |_, args| {
          let obj = args.get_trait::<dyn ValueService>("obj")?;
          Ok(Instance::new(obj.value()))
        })
        .param(Parameter::service("obj", "InjectCallMethod")),
      )
      .method(
        MethodDescriptor::new("getAnotherValue", |_, args| {
          let obj = args.get_trait::<dyn ValueService>("obj")?;
          Ok(Instance::new(obj.value()))
        })
        .param(Parameter::service("obj", "AbstractService")),
      ),
  );
}
