//! # Fibre Autowire
//!
//! An autowiring Inversion of Control (IoC) container for Rust.
//!
//! Services are requested by string identifier. The container looks the
//! identifier up in its bindings, follows indirections, and builds the target
//! type by resolving each of its constructor parameters in turn, recursively.
//! Explicit parameters supplied by the caller always win, and an optional
//! dependency that cannot be resolved falls back to its declared default.
//!
//! ## Core Concepts
//!
//! - **Container**: the binding registry, the instance cache and the resolver.
//! - **Global Container**: a lazily created, process-wide container, accessible via `global()`.
//! - **Type descriptors**: Rust has no runtime reflection, so each autowirable
//!   type declares its constructor parameters once through a `TypeDescriptor`.
//! - **Shared bindings**: resolved once, then served from the cache until rebound.
//! - **Method injection**: `call_method` resolves a callable's parameters the same
//!   way constructor parameters are resolved.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_autowire::{Container, Instance, Parameter, TypeDescriptor};
//! use std::sync::Arc;
//!
//! trait Transport: Send + Sync {
//!   fn name(&self) -> &'static str;
//! }
//!
//! struct Smtp;
//! impl Transport for Smtp {
//!   fn name(&self) -> &'static str {
//!     "smtp"
//!   }
//! }
//!
//! struct Mailer {
//!   transport: Arc<dyn Transport>,
//!   retries: u32,
//! }
//!
//! let container = Container::new();
//!
//! container.register(TypeDescriptor::interface("Transport"));
//! container.register(
//!   TypeDescriptor::concrete("Smtp").construct(|_| Ok(Instance::from_trait::<dyn Transport>(Arc::new(Smtp)))),
//! );
//! container.register(
//!   TypeDescriptor::concrete("Mailer")
//!     .param(Parameter::service("transport", "Transport"))
//!     .param(Parameter::value("retries").default_value(3_u32))
//!     .construct(|args| {
//!       Ok(Instance::new(Mailer {
//!         transport: args.get_trait::<dyn Transport>("transport")?,
//!         retries: args.value::<u32>("retries")?,
//!       }))
//!     }),
//! );
//!
//! // When a Transport is requested, build Smtp, once.
//! container.singleton("Transport", "Smtp");
//!
//! let mailer = container.resolve::<Mailer>("Mailer").unwrap();
//! assert_eq!(mailer.transport.name(), "smtp");
//! assert_eq!(mailer.retries, 3);
//! ```

mod builder;
mod catalog;
mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod inflight;
mod instance;
mod invoker;
mod macros;
mod parameters;
mod registry;

pub use builder::ContainerBuilder;
pub use catalog::{Catalog, TypeCatalog};
pub use container::{Container, DEFAULT_MAX_RESOLUTION_DEPTH};
pub use descriptor::{DefaultValue, Function, MethodDescriptor, Parameter, Signature, TypeDescriptor};
pub use error::{BuildError, Error, Result};
pub use global::global;
pub use instance::Instance;
pub use invoker::Callable;
pub use parameters::{Arguments, Parameters};
pub use registry::{Concrete, FactoryFn};
