//! # ferrous-wire
//!
//! A string-keyed dependency resolution container with autowiring.
//!
//! ## Features
//!
//! - **Bindings**: transient and singleton factories registered under string ids
//! - **Parameters**: named scalar values injected into constructor arguments by name
//! - **Autowiring**: types declared with [`autowire!`] are built on demand, with
//!   their dependencies resolved recursively
//! - **Interfaces**: trait objects declared with [`interface!`] resolve once bound
//! - **Thread-safe**: `Container` is `Send + Sync`; factories may call back into it
//! - **Circular dependency detection**: cycles fail with the full resolution path
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_wire::{autowire, Container};
//! use std::sync::Arc;
//!
//! pub struct Logger {
//!     level: String,
//! }
//! autowire!(Logger { level: String });
//!
//! pub struct Mailer {
//!     logger: Arc<Logger>,
//!     retries: u32,
//! }
//! autowire!(Mailer { logger: Arc<Logger>, retries: u32 });
//!
//! let container = Container::new();
//! container.set_parameter("level", "debug");
//! container.set_parameter("retries", 3);
//!
//! let mailer = container.resolve::<Mailer>().unwrap();
//! assert_eq!(mailer.logger.level, "debug");
//! assert_eq!(mailer.retries, 3);
//! ```
//!
//! ## Bindings
//!
//! ```rust
//! use ferrous_wire::{Container, DiError};
//!
//! struct Connection {
//!     dsn: String,
//! }
//!
//! let container = Container::new();
//! container.set_parameter("dsn", "sqlite::memory:");
//! container.singleton("db", |c| {
//!     let dsn = c.get_parameter("dsn").and_then(|p| p.as_str().map(str::to_string));
//!     Ok(Connection { dsn: dsn.unwrap_or_default() })
//! });
//!
//! let a = container.get("db").unwrap();
//! let b = container.get("db").unwrap();
//! assert!(a.ptr_eq(&b));
//! assert_eq!(container.get_as::<Connection>("db").unwrap().dsn, "sqlite::memory:");
//!
//! container.unset("db");
//! assert!(matches!(container.get("db"), Err(DiError::NotFound(_))));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (registrations and cache hits at
//! `trace`, factory invocations and autowiring at `debug`) and never installs
//! a subscriber itself.

// Module declarations
pub mod catalog;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod instance;
pub mod lifetime;
pub mod traits;

mod macros;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use catalog::{
    Argument, Arguments, ParamInfo, ParamType, TypeCatalog, TypeEntry, TypeKind, AUTOWIRE_TYPES,
};
pub use config::{EnvironmentSource, MapSource, Parameter, ParameterSource, ScalarKind};
pub use container::{Container, ContainerBuilder};
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult, ErrorKind, FactoryError};
pub use instance::Instance;
pub use lifetime::Lifetime;
pub use traits::{Autowire, Component, Inject};

#[cfg(feature = "config")]
pub use config::JsonSource;

#[doc(hidden)]
pub mod __private {
    pub use linkme::{self, distributed_slice};
}
