//! Core traits for the dependency injection container.

mod component;
mod inject;

pub use component::{Autowire, Component};
pub use inject::Inject;
