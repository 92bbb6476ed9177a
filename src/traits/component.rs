//! Traits describing container-managed types.

use std::sync::Arc;

use crate::catalog::{Arguments, ParamInfo};
use crate::error::DiResult;
use crate::instance::Instance;

/// A type with a stable container identifier.
///
/// Concrete types get this implementation from [`autowire!`](crate::autowire),
/// trait objects from [`interface!`](crate::interface). The identifier is the
/// key `get`, `has` and the autowirer use for the type.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{autowire, interface, Component, Container};
/// use std::sync::Arc;
///
/// pub trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
/// interface!(dyn Clock);
///
/// pub struct FixedClock;
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 { 42 }
/// }
/// autowire!(FixedClock {});
///
/// let container = Container::new();
/// container.bind::<dyn Clock, _>(|c| Ok(c.resolve::<FixedClock>()? as Arc<dyn Clock>));
///
/// let clock = container.resolve::<dyn Clock>().unwrap();
/// assert_eq!(clock.now(), 42);
/// assert!(<dyn Clock as Component>::ID.ends_with("::Clock"));
/// ```
pub trait Component: Send + Sync + 'static {
    /// Identifier the type is registered and resolved under.
    const ID: &'static str;

    /// Erases a shared value into the container's storage form.
    fn into_instance(this: Arc<Self>) -> Instance;

    /// Recovers a shared value from storage, `None` when the stored type differs.
    fn from_instance(instance: &Instance) -> Option<Arc<Self>>;
}

/// A concrete type the container can construct by itself.
///
/// `parameters` describes the constructor signature in declaration order;
/// `construct` receives the resolved values in that same order.
pub trait Autowire: Component + Sized {
    /// Constructor parameters, in declaration order.
    fn parameters() -> Vec<ParamInfo>;

    /// Builds the value from resolved arguments.
    fn construct(args: &mut Arguments) -> DiResult<Self>;
}
