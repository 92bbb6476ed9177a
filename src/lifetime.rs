//! Service lifetime definitions.

/// Binding lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, Lifetime};
///
/// struct Clock;
///
/// let container = Container::new();
/// container.register("clock", Lifetime::Singleton, |_| Ok(Clock));
///
/// let a = container.get("clock").unwrap();
/// let b = container.get("clock").unwrap();
/// assert!(a.ptr_eq(&b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// First resolved value is cached and returned on every later `get`
    ///
    /// The cache entry lives until the identifier is unset or re-registered.
    Singleton,
    /// New value per resolution, never cached
    Transient,
}

impl Lifetime {
    /// Maps the `singleton` flag of a registration onto a lifetime.
    pub fn from_singleton_flag(singleton: bool) -> Self {
        if singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }

    /// True for [`Lifetime::Singleton`].
    pub fn is_singleton(self) -> bool {
        self == Lifetime::Singleton
    }
}
