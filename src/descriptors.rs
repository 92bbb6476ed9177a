//! Binding descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// Snapshot of one registered binding
///
/// Produced by [`Container::descriptors`](crate::Container::descriptors),
/// sorted by identifier. Descriptors are detached copies: later registrations
/// do not update them.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, Lifetime};
///
/// struct Database { url: String }
///
/// let container = Container::new();
/// container.singleton("db", |_| Ok(Database { url: "postgres://localhost".to_string() }));
/// container.set("request_id", |_| Ok(7u64));
///
/// let before = container.descriptors();
/// assert_eq!(before.len(), 2);
/// assert_eq!(before[0].id, "db");
/// assert_eq!(before[0].lifetime, Lifetime::Singleton);
/// assert!(!before[0].cached);
///
/// container.get("db").unwrap();
/// let after = container.descriptors();
/// assert!(after[0].cached);
/// assert_eq!(after[1].type_name(), "u64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// Identifier the binding is registered under
    pub id: String,
    /// Binding lifetime
    pub lifetime: Lifetime,
    /// Type produced by the factory
    pub type_name: &'static str,
    /// Whether a singleton value is currently cached
    pub cached: bool,
}

impl BindingDescriptor {
    /// Produced type name without its module path.
    pub fn type_name(&self) -> &'static str {
        short_name(self.type_name)
    }

    /// True when the binding caches its first value.
    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }
}

// Keeps generic arguments intact: `alloc::sync::Arc<dyn app::Clock>` stays whole.
fn short_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) if head.len() == full.len() => &full[pos + 2..],
        _ => full,
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("app::db::Database"), "Database");
        assert_eq!(short_name("u64"), "u64");
        assert_eq!(
            short_name("alloc::sync::Arc<dyn app::Clock>"),
            "alloc::sync::Arc<dyn app::Clock>"
        );
    }
}
