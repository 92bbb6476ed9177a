//! Binding and registry storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Parameter;
use crate::container::Container;
use crate::error::DiResult;
use crate::instance::Instance;
use crate::lifetime::Lifetime;

/// Erased factory stored in a binding.
pub(crate) type Factory = Arc<dyn Fn(&Container) -> DiResult<Instance> + Send + Sync>;

/// A registered factory with its lifetime.
pub(crate) struct Binding {
    pub(crate) lifetime: Lifetime,
    pub(crate) factory: Factory,
    /// Produced type, for diagnostics
    pub(crate) type_name: &'static str,
}

impl Binding {
    pub(crate) fn new(lifetime: Lifetime, type_name: &'static str, factory: Factory) -> Self {
        Self {
            lifetime,
            factory,
            type_name,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("lifetime", &self.lifetime)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Result of [`Registry::cache`], carrying the value the caller should return.
#[derive(Debug)]
pub(crate) enum CacheOutcome {
    /// The new value is now the cached singleton.
    Cached(Instance),
    /// Another thread cached first; its value wins.
    Raced(Instance),
    /// The binding changed while the factory ran; nothing was cached.
    Stale(Instance),
}

impl CacheOutcome {
    pub(crate) fn into_instance(self) -> Instance {
        match self {
            CacheOutcome::Cached(instance) | CacheOutcome::Raced(instance) | CacheOutcome::Stale(instance) => {
                instance
            }
        }
    }
}

/// Bindings, cached singletons and parameters, guarded by the container's lock.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    pub(crate) bindings: HashMap<String, Arc<Binding>>,
    pub(crate) instances: HashMap<String, Instance>,
    pub(crate) parameters: HashMap<String, Parameter>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the binding under `id` and drops any value cached for it.
    pub(crate) fn bind(&mut self, id: String, binding: Binding) {
        self.instances.remove(&id);
        self.bindings.insert(id, Arc::new(binding));
    }

    /// Removes binding and cached instance; returns whether anything was there.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let had_binding = self.bindings.remove(id).is_some();
        let had_instance = self.instances.remove(id).is_some();
        had_binding || had_instance
    }

    /// Caches `instance` unless another value got there first.
    ///
    /// The binding must still be `binding`; a value produced by a factory that
    /// was replaced or unset in the meantime is handed back uncached.
    pub(crate) fn cache(&mut self, id: &str, binding: &Arc<Binding>, instance: Instance) -> CacheOutcome {
        if let Some(cached) = self.instances.get(id) {
            return CacheOutcome::Raced(cached.clone());
        }
        match self.bindings.get(id) {
            Some(current) if Arc::ptr_eq(current, binding) => {
                self.instances.insert(id.to_string(), instance.clone());
                CacheOutcome::Cached(instance)
            }
            _ => CacheOutcome::Stale(instance),
        }
    }
}
