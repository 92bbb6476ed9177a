//! The container: bindings, singleton cache, parameters and autowiring.
//!
//! A [`Container`] maps string identifiers to factories. `get` checks the
//! singleton cache, then the bindings, and finally falls back to constructing
//! the identifier from the [`TypeCatalog`], resolving each constructor
//! parameter through the same `get` entry point.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::catalog::{Argument, Arguments, ParamInfo, ParamType, TypeCatalog, TypeKind};
use crate::config::{Parameter, ParameterSource};
use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::internal::circular::ResolutionGuard;
use crate::lifetime::Lifetime;
use crate::registration::{Binding, CacheOutcome, Registry};
use crate::traits::Component;

mod builder;

pub use builder::ContainerBuilder;

static NEXT_UID: AtomicU64 = AtomicU64::new(1);

/// Dependency resolution container
///
/// Registration and resolution both take `&self`; the container is
/// `Send + Sync` and is usually shared behind an `Arc`. The internal lock is
/// never held while a factory or constructor runs, so factories are free to
/// call back into the container.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{autowire, Container};
/// use std::sync::Arc;
///
/// pub struct Database {
///     dsn: String,
/// }
/// autowire!(Database { dsn: String });
///
/// pub struct UserRepository {
///     db: Arc<Database>,
/// }
/// autowire!(UserRepository { db: Arc<Database> });
///
/// let container = Container::new();
/// container.set_parameter("dsn", "postgres://localhost");
///
/// let repo = container.resolve::<UserRepository>().unwrap();
/// assert_eq!(repo.db.dsn, "postgres://localhost");
/// ```
pub struct Container {
    uid: u64,
    registry: RwLock<Registry>,
    catalog: TypeCatalog,
    strict_parameters: bool,
    max_depth: usize,
}

impl Container {
    /// Creates a container over every linked `autowire!` type, with
    /// permissive parameters and the default depth limit.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a container.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub(crate) fn from_parts(
        catalog: TypeCatalog,
        strict_parameters: bool,
        max_depth: usize,
        registry: Registry,
    ) -> Self {
        Self {
            uid: NEXT_UID.fetch_add(1, Ordering::Relaxed),
            registry: RwLock::new(registry),
            catalog,
            strict_parameters,
            max_depth,
        }
    }

    // ----- Bindings -----

    /// Registers a transient factory under `id`.
    ///
    /// Every `get(id)` invokes the factory again. Re-registering an id
    /// replaces the previous binding and drops any value cached for it.
    ///
    /// ```rust
    /// use ferrous_wire::Container;
    ///
    /// let container = Container::new();
    /// container.set("greeting", |_| Ok(String::from("hello")));
    ///
    /// let a = container.get("greeting").unwrap();
    /// let b = container.get("greeting").unwrap();
    /// assert!(!a.ptr_eq(&b));
    /// ```
    pub fn set<T, F>(&self, id: impl Into<String>, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register(id, Lifetime::Transient, factory)
    }

    /// Registers a singleton factory under `id`.
    ///
    /// The factory runs on the first `get`; the value is cached until `id` is
    /// unset or registered again.
    pub fn singleton<T, F>(&self, id: impl Into<String>, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        self.register(id, Lifetime::Singleton, factory)
    }

    /// Registers a factory with an explicit lifetime.
    pub fn register<T, F>(&self, id: impl Into<String>, lifetime: Lifetime, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        let binding = Binding::new(
            lifetime,
            type_name::<T>(),
            Arc::new(move |container: &Container| factory(container).map(Instance::new)),
        );
        self.insert_binding(id.into(), binding)
    }

    /// Registers an already-built value as a singleton.
    pub fn set_instance<T: Any + Send + Sync>(&self, id: impl Into<String>, value: T) -> &Self {
        let id = id.into();
        let instance = Instance::new(value);
        let shared = instance.clone();
        let binding = Binding::new(
            Lifetime::Singleton,
            instance.type_name(),
            Arc::new(move |_: &Container| -> DiResult<Instance> { Ok(shared.clone()) }),
        );

        trace!(id = %id, type_name = instance.type_name(), "registering instance");
        let mut registry = self.registry.write();
        registry.bind(id.clone(), binding);
        registry.instances.insert(id, instance);
        self
    }

    /// Registers a transient factory under `T::ID`.
    ///
    /// Works for trait objects declared with [`interface!`](crate::interface),
    /// which is how an interface gets an implementation.
    pub fn bind<T, F>(&self, factory: F) -> &Self
    where
        T: Component + ?Sized,
        F: Fn(&Container) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.bind_with::<T, F>(Lifetime::Transient, factory)
    }

    /// Registers a singleton factory under `T::ID`.
    pub fn bind_singleton<T, F>(&self, factory: F) -> &Self
    where
        T: Component + ?Sized,
        F: Fn(&Container) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        self.bind_with::<T, F>(Lifetime::Singleton, factory)
    }

    fn bind_with<T, F>(&self, lifetime: Lifetime, factory: F) -> &Self
    where
        T: Component + ?Sized,
        F: Fn(&Container) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        let binding = Binding::new(
            lifetime,
            type_name::<T>(),
            Arc::new(move |container: &Container| factory(container).map(T::into_instance)),
        );
        self.insert_binding(T::ID.to_string(), binding)
    }

    fn insert_binding(&self, id: String, binding: Binding) -> &Self {
        trace!(id = %id, lifetime = ?binding.lifetime, type_name = binding.type_name, "registering binding");
        self.registry.write().bind(id, binding);
        self
    }

    /// Removes the binding and any cached value under `id`.
    ///
    /// Unknown ids are ignored. Catalog types stay autowirable afterwards.
    pub fn unset(&self, id: &str) {
        if self.registry.write().remove(id) {
            trace!(id, "unset binding");
        }
    }

    // ----- Parameters -----

    /// Stores a scalar parameter, replacing any previous value.
    pub fn set_parameter(&self, id: impl Into<String>, value: impl Into<Parameter>) -> &Self {
        self.registry.write().parameters.insert(id.into(), value.into());
        self
    }

    /// Returns the parameter stored under `id`, `None` when absent.
    pub fn get_parameter(&self, id: &str) -> Option<Parameter> {
        self.registry.read().parameters.get(id).cloned()
    }

    /// Copies every key of `source` into the parameter store and returns how
    /// many were loaded.
    ///
    /// ```rust
    /// use ferrous_wire::{Container, MapSource, Parameter};
    ///
    /// let container = Container::new();
    /// let loaded = container.load_parameters(&MapSource::new().with("port", 8080).with("host", "::1"));
    ///
    /// assert_eq!(loaded, 2);
    /// assert_eq!(container.get_parameter("port"), Some(Parameter::Integer(8080)));
    /// ```
    pub fn load_parameters(&self, source: &dyn ParameterSource) -> usize {
        let values: Vec<(String, Parameter)> = source
            .keys()
            .into_iter()
            .filter_map(|key| source.get(&key).map(|value| (key, value)))
            .collect();
        let loaded = values.len();

        self.registry.write().parameters.extend(values);
        debug!(?source, loaded, "loaded parameters");
        loaded
    }

    // ----- Resolution -----

    /// Returns true when `get(id)` has something to work with: a binding, or
    /// an instantiable catalog type.
    ///
    /// This is optimistic; `get` can still fail on a missing dependency.
    pub fn has(&self, id: &str) -> bool {
        self.registry.read().bindings.contains_key(id) || self.catalog.is_instantiable(id)
    }

    /// Resolves `id`.
    ///
    /// Order: cached singleton, then binding, then autowiring from the
    /// catalog. Errors from factories and nested resolutions propagate
    /// unchanged.
    pub fn get(&self, id: &str) -> DiResult<Instance> {
        let binding = {
            let registry = self.registry.read();
            if let Some(instance) = registry.instances.get(id) {
                trace!(id, "singleton cache hit");
                return Ok(instance.clone());
            }
            registry.bindings.get(id).cloned()
        }; // Lock released here

        match binding {
            Some(binding) => self.invoke(id, &binding),
            None => self.autowire(id),
        }
    }

    /// Resolves `id` and downcasts to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> DiResult<Arc<T>> {
        self.get(id)?.downcast::<T>()
    }

    /// Resolves the component registered or autowirable under `T::ID`.
    pub fn resolve<T: Component + ?Sized>(&self) -> DiResult<Arc<T>> {
        let instance = self.get(T::ID)?;
        T::from_instance(&instance).ok_or_else(|| DiError::TypeMismatch {
            expected: type_name::<T>(),
            found: instance.type_name(),
        })
    }

    fn invoke(&self, id: &str, binding: &Arc<Binding>) -> DiResult<Instance> {
        let _guard = ResolutionGuard::enter(self.uid, id, self.max_depth)?;

        debug!(id, lifetime = ?binding.lifetime, "invoking factory");
        let instance = (binding.factory)(self)?;
        if !binding.lifetime.is_singleton() {
            return Ok(instance);
        }

        // Double-checked insert: the factory ran without the lock held
        let outcome = self.registry.write().cache(id, binding, instance);
        match &outcome {
            CacheOutcome::Cached(_) => {}
            CacheOutcome::Raced(_) => warn!(id, "singleton created concurrently, discarding duplicate"),
            CacheOutcome::Stale(_) => debug!(id, "binding replaced during construction, value not cached"),
        }
        Ok(outcome.into_instance())
    }

    fn autowire(&self, id: &str) -> DiResult<Instance> {
        let entry = self
            .catalog
            .get(id)
            .ok_or_else(|| DiError::NotFound(id.to_string()))?;
        let (parameters, construct) = match entry.kind {
            TypeKind::Concrete { parameters, construct } => (parameters, construct),
            TypeKind::Interface => return Err(DiError::NotInstantiable(id.to_string())),
        };

        let _guard = ResolutionGuard::enter(self.uid, id, self.max_depth)?;

        let params = parameters();
        debug!(id, parameters = params.len(), "autowiring");

        let mut values = Vec::with_capacity(params.len());
        for param in params {
            let argument = self.resolve_argument(entry.id, &param)?;
            values.push((param, argument));
        }
        construct(&mut Arguments::new(entry.id, values))
    }

    fn resolve_argument(&self, owner: &str, param: &ParamInfo) -> DiResult<Argument> {
        match param.ty {
            ParamType::Untyped => Err(DiError::UntypedParameter {
                parameter: param.name.to_string(),
                owner: owner.to_string(),
            }),
            ParamType::Scalar(_) => {
                let value = self.get_parameter(param.name);
                if value.is_none() && self.strict_parameters && !param.optional {
                    return Err(DiError::MissingParameter {
                        parameter: param.name.to_string(),
                        owner: owner.to_string(),
                    });
                }
                Ok(Argument::Scalar(value))
            }
            ParamType::Service(dependency) => self.get(dependency).map(Argument::Service),
        }
    }

    // ----- Introspection -----

    /// Snapshot of the registered bindings, sorted by id.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let registry = self.registry.read();
        let mut descriptors: Vec<_> = registry
            .bindings
            .iter()
            .map(|(id, binding)| BindingDescriptor {
                id: id.clone(),
                lifetime: binding.lifetime,
                type_name: binding.type_name,
                cached: registry.instances.contains_key(id),
            })
            .collect();
        descriptors.sort_by(|a, b| a.id.cmp(&b.id));
        descriptors
    }

    /// The types this container can autowire.
    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Whether missing scalar parameters fail resolution.
    pub fn strict_parameters(&self) -> bool {
        self.strict_parameters
    }

    /// Maximum nesting of resolutions on one thread.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("Container")
            .field("bindings", &registry.bindings.len())
            .field("instances", &registry.instances.len())
            .field("parameters", &registry.parameters.len())
            .field("catalog", &self.catalog.len())
            .field("strict_parameters", &self.strict_parameters)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
