//! Container configuration.

use crate::catalog::TypeCatalog;
use crate::config::{Parameter, ParameterSource};
use crate::container::Container;
use crate::internal::circular::MAX_DEPTH;
use crate::registration::Registry;

/// Builder for a [`Container`]
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{autowire, Container, DiError};
///
/// pub struct Server {
///     host: String,
///     port: u16,
/// }
/// autowire!(Server { host: String, port: u16 });
///
/// let strict = Container::builder()
///     .strict_parameters(true)
///     .parameter("host", "localhost")
///     .build();
///
/// match strict.resolve::<Server>() {
///     Err(DiError::MissingParameter { parameter, .. }) => assert_eq!(parameter, "port"),
///     _ => unreachable!(),
/// }
///
/// // Permissive by default: the missing port becomes 0
/// let lenient = Container::builder().parameter("host", "localhost").build();
/// assert_eq!(lenient.resolve::<Server>().unwrap().port, 0);
/// ```
#[derive(Debug)]
pub struct ContainerBuilder {
    catalog: Option<TypeCatalog>,
    strict_parameters: bool,
    max_depth: usize,
    registry: Registry,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            strict_parameters: false,
            max_depth: MAX_DEPTH,
            registry: Registry::new(),
        }
    }

    /// Replaces the linked catalog with `catalog`.
    pub fn catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Fails autowiring on absent non-optional scalar parameters instead of
    /// passing the type's empty value.
    pub fn strict_parameters(mut self, strict: bool) -> Self {
        self.strict_parameters = strict;
        self
    }

    /// Maximum nesting of resolutions on one thread.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    pub fn parameter(mut self, id: impl Into<String>, value: impl Into<Parameter>) -> Self {
        self.registry.parameters.insert(id.into(), value.into());
        self
    }

    /// Copies every key of `source` into the initial parameters.
    pub fn parameters_from(mut self, source: &dyn ParameterSource) -> Self {
        for key in source.keys() {
            if let Some(value) = source.get(&key) {
                self.registry.parameters.insert(key, value);
            }
        }
        self
    }

    pub fn build(self) -> Container {
        let catalog = self.catalog.unwrap_or_else(TypeCatalog::discovered);
        Container::from_parts(catalog, self.strict_parameters, self.max_depth, self.registry)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
