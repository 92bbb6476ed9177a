//! Error types for the dependency injection container.

use std::sync::Arc;

/// Boxed error produced by user factories.
pub type FactoryError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Dependency injection errors
///
/// Every variant is terminal for the `get` call that produced it and travels
/// unchanged through any recursive resolution chain. Use [`DiError::kind`] to
/// tell "nothing by this name" apart from "this name resolves to something
/// unusable".
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{Container, DiError, ErrorKind};
///
/// let container = Container::new();
/// match container.get("app::Missing") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "app::Missing"),
///     _ => unreachable!(),
/// }
///
/// let err = DiError::NotInstantiable("app::Logger".to_string());
/// assert_eq!(err.kind(), ErrorKind::Container);
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiError {
    /// No binding and no known type under this identifier
    #[error("Service not found: {0}")]
    NotFound(String),
    /// The identifier names a type that cannot be constructed (an interface without binding)
    #[error("Type {0} is not instantiable")]
    NotInstantiable(String),
    /// A constructor parameter carries no usable type information
    #[error("Cannot resolve parameter ${parameter} in {owner}")]
    UntypedParameter {
        parameter: String,
        owner: String,
    },
    /// Strict mode only: a scalar constructor parameter has no value
    #[error("Missing parameter '{parameter}' required by {owner}")]
    MissingParameter {
        parameter: String,
        owner: String,
    },
    /// A scalar parameter exists but holds the wrong kind of value
    #[error("Parameter '{parameter}' of {owner} expects {expected}, found {found}")]
    ParameterMismatch {
        parameter: String,
        owner: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Downcasting a resolved instance failed
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Error raised by a user factory
    #[error("Factory failed: {0}")]
    Factory(#[source] FactoryError),
}

/// Coarse classification of [`DiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing resolvable exists under the identifier.
    NotFound,
    /// The identifier resolves to something structurally unusable.
    Container,
    /// A factory supplied by the caller failed.
    Factory,
}

impl DiError {
    /// Wraps an arbitrary error raised inside a factory.
    ///
    /// ```rust
    /// use ferrous_wire::{Container, DiError, ErrorKind};
    ///
    /// let container = Container::new();
    /// container.set("port", |_| {
    ///     "eighty".parse::<u16>().map_err(DiError::factory)
    /// });
    ///
    /// let err = container.get("port").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Factory);
    /// ```
    pub fn factory<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        DiError::Factory(Arc::new(error))
    }

    /// Returns the failure classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiError::NotFound(_) => ErrorKind::NotFound,
            DiError::Factory(_) => ErrorKind::Factory,
            DiError::NotInstantiable(_)
            | DiError::UntypedParameter { .. }
            | DiError::MissingParameter { .. }
            | DiError::ParameterMismatch { .. }
            | DiError::TypeMismatch { .. }
            | DiError::Circular(_)
            | DiError::DepthExceeded(_) => ErrorKind::Container,
        }
    }

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Shorthand for `kind() == ErrorKind::Container`.
    pub fn is_container_error(&self) -> bool {
        self.kind() == ErrorKind::Container
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
