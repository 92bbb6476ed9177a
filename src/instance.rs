//! Type-erased resolved values.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// A value produced by the container.
///
/// Cloning an `Instance` clones the shared handle, never the value, so two
/// clones of a cached singleton are [`ptr_eq`](Instance::ptr_eq).
#[derive(Clone)]
pub struct Instance {
    type_name: &'static str,
    value: AnyArc,
}

impl Instance {
    /// Wraps a freshly built value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps a value that is already shared.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Instance {
            type_name: type_name::<T>(),
            value,
        }
    }

    /// Name of the concrete type stored inside.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attempts to recover the concrete value.
    pub fn downcast<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
        self.value
            .clone()
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Borrows the concrete value if the type matches.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// True when both handles point at the same value.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
