//! The type catalog: what the container knows about constructible types.
//!
//! Rust has no runtime reflection, so constructor signatures are recorded
//! ahead of time. [`autowire!`](crate::autowire) and
//! [`interface!`](crate::interface) emit a [`TypeEntry`] into the [`AUTOWIRE_TYPES`]
//! distributed slice at link time; [`TypeCatalog::discovered`] collects them.
//! Containers may also be handed a catalog assembled by hand.

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use linkme::distributed_slice;

use crate::config::{Parameter, ScalarKind};
use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::traits::{Autowire, Component, Inject};

// Auto-collection via linkme distributed slices - types submit entries at compile time
#[distributed_slice]
pub static AUTOWIRE_TYPES: [TypeEntry] = [..];

/// Classification of one constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// No declared type; the autowirer cannot pick a value.
    Untyped,
    /// Built-in scalar, read from the container parameters by name.
    Scalar(ScalarKind),
    /// Another component, resolved by identifier.
    Service(&'static str),
}

/// One constructor parameter: its name and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub ty: ParamType,
    pub optional: bool,
}

impl ParamInfo {
    /// Describes a parameter of Rust type `T`.
    pub fn of<T: Inject>(name: &'static str) -> Self {
        ParamInfo {
            name,
            ty: T::param_type(),
            optional: T::optional(),
        }
    }

    /// Describes a parameter that has no usable type information.
    pub fn untyped(name: &'static str) -> Self {
        ParamInfo {
            name,
            ty: ParamType::Untyped,
            optional: false,
        }
    }
}

/// Erased constructor stored in a [`TypeEntry`].
pub type ConstructFn = fn(&mut Arguments) -> DiResult<Instance>;

/// What the catalog knows about a type.
#[derive(Clone, Copy)]
pub enum TypeKind {
    /// Constructible through its recorded constructor.
    Concrete {
        parameters: fn() -> Vec<ParamInfo>,
        construct: ConstructFn,
    },
    /// Known but not instantiable; only usable once bound.
    Interface,
}

/// Catalog record for one type.
#[derive(Clone, Copy)]
pub struct TypeEntry {
    pub id: &'static str,
    pub type_name: fn() -> &'static str,
    pub kind: TypeKind,
}

fn construct_erased<T: Autowire>(args: &mut Arguments) -> DiResult<Instance> {
    let value = T::construct(args)?;
    args.finish()?;
    Ok(T::into_instance(Arc::new(value)))
}

impl TypeEntry {
    /// Entry for an autowirable concrete type.
    pub const fn concrete<T: Autowire>() -> Self {
        TypeEntry {
            id: T::ID,
            type_name: type_name::<T>,
            kind: TypeKind::Concrete {
                parameters: T::parameters,
                construct: construct_erased::<T>,
            },
        }
    }

    /// Entry for an interface that must be bound before use.
    pub const fn interface<T: Component + ?Sized>() -> Self {
        TypeEntry {
            id: T::ID,
            type_name: type_name::<T>,
            kind: TypeKind::Interface,
        }
    }

    /// True when the entry carries a constructor.
    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete { .. })
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypeEntry");
        s.field("id", &self.id).field("type_name", &(self.type_name)());
        match self.kind {
            TypeKind::Concrete { parameters, .. } => s.field("parameters", &parameters()),
            TypeKind::Interface => s.field("interface", &true),
        };
        s.finish()
    }
}

/// Lookup table of known types, keyed by identifier.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{autowire, Container, TypeCatalog};
///
/// pub struct Clock;
/// autowire!(Clock {});
///
/// let mut catalog = TypeCatalog::empty();
/// catalog.register::<Clock>();
///
/// let container = Container::builder().catalog(catalog).build();
/// assert!(container.has(<Clock as ferrous_wire::Component>::ID));
/// ```
#[derive(Clone, Default)]
pub struct TypeCatalog {
    entries: HashMap<&'static str, TypeEntry>,
}

impl TypeCatalog {
    /// A catalog with no entries; only explicit registrations are known.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every entry linked into the binary.
    pub fn discovered() -> Self {
        let mut catalog = Self::empty();
        for entry in AUTOWIRE_TYPES {
            catalog.insert(*entry);
        }
        tracing::trace!(types = catalog.len(), "discovered linked types");
        catalog
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, entry: TypeEntry) -> &mut Self {
        self.entries.insert(entry.id, entry);
        self
    }

    pub fn register<T: Autowire>(&mut self) -> &mut Self {
        self.insert(TypeEntry::concrete::<T>())
    }

    pub fn register_interface<T: Component + ?Sized>(&mut self) -> &mut Self {
        self.insert(TypeEntry::interface::<T>())
    }

    pub fn get(&self, id: &str) -> Option<&TypeEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn is_instantiable(&self, id: &str) -> bool {
        self.get(id).is_some_and(TypeEntry::is_instantiable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known identifiers, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.ids())
            .finish()
    }
}

/// A resolved constructor argument.
#[derive(Debug, Clone)]
pub enum Argument {
    /// Scalar parameter value, `None` when absent.
    Scalar(Option<Parameter>),
    /// Resolved component.
    Service(Instance),
}

/// Resolved arguments handed to [`Autowire::construct`], in declaration order.
pub struct Arguments {
    owner: &'static str,
    taken: usize,
    values: std::vec::IntoIter<(ParamInfo, Argument)>,
}

impl Arguments {
    pub(crate) fn new(owner: &'static str, values: Vec<(ParamInfo, Argument)>) -> Self {
        Self {
            owner,
            taken: 0,
            values: values.into_iter(),
        }
    }

    /// Identifier of the type being constructed.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Takes the next argument as `T`.
    pub fn next<T: Inject>(&mut self) -> DiResult<T> {
        let (param, argument) = self.values.next().ok_or_else(|| DiError::UntypedParameter {
            parameter: format!("#{} ({})", self.taken, type_name::<T>()),
            owner: self.owner.to_string(),
        })?;
        self.taken += 1;
        T::from_argument(argument, &param, self.owner)
    }

    /// Fails when the constructor left declared arguments unused.
    fn finish(&mut self) -> DiResult<()> {
        match self.values.next() {
            Some((param, _)) => Err(DiError::UntypedParameter {
                parameter: param.name.to_string(),
                owner: self.owner.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("owner", &self.owner)
            .field("remaining", &self.values.len())
            .finish()
    }
}
