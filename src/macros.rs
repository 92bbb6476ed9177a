//! Declaration macros feeding the type catalog.

/// Makes a concrete type autowirable.
///
/// Two forms are accepted:
///
/// - `autowire!(Type { field: Ty, .. })` builds the struct from its fields,
///   resolved in the order listed;
/// - `autowire!(Type::ctor(arg: Ty, ..))` calls an associated constructor
///   returning `Self`. Prefix with `try` when it returns `DiResult<Self>`.
///
/// Each field or argument type must implement [`Inject`](crate::Inject):
/// built-in scalars are read from the parameter of the same name, `Arc<T>`
/// resolves the component `T`. The type's identifier is its module path
/// followed by its name.
///
/// # Examples
///
/// ```rust
/// use ferrous_wire::{autowire, Container, DiError, DiResult};
/// use std::sync::Arc;
///
/// pub struct Config {
///     timeout: u64,
/// }
/// autowire!(Config { timeout: u64 });
///
/// pub struct Client {
///     config: Arc<Config>,
///     retries: Option<u32>,
/// }
///
/// impl Client {
///     pub fn new(config: Arc<Config>, retries: Option<u32>) -> Self {
///         Client { config, retries }
///     }
/// }
/// autowire!(Client::new(config: Arc<Config>, retries: Option<u32>));
///
/// pub struct Pool {
///     size: usize,
/// }
///
/// impl Pool {
///     pub fn connect(size: usize) -> DiResult<Self> {
///         if size == 0 {
///             return Err(DiError::factory(std::fmt::Error));
///         }
///         Ok(Pool { size })
///     }
/// }
/// autowire!(try Pool::connect(size: usize));
///
/// let container = Container::new();
/// container.set_parameter("timeout", 30);
///
/// let client = container.resolve::<Client>().unwrap();
/// assert_eq!(client.config.timeout, 30);
/// assert_eq!(client.retries, None);
///
/// assert!(container.resolve::<Pool>().is_err());
/// container.set_parameter("size", 4);
/// assert_eq!(container.resolve::<Pool>().unwrap().size, 4);
/// ```
#[macro_export]
macro_rules! autowire {
    (try $ty:ident :: $ctor:ident ( $($arg:ident : $aty:ty),* $(,)? )) => {
        $crate::__component!($ty);

        impl $crate::Autowire for $ty {
            fn parameters() -> ::std::vec::Vec<$crate::ParamInfo> {
                ::std::vec![$($crate::ParamInfo::of::<$aty>(::std::stringify!($arg))),*]
            }

            #[allow(unused_variables)]
            fn construct(args: &mut $crate::Arguments) -> $crate::DiResult<Self> {
                $(let $arg = args.next::<$aty>()?;)*
                $ty::$ctor($($arg),*)
            }
        }

        $crate::__submit_type!($crate::TypeEntry::concrete::<$ty>());
    };
    ($ty:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        $crate::__component!($ty);

        impl $crate::Autowire for $ty {
            fn parameters() -> ::std::vec::Vec<$crate::ParamInfo> {
                ::std::vec![$($crate::ParamInfo::of::<$fty>(::std::stringify!($field))),*]
            }

            #[allow(unused_variables)]
            fn construct(args: &mut $crate::Arguments) -> $crate::DiResult<Self> {
                ::std::result::Result::Ok($ty {
                    $($field: args.next::<$fty>()?),*
                })
            }
        }

        $crate::__submit_type!($crate::TypeEntry::concrete::<$ty>());
    };
    ($ty:ident :: $ctor:ident ( $($arg:ident : $aty:ty),* $(,)? )) => {
        $crate::__component!($ty);

        impl $crate::Autowire for $ty {
            fn parameters() -> ::std::vec::Vec<$crate::ParamInfo> {
                ::std::vec![$($crate::ParamInfo::of::<$aty>(::std::stringify!($arg))),*]
            }

            #[allow(unused_variables)]
            fn construct(args: &mut $crate::Arguments) -> $crate::DiResult<Self> {
                $(let $arg = args.next::<$aty>()?;)*
                ::std::result::Result::Ok($ty::$ctor($($arg),*))
            }
        }

        $crate::__submit_type!($crate::TypeEntry::concrete::<$ty>());
    };
}

/// Declares a trait object as a container component.
///
/// The interface gets an identifier and a catalog entry, but it is not
/// instantiable: `get` fails with [`DiError::NotInstantiable`](crate::DiError)
/// until an implementation is bound with
/// [`Container::bind`](crate::Container::bind). The trait must have
/// `Send + Sync` as supertraits.
///
/// ```rust
/// use ferrous_wire::{interface, Container, DiError};
/// use std::sync::Arc;
///
/// pub trait Mailer: Send + Sync {
///     fn send(&self, to: &str) -> bool;
/// }
/// interface!(dyn Mailer);
///
/// struct NullMailer;
/// impl Mailer for NullMailer {
///     fn send(&self, _to: &str) -> bool { true }
/// }
///
/// let container = Container::new();
/// assert!(matches!(container.resolve::<dyn Mailer>(), Err(DiError::NotInstantiable(_))));
///
/// container.bind_singleton::<dyn Mailer, _>(|_| Ok(Arc::new(NullMailer) as Arc<dyn Mailer>));
/// assert!(container.resolve::<dyn Mailer>().unwrap().send("ops@example.com"));
/// ```
#[macro_export]
macro_rules! interface {
    (dyn $tr:ident) => {
        impl $crate::Component for dyn $tr {
            const ID: &'static str = ::std::concat!(::std::module_path!(), "::", ::std::stringify!($tr));

            fn into_instance(this: ::std::sync::Arc<Self>) -> $crate::Instance {
                $crate::Instance::new(this)
            }

            fn from_instance(instance: &$crate::Instance) -> ::std::option::Option<::std::sync::Arc<Self>> {
                instance.downcast_ref::<::std::sync::Arc<Self>>().cloned()
            }
        }

        $crate::__submit_type!($crate::TypeEntry::interface::<dyn $tr>());
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __component {
    ($ty:ident) => {
        impl $crate::Component for $ty {
            const ID: &'static str = ::std::concat!(::std::module_path!(), "::", ::std::stringify!($ty));

            fn into_instance(this: ::std::sync::Arc<Self>) -> $crate::Instance {
                $crate::Instance::from_arc(this)
            }

            fn from_instance(instance: &$crate::Instance) -> ::std::option::Option<::std::sync::Arc<Self>> {
                instance.downcast::<Self>().ok()
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __submit_type {
    ($entry:expr) => {
        const _: () = {
            #[$crate::__private::distributed_slice($crate::AUTOWIRE_TYPES)]
            #[linkme(crate = $crate::__private::linkme)]
            static ENTRY: $crate::TypeEntry = $entry;
        };
    };
}
