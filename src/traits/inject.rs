//! Constructor argument classification and extraction.

use std::any::type_name;
use std::sync::Arc;

use crate::catalog::{Argument, ParamInfo, ParamType};
use crate::config::{Parameter, ScalarKind};
use crate::error::{DiError, DiResult};
use crate::traits::Component;

/// A type usable as an autowired constructor argument.
///
/// Built-in scalars are classified as [`ParamType::Scalar`] and read from the
/// container's parameters by argument name; `Arc<T>` of any [`Component`] is
/// classified as [`ParamType::Service`] and resolved through `get`.
pub trait Inject: Sized {
    /// How the autowirer should source this argument.
    fn param_type() -> ParamType;

    /// Optional arguments never fail strict parameter checks.
    fn optional() -> bool {
        false
    }

    /// Converts a resolved argument into the typed value.
    fn from_argument(argument: Argument, param: &ParamInfo, owner: &str) -> DiResult<Self>;
}

fn mismatch(param: &ParamInfo, owner: &str, expected: ScalarKind, found: &'static str) -> DiError {
    DiError::ParameterMismatch {
        parameter: param.name.to_string(),
        owner: owner.to_string(),
        expected: expected.name(),
        found,
    }
}

/// Scalar conversion used by the `Inject` implementations below.
trait Scalar: Sized {
    const KIND: ScalarKind;

    fn from_parameter(value: &Parameter) -> Option<Self>;

    /// Value used when the parameter is absent.
    fn empty() -> Self;
}

fn scalar_from_argument<T: Scalar>(
    argument: Argument,
    param: &ParamInfo,
    owner: &str,
) -> DiResult<Option<T>> {
    match argument {
        Argument::Scalar(None) => Ok(None),
        Argument::Scalar(Some(value)) => T::from_parameter(&value)
            .map(Some)
            .ok_or_else(|| mismatch(param, owner, T::KIND, value.kind().name())),
        Argument::Service(_) => Err(mismatch(param, owner, T::KIND, "service")),
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn empty() -> Self {
        String::new()
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        value.as_bool()
    }

    fn empty() -> Self {
        false
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        value.as_f64()
    }

    fn empty() -> Self {
        0.0
    }
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        value.as_f64().map(|f| f as f32)
    }

    fn empty() -> Self {
        0.0
    }
}

impl Scalar for Vec<String> {
    const KIND: ScalarKind = ScalarKind::List;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        value
            .as_list()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }

    fn empty() -> Self {
        Vec::new()
    }
}

impl Scalar for Parameter {
    const KIND: ScalarKind = ScalarKind::Any;

    fn from_parameter(value: &Parameter) -> Option<Self> {
        Some(value.clone())
    }

    fn empty() -> Self {
        Parameter::String(String::new())
    }
}

// Integers out of range for the target type count as a mismatch.
macro_rules! integer_scalar {
    ($($int:ty),*) => {
        $(
            impl Scalar for $int {
                const KIND: ScalarKind = ScalarKind::Integer;

                fn from_parameter(value: &Parameter) -> Option<Self> {
                    value.as_i64().and_then(|i| <$int>::try_from(i).ok())
                }

                fn empty() -> Self {
                    0
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! inject_scalar {
    ($($ty:ty),*) => {
        $(
            impl Inject for $ty {
                fn param_type() -> ParamType {
                    ParamType::Scalar(<$ty as Scalar>::KIND)
                }

                fn from_argument(argument: Argument, param: &ParamInfo, owner: &str) -> DiResult<Self> {
                    Ok(scalar_from_argument::<$ty>(argument, param, owner)?
                        .unwrap_or_else(<$ty as Scalar>::empty))
                }
            }

            impl Inject for Option<$ty> {
                fn param_type() -> ParamType {
                    ParamType::Scalar(<$ty as Scalar>::KIND)
                }

                fn optional() -> bool {
                    true
                }

                fn from_argument(argument: Argument, param: &ParamInfo, owner: &str) -> DiResult<Self> {
                    scalar_from_argument::<$ty>(argument, param, owner)
                }
            }
        )*
    };
}

inject_scalar!(
    String, bool, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, Vec<String>,
    Parameter
);

impl<T: Component + ?Sized> Inject for Arc<T> {
    fn param_type() -> ParamType {
        ParamType::Service(T::ID)
    }

    fn from_argument(argument: Argument, param: &ParamInfo, owner: &str) -> DiResult<Self> {
        match argument {
            Argument::Service(instance) => {
                T::from_instance(&instance).ok_or_else(|| DiError::TypeMismatch {
                    expected: type_name::<T>(),
                    found: instance.type_name(),
                })
            }
            Argument::Scalar(_) => Err(DiError::ParameterMismatch {
                parameter: param.name.to_string(),
                owner: owner.to_string(),
                expected: "service",
                found: "scalar",
            }),
        }
    }
}
