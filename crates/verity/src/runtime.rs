//! The introspection engine.
//!
//! Values of any type implementing [`Serialize`] are captured into a dynamic
//! [`Value`] through [`to_value`], after which they can be classified into a
//! [`ValueCategory`] and compared structurally without knowing anything about
//! their declared type.

mod value;

use serde::{ser, Serialize};
use thiserror::Error;

pub use self::value::{Float, Integer, TypeInfo, Value, ValueCategory, Variant, VariantData};
use self::value::ValueSerializer;
use crate::Options;

/// An error raised while capturing a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A custom error raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
    /// The value is nested deeper than the configured limit, which is what
    /// cyclic structures end up doing.
    #[error("value is nested deeper than the limit of {limit}")]
    DepthLimit {
        /// The configured limit.
        limit: usize,
    },
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: core::fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}

/// Capture the given value into a [`Value`] using the default [`Options`].
///
/// # Examples
///
/// ```
/// use verity::runtime::{self, ValueCategory};
///
/// let value = runtime::to_value(&vec![1, 2, 3])?;
/// assert_eq!(value.category(), ValueCategory::Sequence);
/// assert_eq!(value.len(), Some(3));
/// # Ok::<_, verity::runtime::Error>(())
/// ```
pub fn to_value<T>(value: &T) -> Result<Value, Error>
where
    T: ?Sized + Serialize,
{
    to_value_with(value, &Options::default())
}

/// Capture the given value into a [`Value`] using the given [`Options`].
pub fn to_value_with<T>(value: &T, options: &Options) -> Result<Value, Error>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(options.max_depth))
}

/// Test if two values are structurally equal.
pub fn equal<A, B>(a: &A, b: &B, options: &Options) -> Result<bool, Error>
where
    A: ?Sized + Serialize,
    B: ?Sized + Serialize,
{
    let a = to_value_with(a, options)?;
    let b = to_value_with(b, options)?;
    Ok(Value::eq_with(&a, &b, options))
}

/// Test if the given value is absent.
pub fn is_nil<T>(value: &T, options: &Options) -> Result<bool, Error>
where
    T: ?Sized + Serialize,
{
    Ok(to_value_with(value, options)?.is_absent())
}

/// Test if the given value is empty.
pub fn is_empty<T>(value: &T, options: &Options) -> Result<bool, Error>
where
    T: ?Sized + Serialize,
{
    Ok(to_value_with(value, options)?.is_empty())
}

/// Count the elements of the given value, if it has any.
pub fn len<T>(value: &T, options: &Options) -> Result<Option<usize>, Error>
where
    T: ?Sized + Serialize,
{
    Ok(to_value_with(value, options)?.len())
}
