//! Conversion traits between Rust types and [`Value`].
//!
//! - [`FromValue`]: extract a Rust value from a [`Value`]
//! - [`IntoValue`]: wrap a Rust value into a [`Value`]
//!
//! Integer extraction accepts any integer variant and checks bounds, so a
//! constructor asking for `i64` can read an `Int32` column. Float extraction
//! accepts both float widths. Everything else must match exactly.
//!
//! ```
//! use rowbind_core::{FromValue, IntoValue, Value};
//!
//! let value = 42i32.into_value();
//! assert_eq!(i64::from_value(&value).unwrap(), 42);
//! assert!(i8::from_value(&Value::Int32(300)).is_err());
//! assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::ConversionError;
use crate::value::{EnumValue, ObjectRef, Value};

/// Extract a Rust value from a [`Value`].
pub trait FromValue: Sized {
    /// Extract a value, returning a `ConversionError` on incompatible input.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Convert a Rust value into a [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

fn mismatch(expected: &'static str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_value_int {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    let wide = value
                        .as_integer()
                        .ok_or_else(|| mismatch(stringify!($ty), value))?;
                    <$ty>::try_from(wide).map_err(|_| ConversionError::IntegerOverflow {
                        value: wide,
                        target: stringify!($ty),
                    })
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_value_int!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64);

// ============================================================================
// Float implementations
// ============================================================================

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float32(v) => Ok(*v),
            Value::Float64(v) => Ok(*v as f32),
            _ => Err(mismatch("f32", value)),
        }
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float32(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float32(v) => Ok(*v as f64),
            Value::Float64(v) => Ok(*v),
            _ => Err(mismatch("f64", value)),
        }
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float64(self)
    }
}

// ============================================================================
// Exact-match implementations
// ============================================================================

macro_rules! impl_value_exact {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::$variant(v) => Ok(v.clone()),
                        _ => Err(mismatch(stringify!($variant), value)),
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_value_exact!(
    bool => Bool,
    Decimal => Decimal,
    String => String,
    NaiveDateTime => Timestamp,
    NaiveDate => Date,
    EnumValue => Enum,
    ObjectRef => Object
);

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

// ============================================================================
// Generic implementations
// ============================================================================

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}
