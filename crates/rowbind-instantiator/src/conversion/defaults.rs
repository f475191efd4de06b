//! Built-in scalar conversions.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use rowbind_core::{ConversionError, EnumValue, Value, builtins};

use super::{ConversionMap, TypeConversion};

/// Register the built-in conversions.
///
/// - `Number` to every numeric box and to `Decimal`
/// - `Timestamp` to `Date` and back
/// - `Enum` to `String` (constant name) and to `Int32` (ordinal)
/// - `String` to `Decimal`
pub fn register_default_conversions(map: &mut ConversionMap) {
    map.register(TypeConversion::new(builtins::NUMBER, builtins::INT8_BOX, |v| {
        to_integer(v, "Int8").and_then(|n| narrow::<i8>(n, "Int8").map(Value::Int8))
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::INT16_BOX, |v| {
        to_integer(v, "Int16").and_then(|n| narrow::<i16>(n, "Int16").map(Value::Int16))
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::INT32_BOX, |v| {
        to_integer(v, "Int32").and_then(|n| narrow::<i32>(n, "Int32").map(Value::Int32))
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::INT64_BOX, |v| {
        to_integer(v, "Int64").and_then(|n| narrow::<i64>(n, "Int64").map(Value::Int64))
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::FLOAT32_BOX, |v| {
        to_float(v).map(|f| Value::Float32(f as f32))
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::FLOAT64_BOX, |v| {
        to_float(v).map(Value::Float64)
    }));
    map.register(TypeConversion::new(builtins::NUMBER, builtins::DECIMAL, |v| {
        to_decimal(v).map(Value::Decimal)
    }));

    map.register(TypeConversion::from_fn(
        builtins::TIMESTAMP,
        builtins::DATE,
        |ts: NaiveDateTime| Ok(ts.date()),
    ));
    map.register(TypeConversion::from_fn(
        builtins::DATE,
        builtins::TIMESTAMP,
        |date: NaiveDate| Ok(date.and_time(NaiveTime::MIN)),
    ));

    map.register(TypeConversion::from_fn(
        builtins::ENUM,
        builtins::STRING,
        |e: EnumValue| Ok(e.name().to_string()),
    ));
    map.register(TypeConversion::from_fn(
        builtins::ENUM,
        builtins::INT32_BOX,
        |e: EnumValue| narrow::<i32>(i128::from(e.ordinal), "Int32"),
    ));

    map.register(TypeConversion::from_fn(
        builtins::STRING,
        builtins::DECIMAL,
        |s: String| {
            s.trim()
                .parse::<Decimal>()
                .map_err(|e| ConversionError::Parse {
                    input: s.clone(),
                    target: "Decimal",
                    message: e.to_string(),
                })
        },
    ));
}

fn not_a_number(value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: "Number",
        actual: value.type_name(),
    }
}

fn narrow<T: TryFrom<i128>>(value: i128, target: &'static str) -> Result<T, ConversionError> {
    T::try_from(value).map_err(|_| ConversionError::IntegerOverflow { value, target })
}

/// Integral value of any numeric, rejecting fractional parts.
fn to_integer(value: &Value, target: &'static str) -> Result<i128, ConversionError> {
    if let Some(n) = value.as_integer() {
        return Ok(n);
    }
    let fractional = || ConversionError::FractionalToInteger {
        value: value.to_string(),
        target,
    };
    match value {
        Value::Float32(f) => float_to_integer(f64::from(*f)).ok_or_else(fractional),
        Value::Float64(f) => float_to_integer(*f).ok_or_else(fractional),
        Value::Decimal(d) => {
            if !d.fract().is_zero() {
                return Err(fractional());
            }
            d.to_i128().ok_or_else(fractional)
        }
        other => Err(not_a_number(other)),
    }
}

fn float_to_integer(f: f64) -> Option<i128> {
    // Out-of-range floats are caught by the narrowing step.
    (f.is_finite() && f.fract() == 0.0).then_some(f as i128)
}

fn to_float(value: &Value) -> Result<f64, ConversionError> {
    if let Some(n) = value.as_integer() {
        return Ok(n as f64);
    }
    match value {
        Value::Float32(f) => Ok(f64::from(*f)),
        Value::Float64(f) => Ok(*f),
        Value::Decimal(d) => d.to_f64().ok_or_else(|| ConversionError::Parse {
            input: d.to_string(),
            target: "Float64",
            message: "out of range".to_string(),
        }),
        other => Err(not_a_number(other)),
    }
}

fn to_decimal(value: &Value) -> Result<Decimal, ConversionError> {
    if let Some(n) = value.as_integer() {
        return Ok(Decimal::from_i128_with_scale(n, 0));
    }
    let from_float = |f: f64| {
        Decimal::try_from(f).map_err(|e| ConversionError::Parse {
            input: f.to_string(),
            target: "Decimal",
            message: e.to_string(),
        })
    };
    match value {
        Value::Float32(f) => from_float(f64::from(*f)),
        Value::Float64(f) => from_float(*f),
        Value::Decimal(d) => Ok(*d),
        other => Err(not_a_number(other)),
    }
}
