//! Runtime values flowing from row producers into constructors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{TypeHash, builtins};

/// A dynamic value as delivered by a row producer.
///
/// Scalars are stored inline. Constructed objects are shared through
/// [`ObjectRef`], so cloning a `Value` never clones an instance.
#[derive(Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    String(String),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Enum(EnumValue),
    Object(ObjectRef),
}

impl Value {
    /// Get a human-readable name for this value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "Bool",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Timestamp(_) => "Timestamp",
            Value::Date(_) => "Date",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
        }
    }

    /// The runtime type of this value.
    ///
    /// Scalars report their boxed class, enums and objects report their own
    /// type, and `Null` has no runtime type.
    pub fn runtime_type(&self) -> Option<TypeHash> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => builtins::BOOL_BOX,
            Value::Int8(_) => builtins::INT8_BOX,
            Value::Int16(_) => builtins::INT16_BOX,
            Value::Int32(_) => builtins::INT32_BOX,
            Value::Int64(_) => builtins::INT64_BOX,
            Value::Float32(_) => builtins::FLOAT32_BOX,
            Value::Float64(_) => builtins::FLOAT64_BOX,
            Value::Decimal(_) => builtins::DECIMAL,
            Value::String(_) => builtins::STRING,
            Value::Timestamp(_) => builtins::TIMESTAMP,
            Value::Date(_) => builtins::DATE,
            Value::Enum(e) => e.type_hash,
            Value::Object(o) => o.type_hash,
        })
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value as a 128-bit integer, for any integer variant.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int8(v) => Some(*v as i128),
            Value::Int16(v) => Some(*v as i128),
            Value::Int32(v) => Some(*v as i128),
            Value::Int64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// The value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(v) => write!(f, "Bool({v})"),
            Value::Int8(v) => write!(f, "Int8({v})"),
            Value::Int16(v) => write!(f, "Int16({v})"),
            Value::Int32(v) => write!(f, "Int32({v})"),
            Value::Int64(v) => write!(f, "Int64({v})"),
            Value::Float32(v) => write!(f, "Float32({v})"),
            Value::Float64(v) => write!(f, "Float64({v})"),
            Value::Decimal(v) => write!(f, "Decimal({v})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Timestamp(v) => write!(f, "Timestamp({v})"),
            Value::Date(v) => write!(f, "Date({v})"),
            Value::Enum(e) => write!(f, "Enum({})", e.name),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Enum(e) => write!(f, "{}", e.name),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

/// One constant of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// The enum type this constant belongs to.
    pub type_hash: TypeHash,
    /// Declaration index of the constant.
    pub ordinal: u32,
    /// Constant name.
    pub name: Arc<str>,
}

impl EnumValue {
    pub fn new(type_hash: TypeHash, ordinal: u32, name: impl Into<Arc<str>>) -> Self {
        Self {
            type_hash,
            ordinal,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A shared handle to a constructed instance.
#[derive(Clone)]
pub struct ObjectRef {
    type_hash: TypeHash,
    instance: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
    /// Wrap a freshly constructed instance of the type `type_hash`.
    pub fn new<T: Any + Send + Sync>(type_hash: TypeHash, instance: T) -> Self {
        Self {
            type_hash,
            instance: Arc::new(instance),
        }
    }

    /// The registered type of the instance.
    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    /// Borrow the instance as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// Take a shared handle to the instance as `T`.
    ///
    /// Returns the original reference back on type mismatch.
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, ObjectRef> {
        let type_hash = self.type_hash;
        self.instance
            .downcast::<T>()
            .map_err(|instance| ObjectRef {
                type_hash,
                instance,
            })
    }
}

impl PartialEq for ObjectRef {
    /// Object handles compare by identity.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({:?})", self.type_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[test]
    fn scalar_runtime_type_is_boxed() {
        assert_eq!(Value::Int32(1).runtime_type(), Some(builtins::INT32_BOX));
        assert_eq!(Value::Bool(true).runtime_type(), Some(builtins::BOOL_BOX));
        assert_eq!(
            Value::String("a".into()).runtime_type(),
            Some(builtins::STRING)
        );
        assert_eq!(Value::Null.runtime_type(), None);
    }

    #[test]
    fn enum_runtime_type_is_enum_type() {
        let mood = TypeHash::from_name("Mood");
        let value = Value::Enum(EnumValue::new(mood, 1, "HAPPY"));
        assert_eq!(value.runtime_type(), Some(mood));
        assert_eq!(value.to_string(), "HAPPY");
    }

    #[test]
    fn object_downcast() {
        let hash = TypeHash::from_name("Point");
        let obj = ObjectRef::new(hash, Point { x: 3 });
        assert_eq!(obj.downcast_ref::<Point>(), Some(&Point { x: 3 }));
        assert!(obj.downcast_ref::<String>().is_none());

        let back = obj.clone().downcast::<String>().unwrap_err();
        assert_eq!(back, obj);
        let point = obj.downcast::<Point>().unwrap();
        assert_eq!(point.x, 3);
    }

    #[test]
    fn object_equality_is_identity() {
        let hash = TypeHash::from_name("Point");
        let a = ObjectRef::new(hash, Point { x: 1 });
        let b = ObjectRef::new(hash, Point { x: 1 });
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn as_integer_widens() {
        assert_eq!(Value::Int8(-3).as_integer(), Some(-3));
        assert_eq!(Value::Int64(i64::MAX).as_integer(), Some(i64::MAX as i128));
        assert_eq!(Value::Float64(1.0).as_integer(), None);
    }
}
