//! Enum type entry.

use std::sync::Arc;

use crate::error::ConversionError;
use crate::{EnumValue, TypeHash, Value, builtins};

use super::{ConstructorEntry, ParamEntry};

/// Registry entry for an enumeration type.
///
/// Enums are named constants whose ordinal is their declaration index. Every
/// enum extends the built-in `Enum` class and exposes a single public
/// value-of constructor taking one parameter of the enum's own type, so a
/// single-column row can be resolved to an enum like any other target.
#[derive(Debug, Clone)]
pub struct EnumEntry {
    pub name: String,
    pub type_hash: TypeHash,
    /// Constant names in declaration order.
    pub constants: Vec<Arc<str>>,
    /// Directly implemented interfaces, in declaration order.
    pub interfaces: Vec<TypeHash>,
    constructors: Vec<ConstructorEntry>,
}

impl EnumEntry {
    /// Create an enum with no constants.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            constants: Vec::new(),
            interfaces: Vec::new(),
            constructors: vec![value_of_constructor(type_hash)],
        }
    }

    /// Add a constant.
    pub fn with_value(mut self, name: impl Into<Arc<str>>) -> Self {
        self.constants.push(name.into());
        self
    }

    /// Add multiple constants.
    pub fn with_values<S: Into<Arc<str>>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.constants.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// The superclass of every enum.
    pub fn base_class(&self) -> TypeHash {
        builtins::ENUM
    }

    /// The value-of constructor.
    pub fn constructors(&self) -> &[ConstructorEntry] {
        &self.constructors
    }

    /// Look up a constant by name.
    pub fn value(&self, name: &str) -> Option<EnumValue> {
        self.constants
            .iter()
            .position(|c| &**c == name)
            .map(|ordinal| self.value_at(ordinal))
    }

    /// Look up a constant by ordinal.
    pub fn value_by_ordinal(&self, ordinal: i64) -> Option<EnumValue> {
        usize::try_from(ordinal)
            .ok()
            .filter(|&ordinal| ordinal < self.constants.len())
            .map(|ordinal| self.value_at(ordinal))
    }

    fn value_at(&self, ordinal: usize) -> EnumValue {
        EnumValue {
            type_hash: self.type_hash,
            ordinal: ordinal as u32,
            name: Arc::clone(&self.constants[ordinal]),
        }
    }

    /// Canonical coercion of a raw value to a constant of this enum.
    ///
    /// Strings are matched by constant name, integers by ordinal, and
    /// constants of this enum are returned as is.
    pub fn value_of(&self, value: &Value) -> Result<EnumValue, ConversionError> {
        match value {
            Value::String(name) => {
                self.value(name)
                    .ok_or_else(|| ConversionError::UnknownEnumConstant {
                        enum_type: self.name.clone(),
                        constant: name.clone(),
                    })
            }
            Value::Enum(e) if e.type_hash == self.type_hash => Ok(e.clone()),
            other => match other.as_integer() {
                Some(ordinal) => {
                    let ordinal = i64::try_from(ordinal).unwrap_or(i64::MAX);
                    self.value_by_ordinal(ordinal)
                        .ok_or_else(|| ConversionError::EnumOrdinalOutOfRange {
                            enum_type: self.name.clone(),
                            ordinal,
                        })
                }
                None => Err(ConversionError::TypeMismatch {
                    expected: "enum constant name or ordinal",
                    actual: other.type_name(),
                }),
            },
        }
    }
}

fn value_of_constructor(type_hash: TypeHash) -> ConstructorEntry {
    ConstructorEntry::new(vec![ParamEntry::new("value", type_hash)], |args| {
        Ok(args
            .get::<Option<EnumValue>>(0)?
            .map_or(Value::Null, Value::Enum))
    })
}
