//! Primitive type kinds and their boxed counterparts.

use std::fmt;

use crate::TypeHash;
use crate::builtins;

/// Primitive type kinds.
///
/// Every primitive has exactly one boxed class. A column may declare either
/// form; runtime values always carry the boxed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// All primitive kinds in declaration order.
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
    ];

    /// Get the TypeHash for this primitive type.
    pub const fn type_hash(self) -> TypeHash {
        match self {
            PrimitiveKind::Bool => builtins::BOOL,
            PrimitiveKind::Int8 => builtins::INT8,
            PrimitiveKind::Int16 => builtins::INT16,
            PrimitiveKind::Int32 => builtins::INT32,
            PrimitiveKind::Int64 => builtins::INT64,
            PrimitiveKind::Float32 => builtins::FLOAT32,
            PrimitiveKind::Float64 => builtins::FLOAT64,
        }
    }

    /// Get the TypeHash of the boxed class for this primitive.
    pub const fn boxed_hash(self) -> TypeHash {
        match self {
            PrimitiveKind::Bool => builtins::BOOL_BOX,
            PrimitiveKind::Int8 => builtins::INT8_BOX,
            PrimitiveKind::Int16 => builtins::INT16_BOX,
            PrimitiveKind::Int32 => builtins::INT32_BOX,
            PrimitiveKind::Int64 => builtins::INT64_BOX,
            PrimitiveKind::Float32 => builtins::FLOAT32_BOX,
            PrimitiveKind::Float64 => builtins::FLOAT64_BOX,
        }
    }

    /// Get the name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
        }
    }

    /// Get the name of the boxed class for this primitive.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Int8 => "Int8",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Float32 => "Float32",
            PrimitiveKind::Float64 => "Float64",
        }
    }

    /// Whether the boxed class of this primitive extends `Number`.
    pub const fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Bool)
    }

    /// Find the primitive whose own hash is `hash`.
    pub fn from_hash(hash: TypeHash) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_hash() == hash)
    }

    /// Find the primitive whose boxed class hash is `hash`.
    pub fn from_boxed_hash(hash: TypeHash) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.boxed_hash() == hash)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Boxed form of `hash`: the box class for a primitive, `hash` otherwise.
#[inline]
pub fn wrap(hash: TypeHash) -> TypeHash {
    PrimitiveKind::from_hash(hash).map_or(hash, PrimitiveKind::boxed_hash)
}

/// Primitive form of `hash`: the primitive for a box class, `hash` otherwise.
#[inline]
pub fn unwrap(hash: TypeHash) -> TypeHash {
    PrimitiveKind::from_boxed_hash(hash).map_or(hash, PrimitiveKind::type_hash)
}

/// Whether `hash` names one of the primitive types.
#[inline]
pub fn is_primitive(hash: TypeHash) -> bool {
    PrimitiveKind::from_hash(hash).is_some()
}
