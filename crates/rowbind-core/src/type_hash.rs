//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a type's name. Because the hash
//! is a pure function of the name, built-in types can be referred to by
//! constant before any registry exists, and the same name always resolves to
//! the same identity no matter the registration order.
//!
//! # Examples
//!
//! ```
//! use rowbind_core::{TypeHash, builtins};
//!
//! let hash = TypeHash::from_name("int32");
//! assert_eq!(hash, builtins::INT32);
//! assert_ne!(TypeHash::from_name("Department"), hash);
//! ```

use std::fmt;

use xxhash_rust::const_xxh64::xxh64;

/// Domain marker mixed into every type hash.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Hashes of the built-in type universe.
///
/// Every registry created with builtins contains exactly these types. The
/// names are part of the public contract: `TypeHash::from_name("Int32")`
/// is [`INT32_BOX`].
pub mod builtins {
    use super::TypeHash;

    /// Universal root class.
    pub const OBJECT: TypeHash = TypeHash::from_name("Object");

    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    pub const INT8: TypeHash = TypeHash::from_name("int8");
    pub const INT16: TypeHash = TypeHash::from_name("int16");
    pub const INT32: TypeHash = TypeHash::from_name("int32");
    pub const INT64: TypeHash = TypeHash::from_name("int64");
    pub const FLOAT32: TypeHash = TypeHash::from_name("float32");
    pub const FLOAT64: TypeHash = TypeHash::from_name("float64");

    pub const BOOL_BOX: TypeHash = TypeHash::from_name("Bool");
    pub const INT8_BOX: TypeHash = TypeHash::from_name("Int8");
    pub const INT16_BOX: TypeHash = TypeHash::from_name("Int16");
    pub const INT32_BOX: TypeHash = TypeHash::from_name("Int32");
    pub const INT64_BOX: TypeHash = TypeHash::from_name("Int64");
    pub const FLOAT32_BOX: TypeHash = TypeHash::from_name("Float32");
    pub const FLOAT64_BOX: TypeHash = TypeHash::from_name("Float64");

    /// Abstract superclass of the numeric boxes and `Decimal`.
    pub const NUMBER: TypeHash = TypeHash::from_name("Number");
    pub const DECIMAL: TypeHash = TypeHash::from_name("Decimal");
    pub const STRING: TypeHash = TypeHash::from_name("String");
    pub const TIMESTAMP: TypeHash = TypeHash::from_name("Timestamp");
    pub const DATE: TypeHash = TypeHash::from_name("Date");

    /// Abstract superclass of every enum type.
    pub const ENUM: TypeHash = TypeHash::from_name("Enum");

    /// Interface implemented by every ordered built-in value type.
    pub const COMPARABLE: TypeHash = TypeHash::from_name("Comparable");
}
