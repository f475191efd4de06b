//! Primitive type entry.

use crate::{PrimitiveKind, TypeHash};

/// Registry entry for a primitive type.
///
/// Primitives have no constructors, no superclass and no interfaces. They
/// relate to the rest of the universe only through their boxed class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveEntry {
    /// The primitive kind.
    pub kind: PrimitiveKind,
    /// Type hash for identity.
    pub type_hash: TypeHash,
}

impl PrimitiveEntry {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            type_hash: kind.type_hash(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Hash of the boxed class for this primitive.
    pub fn boxed(&self) -> TypeHash {
        self.kind.boxed_hash()
    }
}
