//! Unified type entry.

use crate::TypeHash;

use super::{ClassEntry, ConstructorEntry, EnumEntry, InterfaceEntry, PrimitiveEntry};

/// Any entry stored in a type registry.
#[derive(Debug, Clone)]
pub enum TypeEntry {
    Primitive(PrimitiveEntry),
    Class(ClassEntry),
    Interface(InterfaceEntry),
    Enum(EnumEntry),
}

impl TypeEntry {
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Primitive(e) => e.type_hash,
            TypeEntry::Class(e) => e.type_hash,
            TypeEntry::Interface(e) => e.type_hash,
            TypeEntry::Enum(e) => e.type_hash,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Primitive(e) => e.name(),
            TypeEntry::Class(e) => &e.name,
            TypeEntry::Interface(e) => &e.name,
            TypeEntry::Enum(e) => &e.name,
        }
    }

    /// Superclass of this type. Primitives, interfaces and the root class have none.
    pub fn base_class(&self) -> Option<TypeHash> {
        match self {
            TypeEntry::Class(e) => e.base_class,
            TypeEntry::Enum(e) => Some(e.base_class()),
            TypeEntry::Primitive(_) | TypeEntry::Interface(_) => None,
        }
    }

    /// Directly declared interfaces (super-interfaces for an interface).
    pub fn interfaces(&self) -> &[TypeHash] {
        match self {
            TypeEntry::Class(e) => &e.interfaces,
            TypeEntry::Enum(e) => &e.interfaces,
            TypeEntry::Interface(e) => &e.bases,
            TypeEntry::Primitive(_) => &[],
        }
    }

    /// Constructors in declaration order, regardless of visibility.
    pub fn constructors(&self) -> &[ConstructorEntry] {
        match self {
            TypeEntry::Class(e) => &e.constructors,
            TypeEntry::Enum(e) => e.constructors(),
            TypeEntry::Primitive(_) | TypeEntry::Interface(_) => &[],
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeEntry::Primitive(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeEntry::Interface(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeEntry::Enum(_))
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumEntry> {
        match self {
            TypeEntry::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveEntry> {
        match self {
            TypeEntry::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveEntry> for TypeEntry {
    fn from(entry: PrimitiveEntry) -> Self {
        TypeEntry::Primitive(entry)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<InterfaceEntry> for TypeEntry {
    fn from(entry: InterfaceEntry) -> Self {
        TypeEntry::Interface(entry)
    }
}

impl From<EnumEntry> for TypeEntry {
    fn from(entry: EnumEntry) -> Self {
        TypeEntry::Enum(entry)
    }
}
