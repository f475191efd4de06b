//! Class type entry.

use crate::{TypeFlags, TypeHash, builtins};

use super::ConstructorEntry;

/// Registry entry for a class type.
///
/// Every class except the root `Object` has a superclass; a class declared
/// without one extends `Object`.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Type name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Base class type hash. `None` only for the root class.
    pub base_class: Option<TypeHash>,
    /// Directly implemented interfaces, in declaration order.
    pub interfaces: Vec<TypeHash>,
    /// Constructors, in declaration order.
    pub constructors: Vec<ConstructorEntry>,
    /// Modifiers.
    pub flags: TypeFlags,
}

impl ClassEntry {
    /// Create a class entry extending `Object`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            base_class: Some(builtins::OBJECT),
            interfaces: Vec::new(),
            constructors: Vec::new(),
            flags: TypeFlags::empty(),
        }
    }

    /// Create the root class entry.
    pub fn root(name: impl Into<String>) -> Self {
        let mut entry = Self::new(name);
        entry.base_class = None;
        entry
    }

    // === Builder Methods ===

    /// Set the base class.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.base_class = Some(base);
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: TypeHash) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a constructor.
    pub fn with_constructor(mut self, constructor: ConstructorEntry) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add modifier flags.
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(self) -> Self {
        self.with_flags(TypeFlags::ABSTRACT)
    }

    /// Mark as final.
    pub fn as_final(self) -> Self {
        self.with_flags(TypeFlags::FINAL)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(TypeFlags::ABSTRACT)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(TypeFlags::FINAL)
    }
}
