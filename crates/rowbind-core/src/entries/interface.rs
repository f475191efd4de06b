//! Interface type entry.

use crate::TypeHash;

/// Registry entry for an interface type.
///
/// Interfaces have no superclass and no constructors; they may extend other
/// interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub name: String,
    pub type_hash: TypeHash,
    /// Extended interfaces, in declaration order.
    pub bases: Vec<TypeHash>,
}

impl InterfaceEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let type_hash = TypeHash::from_name(&name);
        Self {
            name,
            type_hash,
            bases: Vec::new(),
        }
    }

    /// Add an extended interface.
    pub fn with_base(mut self, base: TypeHash) -> Self {
        self.bases.push(base);
        self
    }
}
