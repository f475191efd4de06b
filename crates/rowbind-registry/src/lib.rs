//! Type registry for rowbind.
//!
//! The [`TypeRegistry`] is the single source of truth for the type universe:
//! which types exist, how they relate, and which constructors they declare.

mod registry;

pub use registry::{SuperclassChain, TypeRegistry};

// Re-exported so callers can build entries without depending on core directly.
pub use rowbind_core::{
    ClassEntry, ConstructorEntry, EnumEntry, InterfaceEntry, ParamEntry, RegistrationError,
    TypeEntry, TypeHash, builtins,
};
