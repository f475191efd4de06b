//! Type entries stored in a type registry.

mod class;
mod constructor;
mod enum_entry;
mod interface;
mod primitive;
mod type_entry;

pub use class::ClassEntry;
pub use constructor::{ConstructorArgs, ConstructorEntry, NativeConstructor, ParamEntry};
pub use enum_entry::EnumEntry;
pub use interface::InterfaceEntry;
pub use primitive::PrimitiveEntry;
pub use type_entry::TypeEntry;
