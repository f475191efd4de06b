//! Core types for rowbind.
//!
//! This crate holds everything the registry and the resolver share:
//!
//! - [`TypeHash`] and the [`builtins`] type universe
//! - [`PrimitiveKind`] with the [`wrap`]/[`unwrap`] boxing functions
//! - the runtime [`Value`] and the [`FromValue`]/[`IntoValue`] traits
//! - [`NamedTypeList`], the column descriptors of one row shape
//! - type entries ([`ClassEntry`], [`EnumEntry`], ...) and [`ConstructorEntry`]
//! - the error types

pub mod convert;
pub mod entries;
pub mod error;
mod named_type_list;
mod type_hash;
pub mod types;
mod value;

pub use convert::{FromValue, IntoValue};
pub use entries::{
    ClassEntry, ConstructorArgs, ConstructorEntry, EnumEntry, InterfaceEntry, NativeConstructor,
    ParamEntry, PrimitiveEntry, TypeEntry,
};
pub use error::{ConversionError, InstantiationError, NativeError, RegistrationError};
pub use named_type_list::{NamedTypeList, NamedTypeListBuilder};
pub use type_hash::{TypeHash, builtins};
pub use types::{PrimitiveKind, TypeFlags, Visibility, is_primitive, unwrap, wrap};
pub use value::{EnumValue, ObjectRef, Value};
