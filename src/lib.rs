//! Turn typed rows into application objects.
//!
//! rowbind takes a row shape (a [`NamedTypeList`] of column names and
//! types), a row of [`Value`]s and a target type, picks the public
//! constructor of the target that fits the columns best, coerces the values
//! it has to, and builds the instance.
//!
//! ```
//! use rowbind::prelude::*;
//!
//! let engine = Engine::new();
//! let mood = engine.register_enum("Mood", ["SAD", "HAPPY"]).unwrap();
//!
//! let columns = NamedTypeList::builder(1).add("mood", builtins::STRING).build();
//! let value = engine
//!     .instantiate(mood, &columns, &[Value::String("HAPPY".into())])
//!     .unwrap();
//!
//! let Value::Enum(constant) = value else { unreachable!() };
//! assert_eq!(constant.name(), "HAPPY");
//! ```
//!
//! The building blocks live in their own crates and are re-exported here:
//!
//! - `rowbind-core`: type identities, values and entries
//! - `rowbind-registry`: the [`TypeRegistry`]
//! - `rowbind-instantiator`: [`ConversionMap`] and [`InstantiatorRegistry`]

mod class_builder;
mod engine;
mod properties;

pub use class_builder::ClassBuilder;
pub use engine::Engine;
pub use properties::{EngineProperties, EngineProperty, PropertiesError};

pub use rowbind_core::{
    ClassEntry, ConstructorArgs, ConstructorEntry, ConversionError, EnumEntry, EnumValue,
    FromValue, InstantiationError, InterfaceEntry, IntoValue, NamedTypeList, NamedTypeListBuilder,
    NativeError, ObjectRef, ParamEntry, PrimitiveKind, RegistrationError, TypeEntry, TypeFlags,
    TypeHash, Value, Visibility, builtins,
};
pub use rowbind_instantiator::{
    AssignmentCost, ConversionMap, InstantiationContext, Instantiator, InstantiatorRegistry,
    TieBreak, TypeConversion, TypedConversion,
};
pub use rowbind_registry::TypeRegistry;

/// Common imports.
pub mod prelude {
    pub use crate::{
        ClassBuilder, ConstructorArgs, ConversionError, Engine, EngineProperties, EngineProperty,
        EnumValue, FromValue, InstantiationError, IntoValue, NamedTypeList, NativeError, ObjectRef,
        TypeConversion, TypeHash, Value, builtins,
    };
}
