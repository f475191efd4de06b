//! Small descriptor types shared by the type entries.

mod primitive_kind;
mod type_flags;
mod visibility;

pub use primitive_kind::{PrimitiveKind, is_primitive, unwrap, wrap};
pub use type_flags::TypeFlags;
pub use visibility::Visibility;
