//! Assignment cost model.
//!
//! Each constructor parameter is scored against its column type. The first
//! matching rule decides the score:
//!
//! | rule | cost |
//! |---|---|
//! | same type | 0 |
//! | column is a subtype of the parameter | 1 |
//! | boxed column is a subtype of the parameter | 100 |
//! | unboxed column is a subtype of the parameter | 101 |
//! | parameter is an enum | 200 |
//!
//! Anything else does not match.

use std::fmt;

use rowbind_core::{TypeHash, unwrap, wrap};
use rowbind_registry::TypeRegistry;

/// How a column type is assigned to a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssignmentCost {
    Same,
    Subtype,
    Boxing,
    Unboxing,
    Enum,
}

impl AssignmentCost {
    pub const COST_SAME: u32 = 0;
    pub const COST_SUBTYPE: u32 = 1;
    pub const COST_BOXING: u32 = 100;
    pub const COST_UNBOXING: u32 = 101;
    pub const COST_ENUM: u32 = 200;

    /// Numeric cost of this assignment.
    pub const fn cost(self) -> u32 {
        match self {
            AssignmentCost::Same => Self::COST_SAME,
            AssignmentCost::Subtype => Self::COST_SUBTYPE,
            AssignmentCost::Boxing => Self::COST_BOXING,
            AssignmentCost::Unboxing => Self::COST_UNBOXING,
            AssignmentCost::Enum => Self::COST_ENUM,
        }
    }

    /// Whether the value can be passed to the constructor unchanged.
    pub const fn is_exact(self) -> bool {
        matches!(self, AssignmentCost::Same)
    }
}

impl fmt::Display for AssignmentCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssignmentCost::Same => "same",
            AssignmentCost::Subtype => "subtype",
            AssignmentCost::Boxing => "boxing",
            AssignmentCost::Unboxing => "unboxing",
            AssignmentCost::Enum => "enum",
        };
        write!(f, "{name} ({})", self.cost())
    }
}

/// Score assigning a `source` column to a `target` parameter.
///
/// Returns `None` when the column cannot be assigned.
pub fn assignment_cost(
    types: &TypeRegistry,
    target: TypeHash,
    source: TypeHash,
) -> Option<AssignmentCost> {
    if target == source {
        Some(AssignmentCost::Same)
    } else if types.is_subtype(target, source) {
        Some(AssignmentCost::Subtype)
    } else if types.is_subtype(target, wrap(source)) {
        Some(AssignmentCost::Boxing)
    } else if types.is_subtype(target, unwrap(source)) {
        Some(AssignmentCost::Unboxing)
    } else if types.is_enum(target) {
        Some(AssignmentCost::Enum)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::{ClassEntry, EnumEntry, builtins};

    #[test]
    fn rule_order() {
        let mut types = TypeRegistry::with_builtins();
        let mood = EnumEntry::new("Mood").with_value("SAD");
        let mood_hash = mood.type_hash;
        types.register_type(mood.into()).unwrap();
        let base = ClassEntry::new("Base");
        let base_hash = base.type_hash;
        types.register_type(base.into()).unwrap();
        let derived = ClassEntry::new("Derived").with_base(base_hash);
        let derived_hash = derived.type_hash;
        types.register_type(derived.into()).unwrap();

        let cost = |target, source| assignment_cost(&types, target, source);

        assert_eq!(cost(builtins::INT32, builtins::INT32), Some(AssignmentCost::Same));
        assert_eq!(cost(base_hash, derived_hash), Some(AssignmentCost::Subtype));
        assert_eq!(cost(builtins::OBJECT, builtins::STRING), Some(AssignmentCost::Subtype));
        assert_eq!(cost(builtins::INT32_BOX, builtins::INT32), Some(AssignmentCost::Boxing));
        assert_eq!(cost(builtins::NUMBER, builtins::INT64), Some(AssignmentCost::Boxing));
        assert_eq!(cost(builtins::INT32, builtins::INT32_BOX), Some(AssignmentCost::Unboxing));
        assert_eq!(cost(mood_hash, builtins::STRING), Some(AssignmentCost::Enum));
        assert_eq!(cost(mood_hash, mood_hash), Some(AssignmentCost::Same));
        assert_eq!(cost(builtins::INT64, builtins::INT32_BOX), None);
        assert_eq!(cost(derived_hash, base_hash), None);
        assert_eq!(cost(builtins::INT32, builtins::STRING), None);
    }

    #[test]
    fn costs_are_ordered() {
        let all = [
            AssignmentCost::Same,
            AssignmentCost::Subtype,
            AssignmentCost::Boxing,
            AssignmentCost::Unboxing,
            AssignmentCost::Enum,
        ];
        assert!(all.windows(2).all(|w| w[0].cost() < w[1].cost()));
        assert_eq!(AssignmentCost::Unboxing.to_string(), "unboxing (101)");
    }
}
