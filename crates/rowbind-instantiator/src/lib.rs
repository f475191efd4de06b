//! Conversion lookup and constructor resolution for rowbind.
//!
//! Two pieces live here:
//!
//! - [`ConversionMap`]: registered [`TypeConversion`]s and the hierarchy
//!   walk that picks one for a `(source, target)` pair
//! - [`InstantiatorRegistry`]: cost-based selection of the constructor that
//!   best fits a row's column types
//!
//! Both read the type universe from a [`TypeRegistry`]. Callers bundle the
//! registry and the conversions into an [`InstantiationContext`].

pub mod conversion;
pub mod instantiator;

use rowbind_registry::TypeRegistry;

pub use conversion::{
    ConversionFn, ConversionMap, TypeConversion, TypedConversion, convert,
    register_default_conversions,
};
pub use instantiator::{
    AssignmentCost, Instantiator, InstantiatorRegistry, TieBreak, assignment_cost,
};

/// Borrowed view of everything needed to resolve and run instantiators.
#[derive(Debug, Clone, Copy)]
pub struct InstantiationContext<'a> {
    pub types: &'a TypeRegistry,
    pub conversions: &'a ConversionMap,
}

impl<'a> InstantiationContext<'a> {
    pub fn new(types: &'a TypeRegistry, conversions: &'a ConversionMap) -> Self {
        Self { types, conversions }
    }
}
