//! Constructor resolution.
//!
//! [`InstantiatorRegistry::find_instantiator`] scores every public
//! constructor of a target type against a [`NamedTypeList`] and binds the
//! cheapest one into an [`Instantiator`].
//!
//! ## Algorithm
//!
//! 1. Skip constructors that are not public or whose arity differs from the
//!    column count
//! 2. Score each parameter against its column with [`assignment_cost`]; a
//!    single unassignable column rejects the constructor
//! 3. Sum the parameter costs
//! 4. Keep the candidate with the strictly smallest total
//!
//! Equal totals are settled by [`TieBreak`].

use std::fmt;

use tracing::{debug, trace, warn};

use rowbind_core::{
    ConstructorEntry, ConversionError, InstantiationError, NamedTypeList, NativeError, TypeHash,
    Value,
};

use crate::InstantiationContext;
use crate::conversion::coerce;

mod cost;

pub use cost::{AssignmentCost, assignment_cost};

/// How equal-cost constructors are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep the constructor declared first.
    #[default]
    DeclarationOrder,
    /// Fail with [`InstantiationError::AmbiguousConstructor`].
    RejectAmbiguous,
}

/// Resolves constructors for target types.
///
/// Holds no state besides its tie-break policy; the type universe and the
/// conversions come in through the [`InstantiationContext`].
#[derive(Debug, Clone, Default)]
pub struct InstantiatorRegistry {
    tie_break: TieBreak,
}

struct Candidate<'a> {
    index: usize,
    constructor: &'a ConstructorEntry,
    param_costs: Vec<AssignmentCost>,
    cost: u32,
}

impl InstantiatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Find the cheapest public constructor of `target` for `columns`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn find_instantiator(
        &self,
        ctx: &InstantiationContext<'_>,
        target: TypeHash,
        columns: &NamedTypeList,
    ) -> Result<Instantiator, InstantiationError> {
        let entry = ctx
            .types
            .get(target)
            .ok_or_else(|| InstantiationError::UnknownType(ctx.types.name_of(target)))?;
        let type_name = entry.name().to_string();

        let mut best: Option<Candidate<'_>> = None;
        let mut tied: Vec<&ConstructorEntry> = Vec::new();

        for (index, constructor) in entry.constructors().iter().enumerate() {
            if !constructor.is_public() {
                trace!(type_name = %type_name, index, "skipping non-public constructor");
                continue;
            }
            let Some(param_costs) = score(ctx, constructor, columns) else {
                trace!(type_name = %type_name, index, "constructor does not match");
                continue;
            };
            let cost: u32 = param_costs.iter().map(|c| c.cost()).sum();
            trace!(type_name = %type_name, index, cost, "scored constructor");

            let replace = match &best {
                Some(current) if cost == current.cost => {
                    tied.push(constructor);
                    false
                }
                Some(current) => cost < current.cost,
                None => true,
            };
            if replace {
                tied.clear();
                best = Some(Candidate {
                    index,
                    constructor,
                    param_costs,
                    cost,
                });
            }
        }

        let Some(best) = best else {
            return Err(InstantiationError::NoMatchingConstructor {
                type_name,
                columns: columns.describe(|ty| ctx.types.name_of(ty)),
            });
        };

        if !tied.is_empty() {
            let candidates = std::iter::once(best.constructor)
                .chain(tied.iter().copied())
                .map(|c| signature(ctx, &type_name, c))
                .collect::<Vec<_>>()
                .join(", ");
            match self.tie_break {
                TieBreak::DeclarationOrder => {
                    warn!(
                        type_name = %type_name,
                        cost = best.cost,
                        candidates = %candidates,
                        "equal-cost constructors, keeping the first declared"
                    );
                }
                TieBreak::RejectAmbiguous => {
                    return Err(InstantiationError::AmbiguousConstructor {
                        type_name,
                        cost: best.cost,
                        candidates,
                    });
                }
            }
        }

        debug!(
            type_name = %type_name,
            constructor = best.index,
            cost = best.cost,
            "resolved instantiator"
        );

        Ok(Instantiator {
            target,
            type_name,
            constructor: best.constructor.clone(),
            param_costs: best.param_costs,
            cost: best.cost,
        })
    }
}

/// Per-parameter costs, or `None` if any column cannot be assigned.
fn score(
    ctx: &InstantiationContext<'_>,
    constructor: &ConstructorEntry,
    columns: &NamedTypeList,
) -> Option<Vec<AssignmentCost>> {
    if constructor.arity() != columns.len() {
        return None;
    }
    constructor
        .param_types()
        .zip(columns.types())
        .map(|(param, column)| assignment_cost(ctx.types, param, column))
        .collect()
}

fn signature(
    ctx: &InstantiationContext<'_>,
    type_name: &str,
    constructor: &ConstructorEntry,
) -> String {
    let params: Vec<_> = constructor
        .param_types()
        .map(|ty| ctx.types.name_of(ty))
        .collect();
    format!("{type_name}({})", params.join(", "))
}

/// A resolved constructor bound to one column signature.
///
/// Instantiators are immutable and can be shared across threads and reused
/// for every row of the same shape.
#[derive(Debug, Clone)]
pub struct Instantiator {
    target: TypeHash,
    type_name: String,
    constructor: ConstructorEntry,
    param_costs: Vec<AssignmentCost>,
    cost: u32,
}

impl Instantiator {
    /// Total cost of the bound constructor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Cost of each parameter, in order.
    pub fn param_costs(&self) -> &[AssignmentCost] {
        &self.param_costs
    }

    pub fn target(&self) -> TypeHash {
        self.target
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constructor(&self) -> &ConstructorEntry {
        &self.constructor
    }

    /// Build one instance from a row of values.
    ///
    /// Values for parameters that were not an exact match are coerced to
    /// the declared parameter type first.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn instantiate(
        &self,
        ctx: &InstantiationContext<'_>,
        values: &[Value],
    ) -> Result<Value, InstantiationError> {
        if values.len() != self.constructor.arity() {
            return Err(InstantiationError::ValueCountMismatch {
                expected: self.constructor.arity(),
                actual: values.len(),
            });
        }

        let mut args = Vec::with_capacity(values.len());
        for (index, ((value, param), cost)) in values
            .iter()
            .zip(&self.constructor.params)
            .zip(&self.param_costs)
            .enumerate()
        {
            if cost.is_exact() {
                args.push(value.clone());
                continue;
            }
            let coerced = coerce(ctx, value.clone(), param.type_hash).and_then(|v| {
                v.ok_or_else(|| {
                    ConversionError::custom(format!(
                        "no conversion from {} to {}",
                        value
                            .runtime_type()
                            .map_or_else(|| "null".to_string(), |t| ctx.types.name_of(t)),
                        ctx.types.name_of(param.type_hash)
                    ))
                })
            });
            match coerced {
                Ok(v) => args.push(v),
                Err(source) => {
                    return Err(InstantiationError::ConstructionFailure {
                        type_name: self.type_name.clone(),
                        index: Some(index),
                        parameter: Some(param.name.clone()),
                        source: source.into(),
                    });
                }
            }
        }

        self.constructor.invoke(&args).map_err(|source| {
            let (index, parameter) = match &source {
                NativeError::Argument { index, name, .. } => (Some(*index), Some(name.clone())),
                _ => (None, None),
            };
            InstantiationError::ConstructionFailure {
                type_name: self.type_name.clone(),
                index,
                parameter,
                source,
            }
        })
    }
}

impl fmt::Display for Instantiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.type_name, self.cost)
    }
}
