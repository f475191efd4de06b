//! Type conversions.
//!
//! A [`TypeConversion`] is one registered coercion from a source type to a
//! target type. Conversions are collected in a [`ConversionMap`], which
//! resolves `(runtime source type, wanted target type)` pairs by walking the
//! source's superclass chain.
//!
//! ## Lookup Order
//!
//! For a source type `S` and target `T`:
//! 1. `wrap(S)`, then each superclass up to `Object`, scanning that class's
//!    conversions newest first
//! 2. interfaces declared directly on `S`
//! 3. nothing
//!
//! The first conversion whose target is assignable to `T` (treating a
//! primitive and its box as the same type) wins.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rowbind_core::{
    ConversionError, FromValue, InstantiationError, IntoValue, TypeHash, Value, is_primitive,
};

use crate::InstantiationContext;

mod defaults;
mod map;

pub use defaults::register_default_conversions;
pub use map::ConversionMap;

/// Dynamic conversion body.
pub type ConversionFn = Arc<dyn Fn(&Value) -> Result<Value, ConversionError> + Send + Sync>;

/// A registered coercion from `source` to `target`.
///
/// Source and target are fixed at construction; a conversion never changes
/// after registration.
#[derive(Clone)]
pub struct TypeConversion {
    source: TypeHash,
    target: TypeHash,
    function: ConversionFn,
}

impl TypeConversion {
    /// Create a conversion operating on raw values.
    pub fn new<F>(source: TypeHash, target: TypeHash, function: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, ConversionError> + Send + Sync + 'static,
    {
        Self {
            source,
            target,
            function: Arc::new(function),
        }
    }

    /// Create a conversion from a typed function.
    ///
    /// The input is extracted with [`FromValue`] and the output wrapped with
    /// [`IntoValue`].
    pub fn from_fn<S, T, F>(source: TypeHash, target: TypeHash, function: F) -> Self
    where
        S: FromValue,
        T: IntoValue,
        F: Fn(S) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        Self::new(source, target, move |value| {
            let input = S::from_value(value)?;
            function(input).map(IntoValue::into_value)
        })
    }

    pub fn source(&self) -> TypeHash {
        self.source
    }

    pub fn target(&self) -> TypeHash {
        self.target
    }

    /// Apply the conversion.
    pub fn convert(&self, value: &Value) -> Result<Value, ConversionError> {
        (self.function)(value)
    }

    /// View this conversion with static input and output types.
    ///
    /// The view shares the function; only the call-site typing changes.
    pub fn cast<S, T>(&self) -> TypedConversion<S, T>
    where
        S: IntoValue,
        T: FromValue,
    {
        TypedConversion {
            inner: self.clone(),
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for TypeConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConversion")
            .field("source", &self.source)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A [`TypeConversion`] with static input and output types.
pub struct TypedConversion<S, T> {
    inner: TypeConversion,
    _marker: PhantomData<fn(S) -> T>,
}

impl<S, T> TypedConversion<S, T>
where
    S: IntoValue,
    T: FromValue,
{
    /// Apply the conversion to a typed input.
    pub fn apply(&self, input: S) -> Result<T, ConversionError> {
        let output = self.inner.convert(&input.into_value())?;
        T::from_value(&output)
    }

    /// Re-view with different static types.
    pub fn cast<S2, T2>(self) -> TypedConversion<S2, T2>
    where
        S2: IntoValue,
        T2: FromValue,
    {
        TypedConversion {
            inner: self.inner,
            _marker: PhantomData,
        }
    }

    /// The underlying dynamic conversion.
    pub fn erased(&self) -> &TypeConversion {
        &self.inner
    }
}

impl<S, T> Clone for TypedConversion<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, T> fmt::Debug for TypedConversion<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedConversion").field(&self.inner).finish()
    }
}

/// Convert a single value to `target`.
///
/// Null stays null unless `target` is primitive. A value whose runtime type
/// is already assignable is returned unchanged; otherwise the conversion map
/// is consulted, and for enum targets the canonical name/ordinal lookup is
/// used as a last resort.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert(
    ctx: &InstantiationContext<'_>,
    value: Value,
    target: TypeHash,
) -> Result<Value, InstantiationError> {
    let source = value.runtime_type();
    match coerce(ctx, value, target)? {
        Some(converted) => Ok(converted),
        None => Err(InstantiationError::NoApplicableConversion {
            source_type: source.map_or_else(|| "null".to_string(), |s| ctx.types.name_of(s)),
            target_type: ctx.types.name_of(target),
        }),
    }
}

/// Shared coercion path of [`convert`] and constructor arguments.
///
/// `Ok(None)` means nothing applies.
pub(crate) fn coerce(
    ctx: &InstantiationContext<'_>,
    value: Value,
    target: TypeHash,
) -> Result<Option<Value>, ConversionError> {
    let Some(source) = value.runtime_type() else {
        if is_primitive(target) {
            return Err(ConversionError::NullToPrimitive {
                target: ctx.types.name_of(target),
            });
        }
        return Ok(Some(Value::Null));
    };

    if ctx.types.is_assignable_by_boxing(target, source) {
        return Ok(Some(value));
    }

    if let Some(conversion) = ctx.conversions.find_conversion(ctx.types, source, target) {
        return conversion.convert(&value).map(Some);
    }

    match ctx.types.get_enum(target) {
        Some(entry) => entry.value_of(&value).map(|e| Some(Value::Enum(e))),
        None => Ok(None),
    }
}
