//! The rowbind engine.
//!
//! [`Engine`] owns the type registry, the conversion map and the instantiator
//! memo, and is the surface callers use to register types and turn rows into
//! objects.
//!
//! # Thread Safety
//!
//! Every method takes `&self`. The registries sit behind `RwLock`s, so an
//! engine can be shared across threads (typically in an `Arc`) and
//! registration may happen while other threads resolve and instantiate.
//! Locks are always taken in the order types, conversions, memo, properties.

use std::any::{Any, type_name};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use rowbind_core::{
    ConversionError, EnumEntry, FromValue, InstantiationError, IntoValue, NamedTypeList,
    RegistrationError, TypeEntry, TypeFlags, TypeHash, Value,
};
use rowbind_instantiator::{
    ConversionMap, InstantiationContext, Instantiator, InstantiatorRegistry, TypeConversion,
    convert, register_default_conversions,
};
use rowbind_registry::TypeRegistry;

use crate::class_builder::ClassBuilder;
use crate::properties::{EngineProperties, EngineProperty};

type MemoKey = (TypeHash, NamedTypeList);

/// Registration and instantiation entry point.
///
/// ```
/// use rowbind::{Engine, NamedTypeList, Value, builtins};
///
/// struct Department { id: i32, name: String }
///
/// let engine = Engine::new();
/// let department = engine
///     .register_class::<Department>("Department")
///     .constructor(&[("id", builtins::INT32), ("name", builtins::STRING)], |args| {
///         Ok(Department { id: args.get(0)?, name: args.get(1)? })
///     })
///     .build()
///     .unwrap();
///
/// let columns = NamedTypeList::builder(2)
///     .add("id", builtins::INT32)
///     .add("name", builtins::STRING)
///     .build();
/// let dept = engine
///     .instantiate_as::<Department>(
///         department,
///         &columns,
///         &[Value::Int32(7), Value::String("foo".into())],
///     )
///     .unwrap();
///
/// assert_eq!(dept.id, 7);
/// assert_eq!(dept.name, "foo");
/// ```
pub struct Engine {
    types: RwLock<TypeRegistry>,
    conversions: RwLock<ConversionMap>,
    properties: RwLock<EngineProperties>,
    memo: RwLock<FxHashMap<MemoKey, Arc<Instantiator>>>,
}

impl Engine {
    /// Create an engine with default properties.
    pub fn new() -> Self {
        Self::with_properties(EngineProperties::default())
    }

    /// Create an engine with the given properties.
    pub fn with_properties(properties: EngineProperties) -> Self {
        let types = TypeRegistry::with_builtins();
        let mut conversions = ConversionMap::new();
        if properties.register_default_conversions {
            register_default_conversions(&mut conversions);
        }
        debug!(
            types = types.type_count(),
            conversions = conversions.len(),
            "engine created"
        );
        Self {
            types: RwLock::new(types),
            conversions: RwLock::new(conversions),
            properties: RwLock::new(properties),
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    // ==========================================================================
    // Properties
    // ==========================================================================

    pub fn properties(&self) -> EngineProperties {
        *self.properties.read()
    }

    pub fn get_property(&self, property: EngineProperty) -> usize {
        self.properties.read().get(property)
    }

    /// Change a property.
    ///
    /// Resolution-affecting changes drop memoized instantiators.
    /// `RegisterDefaultConversions` only has an effect at construction.
    pub fn set_property(&self, property: EngineProperty, value: usize) {
        // Memo before properties, matching the order `resolve` memoizes in.
        let mut memo = self.memo.write();
        self.properties.write().set(property, value);
        if property != EngineProperty::RegisterDefaultConversions {
            memo.clear();
        }
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type entry.
    pub fn register_type(
        &self,
        entry: impl Into<TypeEntry>,
    ) -> Result<TypeHash, RegistrationError> {
        let entry = entry.into();
        let hash = entry.type_hash();
        let mut types = self.types.write();
        types.register_type(entry)?;
        self.memo.write().clear();
        Ok(hash)
    }

    /// Start registering a class whose instances are `T`.
    pub fn register_class<T>(&self, name: impl Into<String>) -> ClassBuilder<'_, T>
    where
        T: Any + Send + Sync,
    {
        ClassBuilder::new(self, name)
    }

    /// Register an enum with the given constants, in ordinal order.
    pub fn register_enum<S: Into<Arc<str>>>(
        &self,
        name: impl Into<String>,
        constants: impl IntoIterator<Item = S>,
    ) -> Result<TypeHash, RegistrationError> {
        self.register_type(EnumEntry::new(name).with_values(constants))
    }

    /// Register a conversion.
    pub fn register_conversion(&self, conversion: TypeConversion) {
        let mut conversions = self.conversions.write();
        conversions.register(conversion);
        self.memo.write().clear();
    }

    /// Register a conversion from a typed function.
    pub fn register_conversion_fn<S, T, F>(&self, source: TypeHash, target: TypeHash, function: F)
    where
        S: FromValue,
        T: IntoValue,
        F: Fn(S) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        self.register_conversion(TypeConversion::from_fn(source, target, function));
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn type_hash(&self, name: &str) -> Option<TypeHash> {
        self.types.read().type_hash(name)
    }

    pub fn type_name(&self, hash: TypeHash) -> Option<String> {
        self.types.read().get(hash).map(|e| e.name().to_string())
    }

    /// Number of memoized instantiators.
    pub fn cached_instantiators(&self) -> usize {
        self.memo.read().len()
    }

    // ==========================================================================
    // Conversion
    // ==========================================================================

    /// Convert a single value to `target`.
    pub fn convert(&self, value: Value, target: TypeHash) -> Result<Value, InstantiationError> {
        self.with_context(|ctx| convert(ctx, value, target))
    }

    /// Convert a single value to `target` and extract it as `T`.
    pub fn convert_as<T: FromValue>(
        &self,
        value: Value,
        target: TypeHash,
    ) -> Result<T, InstantiationError> {
        let converted = self.convert(value, target)?;
        Ok(T::from_value(&converted)?)
    }

    // ==========================================================================
    // Instantiation
    // ==========================================================================

    /// Resolve the instantiator for `target` and `columns`.
    pub fn find_instantiator(
        &self,
        target: TypeHash,
        columns: &NamedTypeList,
    ) -> Result<Arc<Instantiator>, InstantiationError> {
        self.with_context(|ctx| self.resolve(ctx, target, columns))
    }

    /// Build one value of type `target` from a row.
    ///
    /// A single column mapped to a scalar type is converted directly instead
    /// of going through constructor resolution.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn instantiate(
        &self,
        target: TypeHash,
        columns: &NamedTypeList,
        values: &[Value],
    ) -> Result<Value, InstantiationError> {
        self.with_context(|ctx| {
            if let Some(single) = scalar_row(ctx, target, columns, values)? {
                return convert(ctx, single.clone(), target);
            }
            let instantiator = self.resolve(ctx, target, columns)?;
            instantiator.instantiate(ctx, values)
        })
    }

    /// Build one instance and take it as `T`.
    pub fn instantiate_as<T: Any + Send + Sync>(
        &self,
        target: TypeHash,
        columns: &NamedTypeList,
        values: &[Value],
    ) -> Result<Arc<T>, InstantiationError> {
        downcast(self.instantiate(target, columns, values)?)
    }

    /// Build one value per row, resolving the instantiator once.
    ///
    /// Rows are processed in order and the first failure stops the mapping.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn map_rows<R: AsRef<[Value]>>(
        &self,
        target: TypeHash,
        columns: &NamedTypeList,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Vec<Value>, InstantiationError> {
        self.with_context(|ctx| {
            let rows = rows.into_iter();
            let mut out = Vec::with_capacity(rows.size_hint().0);

            if is_scalar(ctx, target) && columns.len() == 1 {
                for row in rows {
                    let value = single_value(row.as_ref())?;
                    out.push(convert(ctx, value.clone(), target)?);
                }
                return Ok(out);
            }

            let instantiator = self.resolve(ctx, target, columns)?;
            for row in rows {
                out.push(instantiator.instantiate(ctx, row.as_ref())?);
            }
            debug!(type_name = instantiator.type_name(), rows = out.len(), "mapped rows");
            Ok(out)
        })
    }

    /// Map two-column rows to ordered key/value pairs.
    ///
    /// Column 0 is converted to `key_type` and column 1 to `value_type`.
    /// Any other row shape is rejected; the first failure stops the mapping.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn map_entries<R: AsRef<[Value]>>(
        &self,
        key_type: TypeHash,
        value_type: TypeHash,
        columns: &NamedTypeList,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Vec<(Value, Value)>, InstantiationError> {
        if columns.len() != 2 {
            return Err(InstantiationError::ValueCountMismatch {
                expected: 2,
                actual: columns.len(),
            });
        }
        self.with_context(|ctx| {
            let rows = rows.into_iter();
            let mut out = Vec::with_capacity(rows.size_hint().0);
            for row in rows {
                let [key, value] = row.as_ref() else {
                    return Err(InstantiationError::ValueCountMismatch {
                        expected: 2,
                        actual: row.as_ref().len(),
                    });
                };
                out.push((
                    convert(ctx, key.clone(), key_type)?,
                    convert(ctx, value.clone(), value_type)?,
                ));
            }
            debug!(entries = out.len(), "mapped entries");
            Ok(out)
        })
    }

    /// Like [`Engine::map_rows`], taking every instance as `T`.
    pub fn map_rows_as<T: Any + Send + Sync, R: AsRef<[Value]>>(
        &self,
        target: TypeHash,
        columns: &NamedTypeList,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Vec<Arc<T>>, InstantiationError> {
        self.map_rows(target, columns, rows)?
            .into_iter()
            .map(downcast)
            .collect()
    }

    // ==========================================================================
    // Internals
    // ==========================================================================

    fn with_context<R>(&self, f: impl FnOnce(&InstantiationContext<'_>) -> R) -> R {
        let types = self.types.read();
        let conversions = self.conversions.read();
        f(&InstantiationContext::new(&types, &conversions))
    }

    fn resolve(
        &self,
        ctx: &InstantiationContext<'_>,
        target: TypeHash,
        columns: &NamedTypeList,
    ) -> Result<Arc<Instantiator>, InstantiationError> {
        let properties = self.properties();
        let key = (target, columns.clone());
        if properties.cache_instantiators {
            if let Some(found) = self.memo.read().get(&key) {
                return Ok(Arc::clone(found));
            }
        }

        // The resolver carries nothing but the tie-break policy.
        let resolver = InstantiatorRegistry::with_tie_break(properties.tie_break());
        let instantiator = Arc::new(resolver.find_instantiator(ctx, target, columns)?);
        if properties.cache_instantiators {
            // Registrations are excluded by the registry read locks callers
            // hold. Property changes are not, so only memoize if the
            // properties this was resolved under are still current.
            let mut memo = self.memo.write();
            if *self.properties.read() == properties {
                memo.insert(key, Arc::clone(&instantiator));
            }
        }
        Ok(instantiator)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("types", &self.types.read().type_count())
            .field("conversions", &self.conversions.read().len())
            .field("properties", &*self.properties.read())
            .finish_non_exhaustive()
    }
}

/// Primitives and built-in classes are converted, not constructed.
fn is_scalar(ctx: &InstantiationContext<'_>, target: TypeHash) -> bool {
    match ctx.types.get(target) {
        Some(TypeEntry::Primitive(_)) => true,
        Some(TypeEntry::Class(class)) => class.flags.contains(TypeFlags::BUILTIN),
        _ => false,
    }
}

fn scalar_row<'v>(
    ctx: &InstantiationContext<'_>,
    target: TypeHash,
    columns: &NamedTypeList,
    values: &'v [Value],
) -> Result<Option<&'v Value>, InstantiationError> {
    if columns.len() != 1 || !is_scalar(ctx, target) {
        return Ok(None);
    }
    single_value(values).map(Some)
}

fn single_value(values: &[Value]) -> Result<&Value, InstantiationError> {
    match values {
        [value] => Ok(value),
        _ => Err(InstantiationError::ValueCountMismatch {
            expected: 1,
            actual: values.len(),
        }),
    }
}

fn downcast<T: Any + Send + Sync>(value: Value) -> Result<Arc<T>, InstantiationError> {
    let mismatch = |actual: &'static str| {
        InstantiationError::Conversion(ConversionError::TypeMismatch {
            expected: type_name::<T>(),
            actual,
        })
    };
    match value {
        Value::Object(object) => object.downcast::<T>().map_err(|_| mismatch("object")),
        other => Err(mismatch(other.type_name())),
    }
}
