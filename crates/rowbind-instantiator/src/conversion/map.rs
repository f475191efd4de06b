//! Conversion registry keyed by boxed source type.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use rowbind_core::{TypeHash, wrap};
use rowbind_registry::TypeRegistry;

use super::TypeConversion;

/// All registered conversions, grouped by the boxed form of their source.
///
/// Lists keep registration order. The map only grows; there is no removal.
#[derive(Debug, Default, Clone)]
pub struct ConversionMap {
    by_source: FxHashMap<TypeHash, Vec<TypeConversion>>,
}

impl ConversionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion under `wrap(conversion.source())`.
    ///
    /// Duplicates are allowed; the newest registration shadows older ones
    /// during lookup.
    pub fn register(&mut self, conversion: TypeConversion) {
        let key = wrap(conversion.source());
        debug!(source = %key, target = %conversion.target(), "registered conversion");
        self.by_source.entry(key).or_default().push(conversion);
    }

    /// Total number of registered conversions.
    pub fn len(&self) -> usize {
        self.by_source.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Find the conversion to use for turning a `source` value into `target`.
    ///
    /// Walks `wrap(source)` and its superclasses, stopping at the first class
    /// with an applicable conversion, then falls back to the interfaces
    /// declared directly on `source`. Identity is never synthesized: with no
    /// registered conversion this returns `None` even when `source == target`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn find_conversion(
        &self,
        types: &TypeRegistry,
        source: TypeHash,
        target: TypeHash,
    ) -> Option<&TypeConversion> {
        for class in types.superclass_chain(wrap(source)) {
            if let Some(found) = self.find_declared(types, class, target) {
                trace!(source = %source, via = %class, target = %target, "conversion found");
                return Some(found);
            }
        }

        types
            .interfaces(source)
            .iter()
            .find_map(|&interface| self.find_declared(types, interface, target))
    }

    /// Newest applicable conversion registered directly for `source`.
    fn find_declared(
        &self,
        types: &TypeRegistry,
        source: TypeHash,
        target: TypeHash,
    ) -> Option<&TypeConversion> {
        self.by_source.get(&source).and_then(|conversions| {
            conversions
                .iter()
                .rev()
                .find(|c| types.is_assignable_by_boxing(target, c.target()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::{
        ClassEntry, ConversionError, InterfaceEntry, ObjectRef, Value, builtins,
    };

    fn constant(source: TypeHash, target: TypeHash, text: &'static str) -> TypeConversion {
        TypeConversion::new(source, target, move |_| Ok(Value::String(text.to_string())))
    }

    fn apply(conversion: Option<&TypeConversion>) -> Value {
        conversion
            .expect("conversion")
            .convert(&Value::Null)
            .unwrap()
    }

    #[test]
    fn identity_is_not_synthesized() {
        let types = TypeRegistry::with_builtins();
        let map = ConversionMap::new();
        assert!(map.find_conversion(&types, builtins::STRING, builtins::STRING).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn registered_identity_is_found() {
        let types = TypeRegistry::with_builtins();
        let mut map = ConversionMap::new();
        map.register(constant(builtins::STRING, builtins::STRING, "trimmed"));
        assert_eq!(
            apply(map.find_conversion(&types, builtins::STRING, builtins::STRING)),
            Value::String("trimmed".into())
        );
    }

    #[test]
    fn later_registration_wins() {
        let types = TypeRegistry::with_builtins();
        let mut map = ConversionMap::new();
        map.register(constant(builtins::INT32_BOX, builtins::STRING, "first"));
        map.register(constant(builtins::INT32_BOX, builtins::STRING, "second"));
        assert_eq!(map.len(), 2);
        assert_eq!(
            apply(map.find_conversion(&types, builtins::INT32_BOX, builtins::STRING)),
            Value::String("second".into())
        );
    }

    #[test]
    fn primitive_and_boxed_sources_share_a_key() {
        let types = TypeRegistry::with_builtins();
        let mut map = ConversionMap::new();
        map.register(constant(builtins::INT32, builtins::STRING, "prim"));
        let found = map.find_conversion(&types, builtins::INT32_BOX, builtins::STRING);
        assert_eq!(apply(found), Value::String("prim".into()));
        let found = map.find_conversion(&types, builtins::INT32, builtins::STRING);
        assert_eq!(apply(found), Value::String("prim".into()));
    }

    #[test]
    fn target_matches_with_boxing() {
        let types = TypeRegistry::with_builtins();
        let mut map = ConversionMap::new();
        map.register(constant(builtins::STRING, builtins::INT64_BOX, "boxed"));
        assert!(map.find_conversion(&types, builtins::STRING, builtins::INT64).is_some());
        assert!(map.find_conversion(&types, builtins::STRING, builtins::NUMBER).is_some());
        assert!(map.find_conversion(&types, builtins::STRING, builtins::INT32).is_none());
    }

    #[test]
    fn walks_superclass_chain() {
        let mut types = TypeRegistry::with_builtins();
        let a = ClassEntry::new("A");
        let a_hash = a.type_hash;
        types.register_type(a.into()).unwrap();
        let b = ClassEntry::new("B").with_base(a_hash);
        let b_hash = b.type_hash;
        types.register_type(b.into()).unwrap();
        let c = ClassEntry::new("C").with_base(b_hash);
        let c_hash = c.type_hash;
        types.register_type(c.into()).unwrap();

        let mut map = ConversionMap::new();
        map.register(constant(a_hash, builtins::STRING, "from A"));
        assert_eq!(
            apply(map.find_conversion(&types, c_hash, builtins::STRING)),
            Value::String("from A".into())
        );

        // The closest ancestor wins even when registered earlier.
        let mut map = ConversionMap::new();
        map.register(constant(b_hash, builtins::STRING, "from B"));
        map.register(constant(a_hash, builtins::STRING, "from A"));
        assert_eq!(
            apply(map.find_conversion(&types, c_hash, builtins::STRING)),
            Value::String("from B".into())
        );
    }

    #[test]
    fn falls_back_to_declared_interfaces() {
        let mut types = TypeRegistry::with_builtins();
        let named = InterfaceEntry::new("Named");
        let named_hash = named.type_hash;
        types.register_type(named.into()).unwrap();
        let base = ClassEntry::new("Base").with_interface(named_hash);
        let base_hash = base.type_hash;
        types.register_type(base.into()).unwrap();
        let derived = ClassEntry::new("Derived").with_base(base_hash);
        let derived_hash = derived.type_hash;
        types.register_type(derived.into()).unwrap();

        let mut map = ConversionMap::new();
        map.register(TypeConversion::new(named_hash, builtins::STRING, |value| {
            match value {
                Value::Object(o) => Ok(Value::String(format!("{:?}", o.type_hash()))),
                _ => Err(ConversionError::custom("not an object")),
            }
        }));

        let found = map
            .find_conversion(&types, base_hash, builtins::STRING)
            .expect("declared interface");
        let object = Value::Object(ObjectRef::new(base_hash, ()));
        assert!(found.convert(&object).is_ok());

        // Interfaces of ancestors are not consulted.
        assert!(map.find_conversion(&types, derived_hash, builtins::STRING).is_none());
    }

    #[test]
    fn unrelated_target_is_none() {
        let types = TypeRegistry::with_builtins();
        let mut map = ConversionMap::new();
        map.register(constant(builtins::STRING, builtins::DATE, "date"));
        assert!(map.find_conversion(&types, builtins::STRING, builtins::TIMESTAMP).is_none());
        assert!(map.find_conversion(&types, builtins::BOOL, builtins::DATE).is_none());
    }
}
