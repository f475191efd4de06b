//! TypeRegistry - the type-descriptor universe.
//!
//! [`TypeRegistry`] stores every type the engine can instantiate or convert
//! between, and answers the type-relationship questions the conversion map
//! and the constructor resolver need:
//!
//! - superclass chain ([`TypeRegistry::superclass`], [`TypeRegistry::superclass_chain`])
//! - directly declared interfaces ([`TypeRegistry::interfaces`])
//! - subtype test ([`TypeRegistry::is_subtype`])
//! - boxing-aware subtype test ([`TypeRegistry::is_assignable_by_boxing`])
//! - constructor enumeration ([`TypeRegistry::constructors`])
//!
//! # Thread Safety
//!
//! `TypeRegistry` is **not thread-safe** by design. It is populated during
//! start-up and read-only afterwards; callers that register and look up
//! concurrently wrap it in a lock.
//!
//! # Example
//!
//! ```
//! use rowbind_core::{ClassEntry, builtins};
//! use rowbind_registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::with_builtins();
//! let animal = ClassEntry::new("Animal");
//! let animal_hash = animal.type_hash;
//! registry.register_type(animal.into()).unwrap();
//! registry
//!     .register_type(ClassEntry::new("Dog").with_base(animal_hash).into())
//!     .unwrap();
//!
//! let dog = registry.type_hash("Dog").unwrap();
//! assert!(registry.is_subtype(animal_hash, dog));
//! assert!(registry.is_subtype(builtins::OBJECT, dog));
//! assert!(!registry.is_subtype(dog, animal_hash));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use rowbind_core::{
    ClassEntry, ConstructorEntry, EnumEntry, InterfaceEntry, PrimitiveEntry, PrimitiveKind,
    RegistrationError, TypeEntry, TypeFlags, TypeHash, builtins, is_primitive, unwrap, wrap,
};

/// Registry of type descriptors.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Types by hash (primary storage).
    types: FxHashMap<TypeHash, TypeEntry>,
    /// Name index.
    names: FxHashMap<String, TypeHash>,
}

impl TypeRegistry {
    /// Create an empty registry.
    ///
    /// An empty registry has no root class; most callers want
    /// [`TypeRegistry::with_builtins`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in type universe.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register the built-in types.
    ///
    /// Registration is idempotent: types already present are skipped.
    pub fn register_builtins(&mut self) {
        let comparable = builtins::COMPARABLE;

        let mut entries: Vec<TypeEntry> = vec![
            ClassEntry::root("Object")
                .with_flags(TypeFlags::BUILTIN)
                .into(),
            InterfaceEntry::new("Comparable").into(),
            ClassEntry::new("Number")
                .with_flags(TypeFlags::BUILTIN | TypeFlags::ABSTRACT)
                .into(),
        ];

        for kind in PrimitiveKind::ALL {
            entries.push(PrimitiveEntry::new(kind).into());
            let base = if kind.is_numeric() {
                builtins::NUMBER
            } else {
                builtins::OBJECT
            };
            entries.push(
                ClassEntry::new(kind.boxed_name())
                    .with_base(base)
                    .with_interface(comparable)
                    .with_flags(TypeFlags::BUILTIN | TypeFlags::BOXED | TypeFlags::FINAL)
                    .into(),
            );
        }

        entries.extend([
            ClassEntry::new("Decimal")
                .with_base(builtins::NUMBER)
                .with_interface(comparable)
                .with_flags(TypeFlags::BUILTIN | TypeFlags::FINAL)
                .into(),
            ClassEntry::new("String")
                .with_interface(comparable)
                .with_flags(TypeFlags::BUILTIN | TypeFlags::FINAL)
                .into(),
            ClassEntry::new("Timestamp")
                .with_interface(comparable)
                .with_flags(TypeFlags::BUILTIN)
                .into(),
            ClassEntry::new("Date")
                .with_interface(comparable)
                .with_flags(TypeFlags::BUILTIN)
                .into(),
            ClassEntry::new("Enum")
                .with_interface(comparable)
                .with_flags(TypeFlags::BUILTIN | TypeFlags::ABSTRACT)
                .into(),
        ]);

        for entry in entries {
            if !self.types.contains_key(&entry.type_hash()) {
                self.insert(entry);
            }
        }
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type entry.
    ///
    /// The base class and interfaces must already be registered, the base
    /// class must be a non-final class and every interface must be an
    /// interface.
    pub fn register_type(&mut self, entry: TypeEntry) -> Result<(), RegistrationError> {
        let hash = entry.type_hash();
        if self.types.contains_key(&hash) || self.names.contains_key(entry.name()) {
            return Err(RegistrationError::DuplicateType(entry.name().to_string()));
        }

        if let Some(base) = entry.base_class() {
            match self.types.get(&base) {
                Some(TypeEntry::Class(class)) if class.is_final() => {
                    return Err(invalid_hierarchy(
                        &entry,
                        format!("cannot extend final class {}", class.name),
                    ));
                }
                Some(TypeEntry::Class(_)) => {}
                Some(other) => {
                    return Err(invalid_hierarchy(
                        &entry,
                        format!("base {} is not a class", other.name()),
                    ));
                }
                None => return Err(RegistrationError::TypeNotFound(base.to_string())),
            }
        }

        for interface in entry.interfaces() {
            match self.types.get(interface) {
                Some(TypeEntry::Interface(_)) => {}
                Some(other) => {
                    return Err(invalid_hierarchy(
                        &entry,
                        format!("{} is not an interface", other.name()),
                    ));
                }
                None => return Err(RegistrationError::TypeNotFound(interface.to_string())),
            }
        }

        for constructor in entry.constructors() {
            for param in &constructor.params {
                if param.type_hash != hash && !self.types.contains_key(&param.type_hash) {
                    return Err(RegistrationError::TypeNotFound(format!(
                        "{} (parameter '{}' of {})",
                        param.type_hash,
                        param.name,
                        entry.name()
                    )));
                }
            }
        }

        debug!(
            type_name = entry.name(),
            constructors = entry.constructors().len(),
            "registered type"
        );
        self.insert(entry);
        Ok(())
    }

    fn insert(&mut self, entry: TypeEntry) {
        let hash = entry.type_hash();
        self.names.insert(entry.name().to_string(), hash);
        self.types.insert(hash, entry);
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    /// Get a type by name.
    pub fn get_by_name(&self, name: &str) -> Option<&TypeEntry> {
        self.names.get(name).and_then(|hash| self.types.get(hash))
    }

    /// Get a type's hash by name.
    pub fn type_hash(&self, name: &str) -> Option<TypeHash> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Readable name of a type, falling back to the hash for unknown types.
    pub fn name_of(&self, hash: TypeHash) -> String {
        self.types
            .get(&hash)
            .map(|e| e.name().to_string())
            .unwrap_or_else(|| format!("{hash:?}"))
    }

    /// Get an enum entry by hash.
    pub fn get_enum(&self, hash: TypeHash) -> Option<&EnumEntry> {
        self.types.get(&hash).and_then(TypeEntry::as_enum)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ==========================================================================
    // Type Relationships
    // ==========================================================================

    /// Superclass of `hash`, if any.
    pub fn superclass(&self, hash: TypeHash) -> Option<TypeHash> {
        self.types.get(&hash).and_then(TypeEntry::base_class)
    }

    /// `hash` followed by each of its superclasses, ending at the root.
    pub fn superclass_chain(&self, hash: TypeHash) -> SuperclassChain<'_> {
        SuperclassChain {
            registry: self,
            next: Some(hash),
        }
    }

    /// Interfaces directly declared on `hash`, in declaration order.
    pub fn interfaces(&self, hash: TypeHash) -> &[TypeHash] {
        self.types
            .get(&hash)
            .map(TypeEntry::interfaces)
            .unwrap_or(&[])
    }

    /// Constructors of `hash` in declaration order, regardless of visibility.
    pub fn constructors(&self, hash: TypeHash) -> &[ConstructorEntry] {
        self.types
            .get(&hash)
            .map(TypeEntry::constructors)
            .unwrap_or(&[])
    }

    pub fn is_enum(&self, hash: TypeHash) -> bool {
        self.types.get(&hash).is_some_and(TypeEntry::is_enum)
    }

    pub fn is_interface(&self, hash: TypeHash) -> bool {
        self.types.get(&hash).is_some_and(TypeEntry::is_interface)
    }

    /// Whether a value of type `source` can be used where `target` is expected.
    ///
    /// Primitives are only assignable to themselves. Every non-primitive type,
    /// interfaces included, is assignable to the root class. Otherwise
    /// `target` must appear in the superclass chain of `source` or among the
    /// interfaces, transitively, of any type in that chain.
    pub fn is_subtype(&self, target: TypeHash, source: TypeHash) -> bool {
        if target == source {
            return true;
        }
        if is_primitive(target) || is_primitive(source) {
            return false;
        }
        if target == builtins::OBJECT {
            return self.contains(source);
        }

        let target_is_interface = self.is_interface(target);
        let mut seen = FxHashSet::default();
        for class in self.superclass_chain(source) {
            if class == target {
                return true;
            }
            if target_is_interface && self.implements(class, target, &mut seen) {
                return true;
            }
        }
        false
    }

    /// Depth-first search of the interfaces declared on `hash`.
    fn implements(
        &self,
        hash: TypeHash,
        interface: TypeHash,
        seen: &mut FxHashSet<TypeHash>,
    ) -> bool {
        self.interfaces(hash).iter().any(|&candidate| {
            candidate == interface
                || (seen.insert(candidate) && self.implements(candidate, interface, seen))
        })
    }

    /// Subtype test that treats a primitive and its box as the same type.
    pub fn is_assignable_by_boxing(&self, target: TypeHash, source: TypeHash) -> bool {
        self.is_subtype(wrap(target), wrap(source))
    }

    /// Boxed form of `hash`.
    pub fn wrap(&self, hash: TypeHash) -> TypeHash {
        wrap(hash)
    }

    /// Primitive form of `hash`.
    pub fn unwrap(&self, hash: TypeHash) -> TypeHash {
        unwrap(hash)
    }
}

fn invalid_hierarchy(entry: &TypeEntry, message: String) -> RegistrationError {
    RegistrationError::InvalidHierarchy {
        type_name: entry.name().to_string(),
        message,
    }
}

/// Iterator over a type and its superclasses.
pub struct SuperclassChain<'a> {
    registry: &'a TypeRegistry,
    next: Option<TypeHash>,
}

impl Iterator for SuperclassChain<'_> {
    type Item = TypeHash;

    fn next(&mut self) -> Option<TypeHash> {
        let current = self.next?;
        self.next = self.registry.superclass(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowbind_core::{ConstructorEntry, ParamEntry, Value};

    fn registry_with_chain() -> (TypeRegistry, TypeHash, TypeHash, TypeHash) {
        let mut registry = TypeRegistry::with_builtins();
        let a = ClassEntry::new("A");
        let a_hash = a.type_hash;
        registry.register_type(a.into()).unwrap();
        let b = ClassEntry::new("B").with_base(a_hash);
        let b_hash = b.type_hash;
        registry.register_type(b.into()).unwrap();
        let c = ClassEntry::new("C").with_base(b_hash);
        let c_hash = c.type_hash;
        registry.register_type(c.into()).unwrap();
        (registry, a_hash, b_hash, c_hash)
    }

    #[test]
    fn builtins_are_registered() {
        let registry = TypeRegistry::with_builtins();
        for kind in PrimitiveKind::ALL {
            assert!(registry.contains(kind.type_hash()));
            assert!(registry.contains(kind.boxed_hash()));
        }
        assert!(registry.contains(builtins::OBJECT));
        assert!(registry.contains(builtins::ENUM));
        assert_eq!(registry.superclass(builtins::OBJECT), None);
        assert_eq!(registry.superclass(builtins::INT32_BOX), Some(builtins::NUMBER));
        assert_eq!(registry.superclass(builtins::BOOL_BOX), Some(builtins::OBJECT));
    }

    #[test]
    fn register_builtins_is_idempotent() {
        let mut registry = TypeRegistry::with_builtins();
        let count = registry.type_count();
        registry.register_builtins();
        assert_eq!(registry.type_count(), count);
    }

    #[test]
    fn duplicate_type_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        registry.register_type(ClassEntry::new("A").into()).unwrap();
        let err = registry.register_type(ClassEntry::new("A").into()).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateType("A".to_string()));
    }

    #[test]
    fn unknown_base_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let err = registry
            .register_type(
                ClassEntry::new("A")
                    .with_base(TypeHash::from_name("Missing"))
                    .into(),
            )
            .unwrap_err();
        assert!(matches!(err, RegistrationError::TypeNotFound(_)));
    }

    #[test]
    fn final_base_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let err = registry
            .register_type(ClassEntry::new("MyString").with_base(builtins::STRING).into())
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidHierarchy { .. }));
    }

    #[test]
    fn class_as_interface_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let err = registry
            .register_type(ClassEntry::new("A").with_interface(builtins::STRING).into())
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidHierarchy { .. }));
    }

    #[test]
    fn unknown_parameter_type_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let ctor = ConstructorEntry::new(
            vec![ParamEntry::new("x", TypeHash::from_name("Missing"))],
            |_| Ok(Value::Null),
        );
        let err = registry
            .register_type(ClassEntry::new("A").with_constructor(ctor).into())
            .unwrap_err();
        assert!(matches!(err, RegistrationError::TypeNotFound(_)));
    }

    #[test]
    fn self_referencing_parameter_allowed() {
        let mut registry = TypeRegistry::with_builtins();
        let node = TypeHash::from_name("Node");
        let ctor = ConstructorEntry::new(vec![ParamEntry::new("next", node)], |_| {
            Ok(Value::Null)
        });
        registry
            .register_type(ClassEntry::new("Node").with_constructor(ctor).into())
            .unwrap();
        assert_eq!(registry.constructors(node).len(), 1);
    }

    #[test]
    fn superclass_chain_ends_at_root() {
        let (registry, a, b, c) = registry_with_chain();
        let chain: Vec<_> = registry.superclass_chain(c).collect();
        assert_eq!(chain, vec![c, b, a, builtins::OBJECT]);
    }

    #[test]
    fn subtype_follows_chain() {
        let (registry, a, b, c) = registry_with_chain();
        assert!(registry.is_subtype(a, c));
        assert!(registry.is_subtype(b, c));
        assert!(registry.is_subtype(c, c));
        assert!(!registry.is_subtype(c, a));
        assert!(registry.is_subtype(builtins::OBJECT, c));
    }

    #[test]
    fn subtype_through_interfaces() {
        let mut registry = TypeRegistry::with_builtins();
        let named = InterfaceEntry::new("Named");
        let named_hash = named.type_hash;
        registry.register_type(named.into()).unwrap();
        let labelled = InterfaceEntry::new("Labelled").with_base(named_hash);
        let labelled_hash = labelled.type_hash;
        registry.register_type(labelled.into()).unwrap();
        let base = ClassEntry::new("Base").with_interface(labelled_hash);
        let base_hash = base.type_hash;
        registry.register_type(base.into()).unwrap();
        let derived = ClassEntry::new("Derived").with_base(base_hash);
        let derived_hash = derived.type_hash;
        registry.register_type(derived.into()).unwrap();

        assert!(registry.is_subtype(labelled_hash, derived_hash));
        assert!(registry.is_subtype(named_hash, derived_hash));
        assert!(registry.is_subtype(named_hash, labelled_hash));
        assert!(!registry.is_subtype(labelled_hash, named_hash));
        assert!(registry.is_subtype(builtins::OBJECT, named_hash));
    }

    #[test]
    fn primitives_only_assignable_to_themselves() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.is_subtype(builtins::INT32, builtins::INT32));
        assert!(!registry.is_subtype(builtins::INT64, builtins::INT32));
        assert!(!registry.is_subtype(builtins::OBJECT, builtins::INT32));
        assert!(!registry.is_subtype(builtins::INT32, builtins::INT32_BOX));
        assert!(!registry.is_subtype(builtins::INT32_BOX, builtins::INT32));
    }

    #[test]
    fn boxing_assignability() {
        let registry = TypeRegistry::with_builtins();
        assert!(registry.is_assignable_by_boxing(builtins::INT32, builtins::INT32_BOX));
        assert!(registry.is_assignable_by_boxing(builtins::INT32_BOX, builtins::INT32));
        assert!(registry.is_assignable_by_boxing(builtins::NUMBER, builtins::INT64));
        assert!(registry.is_assignable_by_boxing(builtins::OBJECT, builtins::BOOL));
        assert!(registry.is_assignable_by_boxing(builtins::COMPARABLE, builtins::FLOAT64));
        assert!(!registry.is_assignable_by_boxing(builtins::INT64, builtins::INT32));
    }

    #[test]
    fn enums_extend_enum_base() {
        let mut registry = TypeRegistry::with_builtins();
        let mood = EnumEntry::new("Mood").with_values(["SAD", "HAPPY"]);
        let mood_hash = mood.type_hash;
        registry.register_type(mood.into()).unwrap();

        assert!(registry.is_enum(mood_hash));
        assert!(registry.is_subtype(builtins::ENUM, mood_hash));
        assert!(registry.is_subtype(builtins::COMPARABLE, mood_hash));
        assert_eq!(registry.get_enum(mood_hash).unwrap().constants.len(), 2);
        assert_eq!(registry.constructors(mood_hash).len(), 1);
    }

    #[test]
    fn name_lookup() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(registry.type_hash("Int32"), Some(builtins::INT32_BOX));
        assert_eq!(registry.name_of(builtins::FLOAT64), "float64");
        assert_eq!(registry.get_by_name("String").unwrap().name(), "String");
        assert!(registry.get_by_name("Missing").is_none());
    }
}
