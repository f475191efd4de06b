//! Typed registration of application classes.

use std::any::Any;
use std::marker::PhantomData;

use rowbind_core::{
    ClassEntry, ConstructorArgs, ConstructorEntry, NativeError, ObjectRef, ParamEntry,
    RegistrationError, TypeHash, Value, Visibility,
};

use crate::Engine;

/// Builder for a class whose instances are Rust values of type `T`.
///
/// Constructors return a `T`; the builder wraps it into an object of the
/// registered type. Nothing is registered until [`ClassBuilder::build`].
///
/// ```
/// use rowbind::{Engine, builtins};
///
/// struct Point { x: i32, y: i32 }
///
/// let engine = Engine::new();
/// let point = engine
///     .register_class::<Point>("Point")
///     .constructor(&[("x", builtins::INT32), ("y", builtins::INT32)], |args| {
///         Ok(Point { x: args.get(0)?, y: args.get(1)? })
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.type_name(point).as_deref(), Some("Point"));
/// ```
#[must_use = "a class builder does nothing until build() is called"]
pub struct ClassBuilder<'e, T> {
    engine: &'e Engine,
    entry: ClassEntry,
    _marker: PhantomData<fn() -> T>,
}

impl<'e, T> ClassBuilder<'e, T>
where
    T: Any + Send + Sync,
{
    pub(crate) fn new(engine: &'e Engine, name: impl Into<String>) -> Self {
        Self {
            engine,
            entry: ClassEntry::new(name),
            _marker: PhantomData,
        }
    }

    /// Hash the class will be registered under.
    pub fn type_hash(&self) -> TypeHash {
        self.entry.type_hash
    }

    /// Set the superclass.
    pub fn extends(mut self, base: TypeHash) -> Self {
        self.entry = self.entry.with_base(base);
        self
    }

    /// Add an implemented interface.
    pub fn implements(mut self, interface: TypeHash) -> Self {
        self.entry = self.entry.with_interface(interface);
        self
    }

    pub fn as_abstract(mut self) -> Self {
        self.entry = self.entry.as_abstract();
        self
    }

    pub fn as_final(mut self) -> Self {
        self.entry = self.entry.as_final();
        self
    }

    /// Add a public constructor.
    pub fn constructor<F>(self, params: &[(&str, TypeHash)], body: F) -> Self
    where
        F: Fn(&ConstructorArgs<'_>) -> Result<T, NativeError> + Send + Sync + 'static,
    {
        self.constructor_with_visibility(Visibility::Public, params, body)
    }

    /// Add a constructor with explicit visibility.
    ///
    /// Only public constructors take part in resolution.
    pub fn constructor_with_visibility<F>(
        mut self,
        visibility: Visibility,
        params: &[(&str, TypeHash)],
        body: F,
    ) -> Self
    where
        F: Fn(&ConstructorArgs<'_>) -> Result<T, NativeError> + Send + Sync + 'static,
    {
        let type_hash = self.entry.type_hash;
        let params = params
            .iter()
            .map(|&(name, ty)| ParamEntry::new(name, ty))
            .collect();
        let constructor = ConstructorEntry::new(params, move |args| {
            let instance = body(args)?;
            Ok(Value::Object(ObjectRef::new(type_hash, instance)))
        })
        .with_visibility(visibility);
        self.entry = self.entry.with_constructor(constructor);
        self
    }

    /// Register the class.
    pub fn build(self) -> Result<TypeHash, RegistrationError> {
        self.engine.register_type(self.entry)
    }
}
