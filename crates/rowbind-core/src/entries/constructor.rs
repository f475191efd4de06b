//! Constructor descriptors.
//!
//! A [`ConstructorEntry`] is one way of building an instance of a type: an
//! ordered parameter list, a visibility, and a native body. The body receives
//! the already-coerced argument values through [`ConstructorArgs`].

use std::fmt;
use std::sync::Arc;

use crate::error::NativeError;
use crate::{FromValue, TypeHash, Value, Visibility};

/// Native constructor body.
pub type NativeConstructor =
    Arc<dyn Fn(&ConstructorArgs<'_>) -> Result<Value, NativeError> + Send + Sync>;

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamEntry {
    /// Parameter name, used in diagnostics.
    pub name: String,
    /// Declared parameter type.
    pub type_hash: TypeHash,
}

impl ParamEntry {
    pub fn new(name: impl Into<String>, type_hash: TypeHash) -> Self {
        Self {
            name: name.into(),
            type_hash,
        }
    }
}

/// Registry entry for a constructor.
#[derive(Clone)]
pub struct ConstructorEntry {
    /// Parameters in declaration order.
    pub params: Vec<ParamEntry>,
    /// Constructor visibility.
    pub visibility: Visibility,
    native: NativeConstructor,
}

impl ConstructorEntry {
    /// Create a public constructor.
    pub fn new<F>(params: Vec<ParamEntry>, native: F) -> Self
    where
        F: Fn(&ConstructorArgs<'_>) -> Result<Value, NativeError> + Send + Sync + 'static,
    {
        Self {
            params,
            visibility: Visibility::Public,
            native: Arc::new(native),
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Declared parameter types in order.
    pub fn param_types(&self) -> impl ExactSizeIterator<Item = TypeHash> + '_ {
        self.params.iter().map(|p| p.type_hash)
    }

    /// Run the native body with already-coerced arguments.
    pub fn invoke(&self, values: &[Value]) -> Result<Value, NativeError> {
        let args = ConstructorArgs {
            params: &self.params,
            values,
        };
        (self.native)(&args)
    }
}

impl fmt::Debug for ConstructorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorEntry")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

/// Arguments passed to a native constructor body.
pub struct ConstructorArgs<'a> {
    params: &'a [ParamEntry],
    values: &'a [Value],
}

impl<'a> ConstructorArgs<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw argument value at `index`.
    pub fn value(&self, index: usize) -> Result<&'a Value, NativeError> {
        self.values
            .get(index)
            .ok_or(NativeError::ArgumentOutOfRange {
                index,
                count: self.values.len(),
            })
    }

    /// Extract argument `index` as `T`.
    ///
    /// Extraction failures name the parameter they occurred on.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, NativeError> {
        let value = self.value(index)?;
        T::from_value(value).map_err(|source| NativeError::Argument {
            index,
            name: self
                .params
                .get(index)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;
    use crate::error::ConversionError;

    fn pair_constructor() -> ConstructorEntry {
        ConstructorEntry::new(
            vec![
                ParamEntry::new("id", builtins::INT32),
                ParamEntry::new("name", builtins::STRING),
            ],
            |args| {
                let id: i32 = args.get(0)?;
                let name: String = args.get(1)?;
                Ok(Value::String(format!("{id}:{name}")))
            },
        )
    }

    #[test]
    fn invoke_passes_values() {
        let ctor = pair_constructor();
        let out = ctor
            .invoke(&[Value::Int32(7), Value::String("foo".into())])
            .unwrap();
        assert_eq!(out, Value::String("7:foo".into()));
    }

    #[test]
    fn extraction_failure_names_parameter() {
        let ctor = pair_constructor();
        let err = ctor
            .invoke(&[Value::Int32(7), Value::Bool(true)])
            .unwrap_err();
        assert_eq!(
            err,
            NativeError::Argument {
                index: 1,
                name: "name".to_string(),
                source: ConversionError::TypeMismatch {
                    expected: "String",
                    actual: "Bool",
                },
            }
        );
    }

    #[test]
    fn missing_argument_is_out_of_range() {
        let ctor = pair_constructor();
        let err = ctor.invoke(&[Value::Int32(7)]).unwrap_err();
        assert_eq!(err, NativeError::ArgumentOutOfRange { index: 1, count: 1 });
    }

    #[test]
    fn default_visibility_is_public() {
        let ctor = pair_constructor();
        assert!(ctor.is_public());
        let hidden = pair_constructor().with_visibility(Visibility::Private);
        assert!(!hidden.is_public());
        assert_eq!(hidden.arity(), 2);
    }
}
