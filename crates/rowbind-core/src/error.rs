//! Error types for rowbind.
//!
//! ## Error Hierarchy
//!
//! ```text
//! InstantiationError (top-level, returned by resolution and instantiation)
//! ├── NoApplicableConversion  - scalar conversion with nothing registered
//! ├── NoMatchingConstructor   - no public constructor admits the columns
//! ├── AmbiguousConstructor    - equal-cost candidates under strict tie-breaking
//! ├── ConstructionFailure     - a constructor body or parameter coercion failed
//! ├── ConversionError         - a value could not be coerced
//! └── RegistrationError       - a type or conversion could not be registered
//! ```
//!
//! `ConversionError` is produced by conversion functions and `FromValue`
//! extraction; `NativeError` is what a constructor body returns.

use thiserror::Error;

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors raised while coercing a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A null value was given where a primitive is required.
    #[error("cannot convert null to primitive type {target}")]
    NullToPrimitive { target: String },

    /// The value has a different runtime type than expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer does not fit the target type.
    #[error("integer overflow: {value} does not fit in {target}")]
    IntegerOverflow { value: i128, target: &'static str },

    /// A value with a fractional part was converted to an integer type.
    #[error("value {value} has a fractional part and cannot become {target}")]
    FractionalToInteger { value: String, target: &'static str },

    /// The enum has no constant with the given name.
    #[error("enum {enum_type} has no constant named '{constant}'")]
    UnknownEnumConstant { enum_type: String, constant: String },

    /// The enum has no constant at the given ordinal.
    #[error("enum {enum_type} has no constant with ordinal {ordinal}")]
    EnumOrdinalOutOfRange { enum_type: String, ordinal: i64 },

    /// Text could not be parsed into the target type.
    #[error("cannot parse '{input}' as {target}: {message}")]
    Parse {
        input: String,
        target: &'static str,
        message: String,
    },

    /// Failure reported by a user-supplied conversion.
    #[error("{0}")]
    Custom(String),
}

impl ConversionError {
    /// Create a custom conversion error.
    pub fn custom(message: impl Into<String>) -> Self {
        ConversionError::Custom(message.into())
    }
}

// ============================================================================
// Native Errors
// ============================================================================

/// Errors returned by native constructor bodies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// An argument could not be extracted as the requested Rust type.
    #[error("argument {index} ('{name}'): {source}")]
    Argument {
        index: usize,
        name: String,
        #[source]
        source: ConversionError,
    },

    /// An argument index outside the constructor's parameter list.
    #[error("argument index {index} out of range for {count} arguments")]
    ArgumentOutOfRange { index: usize, count: usize },

    /// A conversion failed inside the constructor body.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Any other failure reported by the constructor.
    #[error("{0}")]
    Message(String),
}

impl NativeError {
    /// Create an error from a message.
    pub fn message(message: impl Into<String>) -> Self {
        NativeError::Message(message.into())
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while populating a type registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A referenced type was not found.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A base class or interface reference is not usable as such.
    #[error("invalid hierarchy for {type_name}: {message}")]
    InvalidHierarchy { type_name: String, message: String },
}

// ============================================================================
// Instantiation Errors
// ============================================================================

/// Errors surfaced to callers of conversion and instantiation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstantiationError {
    /// No registered conversion and the types are not already compatible.
    #[error("no conversion from {source_type} to {target_type}")]
    NoApplicableConversion {
        source_type: String,
        target_type: String,
    },

    /// No public constructor admits the column signature.
    #[error("{type_name} does not have a constructor matching types {columns}")]
    NoMatchingConstructor { type_name: String, columns: String },

    /// Several constructors share the lowest cost and ties are rejected.
    #[error("ambiguous constructors for {type_name} with cost {cost}: {candidates}")]
    AmbiguousConstructor {
        type_name: String,
        cost: u32,
        candidates: String,
    },

    /// The chosen constructor or one of its parameter coercions failed.
    #[error("failed to construct {type_name}{}: {source}", describe_parameter(.index, .parameter))]
    ConstructionFailure {
        type_name: String,
        index: Option<usize>,
        parameter: Option<String>,
        #[source]
        source: NativeError,
    },

    /// The number of row values differs from the number of columns.
    #[error("expected {expected} values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    /// The requested target type is not registered.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A top-level scalar conversion failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Registration through the engine failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

fn describe_parameter(index: &Option<usize>, parameter: &Option<String>) -> String {
    match (index, parameter) {
        (Some(index), Some(name)) => format!(" (parameter {index} '{name}')"),
        (Some(index), None) => format!(" (parameter {index})"),
        (None, Some(name)) => format!(" (parameter '{name}')"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_failure_names_parameter() {
        let err = InstantiationError::ConstructionFailure {
            type_name: "Department".to_string(),
            index: Some(1),
            parameter: Some("name".to_string()),
            source: NativeError::message("boom"),
        };
        assert_eq!(
            err.to_string(),
            "failed to construct Department (parameter 1 'name'): boom"
        );
    }

    #[test]
    fn construction_failure_without_parameter() {
        let err = InstantiationError::ConstructionFailure {
            type_name: "Department".to_string(),
            index: None,
            parameter: None,
            source: NativeError::message("boom"),
        };
        assert_eq!(err.to_string(), "failed to construct Department: boom");
    }

    #[test]
    fn no_matching_constructor_message() {
        let err = InstantiationError::NoMatchingConstructor {
            type_name: "Movie".to_string(),
            columns: "[a: int32, b: int32, c: int32]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Movie does not have a constructor matching types [a: int32, b: int32, c: int32]"
        );
    }

    #[test]
    fn native_error_wraps_conversion() {
        let err: NativeError = ConversionError::custom("bad").into();
        assert_eq!(err.to_string(), "bad");
    }
}
