//! Engine configuration.
//!
//! Properties can be set one at a time through [`EngineProperty`] or loaded
//! as a whole from TOML:
//!
//! ```
//! use rowbind::{EngineProperties, EngineProperty};
//!
//! let props = EngineProperties::from_toml_str(r#"
//!     cache_instantiators = false
//!     reject_ambiguous_constructors = true
//! "#).unwrap();
//!
//! assert!(props.register_default_conversions);
//! assert_eq!(props.get(EngineProperty::CacheInstantiators), 0);
//! assert_eq!(props.get(EngineProperty::RejectAmbiguousConstructors), 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rowbind_instantiator::TieBreak;

/// Errors loading engine properties.
#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A single engine setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineProperty {
    /// Register the built-in scalar conversions at construction.
    RegisterDefaultConversions,
    /// Memoize resolved instantiators per target type and column list.
    CacheInstantiators,
    /// Fail instead of picking the first declared constructor on equal cost.
    RejectAmbiguousConstructors,
}

impl EngineProperty {
    pub fn default_value(&self) -> usize {
        match self {
            EngineProperty::RegisterDefaultConversions => 1,
            EngineProperty::CacheInstantiators => 1,
            EngineProperty::RejectAmbiguousConstructors => 0,
        }
    }
}

/// All engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineProperties {
    pub register_default_conversions: bool,
    pub cache_instantiators: bool,
    pub reject_ambiguous_constructors: bool,
}

impl Default for EngineProperties {
    fn default() -> Self {
        Self {
            register_default_conversions: EngineProperty::RegisterDefaultConversions
                .default_value()
                != 0,
            cache_instantiators: EngineProperty::CacheInstantiators.default_value() != 0,
            reject_ambiguous_constructors: EngineProperty::RejectAmbiguousConstructors
                .default_value()
                != 0,
        }
    }
}

impl EngineProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, PropertiesError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads properties from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PropertiesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn get(&self, property: EngineProperty) -> usize {
        let flag = match property {
            EngineProperty::RegisterDefaultConversions => self.register_default_conversions,
            EngineProperty::CacheInstantiators => self.cache_instantiators,
            EngineProperty::RejectAmbiguousConstructors => self.reject_ambiguous_constructors,
        };
        usize::from(flag)
    }

    /// Set a property. Any non-zero value enables it.
    pub fn set(&mut self, property: EngineProperty, value: usize) {
        let flag = value != 0;
        match property {
            EngineProperty::RegisterDefaultConversions => self.register_default_conversions = flag,
            EngineProperty::CacheInstantiators => self.cache_instantiators = flag,
            EngineProperty::RejectAmbiguousConstructors => {
                self.reject_ambiguous_constructors = flag
            }
        }
    }

    /// Tie-break policy for constructor resolution.
    pub fn tie_break(&self) -> TieBreak {
        if self.reject_ambiguous_constructors {
            TieBreak::RejectAmbiguous
        } else {
            TieBreak::DeclarationOrder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_property_defaults() {
        let props = EngineProperties::default();
        for property in [
            EngineProperty::RegisterDefaultConversions,
            EngineProperty::CacheInstantiators,
            EngineProperty::RejectAmbiguousConstructors,
        ] {
            assert_eq!(props.get(property), property.default_value());
        }
        assert_eq!(props.tie_break(), TieBreak::DeclarationOrder);
    }

    #[test]
    fn set_and_get() {
        let mut props = EngineProperties::new();
        props.set(EngineProperty::RejectAmbiguousConstructors, 5);
        assert_eq!(props.get(EngineProperty::RejectAmbiguousConstructors), 1);
        assert_eq!(props.tie_break(), TieBreak::RejectAmbiguous);
        props.set(EngineProperty::CacheInstantiators, 0);
        assert!(!props.cache_instantiators);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            EngineProperties::from_toml_str("").unwrap(),
            EngineProperties::default()
        );
    }

    #[test]
    fn invalid_toml() {
        let err = EngineProperties::from_toml_str("cache_instantiators = 3").unwrap_err();
        assert!(matches!(err, PropertiesError::Toml(_)));
    }

    #[test]
    fn missing_file() {
        let err = EngineProperties::from_toml_file("/nonexistent/rowbind.toml").unwrap_err();
        assert!(matches!(err, PropertiesError::Io(_)));
    }
}
