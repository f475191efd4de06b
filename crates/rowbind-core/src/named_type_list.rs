//! Ordered column descriptors for one row shape.

use std::fmt;

use crate::TypeHash;

/// An ordered, immutable list of `(name, type)` column descriptors.
///
/// Matching against constructor parameters is strictly positional: the
/// names are carried for diagnostics only.
///
/// ```
/// use rowbind_core::{NamedTypeList, builtins};
///
/// let columns = NamedTypeList::builder(2)
///     .add("id", builtins::INT32)
///     .add("name", builtins::STRING)
///     .build();
///
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns.name(1), Some("name"));
/// assert_eq!(columns.type_at(0), Some(builtins::INT32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NamedTypeList {
    columns: Vec<(String, TypeHash)>,
}

impl NamedTypeList {
    /// Start building a list with room for `size` columns.
    pub fn builder(size: usize) -> NamedTypeListBuilder {
        NamedTypeListBuilder {
            columns: Vec::with_capacity(size),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column name at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|(name, _)| name.as_str())
    }

    /// Declared column type at `index`.
    pub fn type_at(&self, index: usize) -> Option<TypeHash> {
        self.columns.get(index).map(|(_, ty)| *ty)
    }

    /// Iterate over `(name, type)` pairs in column order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, TypeHash)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Iterate over the declared types in column order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = TypeHash> + '_ {
        self.columns.iter().map(|(_, ty)| *ty)
    }

    /// Render the list using `type_name` to name each type.
    pub fn describe(&self, type_name: impl Fn(TypeHash) -> String) -> String {
        let parts: Vec<_> = self
            .columns
            .iter()
            .map(|(name, ty)| format!("{name}: {}", type_name(*ty)))
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

impl fmt::Display for NamedTypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(|ty| ty.to_string()))
    }
}

impl<S: Into<String>> FromIterator<(S, TypeHash)> for NamedTypeList {
    fn from_iter<I: IntoIterator<Item = (S, TypeHash)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }
}

/// Builder for [`NamedTypeList`].
#[derive(Debug)]
pub struct NamedTypeListBuilder {
    columns: Vec<(String, TypeHash)>,
}

impl NamedTypeListBuilder {
    /// Append a column.
    pub fn add(mut self, name: impl Into<String>, ty: TypeHash) -> Self {
        self.columns.push((name.into(), ty));
        self
    }

    pub fn build(self) -> NamedTypeList {
        NamedTypeList {
            columns: self.columns,
        }
    }
}
