//! Name to column lookup for vertex data lines.
//!
//! [`KeyMap`] is currently backed by [`indexmap::IndexMap`] so the declaration
//! order of the header survives.

use indexmap::IndexMap;
use crate::errors::{ ConvertError, ConvertResult };

/// Alias to reduce coupling with map implementation
pub type KeyMap<V> = IndexMap<String, V>;

/// Maps each declared property name to its column in a vertex data line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeIndex {
    columns: KeyMap<usize>,
}

impl AttributeIndex {
    /// Builds the index from header property names.
    ///
    /// A name declared twice resolves to its last column.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut columns = KeyMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            columns.insert(name.as_ref().to_string(), i);
        }
        AttributeIndex { columns }
    }

    /// Checks that every name in `required` is declared, in order.
    ///
    /// Fails with a format error naming the first missing attribute.
    pub fn require(&self, required: &[&str]) -> ConvertResult<()> {
        match required.iter().find(|name| !self.columns.contains_key(**name)) {
            Some(missing) => Err(ConvertError::Format(
                format!("missing required attribute: {}", missing)
            )),
            None => Ok(()),
        }
    }

    /// Resolves the columns of `names`, failing like [`AttributeIndex::require`].
    pub fn columns_of<const N: usize>(&self, names: &[&str; N]) -> ConvertResult<[usize; N]> {
        self.require(names)?;
        let mut out = [0usize; N];
        for (slot, name) in out.iter_mut().zip(names.iter()) {
            // presence checked by `require`
            *slot = self.columns[*name];
        }
        Ok(out)
    }
}
