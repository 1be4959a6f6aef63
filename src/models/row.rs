//! Survey rows as parsed from the export, and campaign rows as produced

use std::collections::HashMap;

/// One survey answer: input column name to raw cell value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: HashMap<String, String>,
}

impl RawRow {
    /// Value of a column, if the column exists
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Value of a column, or an empty string when the column is absent
    #[must_use]
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    /// Trimmed value of a column
    #[must_use]
    pub fn trimmed(&self, column: &str) -> &str {
        self.value(column).trim()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One campaign row, columns kept in layout order
///
/// A column missing from the row (only ever the air quality one) is written
/// as an empty cell when another row of the same file carries it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    fields: Vec<(&'static str, String)>,
}

impl OutputRow {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, column: &'static str, value: String) {
        self.fields.push((column, value));
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names present in this row, in order
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}
