//! Parsed BibTeX record structures.
//!
//! A [`BibtexRecord`] is what an external BibTeX tokenizer hands to this
//! crate (entry type, optional citation key, field map) and what the
//! reverse path hands back to an external BibTeX formatter. This crate never
//! reads or writes raw BibTeX text.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed BibTeX entry.
///
/// Field names are stored lowercased; fields keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibtexRecord {
    /// Entry type as written, lowercased (`article`, `phdthesis`, ...).
    pub entry_type: String,
    /// Citation key, if the entry had one.
    pub key: Option<String>,
    /// Field name to raw field text.
    pub fields: IndexMap<String, String>,
}

impl BibtexRecord {
    /// Create an empty record of the given entry type.
    #[must_use]
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into().trim().to_lowercase(),
            key: None,
            fields: IndexMap::new(),
        }
    }

    /// Create a builder for a record of the given entry type.
    #[must_use]
    pub fn builder(entry_type: impl Into<String>) -> BibtexRecordBuilder {
        BibtexRecordBuilder {
            record: Self::new(entry_type),
        }
    }

    /// Set or replace a field. The name is lowercased.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(name.into().to_lowercase(), value.into());
    }

    /// Get a field value.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a field value that is present and not blank, trimmed.
    #[must_use]
    pub fn non_blank_field(&self, name: &str) -> Option<&str> {
        self.get_field(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Remove a field, returning its value.
    pub fn remove_field(&mut self, name: &str) -> Option<String> {
        self.fields.shift_remove(name)
    }

    /// Iterate over fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Citation key if present and not blank.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

impl fmt::Display for BibtexRecord {
    /// Debug-friendly BibTeX-like rendering; not a conforming formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@{}{{{},", self.entry_type, self.key.as_deref().unwrap_or(""))?;
        for (name, value) in &self.fields {
            writeln!(f, "  {name} = {{{value}}},")?;
        }
        write!(f, "}}")
    }
}

/// Builder for [`BibtexRecord`].
#[derive(Debug)]
pub struct BibtexRecordBuilder {
    record: BibtexRecord,
}

impl BibtexRecordBuilder {
    /// Set the citation key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.record.key = Some(key.into());
        self
    }

    /// Add a field to the record being built.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.set_field(name, value);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> BibtexRecord {
        self.record
    }
}
