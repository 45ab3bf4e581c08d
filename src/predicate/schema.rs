// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Field schema
//!
//! Declared value types for entity fields, consulted by the predicate
//! translator when it renders comparison values.
//!
//! ```rust
//! use lucene_translate::predicate::{FieldSchema, FieldType, FieldTypeLookup};
//!
//! let schema = FieldSchema::new()
//!     .text("name")
//!     .keyword("category")
//!     .numeric("price")
//!     .boolean("is_active");
//!
//! assert_eq!(schema.field_type("price"), Some(FieldType::Numeric));
//! assert_eq!(schema.field_type("missing"), None);
//! ```

use serde::Deserialize;
use std::collections::HashMap;

/// Declared value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Tokenized full-text field
    Text,
    /// Untokenized exact-value field
    Keyword,
    /// Numeric field (integers, floats)
    Numeric,
    /// Boolean field, indexed as `true` / `false`
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Numeric => "numeric",
            FieldType::Boolean => "boolean",
        }
    }
}

/// Read-only field -> type lookup.
///
/// Shared across translations and threads; implementations must not change
/// while a translation is in flight.
pub trait FieldTypeLookup: Send + Sync {
    fn field_type(&self, field: &str) -> Option<FieldType>;
}

impl FieldTypeLookup for HashMap<String, FieldType> {
    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.get(field).copied()
    }
}

/// Field schema definition
///
/// Deserializes from a plain map, e.g. `{"price": "numeric", "name": "text"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: HashMap<String, FieldType>,
}

impl FieldSchema {
    /// Create an empty schema (every field undeclared)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field of the given type
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Add a text field
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, FieldType::Text)
    }

    /// Add a keyword field
    pub fn keyword(self, name: impl Into<String>) -> Self {
        self.field(name, FieldType::Keyword)
    }

    /// Add a numeric field
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.field(name, FieldType::Numeric)
    }

    /// Add a boolean field
    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.field(name, FieldType::Boolean)
    }
}

impl FieldTypeLookup for FieldSchema {
    fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, FieldType)> for FieldSchema {
    fn from_iter<I: IntoIterator<Item = (S, FieldType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(name, ty)| (name.into(), ty)).collect(),
        }
    }
}
