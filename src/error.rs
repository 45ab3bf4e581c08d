// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Translation errors.
//!
//! Every failure is terminal for the call that raised it. Translation is a
//! pure function, so a corrected input can simply be submitted again.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TranslateError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Input rejected before decoding (empty, oversized)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Input is not well-formed JSON
    #[error("Invalid JSON format: {message}")]
    Format {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Query nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },

    /// No recognized query key; carries the raw fragment
    #[error("Query type not supported or invalid structure: {0}")]
    UnsupportedQuery(String),

    /// A recognized clause with a malformed body
    #[error("Invalid '{clause}' clause: {reason}")]
    InvalidClause { clause: &'static str, reason: String },

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(String),

    /// Predicate operand that cannot be resolved to a concrete value
    #[error("Cannot resolve value for {0}")]
    UnboundValue(String),

    #[error("Field '{field}' is declared {expected}, got '{value}'")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        value: String,
    },
}

impl TranslateError {
    /// Short label used for the rejection metric.
    pub fn reason(&self) -> &'static str {
        match self {
            TranslateError::Validation(_) => "validation",
            TranslateError::Format { .. } => "format",
            TranslateError::NestingTooDeep { .. } => "too_deep",
            TranslateError::UnsupportedQuery(_) => "unsupported_query",
            TranslateError::InvalidClause { .. } => "invalid_clause",
            TranslateError::UnsupportedOperation(_) => "unsupported_operation",
            TranslateError::UnboundValue(_) => "unbound_value",
            TranslateError::TypeMismatch { .. } => "type_mismatch",
        }
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        TranslateError::Format {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
