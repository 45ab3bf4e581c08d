// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Lucene Translate
//!
//! Translates structured search queries into classic Lucene query syntax.
//!
//! ## Architecture
//!
//! Two front-ends share one output grammar and one set of escaping rules:
//!
//! ```text
//! ┌───────────────────────────────┐   ┌───────────────────────────────┐
//! │   Query DSL (JSON document)   │   │  Predicate (Expr over fields) │
//! └───────────────────────────────┘   └───────────────────────────────┘
//!                │                                   │
//!        DslParser (guards)                          │
//!                ▼                                   │
//! ┌───────────────────────────────┐                  │
//! │       QueryNode (AST)         │                  │
//! └───────────────────────────────┘                  │
//!                │                                   │
//!          LuceneEmitter                    PredicateTranslator
//!                │                        (FieldTypeLookup, ValueResolver)
//!                ▼                                   ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │            Lucene query string   (escape_value on literals)         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use lucene_translate::dsl_to_lucene;
//!
//! let lucene = dsl_to_lucene(r#"{"range": {"age": {"gte": 10, "lte": 20}}}"#).unwrap();
//! assert_eq!(lucene, "age:[10 TO 20]");
//!
//! let lucene = dsl_to_lucene(r#"{"query": {"term": {"name": "john+doe"}}}"#).unwrap();
//! assert_eq!(lucene, "name:john\\+doe");
//! ```
//!
//! ## Guarantees
//!
//! - Every call is synchronous, does no I/O and keeps no state between calls,
//!   so translators can be shared freely across threads.
//! - DSL input is bounded in size (100 KiB) and nesting depth (5) before any
//!   recursive work; see [`TranslatorConfig`].
//! - Errors are reported as [`TranslateError`]; nothing is partially emitted.
//!
//! ## Modules
//!
//! - [`query`]: JSON DSL parser, query AST, Lucene emitter, escaping
//! - [`predicate`]: predicate expression tree and its translator
//! - [`config`]: limits and defaults
//! - [`metrics`]: `metrics` crate instrumentation

pub mod config;
pub mod error;
pub mod metrics;
pub mod predicate;
pub mod query;

pub use config::TranslatorConfig;
pub use error::{Result, TranslateError};
pub use predicate::{Expr, FieldSchema, FieldType, Literal, PredicateTranslator};
pub use query::{BoolQuery, DslParser, LuceneEmitter, QueryNode, RangeQuery};

/// Parse a query DSL document and emit its Lucene form, with default limits.
pub fn dsl_to_lucene(json: &str) -> Result<String> {
    DslParser::new().translate(json)
}
