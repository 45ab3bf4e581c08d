// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Predicate front-end
//!
//! Translates a boolean predicate over entity fields into Lucene query syntax.
//!
//! # Architecture
//!
//! ```text
//! Expr (predicate tree)
//!     ↓                 ┌─ FieldTypeLookup  (declared field types, read-only)
//! PredicateTranslator ──┤
//!     ↓                 └─ ValueResolver    (binds captured variables)
//! Lucene query string
//! ```
//!
//! Operands other than fields must be literals or variables the resolver can
//! bind; anything else is reported as an unbound value rather than evaluated.
//!
//! ```rust
//! use lucene_translate::predicate::{Expr, FieldSchema, PredicateTranslator};
//!
//! let schema = FieldSchema::new().keyword("category").numeric("price");
//! let translator = PredicateTranslator::new(&schema);
//!
//! let predicate = Expr::field("category").eq("Books").and(Expr::field("price").gt(100));
//! assert_eq!(
//!     translator.translate(&predicate).unwrap(),
//!     "(category:Books) AND (price:{100 TO *])"
//! );
//! ```

mod expr;
mod schema;
mod translator;

pub use expr::{BinaryOp, Expr, Literal, UnaryOp, CONTAINS, ENDS_WITH, LUCENE_MATCH, STARTS_WITH};
pub use schema::{FieldSchema, FieldType, FieldTypeLookup};
pub use translator::{FnResolver, NoBindings, PredicateTranslator, ValueResolver, MATCH_ALL};
