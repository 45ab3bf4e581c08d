// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query DSL front-end
//!
//! Translates an Elasticsearch-style JSON query document into classic Lucene
//! query syntax.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!     ↓
//! DslParser (size/depth guards) → QueryNode (AST)
//!     ↓
//! LuceneEmitter → Lucene query string
//! ```
//!
//! The two stages are independent: an AST built by hand can be emitted
//! without going through JSON.
//!
//! ```rust
//! use lucene_translate::query::{DslParser, LuceneEmitter};
//!
//! let parser = DslParser::new();
//! let node = parser.parse(r#"{"terms": {"tag": ["search", "open"]}}"#).unwrap();
//! assert_eq!(LuceneEmitter::emit(&node), "tag:(search OR open)");
//! ```
//!
//! # Output Grammar
//!
//! ```text
//! user.id:kimchy            - term
//! tag:(search OR open)      - terms
//! age:[10 TO 20]            - range, inclusive
//! age:{10 TO 20}            - range, exclusive
//! +a -b +(c OR d)           - bool: must/filter, must_not, should
//! ```

mod escape;
mod lucene_emitter;
mod parser;
mod query_node;

pub use escape::{escape_field, escape_value};
pub use lucene_emitter::{LuceneEmitter, DEFAULT_FUZZINESS};
pub use parser::{DslParser, RECOGNIZED_KEYS};
pub use query_node::{BoolQuery, QueryNode, RangeQuery};
