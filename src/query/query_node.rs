// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query AST - the query algebra shared by the DSL parser and the emitter.
//!
//! A [`QueryNode`] is a closed set of clause kinds. The parser builds one from
//! JSON; callers can also build one directly and hand it to the emitter.
//!
//! # Example
//!
//! ```rust
//! use lucene_translate::query::{BoolQuery, LuceneEmitter, QueryNode, RangeQuery};
//!
//! // Single clause
//! let query = QueryNode::term("user.id", "kimchy");
//! assert_eq!(LuceneEmitter::emit(&query), "user.id:kimchy");
//!
//! // Boolean composition
//! let query = BoolQuery::new()
//!     .must(QueryNode::term("brand", "apple"))
//!     .filter(RangeQuery::new("price").lte("500").build())
//!     .build();
//! assert_eq!(LuceneEmitter::emit(&query), "+brand:apple +price:[* TO 500]");
//! ```

use serde::{Deserialize, Serialize};

/// Query AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryNode {
    /// Exact single-token match: field:value
    Term { field: String, value: String },
    /// Any of a fixed value set: field:(v1 OR v2)
    Terms { field: String, values: Vec<String> },
    /// Analyzed match, value handed to the analyzer as-is: field:(value)
    Match { field: String, value: String },
    /// Analyzed phrase match: field:"value"
    MatchPhrase { field: String, value: String },
    /// Prefix match: field:value*
    Prefix { field: String, value: String },
    /// Wildcard pattern, passed through verbatim: field:va*e?
    Wildcard { field: String, value: String },
    /// Edit-distance match: field:value~N
    Fuzzy {
        field: String,
        value: String,
        fuzziness: Option<u32>,
    },
    /// Regular expression: field:/value/
    Regexp { field: String, value: String },
    /// Field has any indexed value: _exists_:field
    Exists { field: String },
    /// Document identifier set: _id:("a" "b")
    Ids { values: Vec<String> },
    /// Bounded range: field:[a TO b]
    Range(RangeQuery),
    /// Boolean composition of sub-queries
    Bool(BoolQuery),
}

impl QueryNode {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryNode::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `match` is a keyword, hence the suffix.
    pub fn match_query(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn match_phrase(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::MatchPhrase {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn wildcard(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::Wildcard {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn fuzzy(field: impl Into<String>, value: impl Into<String>, fuzziness: Option<u32>) -> Self {
        QueryNode::Fuzzy {
            field: field.into(),
            value: value.into(),
            fuzziness,
        }
    }

    pub fn regexp(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryNode::Regexp {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        QueryNode::Exists { field: field.into() }
    }

    pub fn ids<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryNode::Ids {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Clause name as it appears in the DSL (used for logging)
    pub fn kind(&self) -> &'static str {
        match self {
            QueryNode::Term { .. } => "term",
            QueryNode::Terms { .. } => "terms",
            QueryNode::Match { .. } => "match",
            QueryNode::MatchPhrase { .. } => "match_phrase",
            QueryNode::Prefix { .. } => "prefix",
            QueryNode::Wildcard { .. } => "wildcard",
            QueryNode::Fuzzy { .. } => "fuzzy",
            QueryNode::Regexp { .. } => "regexp",
            QueryNode::Exists { .. } => "exists",
            QueryNode::Ids { .. } => "ids",
            QueryNode::Range(_) => "range",
            QueryNode::Bool(_) => "bool",
        }
    }

    /// Number of node levels, counting this node as 1
    pub fn depth(&self) -> usize {
        match self {
            QueryNode::Bool(b) => 1 + b.clauses().map(QueryNode::depth).max().unwrap_or(0),
            _ => 1,
        }
    }
}

/// Range bounds, each kept as text.
///
/// Bounds are substituted into the output grammar, never compared, so
/// numbers keep the form they had in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub field: String,
    pub gte: Option<String>,
    pub gt: Option<String>,
    pub lte: Option<String>,
    pub lt: Option<String>,
}

impl RangeQuery {
    /// Range with no bounds (matches every value of the field)
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn gte(mut self, value: impl Into<String>) -> Self {
        self.gte = Some(value.into());
        self
    }

    pub fn gt(mut self, value: impl Into<String>) -> Self {
        self.gt = Some(value.into());
        self
    }

    pub fn lte(mut self, value: impl Into<String>) -> Self {
        self.lte = Some(value.into());
        self
    }

    pub fn lt(mut self, value: impl Into<String>) -> Self {
        self.lt = Some(value.into());
        self
    }

    pub fn build(self) -> QueryNode {
        QueryNode::Range(self)
    }
}

/// Boolean query: ordered clause lists.
///
/// `minimum_should_match` is carried for fidelity with the source DSL but
/// does not change emission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    pub must: Vec<QueryNode>,
    pub filter: Vec<QueryNode>,
    pub must_not: Vec<QueryNode>,
    pub should: Vec<QueryNode>,
    pub minimum_should_match: Option<i32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, node: QueryNode) -> Self {
        self.must.push(node);
        self
    }

    pub fn filter(mut self, node: QueryNode) -> Self {
        self.filter.push(node);
        self
    }

    pub fn must_not(mut self, node: QueryNode) -> Self {
        self.must_not.push(node);
        self
    }

    pub fn should(mut self, node: QueryNode) -> Self {
        self.should.push(node);
        self
    }

    pub fn minimum_should_match(mut self, n: i32) -> Self {
        self.minimum_should_match = Some(n);
        self
    }

    /// All sub-clauses in emission order: must, filter, must_not, should
    pub fn clauses(&self) -> impl Iterator<Item = &QueryNode> {
        self.must
            .iter()
            .chain(self.filter.iter())
            .chain(self.must_not.iter())
            .chain(self.should.iter())
    }

    pub fn build(self) -> QueryNode {
        QueryNode::Bool(self)
    }
}
