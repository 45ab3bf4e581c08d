// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Predicate expression tree.
//!
//! A small, source-agnostic model of a boolean predicate over an entity's
//! fields: comparisons, `&&`/`||`, and method-style string operations.
//!
//! # Example
//!
//! ```rust
//! use lucene_translate::predicate::Expr;
//!
//! // category == "Books" && price > 10
//! let predicate = Expr::field("category").eq("Books")
//!     .and(Expr::field("price").gt(10));
//!
//! // name.contains("Test") || name.starts_with(prefix)
//! let predicate = Expr::field("name").contains("Test")
//!     .or(Expr::field("name").starts_with(Expr::var("prefix")));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Method name for substring match: `field:*value*`
pub const CONTAINS: &str = "contains";
/// Method name for prefix match: `field:value*`
pub const STARTS_WITH: &str = "starts_with";
/// Method name for suffix match: `field:*value`
pub const ENDS_WITH: &str = "ends_with";
/// Raw passthrough: `field:(fragment)`, fragment not escaped
pub const LUCENE_MATCH: &str = "lucene_match";

/// Concrete operand value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

/// Binary operators.
///
/// Only comparisons and `AndAlso`/`OrElse` translate; arithmetic exists so
/// callers can hand over whole predicate trees and get a precise error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    AndAlso,
    OrElse,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// Operator to use when the operands are swapped (`10 < x` is `x > 10`)
    pub fn mirrored(self) -> Self {
        match self {
            BinaryOp::GreaterThan => BinaryOp::LessThan,
            BinaryOp::GreaterThanOrEqual => BinaryOp::LessThanOrEqual,
            BinaryOp::LessThan => BinaryOp::GreaterThan,
            BinaryOp::LessThanOrEqual => BinaryOp::GreaterThanOrEqual,
            other => other,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Negate,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Predicate expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// The entity's own attribute
    Field(String),
    /// Inline constant
    Literal(Literal),
    /// Captured value, bound at translation time by a resolver
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// Method-style call: `receiver.method(args)`, or a free function when
    /// `receiver` is `None`
    Call {
        method: String,
        receiver: Option<Box<Expr>>,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field(name.into())
    }

    pub fn lit(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn eq(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::Equal, self, other)
    }

    pub fn ne(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::NotEqual, self, other)
    }

    pub fn gt(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::GreaterThan, self, other)
    }

    pub fn ge(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::GreaterThanOrEqual, self, other)
    }

    pub fn lt(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::LessThan, self, other)
    }

    pub fn le(self, other: impl Into<Expr>) -> Self {
        Self::binary(BinaryOp::LessThanOrEqual, self, other)
    }

    pub fn and(self, other: Expr) -> Self {
        Self::binary(BinaryOp::AndAlso, self, other)
    }

    pub fn or(self, other: Expr) -> Self {
        Self::binary(BinaryOp::OrElse, self, other)
    }

    pub fn not(self) -> Self {
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// `self.method(args)`
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            method: method.into(),
            receiver: Some(Box::new(self)),
            args,
        }
    }

    pub fn contains(self, value: impl Into<Expr>) -> Self {
        self.call(CONTAINS, vec![value.into()])
    }

    pub fn starts_with(self, value: impl Into<Expr>) -> Self {
        self.call(STARTS_WITH, vec![value.into()])
    }

    pub fn ends_with(self, value: impl Into<Expr>) -> Self {
        self.call(ENDS_WITH, vec![value.into()])
    }

    /// Raw Lucene fragment applied to a field; the caller vouches for its syntax
    pub fn lucene_match(field: impl Into<String>, fragment: impl Into<Expr>) -> Self {
        Expr::Call {
            method: LUCENE_MATCH.to_string(),
            receiver: None,
            args: vec![Expr::field(field), fragment.into()],
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Expr::Field(name) => format!("field '{}'", name),
            Expr::Literal(lit) => format!("literal '{}'", lit),
            Expr::Variable(name) => format!("variable '{}'", name),
            Expr::Binary { op, .. } => format!("{} expression", op),
            Expr::Unary { op, .. } => format!("{} expression", op),
            Expr::Call { method, .. } => format!("call to '{}'", method),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Literal(value.into())
    }
}
