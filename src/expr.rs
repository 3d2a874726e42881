use serde::Serialize;

use crate::token::Token;

/// A **literal constant** that appears directly in the source code.
///
/// Only `nil`, booleans, numbers and strings can appear here; the parser
/// copies the value out of the token so the leaf does not keep it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    /// Integral lexemes such as `"3"` are still parsed as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    Bool(bool),

    /// The `nil` literal.
    Nil,
}

/// **Abstract‑Syntax‑Tree node** for every kind of *expression*.
///
/// Each node owns its children; tokens are embedded by value so a later
/// stage can point at the exact source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// `name = value`
    Assign { name: Token, value: Box<Expr> },

    /// Infix binary operator expression
    /// *Example:* `a + b`, `x <= y`
    Binary {
        left: Box<Expr>,
        /// Operator token such as `+`, `*`, `==`, …
        operator: Token,
        right: Box<Expr>,
    },

    /// Function‑ or method‑call expression
    /// *Example:* `clock()` or `add(1, 2)`
    Call {
        /// Expression that evaluates to a callable.
        callee: Box<Expr>,
        /// The closing `)` token, retained for error reporting.
        paren: Token,
        /// Argument list (may be empty).
        arguments: Vec<Expr>,
    },

    /// object.property
    Get { object: Box<Expr>, name: Token },

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping { expression: Box<Expr> },

    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal { value: LiteralValue },

    /// Short‑circuiting logical operators `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token, // `AND` or `OR`
        right: Box<Expr>,
    },

    /// object.property = value
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// `super.method`
    Super { keyword: Token, method: Token },

    /// The 'this' keyword inside a method.
    This { keyword: Token },

    /// Prefix unary operator expression
    /// *Example:* `!isReady` or `-42`
    Unary { operator: Token, right: Box<Expr> },

    /// Variable access.
    Variable { name: Token },
}

impl Expr {
    pub fn literal(value: LiteralValue) -> Self {
        Expr::Literal { value }
    }

    /// Best‑effort source line for diagnostics: the first token the node
    /// carries, or its first child's line. Literals carry no token.
    pub fn line(&self) -> Option<usize> {
        match self {
            Expr::Assign { name, .. } => Some(name.line),
            Expr::Binary { operator, .. } => Some(operator.line),
            Expr::Call { paren, .. } => Some(paren.line),
            Expr::Get { name, .. } => Some(name.line),
            Expr::Grouping { expression } => expression.line(),
            Expr::Literal { .. } => None,
            Expr::Logical { operator, .. } => Some(operator.line),
            Expr::Set { name, .. } => Some(name.line),
            Expr::Super { keyword, .. } => Some(keyword.line),
            Expr::This { keyword } => Some(keyword.line),
            Expr::Unary { operator, .. } => Some(operator.line),
            Expr::Variable { name } => Some(name.line),
        }
    }
}
