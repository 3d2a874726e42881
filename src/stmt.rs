use serde::Serialize;

use crate::expr::Expr;
use crate::token::Token;

/// A named function: a `fun` declaration or a class method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub name: Token,

    /// Parameter name tokens (arity ≤ 255).
    pub params: Vec<Token>,

    pub body: Vec<Stmt>,
}

/// **Abstract‑Syntax‑Tree node** for *statements*.  A program is a sequence
/// of these returned by [`Parser::parse`](crate::parser::Parser::parse).
///
/// There is no `for` node: the parser lowers `for` into `Block` + `While`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Braced scope containing zero or more declarations/statements.
    Block { statements: Vec<Stmt> },

    Class {
        name: Token,
        /// Always an `Expr::Variable` when present.
        superclass: Option<Expr>,
        methods: Vec<Function>,
    },

    /// Stand‑alone expression terminated by a semicolon.
    Expression { expression: Expr },

    Function(Function),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    Print { expression: Expr },

    Return {
        /// The `return` keyword token (for runtime error locations).
        keyword: Token,
        /// Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },

    /// Variable declaration: `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    While { condition: Expr, body: Box<Stmt> },
}
