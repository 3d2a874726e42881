//! Centralised error hierarchy for the **Lox front end**.
//!
//! The scanner and parser never abort on a bad lexeme or statement: they hand
//! a [`LoxError`] to a [`Reporter`] and keep going, so one run surfaces every
//! independent problem.  Scope‑resolution failures raised by the environment
//! are returned as ordinary `Err` values for the evaluator to surface.
//!
//! The module **does not** print diagnostics itself.

use thiserror::Error;

use log::debug;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the crate.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error, located at the offending token.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,

        /// ` at 'lexeme'`, or ` at end` when the token is `EOF`.
        location: String,
    },

    /// Read or assignment of a name that no frame in the chain defines.
    #[error("Undefined variable '{}'.\n[line {}]", .name.lexeme, .name.line)]
    UndefinedVariable { name: Token },

    /// A resolved distance points past the outermost frame.
    #[error("No scope {distance} level(s) out for '{}'.\n[line {}]", .name.lexeme, .name.line)]
    InvalidDepth { name: Token, distance: usize },
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**, located at `token`.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = if token.is(&TokenType::EOF) {
            " at end".to_owned()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        debug!(
            "Creating Parse error: line={}, location={}, msg={}",
            token.line, location, message
        );

        LoxError::Parse {
            message,
            line: token.line,
            location,
        }
    }

    pub fn undefined(name: &Token) -> Self {
        LoxError::UndefinedVariable { name: name.clone() }
    }

    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            LoxError::Lex { line, .. } | LoxError::Parse { line, .. } => *line,
            LoxError::UndefinedVariable { name } | LoxError::InvalidDepth { name, .. } => {
                name.line
            }
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Sink for recoverable front‑end errors.
///
/// The driver owns the implementation and decides, via [`had_error`], whether
/// it is safe to go on to execution.
///
/// [`had_error`]: Reporter::had_error
pub trait Reporter {
    fn report(&mut self, error: LoxError);

    fn had_error(&self) -> bool;
}

/// A [`Reporter`] that keeps every error in arrival order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<LoxError> {
        self.errors
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, error: LoxError) {
        debug!("Reported: {}", error);

        self.errors.push(error);
    }

    fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}
