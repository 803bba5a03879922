//! Error types for the interpreter front end.
//!
//! Runtime errors are not represented here: they are ordinary language
//! values (instances of `Error`, `TypeError`, ...) thrown through the
//! evaluator's control-flow result. This module only covers failures that
//! abort before or outside evaluation.

use std::path::PathBuf;
use thiserror::Error;

/// Host-visible failures: lexing, parsing and file handling.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected token \"{lexeme}\" at {line}:{column}")]
    Lex {
        line: u32,
        column: u32,
        lexeme: String,
    },

    #[error("unexpected token \"{found}\" at {line}:{column}")]
    UnexpectedToken {
        line: u32,
        column: u32,
        found: String,
    },

    #[error("expected {expected} and got {found} at {line}:{column}")]
    ExpectedToken {
        line: u32,
        column: u32,
        expected: String,
        found: String,
    },

    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An uncaught thrown value, already stringified through its
    /// prototype-chain `toString`. Surfaced by [`crate::Interpreter::eval`];
    /// `run` reports the value on the error stream instead.
    #[error("Uncaught {0}")]
    Uncaught(String),
}

impl Error {
    pub fn lex(line: u32, column: u32, lexeme: impl Into<String>) -> Self {
        Error::Lex {
            line,
            column,
            lexeme: lexeme.into(),
        }
    }

    pub fn unexpected_token(line: u32, column: u32, found: impl Into<String>) -> Self {
        Error::UnexpectedToken {
            line,
            column,
            found: found.into(),
        }
    }

    pub fn expected_token(
        line: u32,
        column: u32,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Error::ExpectedToken {
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }
}
