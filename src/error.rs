//! Error definitions for all `rule_expr` stages.

use thiserror::Error;

#[derive(Debug, Error)]
/// Top-level error type returned by public APIs.
///
/// Every variant is fatal to the parse or evaluate call that raised it;
/// there is no recovery, aggregation, or partial output.
pub enum ExprError {
    /// The lexer met a character no token rule accepts.
    #[error("lex error: unexpected character '{character}' at offset {offset}")]
    Lex {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the source text.
        offset: usize,
    },
    /// The parser met a token other than the one the grammar requires.
    #[error("parse error: expected {expected}, got {actual}")]
    Parse {
        /// What the grammar required at this point.
        expected: String,
        /// What was actually found.
        actual: String,
    },
    /// Identifier not present in the context or the builtin registry.
    #[error("name error: {0}")]
    Name(String),
    /// Null/undefined dereference, property outside the sandbox whitelist,
    /// or a call target that is not callable.
    #[error("type error: {0}")]
    Type(String),
}
