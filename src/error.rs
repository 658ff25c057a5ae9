use crate::util::Position;

/// Lexing errors.
///
/// Raised while turning source text into tokens: characters the language
/// does not know, string literals that never close and integer literals that
/// do not fit into 64 bits.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens, such as a missing closing brace or an unexpected keyword.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: undefined
/// variables, type mismatches, division by zero, out of bounds indexing,
/// arity mismatches, calls to non-callable values, stray `return`s and
/// runaway recursion.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The single terminal error surfaced by one [`crate::run`] invocation.
///
/// Each pipeline stage fails fast, so exactly one of the stage errors is ever
/// reported.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not form a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the source position of the failure.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(e) => e.position(),
            Self::Parse(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }

    /// Whether evaluation was aborted because the call depth bound was hit.
    #[must_use]
    pub const fn is_stack_overflow(&self) -> bool {
        matches!(self, Self::Runtime(RuntimeError::StackOverflow { .. }))
    }
}
