use crate::util::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// The next token does not continue the rule being parsed.
    UnexpectedToken {
        /// What the rule required at this point (e.g. `'{'`, `expression`).
        expected: String,
        /// The lexeme that was found instead.
        found:    String,
        /// Position of the found token.
        position: Position,
    },
    /// The token stream ended in the middle of a rule.
    UnexpectedEndOfInput {
        /// What the rule required at this point.
        expected: String,
        /// Position of the end of input.
        position: Position,
    },
    /// The left side of `=` is neither a name nor an index expression.
    InvalidAssignmentTarget {
        /// Position of the left-hand side expression.
        position: Position,
    },
    /// Brackets, blocks or operator chains nest deeper than the parser
    /// accepts.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:    usize,
        /// Position of the construct that opened one level too many.
        position: Position,
    },
}

impl ParseError {
    /// Returns the position at which parsing failed.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::InvalidAssignmentTarget { position }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    position, } => {
                write!(f, "Error on {position}: Expected {expected}, found '{found}'.")
            },
            Self::UnexpectedEndOfInput { expected, position } => {
                write!(f, "Error on {position}: Expected {expected}, found end of input.")
            },
            Self::InvalidAssignmentTarget { position } => write!(f,
                                                                 "Error on {position}: Invalid assignment target. Only names and index expressions can be assigned to."),
            Self::NestingTooDeep { limit, position } => {
                write!(f, "Error on {position}: Code is nested too deeply (more than {limit} levels).")
            },
        }
    }
}

impl std::error::Error for ParseError {}
