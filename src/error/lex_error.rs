use crate::util::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexError {
    /// A character that starts no token.
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        position:  Position,
    },
    /// A string literal without its closing quote.
    UnterminatedString {
        /// Position of the opening quote.
        position: Position,
    },
    /// An integer literal that does not fit into a signed 64-bit integer.
    IntegerTooLarge {
        /// The literal as written.
        literal:  String,
        /// Where the literal starts.
        position: Position,
    },
}

impl LexError {
    /// Returns the position at which lexing failed.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::IntegerTooLarge { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, position } => {
                write!(f, "Error on {position}: Invalid character '{character}'.")
            },
            Self::UnterminatedString { position } => {
                write!(f, "Error on {position}: Unterminated string literal.")
            },
            Self::IntegerTooLarge { literal, position } => {
                write!(f, "Error on {position}: Integer literal {literal} is too large.")
            },
        }
    }
}

impl std::error::Error for LexError {}
