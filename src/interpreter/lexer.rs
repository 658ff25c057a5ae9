use log::debug;
use logos::Logos;

use crate::{error::LexError, util::Position};

/// Represents the kind of a lexical token.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language. Whitespace,
/// newlines and `#` comments are consumed by the lexer and never emitted.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double quoted string literals. The quotes are stripped; no escape
    /// sequences are processed.
    #[regex(r#""[^"]*""#, parse_string)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `let`
    #[token("let")]
    Let,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `def`
    #[token("def")]
    Def,
    /// `return`
    #[token("return")]
    Return,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Line breaks are skipped, but advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// End of input. Never produced by logos itself; appended by [`Lexer`].
    Eof,
}

impl TokenKind {
    /// A short description of the token kind, used in parse errors.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Str(_) => "string",
            Self::Identifier(_) => "identifier",
            Self::Let => "'let'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::For => "'for'",
            Self::Def => "'def'",
            Self::Return => "'return'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::LessEqual => "'<='",
            Self::GreaterEqual => "'>='",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::Equals => "'='",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Comment => "comment",
            Self::NewLine => "newline",
            Self::Eof => "end of input",
        }
    }
}

/// Failure reasons reported by the logos state machine.
///
/// They carry no location; [`Lexer`] attaches one when converting them into
/// a [`LexError`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token matches at the current offset.
    #[default]
    UnexpectedCharacter,
    /// A digit sequence overflowed `i64`.
    IntegerTooLarge,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset at which that line
/// starts, so that every token can be given a line and column.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
    /// Line bookkeeping for a string literal that spans line breaks. Applied
    /// only after the literal's own position has been computed.
    deferred:       Option<(usize, usize)>,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0,
               deferred:   None, }
    }
}

/// Parses an integer literal from the current token slice.
///
/// # Errors
/// Returns [`LexErrorKind::IntegerTooLarge`] if the digits do not fit into
/// an `i64`.
fn parse_integer(lex: &logos::Lexer<TokenKind>) -> Result<i64, LexErrorKind> {
    lex.slice()
       .parse()
       .map_err(|_| LexErrorKind::IntegerTooLarge)
}

/// Strips the quotes from a string literal and records any line breaks it
/// contains.
fn parse_string(lex: &mut logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();

    if let Some(offset) = slice.rfind('\n') {
        let newlines = slice.matches('\n').count();
        lex.extras.deferred = Some((newlines, lex.span().start + offset + 1));
    }

    slice[1..slice.len() - 1].to_string()
}

/// A lexical token together with its raw text and source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is, including any literal payload.
    pub kind:     TokenKind,
    /// The raw text of the token as it appears in the source.
    pub lexeme:   String,
    /// Where the token starts.
    pub position: Position,
}

/// A lazy, position-tracking token stream over a source text.
///
/// The stream yields every token in order, then exactly one
/// [`TokenKind::Eof`] token, then `None`. After an error has been yielded the
/// stream is exhausted. Creating a new `Lexer` over the same text restarts
/// tokenization from scratch.
///
/// ```
/// use minilang::interpreter::lexer::{Lexer, TokenKind};
///
/// let kinds = Lexer::new("let x = 1")
///     .map(|token| token.map(|t| t.kind))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Identifier("x".into()),
///                 TokenKind::Equals,
///                 TokenKind::Integer(1),
///                 TokenKind::Eof]);
/// ```
#[derive(Clone)]
pub struct Lexer<'src> {
    source:   &'src str,
    inner:    logos::Lexer<'src, TokenKind>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { source,
               inner: TokenKind::lexer_with_extras(source, LexerExtras::default()),
               finished: false }
    }

    /// Converts a byte offset on the current line into a position.
    fn position_at(&self, offset: usize) -> Position {
        let extras = &self.inner.extras;
        let column = self.source
                         .get(extras.line_start..offset)
                         .map_or(0, |text| text.chars().count());

        Position::new(extras.line, column + 1)
    }

    fn apply_deferred(&mut self) {
        if let Some((newlines, line_start)) = self.inner.extras.deferred.take() {
            self.inner.extras.line += newlines;
            self.inner.extras.line_start = line_start;
        }
    }

    fn lex_error(&self, kind: &LexErrorKind, position: Position) -> LexError {
        let slice = self.inner.slice();

        match kind {
            LexErrorKind::IntegerTooLarge => LexError::IntegerTooLarge { literal: slice.to_string(),
                                                                         position },
            LexErrorKind::UnexpectedCharacter => match slice.chars().next() {
                Some('"') => LexError::UnterminatedString { position },
                other => {
                    LexError::UnexpectedCharacter { character:
                                                        other.unwrap_or(char::REPLACEMENT_CHARACTER),
                                                    position }
                },
            },
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let position = self.position_at(self.inner.span().start);
                let lexeme = self.inner.slice().to_string();
                self.apply_deferred();

                Some(Ok(Token { kind,
                                lexeme,
                                position }))
            },
            Some(Err(kind)) => {
                self.finished = true;
                let position = self.position_at(self.inner.span().start);

                Some(Err(self.lex_error(&kind, position)))
            },
            None => {
                self.finished = true;

                Some(Ok(Token { kind:     TokenKind::Eof,
                                lexeme:   String::new(),
                                position: self.position_at(self.source.len()), }))
            },
        }
    }
}

/// Tokenizes a complete source text.
///
/// The returned vector always ends with a [`TokenKind::Eof`] token.
///
/// # Errors
/// Returns the first [`LexError`] encountered; no tokens are returned in
/// that case.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!("lexed {} tokens", tokens.len());

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|t| t.kind)
                        .collect()
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("def define return returned"),
                   vec![TokenKind::Def,
                        TokenKind::Identifier("define".into()),
                        TokenKind::Return,
                        TokenKind::Identifier("returned".into()),
                        TokenKind::Eof]);
    }

    #[test]
    fn two_character_operators_win_over_prefixes() {
        assert_eq!(kinds("< <= > >= = == !="),
                   vec![TokenKind::Less,
                        TokenKind::LessEqual,
                        TokenKind::Greater,
                        TokenKind::GreaterEqual,
                        TokenKind::Equals,
                        TokenKind::EqualEqual,
                        TokenKind::BangEqual,
                        TokenKind::Eof]);
    }

    #[test]
    fn comments_and_newlines_are_discarded() {
        assert_eq!(kinds("1 # one\n# whole line\n2"),
                   vec![TokenKind::Integer(1), TokenKind::Integer(2), TokenKind::Eof]);
    }

    #[test]
    fn strings_keep_raw_contents() {
        assert_eq!(kinds(r#""a # b""#),
                   vec![TokenKind::Str("a # b".into()), TokenKind::Eof]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("let a = 1\n  a = \"x\ny\" + b").unwrap();
        let positions = tokens.iter().map(|t| t.position).collect::<Vec<_>>();

        assert_eq!(positions,
                   vec![Position::new(1, 1),
                        Position::new(1, 5),
                        Position::new(1, 7),
                        Position::new(1, 9),
                        Position::new(2, 3),
                        Position::new(2, 5),
                        Position::new(2, 7),
                        Position::new(3, 4),
                        Position::new(3, 6),
                        Position::new(3, 7)]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(tokenize("let s = \"abc"),
                   Err(LexError::UnterminatedString { position: Position::new(1, 9) }));
    }

    #[test]
    fn unknown_character_is_an_error() {
        assert_eq!(tokenize("1 + @"),
                   Err(LexError::UnexpectedCharacter { character: '@',
                                                       position:  Position::new(1, 5), }));
        assert!(matches!(tokenize("!x"), Err(LexError::UnexpectedCharacter { character: '!', .. })));
    }

    #[test]
    fn oversized_integer_is_an_error() {
        assert!(matches!(tokenize("99999999999999999999"),
                         Err(LexError::IntegerTooLarge { .. })));
    }

    #[test]
    fn lexer_is_restartable() {
        let source = "print(1)";
        let first = Lexer::new(source).count();
        let second = Lexer::new(source).count();

        assert_eq!(first, second);
        assert_eq!(first, 5);
    }
}
