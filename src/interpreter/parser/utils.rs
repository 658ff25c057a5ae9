use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
    util::Position,
};

/// Builds the error for a token that does not continue the current rule.
///
/// The `Eof` token (or an exhausted stream) is reported as
/// [`ParseError::UnexpectedEndOfInput`].
pub(in crate::interpreter::parser) fn unexpected(expected: &str,
                                                 found: Option<&Token>)
                                                 -> ParseError {
    match found {
        Some(token) if token.kind != TokenKind::Eof => {
            ParseError::UnexpectedToken { expected: expected.to_string(),
                                          found:    token.lexeme.clone(),
                                          position: token.position, }
        },
        Some(token) => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                          position: token.position, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                                   position: Position::default(), },
    }
}

/// Consumes the next token if it has the given kind.
///
/// # Errors
/// Returns `expected <kind>` if the next token is of any other kind.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: &TokenKind)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next_if(|token| token.kind == *kind) {
        Some(token) => Ok(token),
        None => Err(unexpected(kind.describe(), tokens.peek().copied())),
    }
}

/// Returns `true` if the next token has the given kind, without consuming it.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().is_some_and(|token| token.kind == *kind)
}

/// Skips any number of optional `;` statement terminators.
pub(in crate::interpreter::parser) fn skip_semicolons<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while tokens.next_if(|token| token.kind == TokenKind::Semicolon)
                .is_some()
    {}
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call argument lists and
/// parameter lists. It repeatedly calls `parse_item` to parse one element,
/// expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered, or the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &TokenKind)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut items = Vec::new();
    if tokens.next_if(|token| token.kind == *closing).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(Token { kind: TokenKind::Comma,
                         .. }) => {},
            Some(token) if token.kind == *closing => break,
            other => {
                return Err(unexpected(&format!("',' or {}", closing.describe()), other));
            },
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token { kind: TokenKind::Identifier(name),
                     .. }) => Ok(name.clone()),
        other => Err(unexpected("identifier", other)),
    }
}
