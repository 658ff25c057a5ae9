use std::iter::Peekable;

use crate::{
    ast::Block,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::ParseResult,
            nesting::Nesting,
            statement::parse_statement,
            utils::{expect, skip_semicolons, unexpected},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements, optionally terminated by
/// `;`. Parsing continues until the closing `}` token is consumed. Running
/// out of tokens before the `}` is an error.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
///
/// # Returns
/// A [`Block`] holding the parsed statements and the position of its `{`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a Token> + Clone
{
    let open = expect(tokens, &TokenKind::LBrace)?;
    let _nesting = Nesting::enter(open.position)?;
    let mut statements = Vec::new();

    loop {
        skip_semicolons(tokens);

        match tokens.peek() {
            Some(Token { kind: TokenKind::RBrace,
                         .. }) => {
                tokens.next();
                break;
            },
            Some(Token { kind: TokenKind::Eof,
                         .. })
            | None => return Err(unexpected("'}'", tokens.peek().copied())),
            Some(_) => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(Block { statements,
               position: open.position })
}
