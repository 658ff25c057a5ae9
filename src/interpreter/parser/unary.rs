use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            nesting::Nesting,
            utils::{expect, parse_comma_separated, unexpected},
        },
    },
    util::stack,
};

/// Parses a unary expression.
///
/// The only prefix operator is `-` (integer negation). It is
/// right-associative, so `--x` is parsed as `-(-x)`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(token) = tokens.next_if(|token| token.kind == TokenKind::Minus) {
        let _nesting = Nesting::enter(token.position)?;
        let operand = stack::guarded(|| parse_unary(tokens))?;
        Ok(Expr::UnaryOp { op:       UnaryOperator::Negate,
                           operand:  Box::new(operand),
                           position: token.position, })
    } else {
        let primary = parse_primary(tokens)?;
        parse_postfix(tokens, primary)
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - integer and string literals
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := INTEGER | STRING | IDENTIFIER
///              | "(" expression ")"
///              | "[" (expression ("," expression)*)? "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = tokens.next() else {
        return Err(unexpected("expression", None));
    };
    let position = token.position;

    match &token.kind {
        TokenKind::Integer(value) => Ok(Expr::Literal { value: LiteralValue::Integer(*value),
                                                        position }),
        TokenKind::Str(value) => Ok(Expr::Literal { value: LiteralValue::Str(value.clone()),
                                                    position }),
        TokenKind::Identifier(name) => Ok(Expr::Identifier { name: name.clone(),
                                                             position }),
        TokenKind::LParen => {
            let _nesting = Nesting::enter(position)?;
            let inner = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RParen)?;
            Ok(inner)
        },
        TokenKind::LBracket => {
            let _nesting = Nesting::enter(position)?;
            let elements = parse_comma_separated(tokens, parse_expression, &TokenKind::RBracket)?;
            Ok(Expr::ArrayLiteral { elements, position })
        },
        _ => Err(unexpected("expression", Some(token))),
    }
}

/// Parses postfix operators applied to an expression.
///
/// Two postfix constructs chain freely, left to right:
///
/// 1. **Calls** `expr(arg, ...)`
/// 2. **Indexing** `expr[index]`
///
/// so `make()(1)[0]` calls `make`, calls its result with `1`, then indexes
/// the returned value.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "(" arguments? ")"
///              | postfix "[" expression "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression to which postfix operators will be applied.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if an argument list or index is malformed or left
/// unclosed.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut nesting = Nesting::default();

    loop {
        if let Some(open) = tokens.next_if(|token| token.kind == TokenKind::LParen) {
            nesting.deepen(open.position)?;
            let arguments = parse_comma_separated(tokens, parse_expression, &TokenKind::RParen)?;
            node = Expr::Call { callee: Box::new(node),
                                arguments,
                                position: open.position };
            continue;
        }

        if let Some(open) = tokens.next_if(|token| token.kind == TokenKind::LBracket) {
            nesting.deepen(open.position)?;
            let index = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RBracket)?;
            node = Expr::Index { target:   Box::new(node),
                                 index:    Box::new(index),
                                 position: open.position, };
            continue;
        }

        return Ok(node);
    }
}
