use std::iter::Peekable;

use crate::{
    ast::{AssignTarget, BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, nesting::Nesting, unary::parse_unary},
    },
    util::stack,
};

/// Parses an assignment expression.
///
/// Assignment has the lowest precedence and is right-associative, so
/// `a = b = 1` assigns `1` to `b` and then to `a`. The left-hand side is
/// parsed as an ordinary expression first and then validated: only
/// identifiers and index expressions can be assigned to.
///
/// Grammar: `assignment := comparison ("=" assignment)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Assign`] node, or the comparison expression unchanged when no
/// `=` follows.
///
/// # Errors
/// Returns [`ParseError::InvalidAssignmentTarget`] at the position of the
/// left-hand side when it is not assignable, such as in `1 = 2` or `f() = 3`.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let left = parse_comparison(tokens)?;

    let Some(equals) = tokens.next_if(|token| token.kind == TokenKind::Equals) else {
        return Ok(left);
    };

    let _nesting = Nesting::enter(equals.position)?;
    let value = stack::guarded(|| parse_assignment(tokens))?;
    let position = left.position();

    let target = match left {
        Expr::Identifier { name, .. } => AssignTarget::Identifier { name },
        Expr::Index { target, index, .. } => AssignTarget::Index { target, index },
        _ => return Err(ParseError::InvalidAssignmentTarget { position }),
    };

    Ok(Expr::Assign { target,
                      value: Box::new(value),
                      position })
}

/// Parses comparison expressions.
///
/// Equality and ordering share one precedence level and are
/// left-associative: `a < b == c` is `(a < b) == c`.
///
/// Grammar: `comparison := additive (("==" | "!=" | "<" | ">" | "<=" | ">=") additive)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A possibly nested `Expr::BinaryOp` tree.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_additive(tokens)?;
    let mut nesting = Nesting::default();

    while let Some(&token) = tokens.peek() {
        let op = match token_to_binary_operator(&token.kind) {
            Some(op) if is_comparison_op(op) => op,
            _ => break,
        };

        tokens.next(); // consume operator
        nesting.deepen(token.position)?;
        let right = parse_additive(tokens)?;

        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position: token.position };
    }

    Ok(left)
}

/// Parses additive expressions.
///
/// Handles left-associative chains of `+` and `-`.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree of additions and subtractions.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    let mut nesting = Nesting::default();

    loop {
        if let Some(&token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            nesting.deepen(token.position)?;

            let right = parse_multiplicative(tokens)?;

            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: token.position };

            continue;
        }

        break;
    }

    Ok(left)
}

/// Parses multiplicative expressions.
///
/// Handles left-associative chains of `*` and `/`. Binds tighter than
/// addition, so `1 + 2 * 3` is `1 + (2 * 3)`.
///
/// Grammar: `multiplicative := unary (("*" | "/") unary)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree of products and quotients.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = parse_unary(tokens)?;
    let mut nesting = Nesting::default();

    loop {
        if let Some(&token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            nesting.deepen(token.position)?;

            let right = parse_unary(tokens)?;

            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position: token.position };

            continue;
        }

        break;
    }

    Ok(left)
}

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `None` for every token that is not a binary operator, including
/// the assignment `=`.
///
/// # Example
/// ```
/// use minilang::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&TokenKind::Equals), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the comparison class.
///
/// # Example
/// ```
/// use minilang::{ast::BinaryOperator, interpreter::parser::binary::is_comparison_op};
///
/// assert!(is_comparison_op(BinaryOperator::LessEqual));
/// assert!(is_comparison_op(BinaryOperator::NotEqual));
/// assert!(!is_comparison_op(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}
