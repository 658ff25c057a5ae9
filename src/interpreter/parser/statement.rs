use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Block, Expr, ForLoop, FunctionDef, Statement},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            nesting::Nesting,
            utils::{check, expect, parse_comma_separated, parse_identifier, unexpected},
        },
    },
    util::stack,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration (`let`),
/// - an `if` statement with optional `else` / `else if` chain,
/// - a `while` loop,
/// - a `for` loop,
/// - a function definition (`def`),
/// - a `return` statement,
/// - a bare block,
/// - an expression used as a statement.
///
/// The construct is chosen from the leading token; anything that does not
/// start with a keyword or `{` is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(&token) = tokens.peek() else {
        return Err(unexpected("statement", None));
    };

    stack::guarded(|| match token.kind {
        TokenKind::Let => parse_variable_declaration(tokens),
        TokenKind::If => parse_if(tokens),
        TokenKind::While => parse_while(tokens),
        TokenKind::For => parse_for(tokens),
        TokenKind::Def => parse_function_definition(tokens),
        TokenKind::Return => parse_return(tokens),
        TokenKind::LBrace => Ok(Statement::Block(parse_block(tokens)?)),
        _ => parse_expression_statement(tokens),
    })
}

/// Parses a statement allowed inside a `for` header: a declaration or an
/// expression.
fn parse_simple_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    if check(tokens, &TokenKind::Let) {
        parse_variable_declaration(tokens)
    } else {
        parse_expression_statement(tokens)
    }
}

fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let expr = parse_expression(tokens)?;
    Ok(Statement::Expression { position: expr.position(),
                               expr })
}

/// Parses a variable declaration statement.
///
/// A declaration has the form `let <identifier> = <expression>`.
///
/// # Errors
/// Returns a `ParseError` if the identifier or `=` is missing, or if the
/// initializer fails to parse.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::Let)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::Equals)?;
    let initializer = parse_expression(tokens)?;

    Ok(Statement::Let { name,
                        initializer,
                        position: keyword.position })
}

/// Parses a parenthesised condition, as used by `if` and `while`.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    expect(tokens, &TokenKind::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::RParen)?;
    Ok(condition)
}

/// Parses an `if` statement.
///
/// Grammar:
/// ```text
///     if := "if" "(" expression ")" block ("else" (if | block))?
/// ```
///
/// An `else if` is represented as an else-block holding exactly one nested
/// `if` statement, so the evaluator only ever sees blocks as branches.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::If)?;
    let condition = parse_condition(tokens)?;
    let then_branch = parse_block(tokens)?;

    let else_branch = if let Some(else_token) = tokens.next_if(|token| token.kind == TokenKind::Else) {
        if check(tokens, &TokenKind::If) {
            let _nesting = Nesting::enter(else_token.position)?;
            let nested = stack::guarded(|| parse_if(tokens))?;
            Some(Block { position:   nested.position(),
                         statements: vec![nested], })
        } else {
            Some(parse_block(tokens)?)
        }
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       position: keyword.position })
}

/// Parses a `while` loop.
///
/// Grammar: `while := "while" "(" expression ")" block`
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::While)?;
    let condition = parse_condition(tokens)?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          position: keyword.position })
}

/// Parses a `for` loop.
///
/// The header holds three clauses separated by mandatory semicolons. The
/// init and update clauses are ordinary statements (a `let` or an
/// expression); the condition is an expression.
///
/// Grammar:
/// ```text
///     for := "for" "(" simple_statement ";" expression ";" simple_statement ")" block
/// ```
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::For)?;
    expect(tokens, &TokenKind::LParen)?;
    let init = parse_simple_statement(tokens)?;
    expect(tokens, &TokenKind::Semicolon)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &TokenKind::Semicolon)?;
    let update = parse_simple_statement(tokens)?;
    expect(tokens, &TokenKind::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Statement::For { context:  ForLoop { init: Box::new(init),
                                            condition,
                                            update: Box::new(update),
                                            body },
                        position: keyword.position, })
}

/// Parses a function definition of the form
/// `def <name>(param1, param2, ...) { ... }`.
///
/// # Errors
/// Returns a `ParseError` if the name, the parameter list or the body block
/// is malformed.
fn parse_function_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::Def)?;
    let name = parse_identifier(tokens)?;
    expect(tokens, &TokenKind::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &TokenKind::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                 params,
                                                 body,
                                                 position: keyword.position })))
}

/// Parses a `return` statement.
///
/// The value is optional: a `return` directly followed by `}`, `;` or the
/// end of input returns nothing.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    let keyword = expect(tokens, &TokenKind::Return)?;

    let value = match tokens.peek() {
        None
        | Some(Token { kind: TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof,
                       .. }) => None,
        Some(_) => Some(parse_expression(tokens)?),
    };

    Ok(Statement::Return { value,
                           position: keyword.position })
}
