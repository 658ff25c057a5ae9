use std::iter::Peekable;

use log::debug;

use crate::{
    ast::{Expr, Program},
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, TokenKind, tokenize},
        parser::{binary::parse_assignment, statement::parse_statement, utils::skip_semicolons},
    },
    util::stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full token sequence into a [`Program`].
///
/// Statements are parsed until the `Eof` token. A token vector produced by
/// [`tokenize`] always ends with one.
///
/// Grammar: `program := statement* EOF`
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
///
/// # Example
/// ```
/// use minilang::interpreter::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("let x = 1 + 2\nprint(x)").unwrap();
/// let program = parse(&tokens).unwrap();
///
/// assert_eq!(program.statements.len(), 2);
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Program> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    loop {
        skip_semicolons(&mut iter);

        match iter.peek() {
            None | Some(Token { kind: TokenKind::Eof,
                                .. }) => break,
            Some(_) => statements.push(parse_statement(&mut iter)?),
        }
    }

    debug!("parsed {} top-level statements", statements.len());

    Ok(Program { statements })
}

/// Tokenizes and parses a source text in one step.
///
/// # Errors
/// Returns [`Error::Lex`] or [`Error::Parse`] for the first failure.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    stack::guarded(|| parse_assignment(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{AssignTarget, BinaryOperator, LiteralValue, Statement},
        interpreter::parser::nesting::MAX_NESTING_DEPTH,
        util::Position,
    };

    fn parse_ok(source: &str) -> Program {
        parse_source(source).unwrap_or_else(|err| panic!("'{source}' failed to parse: {err}"))
    }

    fn parse_err(source: &str) -> ParseError {
        match parse_source(source) {
            Err(Error::Parse(err)) => err,
            other => panic!("expected a parse error for '{source}', got {other:?}"),
        }
    }

    fn single_expression(source: &str) -> Expr {
        let mut program = parse_ok(source);
        assert_eq!(program.statements.len(), 1);
        match program.statements.remove(0) {
            Statement::Expression { expr, .. } => expr,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let Expr::BinaryOp { op, right, .. } = single_expression("1 + 2 * 3") else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*right,
                         Expr::BinaryOp { op: BinaryOperator::Mul,
                                          .. }));
    }

    #[test]
    fn grouping_overrides_precedence() {
        let Expr::BinaryOp { op, left, .. } = single_expression("(1 + 2) * 3") else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Mul);
        assert!(matches!(*left,
                         Expr::BinaryOp { op: BinaryOperator::Add,
                                          .. }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let Expr::BinaryOp { left, right, .. } = single_expression("10 - 4 - 3") else {
            panic!("expected a binary operation");
        };
        assert!(matches!(*left,
                         Expr::BinaryOp { op: BinaryOperator::Sub,
                                          .. }));
        assert!(matches!(*right,
                         Expr::Literal { value: LiteralValue::Integer(3),
                                         .. }));
    }

    #[test]
    fn comparison_is_below_arithmetic() {
        let Expr::BinaryOp { op, left, right, .. } = single_expression("1 + 1 == 2") else {
            panic!("expected a binary operation");
        };
        assert_eq!(op, BinaryOperator::Equal);
        assert!(matches!(*left, Expr::BinaryOp { .. }));
        assert!(matches!(*right, Expr::Literal { .. }));
    }

    #[test]
    fn assignment_is_right_associative() {
        let Expr::Assign { target, value, .. } = single_expression("a = b = 1") else {
            panic!("expected an assignment");
        };
        assert_eq!(target, AssignTarget::Identifier { name: "a".to_string() });
        assert!(matches!(*value, Expr::Assign { .. }));
    }

    #[test]
    fn index_assignment_target() {
        let Expr::Assign { target, .. } = single_expression("xs[0] = 9") else {
            panic!("expected an assignment");
        };
        assert!(matches!(target, AssignTarget::Index { .. }));
    }

    #[test]
    fn postfix_chains_nest_left_to_right() {
        let Expr::Index { target, .. } = single_expression("make()(1)[0]") else {
            panic!("expected an index expression");
        };
        let Expr::Call { callee, arguments, .. } = *target else {
            panic!("expected a call");
        };
        assert_eq!(arguments.len(), 1);
        assert!(matches!(*callee, Expr::Call { .. }));
    }

    #[test]
    fn negation_nests() {
        let Expr::UnaryOp { operand, .. } = single_expression("--5") else {
            panic!("expected a unary operation");
        };
        assert!(matches!(*operand, Expr::UnaryOp { .. }));
    }

    #[test]
    fn else_if_becomes_block_with_nested_if() {
        let program = parse_ok("if (a) { 1 } else if (b) { 2 } else { 3 }");
        let Statement::If { else_branch: Some(block), .. } = &program.statements[0] else {
            panic!("expected an if with an else branch");
        };
        assert_eq!(block.statements.len(), 1);
        assert!(matches!(block.statements[0],
                         Statement::If { else_branch: Some(_),
                                         .. }));
    }

    #[test]
    fn for_header_clauses() {
        let program = parse_ok("for (let k = 0; k < 3; k = k + 1) { print(k) }");
        let Statement::For { context, .. } = &program.statements[0] else {
            panic!("expected a for loop");
        };
        assert!(matches!(*context.init, Statement::Let { .. }));
        assert!(matches!(*context.update, Statement::Expression { .. }));
        assert_eq!(context.body.statements.len(), 1);
    }

    #[test]
    fn function_definition_and_bare_return() {
        let program = parse_ok("def f(a, b) { return }\ndef g() { return a + b; }");
        let Statement::Function(def) = &program.statements[0] else {
            panic!("expected a function definition");
        };
        assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(def.body.statements[0], Statement::Return { value: None, .. }));

        let Statement::Function(def) = &program.statements[1] else {
            panic!("expected a function definition");
        };
        assert!(def.params.is_empty());
        assert!(matches!(def.body.statements[0],
                         Statement::Return { value: Some(_),
                                             .. }));
    }

    #[test]
    fn semicolons_and_newlines_are_not_required() {
        let program = parse_ok("let a = 1; let b = 2;; print(a + b)\nlet c = 3 c");
        assert_eq!(program.statements.len(), 5);
    }

    #[test]
    fn empty_program_and_empty_block() {
        assert!(parse_ok("").statements.is_empty());
        let program = parse_ok("{ }");
        assert!(matches!(&program.statements[0], Statement::Block(block) if block.statements.is_empty()));
    }

    #[test]
    fn missing_closing_brace() {
        let err = parse_err("while (1) { print(1)");
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
        assert!(err.to_string().contains("'}'"));
    }

    #[test]
    fn missing_parenthesis_reports_found_token() {
        let err = parse_err("if x { 1 }");
        assert_eq!(err,
                   ParseError::UnexpectedToken { expected: "'('".to_string(),
                                                 found:    "x".to_string(),
                                                 position: Position::new(1, 4), });
    }

    #[test]
    fn invalid_assignment_targets() {
        assert!(matches!(parse_err("1 = 2"), ParseError::InvalidAssignmentTarget { .. }));
        assert!(matches!(parse_err("f() = 2"), ParseError::InvalidAssignmentTarget { .. }));
    }

    #[test]
    fn invalid_assignment_target_points_at_left_side() {
        assert_eq!(parse_err("let y = 0\n7 = y"),
                   ParseError::InvalidAssignmentTarget { position: Position::new(2, 1) });
    }

    fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
        format!("{}{inner}{}", open.repeat(depth), close.repeat(depth))
    }

    #[test]
    fn deep_but_bounded_nesting_parses() {
        parse_ok(&nested("(", "1", ")", 500));
        parse_ok(&nested("[", "1", "]", 500));
        parse_ok(&nested("{ ", "1", " }", 300));
        parse_ok(&format!("{}1", "-".repeat(500)));
        parse_ok(&format!("1{}", " + 1".repeat(500)));
    }

    #[test]
    fn excessive_nesting_is_a_parse_error() {
        let err = parse_err(&nested("(", "1", ")", 20_000));
        assert_eq!(err,
                   ParseError::NestingTooDeep { limit:    MAX_NESTING_DEPTH,
                                                position: Position::new(1, MAX_NESTING_DEPTH + 1), });

        assert!(matches!(parse_err(&nested("[", "1", "]", 5_000)),
                         ParseError::NestingTooDeep { .. }));
        assert!(matches!(parse_err(&nested("{", "", "}", 5_000)),
                         ParseError::NestingTooDeep { .. }));
        assert!(matches!(parse_err(&format!("{}1", "-".repeat(5_000))),
                         ParseError::NestingTooDeep { .. }));
        assert!(matches!(parse_err(&format!("1{}", " * 2".repeat(5_000))),
                         ParseError::NestingTooDeep { .. }));
        assert!(matches!(parse_err(&format!("f{}", "()".repeat(5_000))),
                         ParseError::NestingTooDeep { .. }));
    }

    #[test]
    fn nesting_depth_recovers_after_an_error() {
        parse_err(&nested("(", "1", ")", 5_000));
        parse_ok(&nested("(", "1", ")", MAX_NESTING_DEPTH));
    }

    #[test]
    fn unclosed_argument_list() {
        let err = parse_err("print(1, 2");
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn dangling_operator() {
        let err = parse_err("let x = 1 +");
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }
}
