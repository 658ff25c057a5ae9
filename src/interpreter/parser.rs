/// Binary expression parsing.
///
/// Implements the precedence climb for assignment, comparison, additive and
/// multiplicative operators.
pub mod binary;
/// Block parsing.
///
/// Parses brace-delimited statement lists.
pub mod block;
/// Core parser entry points and shared types.
///
/// Contains the top-level program and expression entry points and the
/// `ParseResult` alias.
pub mod core;
/// Nesting depth accounting.
///
/// Bounds how deeply brackets, blocks and operator chains may nest.
pub mod nesting;
/// Statement parsing.
///
/// Parses declarations, control flow, function definitions, returns and
/// expression statements.
pub mod statement;
/// Unary, postfix and primary expression parsing.
///
/// Handles negation, literals, identifiers, grouping, array literals and
/// call/index chains.
pub mod unary;
/// Utility functions for parsing.
///
/// Provides helpers for token expectations, comma-separated lists and
/// identifiers.
pub mod utils;

pub use self::core::{parse, parse_expression, parse_source};
