/// The environment module implements lexical scopes.
///
/// Scopes map names to values and link to the scope they were created in.
/// Closures keep their defining scope alive through a shared handle.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages scopes and produces results. It is the core execution engine of
/// the interpreter.
///
/// # Responsibilities
/// - Evaluates every AST node variant.
/// - Handles variables, functions, closures and control flow.
/// - Reports runtime errors such as division by zero or undefined variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters and keywords. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme and
///   source position.
/// - Discards whitespace and comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The native module is the bridge to host-implemented functions.
///
/// It defines the calling convention for native functions and the registry
/// hosts fill before a program runs.
pub mod native;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of statements and
/// expressions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar and syntax, reporting errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements display text, equality and type checks.
pub mod value;
