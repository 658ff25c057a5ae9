//! # minilang
//!
//! minilang is a small, dynamically typed scripting language with integers,
//! strings, arrays, first-class functions and closures.
//! Source text goes through three stages: a lexer, a recursive-descent parser
//! that builds an AST, and a tree-walking evaluator with lexically scoped
//! environments.
//!
//! ```
//! use minilang::{run, stdlib};
//!
//! let source = "
//!     def factorial(n) {
//!         if (n < 2) { return 1 }
//!         return n * factorial(n - 1)
//!     }
//!     print(factorial(5))
//! ";
//!
//! let execution = run(source, &stdlib::registry()).unwrap();
//! assert_eq!(execution.output, "120\n");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    error::Error,
    interpreter::{
        environment::Environment, evaluator::core::Context, native::NativeRegistry,
        parser::parse_source, value::Value,
    },
    util::SharedBuffer,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator, and is never
/// modified after parsing.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
pub mod ast;
/// Runtime limits.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code.
/// Every error carries the source position it was raised at and a
/// human-readable message.
///
/// # Responsibilities
/// - Defines error enums for each stage (lexer, parser, evaluator).
/// - Wraps them in one top-level [`Error`](error::Error) returned by [`run`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scope management.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, values and
///   environments.
/// - Defines the native-function registry through which hosts extend the
///   language.
pub mod interpreter;
/// Stderr backend for the `log` facade, used by the binary.
pub mod logger;
/// The interactive read-eval-print loop.
pub mod repl;
/// The standard library of native functions.
pub mod stdlib;
/// General utilities: source positions and output capture.
pub mod util;

pub use config::{Config, DEFAULT_MAX_CALL_DEPTH};

/// The result of running a program with [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Everything the program wrote through native functions.
    pub output: String,
    /// The value of the program's last statement.
    pub value:  Value,
}

/// A long-lived interpreter.
///
/// The global environment survives between calls to
/// [`Interpreter::run`], so later programs see the definitions of earlier
/// ones.
///
/// # Example
/// ```
/// use minilang::{Config, Interpreter, interpreter::value::Value, stdlib, util::SharedBuffer};
///
/// let output = SharedBuffer::new();
/// let mut interpreter =
///     Interpreter::new(&stdlib::registry(), Config::default(), Box::new(output.clone()));
///
/// interpreter.run("let greeting = \"hi\"").unwrap();
/// let value = interpreter.run("print(greeting)\nlen(greeting)").unwrap();
///
/// assert_eq!(value, Value::Integer(2));
/// assert_eq!(output.contents(), "hi\n");
/// ```
pub struct Interpreter {
    context: Context,
}

impl Interpreter {
    /// Creates an interpreter whose global scope holds every function in
    /// `registry`, writing program output to `output`.
    #[must_use]
    pub fn new(registry: &NativeRegistry, config: Config, output: Box<dyn Write>) -> Self {
        let globals = Environment::new();
        registry.install(&globals);

        Self { context: Context::new(globals, output, config) }
    }

    /// Lexes, parses and evaluates `source`, returning the value of its last
    /// statement.
    ///
    /// # Errors
    /// Returns the first lex, parse or runtime error. A lex or parse error
    /// means nothing was executed.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parse_source(source)?;
        let value = self.context.eval_program(&program)?;
        Ok(value)
    }

    /// The global scope.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.context.globals
    }
}

/// Runs a program with the default configuration and captures its output.
///
/// # Errors
/// Returns the first lex, parse or runtime error.
///
/// # Examples
/// ```
/// use minilang::{error::Error, run, stdlib};
///
/// let execution = run("let a = [1, 2]\nlet b = a\nb[0] = 9\nprint(a)", &stdlib::registry()).unwrap();
/// assert_eq!(execution.output, "[9, 2]\n");
///
/// // 'y' is not defined.
/// let result = run("print(y)", &stdlib::registry());
/// assert!(matches!(result, Err(Error::Runtime(_))));
/// ```
pub fn run(source: &str, registry: &NativeRegistry) -> Result<Execution, Error> {
    run_with_config(source, registry, Config::default())
}

/// Like [`run`], with explicit limits.
///
/// # Errors
/// Returns the first lex, parse or runtime error.
pub fn run_with_config(source: &str,
                       registry: &NativeRegistry,
                       config: Config)
                       -> Result<Execution, Error> {
    let buffer = SharedBuffer::new();
    let mut interpreter = Interpreter::new(registry, config, Box::new(buffer.clone()));
    let value = interpreter.run(source)?;

    Ok(Execution { output: buffer.take(),
                   value })
}
