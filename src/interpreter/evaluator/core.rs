use std::io::Write;

use log::debug;

use crate::{
    ast::{Expr, Program},
    config::Config,
    error::RuntimeError,
    interpreter::{
        environment::{Environment, WeakEnvironment},
        value::Value,
    },
    util::{Position, stack},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Outcome of executing a statement.
///
/// `Return` unwinds through enclosing blocks and loops until a function call
/// catches it. It is never an error by itself; only a `Return` that reaches
/// the top level of a program becomes one.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues; carries the statement's value.
    Normal(Value),
    /// A `return` is unwinding; carries the returned value and the position
    /// of the `return` statement.
    Return(Value, Position),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state that outlives a single program:
/// the global environment, the output sink handed to native functions, the
/// configured limits and the current call depth.
///
/// ## Usage
///
/// `Context` is created once and reused for every program it runs, so
/// global definitions made by one program are visible to the next. This is
/// what the REPL relies on.
///
/// ## Teardown
///
/// A function stored in the scope it closes over forms a reference cycle
/// with that scope. The context remembers every scope a `def` closed over
/// and empties the ones still alive when it is dropped, which releases
/// those cycles.
pub struct Context {
    /// The outermost scope. Native functions are installed here before the
    /// first program runs.
    pub globals:    Environment,
    /// Where print-like natives write.
    pub output:     Box<dyn Write>,
    pub config:     Config,
    pub(crate) depth: usize,
    captured:         Vec<WeakEnvironment>,
}

impl Context {
    /// Creates an evaluation context around an already populated global
    /// environment.
    #[must_use]
    pub fn new(globals: Environment, output: Box<dyn Write>, config: Config) -> Self {
        Self { globals,
               output,
               config,
               depth: 0,
               captured: Vec::new() }
    }

    /// Records that a function definition closed over `env`.
    pub(crate) fn track_capture(&mut self, env: &Environment) {
        if self.captured
               .last()
               .is_some_and(|last| last.points_to(env))
        {
            return;
        }
        if self.captured.len() == self.captured.capacity() {
            self.captured.retain(WeakEnvironment::is_live);
        }
        self.captured.push(env.downgrade());
    }

    /// Executes a program in the global environment.
    ///
    /// Statements run top to bottom. The program's value is the value of its
    /// last statement, or `Null` for an empty program.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised, or
    /// [`RuntimeError::ReturnOutsideFunction`] if a `return` executes
    /// outside of any function.
    ///
    /// # Example
    /// ```
    /// use minilang::{
    ///     Config,
    ///     interpreter::{
    ///         environment::Environment, evaluator::core::Context, parser::parse_source,
    ///         value::Value,
    ///     },
    /// };
    ///
    /// let program = parse_source("let x = 6\nx * 7").unwrap();
    /// let mut context = Context::new(Environment::new(), Box::new(std::io::sink()), Config::default());
    ///
    /// assert_eq!(context.eval_program(&program).unwrap(), Value::Integer(42));
    /// ```
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Value> {
        debug!("evaluating program with {} statements", program.statements.len());

        let globals = self.globals.clone();
        match self.exec_statements(&program.statements, &globals)? {
            Flow::Normal(value) => Ok(value),
            Flow::Return(_, position) => Err(RuntimeError::ReturnOutsideFunction { position }),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant: literals, array literals,
    /// identifiers, indexing, unary and binary operations, assignments and
    /// calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Scope in which names are resolved.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        stack::guarded(|| self.eval_expr(expr, env))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element, env))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(values.into())
            },
            Expr::Identifier { name, position } => Self::eval_identifier(name, *position, env),
            Expr::Index { target,
                          index,
                          position, } => self.eval_index(target, index, *position, env),
            Expr::UnaryOp { op,
                            operand,
                            position, } => {
                let value = self.eval(operand, env)?;
                Self::eval_unary(*op, &value, *position)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(*op, &left, &right, *position)
            },
            Expr::Assign { target,
                           value,
                           position, } => self.eval_assign(target, value, *position, env),
            Expr::Call { callee,
                         arguments,
                         position, } => {
                let callee = self.eval(callee, env)?;
                let args = arguments.iter()
                                    .map(|argument| self.eval(argument, env))
                                    .collect::<EvalResult<Vec<_>>>()?;
                self.call_value(&callee, &args, *position)
            },
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        for scope in self.captured.drain(..) {
            if let Some(env) = scope.upgrade() {
                env.clear();
            }
        }
    }
}
