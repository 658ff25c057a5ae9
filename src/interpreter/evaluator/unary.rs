use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::Position,
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// The only unary operator is `Negate`, integer negation. Negating
    /// `i64::MIN` overflows and is reported as an error.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use minilang::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    ///     util::Position,
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), Position::start()).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Negate, &Value::from("5"), Position::start()).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: Position) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => {
                let n = value.as_integer("operand of unary '-'", position)?;
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::Overflow { position })
            },
        }
    }
}
