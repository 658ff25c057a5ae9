use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::Position,
};

impl Context {
    /// Evaluates a comparison and returns `1` for true and `0` for false.
    ///
    /// - `<`, `>`, `<=` and `>=` are defined on integers only.
    /// - `==` and `!=` accept any two values and follow the equality of
    ///   [`Value`]: integers and strings compare by value, arrays and
    ///   functions by identity, and values of different types are simply
    ///   not equal.
    ///
    /// # Parameters
    /// - `op`: A comparison operator. Any other operator is a type mismatch.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source position for error reporting.
    ///
    /// # Example
    /// ```
    /// use minilang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    ///     util::Position,
    /// };
    ///
    /// let at = Position::start();
    /// let lt = Context::eval_comparison(BinaryOperator::Less, &Value::Integer(1), &Value::Integer(2), at);
    /// assert_eq!(lt.unwrap(), Value::Integer(1));
    ///
    /// let eq = Context::eval_comparison(BinaryOperator::Equal, &Value::Integer(1), &Value::from("1"), at);
    /// assert_eq!(eq.unwrap(), Value::Integer(0));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match (op, left, right) {
            (Equal, ..) => left == right,
            (NotEqual, ..) => left != right,
            (Less, Value::Integer(a), Value::Integer(b)) => a < b,
            (Greater, Value::Integer(a), Value::Integer(b)) => a > b,
            (LessEqual, Value::Integer(a), Value::Integer(b)) => a <= b,
            (GreaterEqual, Value::Integer(a), Value::Integer(b)) => a >= b,
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot compare {} and {} with '{op}'",
                                                                         left.type_name(),
                                                                         right.type_name()),
                                                        position });
            },
        };

        Ok(Value::Integer(i64::from(result)))
    }
}
