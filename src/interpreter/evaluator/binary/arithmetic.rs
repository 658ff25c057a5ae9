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
    /// Evaluates an arithmetic operation.
    ///
    /// `+` adds two integers or concatenates two strings. `-`, `*` and `/`
    /// need two integers. There are no implicit conversions: mixing a string
    /// and an integer is a type mismatch.
    ///
    /// Integer results are checked; a result outside the `i64` range is an
    /// overflow error. Division truncates toward zero, and dividing by zero
    /// is an error.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul` or `Div`. Any other operator is
    ///   a type mismatch.
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
    /// let q = Context::eval_arithmetic(BinaryOperator::Div, &Value::Integer(-7), &Value::Integer(2), at);
    /// assert_eq!(q.unwrap(), Value::Integer(-3));
    ///
    /// let s = Context::eval_arithmetic(BinaryOperator::Add, &Value::from("ab"), &Value::from("c"), at);
    /// assert_eq!(s.unwrap(), Value::from("abc"));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        let result = match (op, left, right) {
            (Add, Value::String(a), Value::String(b)) => return Ok(Value::String(format!("{a}{b}"))),
            (Add, Value::Integer(a), Value::Integer(b)) => a.checked_add(*b),
            (Sub, Value::Integer(a), Value::Integer(b)) => a.checked_sub(*b),
            (Mul, Value::Integer(a), Value::Integer(b)) => a.checked_mul(*b),
            (Div, Value::Integer(_), Value::Integer(0)) => {
                return Err(RuntimeError::DivisionByZero { position });
            },
            (Div, Value::Integer(a), Value::Integer(b)) => a.checked_div(*b),
            _ => {
                return Err(RuntimeError::TypeMismatch { details: format!("cannot apply '{op}' to {} and {}",
                                                                         left.type_name(),
                                                                         right.type_name()),
                                                        position });
            },
        };

        result.map(Value::Integer)
              .ok_or(RuntimeError::Overflow { position })
    }
}
