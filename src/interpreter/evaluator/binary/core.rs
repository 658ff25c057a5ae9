use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::Position,
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Arithmetic operators use `eval_arithmetic`; ordering and
    /// equality operators use `eval_comparison`. Both operands have already
    /// been evaluated, left first.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source position of the operator.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use minilang::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    ///     util::Position,
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::Integer(3),
    ///                                   &Value::Integer(4),
    ///                                   Position::start());
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };

        match op {
            Add | Sub | Mul | Div => Self::eval_arithmetic(op, left, right, position),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, position)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    const ALL: [BinaryOperator; 10] = [BinaryOperator::Add,
                                       BinaryOperator::Sub,
                                       BinaryOperator::Mul,
                                       BinaryOperator::Div,
                                       BinaryOperator::Less,
                                       BinaryOperator::Greater,
                                       BinaryOperator::LessEqual,
                                       BinaryOperator::GreaterEqual,
                                       BinaryOperator::Equal,
                                       BinaryOperator::NotEqual];

    #[test]
    fn every_operator_dispatches_on_integers() {
        let at = Position::start();
        let results: Vec<Value> =
            ALL.iter()
               .map(|&op| Context::eval_binary(op, &Value::Integer(6), &Value::Integer(3), at).unwrap())
               .collect();

        assert_eq!(results,
                   [9, 3, 18, 2, 0, 1, 0, 1, 0, 1].map(Value::Integer));
    }

    #[test]
    fn operator_from_the_other_family_is_a_type_mismatch() {
        let at = Position::start();
        let one = Value::Integer(1);

        for op in ALL {
            let arithmetic = Context::eval_arithmetic(op, &one, &one, at);
            let comparison = Context::eval_comparison(op, &one, &one, at);
            match op {
                BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div => {
                    assert!(arithmetic.is_ok());
                    assert!(matches!(comparison, Err(RuntimeError::TypeMismatch { .. })));
                },
                _ => {
                    assert!(matches!(arithmetic, Err(RuntimeError::TypeMismatch { .. })));
                    assert!(comparison.is_ok());
                },
            }
        }
    }
}
