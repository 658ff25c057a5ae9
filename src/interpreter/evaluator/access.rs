use crate::{
    ast::{AssignTarget, Expr},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{ArrayRef, Value},
    },
    util::Position,
};

/// Converts a language-level index into a position in an array of `length`
/// elements.
fn checked_index(index: i64, length: usize, position: Position) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|i| *i < length)
                          .ok_or(RuntimeError::IndexOutOfBounds { index,
                                                                  length,
                                                                  position })
}

impl Context {
    /// Resolves a name by walking the scope chain outward.
    pub(crate) fn eval_identifier(name: &str,
                                  position: Position,
                                  env: &Environment)
                                  -> EvalResult<Value> {
        env.get(name)
           .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                            position })
    }

    /// Evaluates the target and the index of an index expression, in that
    /// order, and checks their types.
    fn eval_index_parts(&mut self,
                        target: &Expr,
                        index: &Expr,
                        position: Position,
                        env: &Environment)
                        -> EvalResult<(ArrayRef, i64)> {
        let target = self.eval(target, env)?;
        let array = target.as_array("index target", position)?.clone();
        let index = self.eval(index, env)?
                        .as_integer("array index", position)?;
        Ok((array, index))
    }

    /// Evaluates `target[index]`.
    ///
    /// The element is returned as-is, so indexing an array of arrays yields
    /// a handle to the inner array rather than a copy.
    ///
    /// # Errors
    /// - `TypeMismatch` if the target is not an array or the index not an
    ///   integer.
    /// - `IndexOutOfBounds` if the index is negative or past the end.
    pub(crate) fn eval_index(&mut self,
                             target: &Expr,
                             index: &Expr,
                             position: Position,
                             env: &Environment)
                             -> EvalResult<Value> {
        let (array, index) = self.eval_index_parts(target, index, position, env)?;
        let items = array.borrow();
        let slot = checked_index(index, items.len(), position)?;
        Ok(items[slot].clone())
    }

    /// Evaluates an assignment and returns the assigned value.
    ///
    /// For a name, the nearest scope already holding it is updated;
    /// assignment never declares. For an index target, the element is
    /// replaced in place, so every alias of the array sees the change. The
    /// array and index are evaluated before the right-hand side, and the
    /// bounds check happens after it.
    ///
    /// # Errors
    /// - `UndefinedVariable` if no scope binds the name.
    /// - Any error from evaluating the target, index or value.
    pub(crate) fn eval_assign(&mut self,
                              target: &AssignTarget,
                              value: &Expr,
                              position: Position,
                              env: &Environment)
                              -> EvalResult<Value> {
        match target {
            AssignTarget::Identifier { name } => {
                let value = self.eval(value, env)?;
                if env.assign(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UndefinedVariable { name: name.clone(),
                                                          position })
                }
            },
            AssignTarget::Index { target, index } => {
                let (array, index) = self.eval_index_parts(target, index, position, env)?;
                let value = self.eval(value, env)?;

                let mut items = array.borrow_mut();
                let slot = checked_index(index, items.len(), position)?;
                items[slot] = value.clone();
                Ok(value)
            },
        }
    }
}
