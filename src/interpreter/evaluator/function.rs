use log::{trace, warn};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        native::{NativeError, NativeFunction},
        value::{Closure, Value},
    },
    util::Position,
};

impl Context {
    /// Calls a value with already evaluated arguments.
    ///
    /// The callee must be a user-defined function or a native function.
    /// Either way the argument count is checked before anything runs.
    ///
    /// # Parameters
    /// - `callee`: The value being called.
    /// - `args`: Evaluated arguments, in source order.
    /// - `position`: Source position of the call.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a function.
    /// - `ArityMismatch` if the argument count is not accepted.
    /// - `StackOverflow` if the call would exceed the configured depth.
    /// - Any error raised while running the function.
    pub fn call_value(&mut self,
                      callee: &Value,
                      args: &[Value],
                      position: Position)
                      -> EvalResult<Value> {
        match callee {
            Value::Function(closure) => self.call_closure(closure, args, position),
            Value::NativeFunction(native) => self.call_native(native, args, position),
            other => Err(RuntimeError::NotCallable { found: other.type_name().to_string(),
                                                     position }),
        }
    }

    /// Runs a user-defined function.
    ///
    /// The call gets one new scope, a child of the scope the function was
    /// defined in (not the caller's), holding the parameters. The body's
    /// statements run directly in that scope. The first `return` ends the
    /// call and supplies its value; falling off the end yields `Null`.
    fn call_closure(&mut self,
                    closure: &Closure,
                    args: &[Value],
                    position: Position)
                    -> EvalResult<Value> {
        let def = &closure.def;

        if args.len() != def.params.len() {
            return Err(RuntimeError::ArityMismatch { name: def.name.clone(),
                                                     expected: def.params.len().to_string(),
                                                     found: args.len(),
                                                     position });
        }

        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow { depth: self.config.max_call_depth,
                                                     position });
        }

        let scope = closure.env.child();
        for (param, arg) in def.params.iter().zip(args) {
            scope.define(param, arg.clone());
        }

        self.depth += 1;
        trace!("calling {} with {} argument(s) at depth {}", def.name, args.len(), self.depth);
        let result = self.exec_statements(&def.body.statements, &scope);
        self.depth -= 1;

        match result? {
            Flow::Return(value, _) => Ok(value),
            Flow::Normal(_) => Ok(Value::Null),
        }
    }

    /// Runs a host function and turns its failures, including a rejected
    /// argument count, into runtime errors at the call position.
    fn call_native(&mut self,
                   native: &NativeFunction,
                   args: &[Value],
                   position: Position)
                   -> EvalResult<Value> {
        trace!("calling native {} with {} argument(s)", native.name, args.len());

        native.call(args, self.output.as_mut()).map_err(|err| {
            warn!("native function '{}' failed: {err}", native.name);
            translate_native_error(&native.name, err, position)
        })
    }
}

/// Maps a host-side failure onto the runtime error taxonomy.
///
/// Argument count and type problems keep their meaning; anything else is
/// reported as a failure of the named function.
fn translate_native_error(name: &str, err: NativeError, position: Position) -> RuntimeError {
    match err {
        NativeError::ArityMismatch { expected, found } => {
            RuntimeError::ArityMismatch { name: name.to_string(),
                                          expected,
                                          found,
                                          position }
        },
        NativeError::TypeMismatch(details) => RuntimeError::TypeMismatch { details, position },
        other => RuntimeError::NativeFailure { name: name.to_string(),
                                               details: other.to_string(),
                                               position },
    }
}
