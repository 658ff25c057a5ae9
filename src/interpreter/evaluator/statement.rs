use std::rc::Rc;

use log::trace;

use crate::{
    ast::{Block, Expr, Statement},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::{Closure, Value},
    },
    util::stack,
};

impl Context {
    /// Executes a single statement.
    ///
    /// Handles declarations, control flow, function definitions, returns and
    /// expression statements. The returned [`Flow`] carries the statement's
    /// value:
    ///
    /// - expression statement: the value of the expression,
    /// - `let`: the bound value,
    /// - `if`: the value of the executed branch, or `Null`,
    /// - block: the value of its last statement, or `Null`,
    /// - `while`, `for` and `def`: `Null`.
    ///
    /// A `return` produces [`Flow::Return`] instead.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `env`: Current innermost scope.
    pub fn exec_statement(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Flow> {
        stack::guarded(|| self.exec_statement_inner(statement, env))
    }

    fn exec_statement_inner(&mut self, statement: &Statement, env: &Environment) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr, .. } => Ok(Flow::Normal(self.eval(expr, env)?)),
            Statement::Let { name, initializer, .. } => {
                let value = self.eval(initializer, env)?;
                env.define(name, value.clone());
                Ok(Flow::Normal(value))
            },
            Statement::Block(block) => self.exec_block(block, env),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => self.exec_if(condition, then_branch, else_branch.as_ref(), env),
            Statement::While { condition, body, .. } => self.exec_while(condition, body, env),
            Statement::For { context, .. } => self.exec_for(context, env),
            Statement::Function(def) => {
                let closure = Closure { def: Rc::clone(def),
                                        env: env.clone() };
                env.define(&def.name, Value::Function(Rc::new(closure)));
                self.track_capture(env);
                Ok(Flow::Normal(Value::Null))
            },
            Statement::Return { value, position } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value, *position))
            },
        }
    }

    /// Executes statements in order in `env` without creating a new scope.
    ///
    /// Stops at the first [`Flow::Return`] and hands it to the caller.
    /// Otherwise yields the value of the last statement.
    pub(crate) fn exec_statements(&mut self,
                                  statements: &[Statement],
                                  env: &Environment)
                                  -> EvalResult<Flow> {
        let mut last = Value::Null;

        for statement in statements {
            match self.exec_statement(statement, env)? {
                Flow::Normal(value) => last = value,
                flow @ Flow::Return(..) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Executes a block in a fresh child scope of `env`.
    ///
    /// Bindings made inside the block are dropped with the scope when the
    /// block ends, unless a closure created inside captured it.
    pub fn exec_block(&mut self, block: &Block, env: &Environment) -> EvalResult<Flow> {
        let scope = env.child();
        trace!("block at {} opened scope", block.position);
        self.exec_statements(&block.statements, &scope)
    }

    /// Executes an `if` statement.
    ///
    /// The condition must be an integer; any nonzero value selects the
    /// then-branch. With a false condition and no else-branch, the statement
    /// evaluates to `Null`.
    fn exec_if(&mut self,
               condition: &Expr,
               then_branch: &Block,
               else_branch: Option<&Block>,
               env: &Environment)
               -> EvalResult<Flow> {
        let truthy = self.eval(condition, env)?
                         .is_truthy(condition.position())?;

        if truthy {
            self.exec_block(then_branch, env)
        } else if let Some(block) = else_branch {
            self.exec_block(block, env)
        } else {
            Ok(Flow::Normal(Value::Null))
        }
    }

    /// Executes a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration, and every
    /// iteration runs the body in its own scope. A `return` in the body ends
    /// the loop and keeps unwinding.
    fn exec_while(&mut self, condition: &Expr, body: &Block, env: &Environment) -> EvalResult<Flow> {
        while self.eval(condition, env)?
                  .is_truthy(condition.position())?
        {
            if let flow @ Flow::Return(..) = self.exec_block(body, env)? {
                return Ok(flow);
            }
        }

        Ok(Flow::Normal(Value::Null))
    }
}
