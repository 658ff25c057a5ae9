use crate::{
    ast::ForLoop,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::Value,
    },
};

impl Context {
    /// Executes a `for` loop.
    ///
    /// A `for` loop behaves like the equivalent `while` loop:
    ///
    /// ```text
    ///     for (init; condition; update) { body }
    /// ```
    ///
    /// runs `init` once, then repeatedly checks `condition`, runs `body` and
    /// runs `update`, until `condition` is zero.
    ///
    /// The whole loop gets one scope, a child of `env`, that hosts `init`,
    /// `condition` and `update`. A `let` in the init clause is therefore
    /// visible to the rest of the header and to the body, and disappears when
    /// the loop ends. Each iteration of the body runs in its own child of the
    /// loop scope.
    ///
    /// # Parameters
    /// - `context`: Loop header and body.
    /// - `env`: Scope the loop appears in.
    ///
    /// # Returns
    /// `Flow::Normal(Null)` once the condition fails, or the `Flow::Return`
    /// raised by the body.
    ///
    /// # Example
    /// ```
    /// use minilang::{
    ///     Config,
    ///     ast::Statement,
    ///     interpreter::{
    ///         environment::Environment, evaluator::core::Context, parser::parse_source,
    ///         value::Value,
    ///     },
    ///     util::SharedBuffer,
    /// };
    ///
    /// let program = parse_source("for (let i = 0; i < 3; i = i + 1) { total = total + i }").unwrap();
    /// let Statement::For { context: header, .. } = &program.statements[0] else {
    ///     unreachable!()
    /// };
    ///
    /// let globals = Environment::new();
    /// globals.define("total", Value::Integer(10));
    /// let mut context = Context::new(globals.clone(), Box::new(SharedBuffer::new()), Config::default());
    /// context.exec_for(header, &globals).unwrap();
    ///
    /// assert_eq!(globals.get("total"), Some(Value::Integer(13)));
    /// assert_eq!(globals.get("i"), None);
    /// ```
    pub fn exec_for(&mut self, context: &ForLoop, env: &Environment) -> EvalResult<Flow> {
        let scope = env.child();

        if let flow @ Flow::Return(..) = self.exec_statement(&context.init, &scope)? {
            return Ok(flow);
        }

        while self.eval(&context.condition, &scope)?
                  .is_truthy(context.condition.position())?
        {
            if let flow @ Flow::Return(..) = self.exec_block(&context.body, &scope)? {
                return Ok(flow);
            }
            self.exec_statement(&context.update, &scope)?;
        }

        Ok(Flow::Normal(Value::Null))
    }
}
