use tracing::debug;

use crate::{
    ast::{Expr, LoopContext, TypeKeyword},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            environment::ScopeKind,
        },
        value::{core::Value, variable::Variable},
    },
    util::num::i64_to_f64_checked,
};

impl Context {
    /// Evaluates a `naduh` loop.
    ///
    /// `naduh start haduh end da i : body :` evaluates both bounds once, then
    /// runs the body for every integer from `start` to `end`, both inclusive.
    /// The loop counts up when `start <= end` and down otherwise, so equal
    /// bounds run the body exactly once.
    ///
    /// Each iteration binds the loop variable as a `num` in a scope of its own
    /// that is dropped when the iteration ends. Declarations made by the body
    /// go to the enclosing frame and outlive the loop. A `=>` in the body ends
    /// only the current iteration.
    ///
    /// # Parameters
    /// - `context`: Loop header and body.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// `Flow::Normal(None)`; loops produce no value.
    ///
    /// # Errors
    /// `InvalidLoopBounds` if a bound is not an integer-valued number, and any
    /// error raised by the body.
    ///
    /// # Example
    /// ```
    /// use std::sync::mpsc;
    ///
    /// use kpl::interpreter::evaluator::core::Context;
    ///
    /// let (sender, receiver) = mpsc::channel();
    /// let mut context = Context::with_print_sink(sender);
    ///
    /// context.run("naduh 2 haduh 0 da i : shon(i) :").unwrap();
    ///
    /// let printed: Vec<String> = receiver.try_iter().collect();
    /// assert_eq!(printed, ["2", "1", "0"]);
    /// ```
    pub fn eval_for(&mut self, context: &LoopContext, line: usize) -> EvalResult<Flow> {
        let start = self.eval_loop_bound(&context.start, "start", line)?;
        let end = self.eval_loop_bound(&context.end, "end", line)?;

        debug!(var = %context.var, start, end, line, "running naduh loop");

        let range: Box<dyn Iterator<Item = i64>> = if start <= end {
            Box::new(start..=end)
        } else {
            Box::new((end..=start).rev())
        };

        for i in range {
            let value = i64_to_f64_checked(i, RuntimeError::LiteralTooLarge { line })?;

            self.environment.push_scope(ScopeKind::Binding);
            self.environment
                .bind(Variable::new(TypeKeyword::Num, context.var.clone(), Value::Number(value)));

            let result = self.exec_block(&context.body);
            self.environment.pop_scope();

            // A return ends the iteration, not the loop.
            result?;
        }

        Ok(Flow::Normal(None))
    }

    fn eval_loop_bound(&mut self, bound: &Expr, which: &str, line: usize) -> EvalResult<i64> {
        let value = self.eval_value(bound)?;

        value.as_integer(line).map_err(|_| RuntimeError::InvalidLoopBounds {
            details: format!("the {which} value must be an integer, found '{value}'"),
            line,
        })
    }
}
