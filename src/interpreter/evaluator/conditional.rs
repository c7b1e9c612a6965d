use tracing::debug;

use crate::{
    ast::ConditionalBranch,
    interpreter::evaluator::core::{Context, EvalResult, Flow},
};

impl Context {
    /// Evaluates a `lada` / `badlada` / `hynrei` chain.
    ///
    /// Conditions are evaluated in order, and only until the first one that
    /// is `true`; that arm's body runs in the current scope. A `hynrei` arm is
    /// taken only when every condition before it was `false`. At most one arm
    /// runs.
    ///
    /// A `=>` reached inside the selected body is passed on as
    /// [`Flow::Return`], so it returns from the enclosing function or program.
    /// Otherwise the chain produces no value.
    ///
    /// # Errors
    /// `ExpectedBoolean` if a condition evaluates to anything but a boolean.
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
    /// context.run("lada 1 == 2 : shon(\"a\") : badlada 2 == 2 : shon(\"b\") : hynrei : shon(\"c\") :")
    ///        .unwrap();
    ///
    /// let printed: Vec<String> = receiver.try_iter().collect();
    /// assert_eq!(printed, ["b"]);
    /// ```
    pub fn eval_conditional(&mut self, branches: &[ConditionalBranch]) -> EvalResult<Flow> {
        for (arm, branch) in branches.iter().enumerate() {
            let taken = match &branch.condition {
                Some(condition) => self.eval_value(condition)?.as_bool(branch.line)?,
                None => true,
            };

            if taken {
                debug!(arm, line = branch.line, "selected conditional arm");

                return match self.exec_block(&branch.body)? {
                    Flow::Return(value) => Ok(Flow::Return(value)),
                    Flow::Normal(_) => Ok(Flow::Normal(None)),
                };
            }
        }

        Ok(Flow::Normal(None))
    }
}
