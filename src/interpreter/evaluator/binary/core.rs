use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates both operands, left first, then applies the operator.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 line: usize)
                                 -> EvalResult<Value> {
        let left = self.eval_value(left)?;
        let right = self.eval_value(right)?;

        Self::eval_binary(op, &left, &right, line)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic operators are routed to `eval_scalar_op`, which accepts
    /// numbers only. Equality uses `eval_equality` and accepts any two values.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use kpl::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Number(3.0);
    /// let right = Value::Number(4.0);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    ///
    /// let text = Value::from("3");
    /// assert!(Context::eval_binary(BinaryOperator::Add, &text, &right, 1).is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Equal, Mod, Mul, Sub};

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_scalar_op(op, left, right, line),
            Equal => Ok(Self::eval_equality(left, right)),
        }
    }
}
