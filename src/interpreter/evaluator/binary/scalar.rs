use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Both operands must be numbers; strings, booleans, arrays and functions
    /// are rejected with a type error rather than coerced. Division and
    /// remainder by zero are checked explicitly. The operator must be one of
    /// `Add`, `Sub`, `Mul`, `Div` or `Mod`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed number.
    ///
    /// # Example
    /// ```
    /// use kpl::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let x = Value::Number(7.0);
    /// let y = Value::Number(2.0);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Mod, &x, &y, 1).unwrap();
    /// assert_eq!(result, Value::Number(1.0));
    ///
    /// let zero = Value::Number(0.0);
    /// let err = Context::eval_scalar_op(BinaryOperator::Div, &x, &zero, 3).unwrap_err();
    /// assert!(matches!(err, RuntimeError::DivisionByZero { line: 3 }));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Equal, Mod, Mul, Sub};

        let (Value::Number(l), Value::Number(r)) = (left, right) else {
            return Err(RuntimeError::TypeError { details: format!("Cannot use {op} on a '{}' and a '{}'",
                                                                  left.kind(),
                                                                  right.kind()),
                                                 line });
        };
        let (l, r) = (*l, *r);

        Ok(Value::Number(match op {
                             Add => l + r,
                             Sub => l - r,
                             Mul => l * r,
                             Div | Mod if r == 0.0 => {
                                 return Err(RuntimeError::DivisionByZero { line });
                             },
                             Div => l / r,
                             Mod => l % r,
                             Equal => {
                                 return Err(RuntimeError::TypeError { details: format!("'{op}' is not an arithmetic operator"),
                                                                      line });
                             },
                         }))
    }
}
