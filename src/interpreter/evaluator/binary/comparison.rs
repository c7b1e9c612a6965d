use crate::interpreter::{evaluator::core::Context, value::core::Value};

impl Context {
    /// Evaluates `left == right`.
    ///
    /// Any two values can be compared. Values of different kinds are unequal;
    /// see the `PartialEq` impl of [`Value`] for the rest.
    ///
    /// # Example
    /// ```
    /// use kpl::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let one = Value::Number(1.0);
    ///
    /// assert_eq!(Context::eval_equality(&one, &Value::Number(1.0)), Value::Bool(true));
    /// assert_eq!(Context::eval_equality(&one, &Value::from("1")), Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_equality(left: &Value, right: &Value) -> Value {
        Value::Bool(left == right)
    }
}
