use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Caller},
        value::{core::Value, function::NativeArg},
    },
};

/// Appends a value to an array variable, in place.
///
/// The first argument must be the bare name of an array variable; the array
/// is changed where it is stored, so the caller sees the new element. A string
/// that parses as a number is appended as that number.
///
/// # Parameters
/// - `caller`: Gives access to the variable being appended to.
/// - `args`: `[array variable, value]`.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `None`; `push` produces no value.
///
/// # Errors
/// - `InvalidArgument` if the first argument is not a variable name.
/// - `ExpectedArray` if that variable does not hold an array.
///
/// # Example
/// ```
/// use kpl::interpreter::{evaluator::core::Context, value::core::Value};
///
/// let mut context = Context::new();
/// context.run("arr a = [] push(a, 1) push(a, \"2\") push(a, \"x\")").unwrap();
///
/// assert_eq!(context.get_variable("a"),
///            Some(&Value::from(vec![Value::Number(1.0),
///                                   Value::Number(2.0),
///                                   Value::from("x")])));
/// ```
pub fn push(caller: &mut Caller<'_>, args: &[NativeArg], line: usize) -> EvalResult<Option<Value>> {
    let [target, item] = args else {
        return Err(RuntimeError::ArgumentCountMismatch { name: "push".to_string(),
                                                         found: args.len(),
                                                         line });
    };

    let name = target.binding.as_deref().ok_or_else(|| RuntimeError::InvalidArgument {
        details: "the first argument of 'push' must name an array variable".to_string(),
        line,
    })?;

    let item = match &item.value {
        Value::Str(text) => text.trim()
                                .parse::<f64>()
                                .ok()
                                .filter(|n| n.is_finite())
                                .map_or_else(|| item.value.clone(), Value::Number),
        value => value.clone(),
    };

    let variable = caller.variable_mut(name)
                         .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                        line })?;

    match &mut variable.value {
        Value::Array(elements) => {
            Rc::make_mut(elements).push(item);
            Ok(None)
        },
        _ => Err(RuntimeError::ExpectedArray { line }),
    }
}

/// Returns an element of an array.
///
/// # Parameters
/// - `args`: `[array, index]`. The index must be an integer-valued number.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A copy of the element at the zero-based index.
///
/// # Errors
/// - `ExpectedArray` if the first argument is not an array.
/// - `RealIsFractional` if the index is not an integer.
/// - `IndexOutOfBounds` if the index is negative or past the end.
///
/// # Example
/// ```
/// use kpl::{
///     error::RuntimeError,
///     interpreter::{evaluator::core::Context, value::core::Value},
/// };
///
/// let mut context = Context::new();
/// context.run("arr a = [10, 20, 30]").unwrap();
///
/// assert_eq!(context.run("index(a, 2)").unwrap(), Some(Value::Number(30.0)));
///
/// let err = context.run("index(a, 3)").unwrap_err();
/// assert!(matches!(err.downcast_ref::<RuntimeError>(),
///                  Some(RuntimeError::IndexOutOfBounds { len: 3, found: 3, .. })));
/// ```
pub fn index(_caller: &mut Caller<'_>, args: &[NativeArg], line: usize) -> EvalResult<Option<Value>> {
    let [array, position] = args else {
        return Err(RuntimeError::ArgumentCountMismatch { name: "index".to_string(),
                                                         found: args.len(),
                                                         line });
    };

    let elements = array.value.as_vec(line)?;
    let position = position.value.as_integer(line)?;

    usize::try_from(position).ok()
                             .and_then(|i| elements.get(i))
                             .cloned()
                             .map(Some)
                             .ok_or_else(|| RuntimeError::IndexOutOfBounds { len:   elements.len(),
                                                                             found: position,
                                                                             line })
}
