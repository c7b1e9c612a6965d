use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::Caller},
    value::{core::Value, function::NativeArg},
};

/// Prints its arguments, separated by spaces, as one line of output.
///
/// Accepts one or more arguments of any type. Each is formatted with its
/// `Display` implementation: numbers as-is, strings without quotes, booleans
/// as `true`/`false`, arrays as `[a, b]` and functions as `<fn name>`.
///
/// # Parameters
/// - `caller`: Gives access to the output sink.
/// - `args`: The values to print.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `None`; `shon` produces no value.
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
/// let result = context.run("arr a = [1, \"two\", true] shon(a, \"x\")").unwrap();
///
/// assert_eq!(result, None);
/// assert_eq!(receiver.try_recv().unwrap(), "[1, two, true] x");
/// ```
pub fn shon(caller: &mut Caller<'_>, args: &[NativeArg], line: usize) -> EvalResult<Option<Value>> {
    let text = args.iter()
                   .map(|arg| arg.value.to_string())
                   .collect::<Vec<_>>()
                   .join(" ");

    caller.print(text, line)?;
    Ok(None)
}
