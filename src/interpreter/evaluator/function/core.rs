use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef, TypeKeyword},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, MAX_CALL_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE, describe_kind},
            environment::ScopeKind,
            function::{array, print},
        },
        value::{
            core::Value,
            function::{Arity, Function, NativeArg, NativeFunction},
            variable::Variable,
        },
    },
};

/// Defines native functions by generating their lookup table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the native.
///
/// The macro produces `NATIVE_TABLE`, the records [`Context::new`] registers.
macro_rules! native_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every native, as registered into the global store.
        pub static NATIVE_TABLE: &[NativeFunction] = &[
            $(
                NativeFunction { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

native_functions! {
    "shon"  => { arity: Arity::AtLeast(1), func: print::shon },
    "push"  => { arity: Arity::Exact(2), func: array::push },
    "index" => { arity: Arity::Exact(2), func: array::index },
}

/// What a native may do to the program that called it.
///
/// A native gets mutable access to variables visible from the call site and
/// to the output sink, and nothing else.
pub struct Caller<'a> {
    context: &'a mut Context,
}

impl Caller<'_> {
    /// Looks up a variable visible from the call site.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.context.environment.lookup(name)
    }

    /// Mutable version of [`Caller::variable`]. Changes are made in place and
    /// are seen by the caller after the native returns.
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.context.environment.lookup_mut(name)
    }

    /// Writes one line to the program's output.
    pub fn print(&self, text: String, line: usize) -> EvalResult<()> {
        self.context.print(text, line)
    }
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The callee is looked up by name like any other variable and must hold a
    /// function value. Natives and user functions then follow their own
    /// calling conventions; both reject a wrong number of arguments.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result, which may be `None`.
    ///
    /// # Errors
    /// - `UnknownVariable` if nothing is declared under `name`.
    /// - `NotCallable` if the variable is not a function.
    /// - `ArgumentCountMismatch` for a wrong argument count.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     line: usize)
                                     -> EvalResult<Option<Value>> {
        let function = match self.get_variable(name) {
            Some(Value::Function(function)) => Rc::clone(function),
            Some(_) => {
                return Err(RuntimeError::NotCallable { name: name.to_string(),
                                                       line });
            },
            None => {
                return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line });
            },
        };

        match &*function {
            Function::Native(native) => self.call_native(native, arguments, line),
            Function::User(def) => self.call_user_defined_function(def, arguments, line),
        }
    }

    /// Calls a native.
    ///
    /// Every argument is evaluated into a [`NativeArg`]; an argument that is a
    /// bare identifier also records the variable it came from.
    fn call_native(&mut self,
                   native: &NativeFunction,
                   arguments: &[Expr],
                   line: usize)
                   -> EvalResult<Option<Value>> {
        if !native.arity.check(arguments.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: native.name.to_string(),
                                                             found: arguments.len(),
                                                             line });
        }

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let binding = match argument {
                Expr::Variable { name, .. } => Some(name.clone()),
                _ => None,
            };
            args.push(NativeArg { value: self.eval_value(argument)?,
                                  binding });
        }

        debug!(function = native.name, args = args.len(), line, "calling native");

        let mut caller = Caller { context: self };
        (native.func)(&mut caller, &args, line)
    }

    /// Executes a user-defined function.
    ///
    /// Arguments are evaluated in the caller's scope, left to right, and
    /// checked against the declared parameter types (`arr` parameters accept
    /// any value). A new frame parented to the global store is pushed, the
    /// parameters are bound into it, and the body runs there, on a grown stack
    /// segment when little stack is left. The frame is popped afterwards,
    /// whether or not the body succeeded.
    ///
    /// # Errors
    /// - Wrong number of arguments.
    /// - An argument of the wrong type.
    /// - Calls nested deeper than [`MAX_CALL_DEPTH`].
    ///
    /// # Returns
    /// The value of the first `=>` reached in the body, else the value of the
    /// body's last expression, else `None`.
    ///
    /// # Example
    /// ```
    /// use kpl::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// let source = "fn add = (num a, num b) : => a + b : add(2, 3)";
    ///
    /// assert_eq!(context.run(source).unwrap(), Some(Value::Number(5.0)));
    /// assert!(context.run("add(\"2\", 3)").is_err());
    /// ```
    fn call_user_defined_function(&mut self,
                                  def: &FunctionDef,
                                  arguments: &[Expr],
                                  line: usize)
                                  -> EvalResult<Option<Value>> {
        if arguments.len() != def.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: def.name.clone(),
                                                             found: arguments.len(),
                                                             line });
        }

        let mut bound = Vec::with_capacity(arguments.len());
        for (param, argument) in def.params.iter().zip(arguments) {
            let value = self.eval_value(argument)?;

            if param.kind != TypeKeyword::Arr && value.kind() != param.kind {
                return Err(RuntimeError::TypeError { details: format!("Functions should only be called with parameters of the correct type; '{}' of '{}' requires {}, found a '{}' value",
                                                                      param.name,
                                                                      def.name,
                                                                      describe_kind(param.kind),
                                                                      value.kind()),
                                                     line });
            }

            bound.push(Variable::new(param.kind, param.name.clone(), value));
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { depth: MAX_CALL_DEPTH,
                                                      line });
        }

        debug!(function = %def.name, args = bound.len(), depth = self.call_depth, line, "calling function");

        self.environment.push_scope(ScopeKind::Frame);
        for variable in bound {
            self.environment.bind(variable);
        }
        self.call_depth += 1;

        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_block(&def.body));

        self.call_depth -= 1;
        self.environment.pop_scope();

        Ok(result?.into_value())
    }
}
