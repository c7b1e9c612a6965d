use std::{error::Error, io::Write, sync::mpsc::Sender};

use tracing::debug;

use crate::{
    ast::{Expr, Statement, TypeKeyword},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            environment::Environment,
            function::core::NATIVE_TABLE,
        },
        lexer::tokenize,
        parser::core::parse_program,
        value::{
            core::Value,
            function::{Function, NativeFunction},
            variable::Variable,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How deeply function calls may nest before the run is aborted with
/// [`RuntimeError::RecursionLimit`].
pub const MAX_CALL_DEPTH: usize = 5_000;

/// Remaining stack below which a call body runs on a freshly grown segment.
pub(crate) const STACK_RED_ZONE: usize = 256 * 1024;
/// Size of each grown stack segment.
pub(crate) const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Where native output goes when it is not written to stdout.
pub type PrintSink = Sender<String>;

/// How a statement or block finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Ran to completion, possibly producing a value.
    Normal(Option<Value>),
    /// Reached `=>`; the enclosing function or program stops here.
    Return(Option<Value>),
}

impl Flow {
    /// The carried value, whichever way the block finished.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Normal(value) | Self::Return(value) => value,
        }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the scope arena with the global
/// store at its root, the output sink used by `shon`, and the current call
/// depth.
///
/// ## Usage
///
/// `Context` is created once and can run any number of programs; they all
/// share its global store. The natives are registered by [`Context::new`].
///
/// ```
/// use kpl::interpreter::{evaluator::core::Context, value::core::Value};
///
/// let mut context = Context::new();
/// context.run("num x = 2").unwrap();
///
/// let result = context.run("x * 21").unwrap();
/// assert_eq!(result, Some(Value::Number(42.0)));
/// ```
pub struct Context {
    /// Every live scope, the global store first.
    pub(crate) environment: Environment,
    /// Receives native output instead of stdout when set.
    pub(crate) print_sink:  Option<PrintSink>,
    /// Number of user function calls currently executing.
    pub(crate) call_depth:  usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a new evaluation context with an empty global store holding
    /// only the natives. Output goes to stdout.
    #[must_use]
    pub fn new() -> Self {
        let mut context = Self { environment: Environment::new(),
                                 print_sink:  None,
                                 call_depth:  0, };

        for native in NATIVE_TABLE {
            context.register_native(*native);
        }

        context
    }

    /// Creates a context whose native output is sent to `sink`, one message
    /// per `shon` call.
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
    /// context.run("shon(\"hello\", 1 + 1)").unwrap();
    /// assert_eq!(receiver.try_recv().unwrap(), "hello 2");
    /// ```
    #[must_use]
    pub fn with_print_sink(sink: PrintSink) -> Self {
        let mut context = Self::new();
        context.print_sink = Some(sink);
        context
    }

    /// Adds a native function to the global store, replacing anything of
    /// the same name.
    pub fn register_native(&mut self, native: NativeFunction) {
        self.environment
            .declare(Variable::new(TypeKeyword::Fn,
                                   native.name,
                                   Function::Native(native).into()));
    }

    /// Tokenizes, parses and executes a program.
    ///
    /// # Returns
    /// The value of the first top-level `=>` reached, else the value of the
    /// last top-level expression that produced one, else `None`.
    ///
    /// # Errors
    /// The first `ParseError` or `RuntimeError`, boxed. Nothing runs if the
    /// program does not parse.
    pub fn run(&mut self, source: &str) -> Result<Option<Value>, Box<dyn Error>> {
        let tokens = tokenize(source)?;
        debug!(tokens = tokens.len(), "tokenized program");

        let program = parse_program(&mut tokens.iter().peekable())?;
        debug!(statements = program.len(), "parsed program");

        Ok(self.exec_block(&program)?.into_value())
    }

    /// Looks a variable's value up from the current scope.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.environment.lookup(name).map(|variable| &variable.value)
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, unary and binary operations, function calls and
    /// array literals.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// `Some(Value)` for expressions that produce a value, or `None` for calls
    /// to functions that return nothing.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Option<Value>> {
        match expr {
            Expr::Literal { value, .. } => Ok(Some(value.into())),
            Expr::Variable { name, line } => {
                let value = self.get_variable(name)
                                .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                               line: *line, })?;
                Ok(Some(value.clone()))
            },
            Expr::UnaryOp { op, expr, line } => self.eval_unary_op(*op, expr, *line).map(Some),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line).map(Some),
            Expr::FunctionCall { name,
                                 arguments,
                                 line, } => self.eval_function_call(name, arguments, *line),
            Expr::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval_value(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Some(values.into()))
            },
        }
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// `RuntimeError::MissingValue` if it produces none, plus anything
    /// [`Context::eval`] reports.
    pub fn eval_value(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.eval(expr)?
            .ok_or(RuntimeError::MissingValue { line: expr.line_number() })
    }

    /// Evaluates a single statement.
    ///
    /// Variable declarations write into the nearest frame, function
    /// declarations into the global store. Neither produces a value.
    /// Conditionals and loops run their bodies. A return statement ends the
    /// enclosing block with [`Flow::Return`].
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VariableDeclaration { kind,
                                             name,
                                             value,
                                             line, } => {
                let value = self.eval_value(value)?;

                if value.kind() != *kind {
                    return Err(RuntimeError::TypeError { details: format!("The '{kind}' type requires {}, found a '{}' value",
                                                                          describe_kind(*kind),
                                                                          value.kind()),
                                                         line:    *line, });
                }

                debug!(name = %name, kind = %kind, line, "declared variable");
                self.environment
                    .declare(Variable::new(*kind, name.clone(), value));
                Ok(Flow::Normal(None))
            },
            Statement::Function(def) => {
                debug!(name = %def.name, params = def.params.len(), line = def.line, "declared function");
                self.environment
                    .declare_global(Variable::new(TypeKeyword::Fn,
                                                  def.name.clone(),
                                                  Function::User(def.clone()).into()));
                Ok(Flow::Normal(None))
            },
            Statement::Conditional { branches, .. } => self.eval_conditional(branches),
            Statement::Loop { context, line } => self.eval_for(context, *line),
            Statement::Return { expr, .. } => Ok(Flow::Return(self.eval(expr)?)),
            Statement::Expression { expr, .. } => Ok(Flow::Normal(self.eval(expr)?)),
        }
    }

    /// Executes statements in order in the current scope.
    ///
    /// Stops at the first statement that returns. Otherwise the block's value
    /// is the last value any statement produced.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        let mut last = None;

        for statement in statements {
            match self.eval_statement(statement)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal(Some(value)) => last = Some(value),
                Flow::Normal(None) => {},
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Writes one line of native output to the sink, or to stdout.
    ///
    /// # Errors
    /// `RuntimeError::Output` if the line cannot be delivered.
    pub fn print(&self, text: String, line: usize) -> EvalResult<()> {
        match &self.print_sink {
            Some(sink) => sink.send(text)
                              .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                                  line }),
            None => writeln!(std::io::stdout().lock(), "{text}").map_err(|e| {
                        RuntimeError::Output { details: e.to_string(),
                                               line }
                    }),
        }
    }
}

/// How a declaration type is named in type errors.
pub(crate) const fn describe_kind(kind: TypeKeyword) -> &'static str {
    match kind {
        TypeKeyword::Fn => "a function",
        TypeKeyword::Num => "a valid number",
        TypeKeyword::Str => "a valid string",
        TypeKeyword::Arr => "an array",
        TypeKeyword::Bool => "a boolean",
    }
}
