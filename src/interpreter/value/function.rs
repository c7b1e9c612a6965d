use crate::{
    ast::FunctionDef,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Caller},
        value::core::Value,
    },
};

/// The host signature of a native function.
///
/// A native receives the [`Caller`] capability, its evaluated arguments and the
/// line of the call. It may return no value.
pub type NativeFn = fn(&mut Caller<'_>, &[NativeArg], usize) -> EvalResult<Option<Value>>;

/// An evaluated argument of a native call.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArg {
    /// The argument's value.
    pub value:   Value,
    /// The variable the argument was read from, when the argument expression
    /// was a bare identifier. Natives that mutate their argument (`push`) use
    /// it to reach the variable through the [`Caller`].
    pub binding: Option<String>,
}

/// Specifies the allowed number of arguments for a native.
///
/// - `Exact(n)` means the native must receive exactly `n` arguments.
/// - `AtLeast(n)` means the native accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many or more.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// # Example
    /// ```
    /// use kpl::interpreter::value::function::Arity;
    ///
    /// assert!(Arity::Exact(2).check(2));
    /// assert!(!Arity::Exact(2).check(3));
    /// assert!(Arity::AtLeast(1).check(4));
    /// assert!(!Arity::AtLeast(1).check(0));
    /// ```
    #[must_use]
    pub const fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::AtLeast(m) => n >= *m,
        }
    }
}

/// A native function record.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    /// The name it is registered under.
    pub name:  &'static str,
    /// How many arguments it accepts.
    pub arity: Arity,
    /// The host implementation.
    pub func:  NativeFn,
}

/// Natives are identified by their registered name.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity
    }
}

/// A callable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    /// Declared in source with `fn name = (params) : body :`.
    User(FunctionDef),
    /// Provided by the host.
    Native(NativeFunction),
}

impl Function {
    /// The name the function was declared or registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User(def) => &def.name,
            Self::Native(native) => native.name,
        }
    }
}
