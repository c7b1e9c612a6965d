use std::rc::Rc;

use crate::{
    ast::{LiteralValue, TypeKeyword},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::function::Function},
    util::num::f64_to_i64_checked,
};

/// Represents a runtime value in the interpreter.
///
/// Every value belongs to exactly one of the five declaration types, see
/// [`Value::kind`].
#[derive(Debug, Clone)]
pub enum Value {
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value, stored without its quotes.
    Str(String),
    /// A boolean value (`true` or `false`).
    /// Produced by `==` and by the boolean literals. Used as the condition of
    /// `lada` and `badlada` arms, where the condition must evaluate to `Bool`.
    Bool(bool),
    /// An ordered array of `Value` elements.
    Array(Rc<Vec<Self>>),
    /// A user function or a native.
    Function(Rc<Function>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl Value {
    /// Returns the declaration type this value belongs to.
    ///
    /// # Example
    /// ```
    /// use kpl::{ast::TypeKeyword, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::from(2.5).kind(), TypeKeyword::Num);
    /// assert_eq!(Value::from("hi").kind(), TypeKeyword::Str);
    /// assert_eq!(Value::from(vec![Value::from(true)]).kind(), TypeKeyword::Arr);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> TypeKeyword {
        match self {
            Self::Number(_) => TypeKeyword::Num,
            Self::Str(_) => TypeKeyword::Str,
            Self::Bool(_) => TypeKeyword::Bool,
            Self::Array(_) => TypeKeyword::Arr,
            Self::Function(_) => TypeKeyword::Fn,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is a number.
    /// - `Err(RuntimeError::ExpectedNumber)`: Otherwise.
    ///
    /// # Example
    /// ```
    /// use kpl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(10.0).as_number(42).unwrap(), 10.0);
    /// assert!(Value::Bool(true).as_number(42).is_err());
    /// ```
    pub const fn as_number(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to an `i64`, or returns an error if it is not an
    /// integer-valued number.
    ///
    /// # Errors
    /// - `ExpectedNumber` if the value is not a number.
    /// - `RealIsFractional` / `LiteralTooLarge` from the conversion.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        f64_to_i64_checked(self.as_number(line)?, line)
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for the conditions of conditional arms.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: If value is a boolean.
    /// - `Err(RuntimeError::ExpectedBoolean)`: Otherwise.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Returns a reference to the elements if the value is an array.
    ///
    /// # Errors
    /// `RuntimeError::ExpectedArray` if the value is not an array.
    pub fn as_vec(&self, line: usize) -> EvalResult<&Vec<Self>> {
        match self {
            Self::Array(a) => Ok(a),
            _ => Err(RuntimeError::ExpectedArray { line }),
        }
    }
}

/// Equality as `==` sees it.
///
/// Numbers compare numerically, strings by content, booleans by value and
/// arrays element-wise. Values of different kinds are never equal, and two
/// function values are equal only if they are the same record.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Function(function) => write!(f, "<fn {}>", function.name()),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::Bool(b) => (*b).into(),
        }
    }
}
