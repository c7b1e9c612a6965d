#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Tried to use an identifier that was never declared.
    UnknownVariable {
        /// The name of the identifier.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name whose value is not a function.
    NotCallable {
        /// The name that was called.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array value was expected, but not found.
    ExpectedArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the function.
        name:  String,
        /// The number of arguments supplied.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An expression that yields no value was used where a value is needed.
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division (or remainder) by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Loop bounds are not usable as integers.
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to access an array element outside the allowed bounds.
    IndexOutOfBounds {
        /// The length of the array.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An argument to a native function was invalid.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to use a fractional number where an integer was required.
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A number was too large to be represented safely as an integer.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Function calls nested deeper than the interpreter allows.
    RecursionLimit {
        /// The depth limit that was hit.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Output produced by a native could not be delivered.
    Output {
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => write!(f,
                                                           "Error on line {line}: The identifier '{name}' was never declared as a variable."),
            Self::NotCallable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a function.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::ExpectedBoolean { line } => {
                write!(f, "Error on line {line}: A condition must be a boolean.")
            },
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::ExpectedArray { line } => write!(f, "Error on line {line}: Expected array."),
            Self::ArgumentCountMismatch { name, found, line } => write!(f,
                                                                        "Error on line {line}: Function '{name}' cannot be called with {found} argument(s)."),
            Self::MissingValue { line } => {
                write!(f, "Error on line {line}: Expression does not produce a value.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::InvalidLoopBounds { details, line } => {
                write!(f, "Error on line {line}: Invalid loop bounds: {details}.")
            },
            Self::IndexOutOfBounds { len, found, line } => write!(f,
                                                                  "Error on line {line}: Index {found} is out of bounds for an array of length {len}."),
            Self::InvalidArgument { details, line } => {
                write!(f, "Error on line {line}: Invalid argument: {details}.")
            },
            Self::RealIsFractional { line } => write!(f,
                                                      "Error on line {line}: Value is fractional and cannot be used as an integer."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Number is too large.")
            },
            Self::RecursionLimit { depth, line } => write!(f,
                                                           "Error on line {line}: Function calls nested deeper than {depth} levels."),
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Could not write output: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
