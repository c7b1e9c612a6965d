#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected token (or unrecognized text) while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A wrapper `:` was expected to open a body but something else was found.
    ExpectedWrapper {
        /// The construct whose body was being opened.
        construct: &'static str,
        /// What was found instead.
        found:     String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A body was opened with `:` but its matching `:` never appeared.
    UnterminatedBlock {
        /// The line of the opening wrapper.
        line: usize,
    },
    /// A function parameter list did not follow `type name, type name, ...`.
    InvalidParameterList {
        /// Details about what was wrong.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `naduh` loop header was malformed.
    MalformedLoop {
        /// Details about what was wrong.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A loop keyword that is reserved but not implemented.
    UnsupportedLoop {
        /// The loop keyword.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Parentheses should always be properly closed."),

            Self::ExpectedWrapper { construct,
                                    found,
                                    line, } => write!(f,
                                                      "Error on line {line}: A {construct} requires an opening wrapper ':', found {found}."),

            Self::UnterminatedBlock { line } => write!(f,
                                                       "Error on line {line}: The block opened here is never closed with a matching ':'."),

            Self::InvalidParameterList { details, line } => {
                write!(f, "Error on line {line}: Invalid parameter list: {details}.")
            },

            Self::MalformedLoop { details, line } => {
                write!(f, "Error on line {line}: Malformed naduh loop: {details}.")
            },

            Self::UnsupportedLoop { keyword, line } => {
                write!(f, "Error on line {line}: '{keyword}' is not a supported loop type.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
