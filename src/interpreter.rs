/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the statements produced by the parser, evaluates
/// expressions, manages the scope arena and dispatches calls to user functions
/// and natives. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles declarations, function frames, conditionals and loops.
/// - Reports runtime errors such as type mismatches or unknown identifiers.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tagged tokens, each corresponding to a meaningful language element such as
/// a number, an identifier, an operator, a wrapper or a keyword. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the statements of a program. Wrapped bodies are delimited with the block
/// scanner and parsed recursively.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a KPL program computes with: numbers,
/// strings, booleans, arrays and functions, along with typed variable records.
pub mod value;
