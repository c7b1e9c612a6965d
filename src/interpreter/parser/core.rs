use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_comparison, statement::parse_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, equality, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := comparison`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `line`: Line of the construct being parsed, reported if the input ends
///   before the expression does.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_comparison(tokens, line)
}

/// Parses statements until the token stream is exhausted.
///
/// Used for the contents of every wrapped body. Statements need no separator:
/// each one ends where its grammar ends and the next one begins.
///
/// Grammar: `program := statement*`
///
/// # Example
/// ```
/// use kpl::{
///     ast::Statement,
///     interpreter::{lexer::tokenize, parser::core::parse_program},
/// };
///
/// let tokens = tokenize("num a = 1 str b = \"two\" a").unwrap();
/// let statements = parse_program(&mut tokens.iter().peekable()).unwrap();
///
/// assert_eq!(statements.len(), 3);
/// assert!(matches!(statements[2], Statement::Expression { .. }));
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while tokens.peek().is_some() {
        statements.push(parse_statement(tokens)?);
    }

    Ok(statements)
}
