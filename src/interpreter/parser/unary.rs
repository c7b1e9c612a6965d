use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// A leading `-` negates the following factor. It binds tighter than any
/// binary operator, so `-2 + 3` is `(-2) + 3`. Repeated minus signs nest.
///
/// Grammar: `unary := "-" unary | primary`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `line`: Line reported if the input ends before an operand.
///
/// # Example
/// ```
/// use kpl::{
///     ast::{Expr, UnaryOperator},
///     interpreter::{lexer::tokenize, parser::unary::parse_unary},
/// };
///
/// let tokens = tokenize("-x").unwrap();
/// let expr = parse_unary(&mut tokens.iter().peekable(), 1).unwrap();
///
/// assert!(matches!(expr, Expr::UnaryOp { op: UnaryOperator::Negate, .. }));
/// ```
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, minus_line)) = tokens.peek() {
        let minus_line = *minus_line;
        tokens.next();
        let expr = parse_unary(tokens, minus_line)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                  expr: Box::new(expr),
                                  line: minus_line, });
    }

    parse_primary(tokens, line)
}

/// Parses a primary expression.
///
/// Primary expressions are the atomic building blocks of the grammar:
/// - numeric, string and boolean literals,
/// - parenthesized expressions,
/// - array literals,
/// - identifiers and function calls.
///
/// # Errors
/// `UnexpectedToken` for anything that cannot start an expression, such as a
/// stray `:` or a keyword; `UnexpectedEndOfInput` on `line` when no token is
/// left.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => (token, *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    match token {
        Token::Number(..) | Token::Text(..) | Token::Boolean(..) => parse_literal(tokens, line),
        Token::LParen => parse_grouping(tokens, line),
        Token::LBracket => parse_array_literal(tokens, line),
        Token::Identifier(_) => parse_identifier_or_call(tokens, line),
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

/// Parses a numeric, string or boolean literal.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let value = match tokens.next() {
        Some((Token::Number(n), line)) => (LiteralValue::Number(*n), *line),
        Some((Token::Text(s), line)) => (LiteralValue::Str(s.clone()), *line),
        Some((Token::Boolean(b), line)) => (LiteralValue::Bool(*b), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected literal, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    Ok(Expr::Literal { value: value.0,
                       line:  value.1, })
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Errors
/// `ExpectedClosingParen` if the parenthesis is never closed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((_, line)) => *line,
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let expr = parse_expression(tokens, line)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((_, line)) => Err(ParseError::ExpectedClosingParen { line: *line }),
        None => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// Elements are full expressions, so `[10, 2 * 3, "a"]` has three elements.
/// An empty array `[]` is accepted.
///
/// Grammar: `array := "[" (expression ("," expression)*)? "]"`.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((_, line)) => *line,
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let elements = parse_comma_separated(tokens,
                                         |tokens| parse_expression(tokens, line),
                                         &Token::RBracket,
                                         line)?;

    Ok(Expr::ArrayLiteral { elements, line })
}

/// Parses an identifier, or a function call when it is followed by `(`.
///
/// Whether the name really refers to a function is only known at runtime.
///
/// Grammar:
/// ```text
///     call       := IDENT "(" (expression ("," expression)*)? ")"
///     identifier := IDENT
/// ```
///
/// # Example
/// ```
/// use kpl::{
///     ast::Expr,
///     interpreter::{lexer::tokenize, parser::core::parse_expression},
/// };
///
/// let tokens = tokenize("add(1, (2 + 3))").unwrap();
/// let expr = parse_expression(&mut tokens.iter().peekable(), 1).unwrap();
///
/// match expr {
///     Expr::FunctionCall { name, arguments, .. } => {
///         assert_eq!(name, "add");
///         assert_eq!(arguments.len(), 2);
///     },
///     other => panic!("expected a call, found {other:?}"),
/// }
/// ```
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(name), line)) => (name.clone(), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              |tokens| parse_expression(tokens, line),
                                              &Token::RParen,
                                              line)?;
        return Ok(Expr::FunctionCall { name,
                                       arguments,
                                       line });
    }

    Ok(Expr::Variable { name, line })
}
