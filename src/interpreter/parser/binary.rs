use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses an optional equality comparison.
///
/// KPL has a single comparison operator and does not chain it: `a == b == c`
/// leaves the second `==` for the caller, which rejects it.
///
/// The rule is: `comparison := additive ("==" additive)?`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `line`: Line reported if the input ends before an operand.
///
/// # Returns
/// The additive expression, or an `Expr::BinaryOp` with `BinaryOperator::Equal`.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens, line)?;

    if let Some((Token::EqualEqual, line)) = tokens.peek() {
        tokens.next();
        let right = parse_additive(tokens, *line)?;
        return Ok(Expr::BinaryOp { left:  Box::new(left),
                                   op:    BinaryOperator::Equal,
                                   right: Box::new(right),
                                   line:  *line, });
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `line`: Line reported if the input ends before an operand.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, line)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, *line)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `line`: Line reported if the input ends before an operand.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, line)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            tokens.next();
            let right = parse_unary(tokens, *line)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line: *line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its binary operator, if it is one.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` or `None`.
pub(crate) const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        _ => None,
    }
}
