use std::iter::Peekable;

use tracing::trace;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_program},
    },
};

/// Finds the closing wrapper of a body without parsing it.
///
/// KPL uses the same token, `:`, to open and to close every body, so the end
/// of a body cannot be found by nesting depth alone. Instead every keyword
/// that opens a body of its own (`lada`, `badlada`, `hynrei`, `naduh`, and a
/// `fn` declaration outside any parentheses) is known to contribute exactly
/// two wrappers. The scan stops at the first wrapper reached while
///
/// ```text
///     wrappers seen == 2 * body keywords seen
/// ```
///
/// A `fn` inside parentheses is a parameter type (`(fn f, num x)`) and opens
/// nothing.
///
/// # Parameters
/// - `tokens`: Tokens following the opening wrapper.
/// - `open_line`: Line of the opening wrapper, for error reporting.
///
/// # Returns
/// The number of tokens in the body. The token right after them is the closing
/// wrapper.
///
/// # Errors
/// `ParseError::UnterminatedBlock` if the tokens run out first.
///
/// # Example
/// ```
/// use kpl::interpreter::{lexer::tokenize, parser::block::scan_block};
///
/// // Body of an outer construct, with a complete chain inside it.
/// let tokens = tokenize("lada x == 1 : shon(1) : hynrei : shon(2) : : rest").unwrap();
/// let length = scan_block(tokens.iter(), 1).unwrap();
///
/// assert_eq!(length, 17);
///
/// let unterminated = tokenize("lada x == 1 : shon(1)").unwrap();
/// assert!(scan_block(unterminated.iter(), 1).is_err());
/// ```
pub fn scan_block<'a, I>(tokens: I, open_line: usize) -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut wrappers = 0usize;
    let mut keywords = 0usize;
    let mut paren_depth = 0usize;

    for (length, (token, _)) in tokens.enumerate() {
        match token {
            Token::Colon if wrappers == 2 * keywords => return Ok(length),
            Token::Colon => wrappers += 1,
            Token::Lada | Token::Badlada | Token::Hynrei | Token::Naduh => keywords += 1,
            Token::Fn if paren_depth == 0 => keywords += 1,
            Token::LParen => paren_depth += 1,
            Token::RParen => paren_depth = paren_depth.saturating_sub(1),
            _ => {},
        }
    }

    Err(ParseError::UnterminatedBlock { line: open_line })
}

/// Parses a body wrapped in colons, `: statements :`.
///
/// The opening wrapper is consumed, the extent of the body is found with
/// [`scan_block`], and the tokens in between are parsed as a program of their
/// own. The closing wrapper is consumed as well.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening wrapper.
/// - `construct`: What the body belongs to, used in error messages.
/// - `line`: Line of the construct's keyword.
///
/// # Errors
/// - `ExpectedWrapper` if the next token is not `:`.
/// - `UnterminatedBlock` if the body is never closed.
/// - Any error from parsing the statements of the body.
pub fn parse_wrapped_body<'a, I>(tokens: &mut Peekable<I>,
                                 construct: &'static str,
                                 line: usize)
                                 -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let open_line = match tokens.next() {
        Some((Token::Colon, open_line)) => *open_line,
        Some((tok, line)) => {
            return Err(ParseError::ExpectedWrapper { construct,
                                                     found: format!("{tok:?}"),
                                                     line: *line });
        },
        None => {
            return Err(ParseError::ExpectedWrapper { construct,
                                                     found: "end of input".to_string(),
                                                     line });
        },
    };

    let length = scan_block(tokens.clone(), open_line)?;
    trace!(construct, length, open_line, "scanned wrapped body");

    let body: Vec<&'a (Token, usize)> = tokens.by_ref().take(length).collect();
    // The matching wrapper located by the scan.
    tokens.next();

    parse_program(&mut body.into_iter().peekable())
}
