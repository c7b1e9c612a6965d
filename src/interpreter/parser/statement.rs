use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ConditionalBranch, FunctionDef, LoopContext, Param, Statement, TypeKeyword},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_wrapped_body,
            core::{ParseResult, parse_expression},
            utils::{parse_identifier, token_to_type_keyword},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable or function declaration (starts with a type keyword),
/// - a conditional chain (starts with `lada`),
/// - a loop (starts with `naduh`),
/// - a return (starts with `=>`),
/// - an expression used as a statement.
///
/// The statement's source line is taken from its first token.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// `badlada` and `hynrei` are only valid after a conditional arm and are
/// rejected here.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.peek() {
        Some((token, line)) => (token, *line),
        // Nothing has been consumed yet, so the input ended on its first line.
        None => return Err(ParseError::UnexpectedEndOfInput { line: 1 }),
    };

    match token {
        Token::Fn | Token::Num | Token::Str | Token::Arr | Token::Bool => {
            parse_variable_declaration(tokens, line)
        },
        Token::Lada => parse_conditional(tokens, line),
        Token::Badlada | Token::Hynrei => {
            Err(ParseError::UnexpectedToken { token: format!("{token:?} without a preceding 'lada' arm"),
                                              line })
        },
        Token::Naduh | Token::While => parse_loop(tokens, line),
        Token::Arrow => {
            tokens.next();
            let expr = parse_expression(tokens, line)?;
            Ok(Statement::Return { expr, line })
        },
        _ => {
            let expr = parse_expression(tokens, line)?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses a declaration statement.
///
/// A declaration has the form `<type> <identifier> = <body>`. For `fn` the
/// body is a parameter list and a wrapped function body; for every other type
/// it is an expression whose runtime type is checked when the statement runs.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the type keyword.
/// - `line`: Line of the type keyword.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the identifier or `=` is missing,
/// - the initializer or function declaration is malformed.
///
/// # Example
/// ```
/// use kpl::{
///     ast::{Statement, TypeKeyword},
///     interpreter::{lexer::tokenize, parser::statement::parse_statement},
/// };
///
/// let tokens = tokenize("str greeting = \"hello\"").unwrap();
/// let statement = parse_statement(&mut tokens.iter().peekable()).unwrap();
///
/// assert!(matches!(statement,
///                  Statement::VariableDeclaration { kind: TypeKeyword::Str, .. }));
/// ```
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let kind = match tokens.next() {
        Some((tok, line)) => {
            token_to_type_keyword(tok).ok_or_else(|| ParseError::UnexpectedToken {
                token: format!("Variable assignment requires a valid variable type, found {tok:?}"),
                line: *line,
            })?
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    let name = parse_identifier(tokens, line)?;

    match tokens.next() {
        Some((Token::Equals, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '=' after '{name}', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    if kind == TypeKeyword::Fn {
        return parse_function_declaration(tokens, name, line).map(Statement::Function);
    }

    let value = parse_expression(tokens, line)?;

    Ok(Statement::VariableDeclaration { kind,
                                        name,
                                        value,
                                        line })
}

/// Parses the part of a function declaration after `fn name =`.
///
/// Grammar:
/// ```text
///     function := "(" (param ("," param)*)? ")" ":" program ":"
///     param    := type-keyword IDENT
/// ```
///
/// The body is parsed here, once; it is executed on every call.
///
/// # Errors
/// - `UnexpectedToken` if the parameter list is not parenthesized.
/// - `InvalidParameterList` for a missing type, a missing name, a missing
///   comma, or a trailing comma.
/// - `ExpectedWrapper` / `UnterminatedBlock` for a badly wrapped body.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     name: String,
                                     line: usize)
                                     -> ParseResult<FunctionDef>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::LParen, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("A function's parameters should be wrapped in parentheses, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let params = parse_parameters(tokens, line)?;
    let body = parse_wrapped_body(tokens, "function declaration", line)?;

    Ok(FunctionDef { name,
                     params,
                     body: Rc::from(body),
                     line })
}

/// Parses `type name, type name, ... )` after the opening parenthesis.
fn parse_parameters<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Vec<Param>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut params = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(params);
    }

    loop {
        let kind = match tokens.next() {
            Some((tok, line)) => {
                token_to_type_keyword(tok).ok_or_else(|| ParseError::InvalidParameterList {
                    details: format!("expected a parameter type, found {tok:?}"),
                    line: *line,
                })?
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        };

        let name = match tokens.next() {
            Some((Token::Identifier(name), _)) => name.clone(),
            Some((tok, line)) => {
                return Err(ParseError::InvalidParameterList { details: format!("expected a name after '{kind}', found {tok:?}"),
                                                              line:    *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        };

        params.push(Param { kind, name });

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::InvalidParameterList { details: format!("parameters must be separated by commas, found {tok:?}"),
                                                              line:    *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(params)
}

/// Parses a conditional chain.
///
/// Syntax:
/// ```text
///     lada <condition> : <program> :
///     badlada <condition> : <program> :
///     hynrei : <program> :
/// ```
/// Any number of `badlada` arms may follow the `lada` arm; a `hynrei` arm
/// ends the chain.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `lada`.
/// - `line`: Line number of the `lada` token.
///
/// # Returns
/// A `Statement::Conditional` holding every arm in source order.
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let condition = parse_expression(tokens, line)?;
    let body = parse_wrapped_body(tokens, "conditional statement", line)?;
    let mut branches = vec![ConditionalBranch { condition: Some(condition),
                                                body,
                                                line }];

    loop {
        match tokens.peek() {
            Some((Token::Badlada, arm_line)) => {
                let arm_line = *arm_line;
                tokens.next();
                let condition = parse_expression(tokens, arm_line)?;
                let body = parse_wrapped_body(tokens, "conditional statement", arm_line)?;
                branches.push(ConditionalBranch { condition: Some(condition),
                                                  body,
                                                  line: arm_line });
            },
            Some((Token::Hynrei, arm_line)) => {
                let arm_line = *arm_line;
                tokens.next();
                let body = parse_wrapped_body(tokens, "conditional statement", arm_line)?;
                branches.push(ConditionalBranch { condition: None,
                                                  body,
                                                  line: arm_line });
                break;
            },
            _ => break,
        }
    }

    Ok(Statement::Conditional { branches, line })
}

/// Parses a counting loop.
///
/// Syntax: `naduh <start> haduh <end> da <identifier> : <program> :`
///
/// # Errors
/// - `UnsupportedLoop` for the reserved `while` keyword.
/// - `MalformedLoop` if `haduh`, `da` or the loop variable is missing.
///
/// # Example
/// ```
/// use kpl::{
///     ast::Statement,
///     interpreter::{lexer::tokenize, parser::statement::parse_statement},
/// };
///
/// let tokens = tokenize("naduh 0 haduh 2 da i : shon(i) :").unwrap();
/// let statement = parse_statement(&mut tokens.iter().peekable()).unwrap();
///
/// match statement {
///     Statement::Loop { context, .. } => {
///         assert_eq!(context.var, "i");
///         assert_eq!(context.body.len(), 1);
///     },
///     other => panic!("expected a loop, found {other:?}"),
/// }
/// ```
fn parse_loop<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Naduh, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnsupportedLoop { keyword: format!("{tok:?}").to_lowercase(),
                                                     line:    *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let start = parse_expression(tokens, line)?;
    expect_loop_keyword(tokens, &Token::Haduh, "expected 'haduh' after the start value", line)?;

    let end = parse_expression(tokens, line)?;
    expect_loop_keyword(tokens, &Token::Da, "expected 'da' after the end value", line)?;

    let var = match tokens.next() {
        Some((Token::Identifier(name), _)) => name.clone(),
        Some((tok, line)) => {
            return Err(ParseError::MalformedLoop { details: format!("expected a loop variable after 'da', found {tok:?}"),
                                                   line:    *line, });
        },
        None => {
            return Err(ParseError::MalformedLoop { details: "expected a loop variable after 'da'".to_string(),
                                                   line });
        },
    };

    let body = parse_wrapped_body(tokens, "naduh loop", line)?;

    Ok(Statement::Loop { context: LoopContext { var,
                                                start,
                                                end,
                                                body },
                         line })
}

fn expect_loop_keyword<'a, I>(tokens: &mut Peekable<I>,
                              keyword: &Token,
                              details: &str,
                              line: usize)
                              -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((tok, _)) if tok == keyword => Ok(()),
        Some((_, line)) => Err(ParseError::MalformedLoop { details: details.to_string(),
                                                           line:    *line, }),
        None => Err(ParseError::MalformedLoop { details: details.to_string(),
                                                line }),
    }
}
