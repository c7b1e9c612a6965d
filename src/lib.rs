//! # kpl
//!
//! kpl is an interpreter for KPL, a small typed scripting language with
//! Khasi keywords, written in Rust.
//! Every declaration names its type (`fn num str arr bool`), every body is
//! wrapped in colons, `=>` returns, `lada`/`badlada`/`hynrei` branch and
//! `naduh start haduh end da i` counts. `shon`, `push` and `index` are built in.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::evaluator::core::Context;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. Every error carries the source line it was raised on.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for KPL programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Conversions between `i64` and `f64` that refuse to lose data, used by the
/// loop and the `index` native.
pub mod util;

/// Runs a program in a fresh context.
///
/// This function tokenizes, parses and executes all statements in the
/// provided source string. If execution succeeds, it returns `Ok(())`;
/// otherwise, it returns an error with details about the failure. With
/// `auto_print`, the program's value (see [`Context::run`]) is printed to
/// standard output.
///
/// # Errors
/// Returns an error if parsing or evaluation fails, or if any runtime error
/// occurs.
///
/// # Examples
/// ```
/// use kpl::get_result;
///
/// let source = "num result = 2 + 2";
/// let res = get_result(source, false);
/// assert!(res.is_ok());
///
/// // Example with an intentional error (unknown variable).
/// let source = "num y = x + 1"; // 'x' is not defined
/// let res = get_result(source, false);
/// assert!(res.is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = Context::new();

    let result = context.run(source)?;

    if auto_print && let Some(v) = result {
        println!("{v}");
    }

    Ok(())
}
