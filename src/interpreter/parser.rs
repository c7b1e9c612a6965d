/// Core parsing entry points.
///
/// Contains the expression entry point and the program loop that turns a
/// token stream into a list of statements.
pub mod core;

/// Unary operator and primary expression parsing.
///
/// Handles negation, literals, grouping, array literals, identifiers and
/// function calls.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence levels for equality, additive and
/// multiplicative operators.
pub mod binary;

/// Wrapped body parsing.
///
/// Locates the matching closing wrapper of a `:`-delimited body with the
/// balanced block scanner and parses the tokens in between.
pub mod block;

/// Utility functions for the parser.
///
/// Provides helpers for comma separated lists, identifiers and type keywords.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, function declarations, conditional chains, loops,
/// returns and expression statements.
pub mod statement;
