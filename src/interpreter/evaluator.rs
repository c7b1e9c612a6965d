/// Binary operator evaluation logic.
///
/// Handles the execution of the arithmetic operators and equality.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric negation.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, statement
/// execution and the output sink.
pub mod core;

/// The scope arena.
///
/// Frames for function calls, bindings for loop variables, and the global
/// store at the root.
pub mod environment;

/// Evaluation of `lada` / `badlada` / `hynrei` chains.
pub mod conditional;

/// Evaluation of `naduh` loops.
///
/// Evaluates the bounds, binds the loop variable and executes the loop body
/// once per step.
pub mod for_loop;

/// Function evaluation.
///
/// Handles user-defined and native function calls, argument checking, and
/// return value computation.
pub mod function;
