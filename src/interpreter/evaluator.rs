/// Core evaluation logic and context management.
///
/// Contains the evaluation context, the main `eval` dispatch, and variable
/// binding and lookup.
pub mod core;

/// Binary operator evaluation logic.
///
/// Evaluates both operands, requires numbers, and applies the operator.
pub mod binary;

/// List evaluation.
///
/// List literals, indexed reads and indexed writes, including wrap-around
/// for negative indices and the zero result for out-of-range positions.
pub mod index;

/// Function evaluation.
///
/// Calls of host-provided functions and the `sum` builtin.
pub mod function;

pub use self::core::{Context, EvalResult};
