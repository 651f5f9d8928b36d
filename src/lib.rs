//! # numfields
//!
//! numfields turns small arithmetic formulas into numeric sequences. A
//! formula such as `history[n-1] + history[n-2]` is scanned, parsed once,
//! and then evaluated for every new position of the sequence, with `n`
//! bound to the position, `history` to the terms produced so far and `sum`
//! to a variadic adder.
//!
//! ```
//! use numfields::{Number, generate_sequence, is_valid_formula};
//!
//! let terms = generate_sequence("history[n-1] * 2", &[Number::Integer(1)], 5).unwrap();
//! assert_eq!(terms, [1, 2, 4, 8, 16].map(Number::Integer));
//!
//! assert!(is_valid_formula("sum(history[n-1], n)"));
//! assert!(!is_valid_formula("sum(history[n-1], n"));
//! ```

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

/// Defines the structure of parsed formulas.
///
/// This module declares the `Expr` enum and the binary operators. The AST is
/// built by the parser and only read by the evaluator.
///
/// # Responsibilities
/// - Defines one variant per language construct.
/// - Attaches line numbers to every node for error reporting.
/// - Renders trees for diagnostics.
pub mod ast;
/// Provides unified error types for scanning, parsing and evaluation.
///
/// Every error carries the source line it refers to. [`error::FormulaError`]
/// wraps all three stages.
pub mod error;
/// The formula interpreter: lexer, parser, evaluator and runtime values.
///
/// # Responsibilities
/// - Provides each stage as a separately callable entry point.
/// - Keeps all state per call; nothing is shared between evaluations.
pub mod interpreter;
/// Sequence generation and formula validation.
///
/// These are the operations a host service calls: build a sequence from a
/// formula and a seed, or check that a formula is well-formed.
pub mod sequence;
/// General utilities for safe numeric conversion and index handling.
pub mod util;

pub use error::FormulaError;
pub use interpreter::{
    lexer::scan,
    parser::parse,
    value::{Number, Value},
};
pub use sequence::{Formula, generate_sequence, is_valid_formula};
