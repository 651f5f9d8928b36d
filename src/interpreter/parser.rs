/// Entry points: `parse`, the assignment level and the nesting guard.
pub mod core;

/// Left-associative binary operator levels: terms, factors and powers.
pub mod binary;

/// Postfix call/index chains and primary expressions.
pub mod postfix;

/// Helpers shared by the levels: delimiter checks and comma-separated lists.
pub mod utils;

pub use self::core::{MAX_NESTING_DEPTH, ParseResult, parse};
