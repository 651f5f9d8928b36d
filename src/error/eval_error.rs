use thiserror::Error;

/// Represents all errors that can occur while evaluating a tree.
///
/// Out-of-range list reads and writes are not errors; they are defined to
/// yield zero. See [`crate::interpreter::evaluator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The callee of a call expression is not a host function.
    #[error("Error on line {line}: Tried calling a non-callable value ({found}).")]
    NotCallable {
        /// Short description of the value that was called.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Indexed into, or assigned at an index of, something that is not a list.
    #[error("Error on line {line}: Tried indexing a non-list value ({found}).")]
    NotIndexable {
        /// Short description of the value that was indexed.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A number was required (arithmetic operand, list element, `sum`
    /// argument, generated term) but something else was found.
    #[error("Error on line {line}: Expected number, found {found}.")]
    ExpectedNumber {
        /// Short description of the value that was found.
        found: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A list index was fractional or not finite.
    #[error("Error on line {line}: Invalid list index {index}; indices must be whole numbers.")]
    InvalidIndex {
        /// The rendered index value.
        index: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}
