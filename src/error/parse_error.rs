use thiserror::Error;

/// Represents all errors that can occur while turning tokens into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue an expression here.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The offending token text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The formula ended where an expression was required.
    #[error("Error on line {line}: Expected expression but reached end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing delimiter (or a separator) was required but not found.
    #[error("Error on line {line}: Expected {expected} but found {found}.")]
    ExpectedDelimiter {
        /// What the parser was looking for, e.g. `')' after function call`.
        expected: &'static str,
        /// The token text that was found instead.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left side of `=` is neither a variable nor an index expression.
    #[error("Error on line {line}: Invalid assignment target (must be a variable name or list \
             index).")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The expression nests deeper than the parser allows, either through
    /// brackets or through long operator, call or index chains.
    #[error("Error on line {line}: Expression is nested too deeply (limit is {limit}).")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A complete expression was parsed but tokens remain.
    #[error("Error on line {line}: Extra tokens after expression: {token}")]
    TrailingTokens {
        /// The first leftover token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}
