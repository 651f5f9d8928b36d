use thiserror::Error;

/// Evaluation errors.
///
/// Raised while walking a parsed tree: calling something that is not a
/// function, indexing something that is not a list, or doing arithmetic on
/// non-numbers.
pub mod eval_error;
/// Parsing errors.
///
/// Grammar violations: unexpected tokens, unmatched delimiters, invalid
/// assignment targets and missing expressions.
pub mod parse_error;
/// Scanning errors.
///
/// Raised by the lexer for characters that do not belong to the formula
/// language.
pub mod scan_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
pub use scan_error::ScanError;

/// Any failure produced while scanning, parsing or evaluating a formula.
///
/// Each stage's error converts into this type, so a pipeline can use `?`
/// across stage boundaries and callers can still tell the stages apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The formula contains a character outside the language.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// The formula is not grammatically well-formed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The formula is well-formed but failed while computing a term.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl FormulaError {
    /// Returns `true` if the formula was rejected before evaluation, i.e. it
    /// failed to scan or parse.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Scan(_) | Self::Parse(_))
    }
}
