use thiserror::Error;

/// Raised by the lexer when a character does not start any token.
///
/// Scanning stops at the first offending character; no recovery is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: Unexpected character '{character}'.")]
pub struct ScanError {
    /// The character that could not be tokenized.
    pub character: char,
    /// The source line where the character was found.
    pub line:      usize,
}
