use std::fmt;

use log::debug;
use logos::Logos;

use crate::{error::ScanError, interpreter::value::Number};

/// The kind of a lexical token.
///
/// Every operator and delimiter of the formula language is a single
/// character. Spaces, tabs and carriage returns are skipped; newlines are
/// skipped too but advance the line counter.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42`, `3.14` or `2.`.
    ///
    /// Digits followed by a `.` form a real literal; plain digits form an
    /// integer literal. There is no sign and no exponent: `-5` is `-`
    /// followed by `5`.
    #[regex(r"[0-9]+\.[0-9]*", parse_real)]
    #[regex(r"[0-9]+", parse_integer)]
    Number(Number),
    /// Identifier tokens; variable names such as `n`, `history` or `x2`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Identifier,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `=`
    #[token("=")]
    Equals,
    /// Line breaks. Never emitted; only bumps the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Appended by [`scan`] after the last real token.
    EndOfInput,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// A token together with the exact source text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is; number tokens carry their value.
    pub kind: TokenKind,
    /// The source slice. Empty for [`TokenKind::EndOfInput`].
    pub text: String,
    /// The 1-based source line.
    pub line: usize,
}

impl Token {
    /// Creates the end-of-input marker for the given line.
    #[must_use]
    pub const fn end_of_input(line: usize) -> Self {
        Self { kind: TokenKind::EndOfInput,
               text: String::new(),
               line }
    }

    /// The numeric value of a number token, `None` for every other kind.
    #[must_use]
    pub const fn literal(&self) -> Option<Number> {
        match self.kind {
            TokenKind::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns `true` for the end-of-input marker.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() { write!(f, "end of input") } else { write!(f, "'{}'", self.text) }
    }
}

/// Tokenizes a formula.
///
/// Every call builds its own lexer, so scanning has no shared state and may
/// run concurrently. The returned tokens always end with exactly one
/// [`TokenKind::EndOfInput`].
///
/// # Errors
/// Returns a [`ScanError`] carrying the first character that does not start
/// a token, and its line.
///
/// # Example
/// ```
/// use numfields::interpreter::lexer::{TokenKind, scan};
///
/// let tokens = scan("history[n-1] + 2").unwrap();
/// assert_eq!(tokens.len(), 9);
/// assert_eq!(tokens[0].kind, TokenKind::Identifier);
/// assert_eq!(tokens[0].text, "history");
/// assert!(tokens[8].is_end());
///
/// assert!(scan("2 % 3").is_err());
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let Ok(kind) = kind else {
            let character = lexer.slice().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(ScanError { character,
                                   line: lexer.extras.line });
        };
        tokens.push(Token { kind,
                            text: lexer.slice().to_string(),
                            line: lexer.extras.line });
    }

    tokens.push(Token::end_of_input(lexer.extras.line));
    debug!("scanned {} token(s) from {} line(s)", tokens.len(), lexer.extras.line);

    Ok(tokens)
}

/// Parses a real literal such as `3.14` or `2.`.
fn parse_real(lex: &logos::Lexer<TokenKind>) -> Option<Number> {
    lex.slice().parse::<f64>().ok().map(Number::real)
}

/// Parses an integer literal. Literals too large for an `i64` become reals.
fn parse_integer(lex: &logos::Lexer<TokenKind>) -> Option<Number> {
    let slice = lex.slice();
    slice.parse::<i64>()
         .map(Number::Integer)
         .or_else(|_| slice.parse::<f64>().map(Number::real))
         .ok()
}
