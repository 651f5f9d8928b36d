use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, parse_nested},
    },
};

/// Parses a comma-separated list of expressions until a closing token.
///
/// This utility is shared by list literals and call argument lists. Each
/// element is a full expression, one nesting level deeper than `depth`.
/// After every element the parser expects either:
///
/// - a comma, to continue the list, or
/// - the closing token, to end it.
///
/// An immediately encountered closing token produces an empty list. A comma
/// directly before the closing token is not allowed.
///
/// Returns the elements together with the height of the tallest one (0 for
/// an empty list).
///
/// Grammar (simplified): `list := (item ("," item)*)?`
///
/// # Errors
/// `ExpectedDelimiter` naming `closing_description` when anything other
/// than a comma or the closer follows an element.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I>(
    tokens: &mut Peekable<I>,
    depth: usize,
    line: usize,
    closing: TokenKind,
    closing_description: &'static str)
    -> ParseResult<(Vec<Expr>, usize)>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    let mut height = 0;
    if let Some(token) = tokens.peek()
       && token.kind == closing
    {
        tokens.next();
        return Ok((items, height));
    }

    loop {
        let item = parse_nested(tokens, depth, line)?;
        height = height.max(item.height);
        items.push(item.expr);
        match tokens.peek() {
            Some(Token { kind: TokenKind::Comma, .. }) => {
                tokens.next();
            },
            Some(token) if token.kind == closing => {
                tokens.next();
                break;
            },
            _ => return Err(unexpected_delimiter(tokens.next(), closing_description, line)),
        }
    }
    Ok((items, height))
}

/// Consumes the next token, which must be of kind `kind`.
///
/// # Errors
/// `ExpectedDelimiter` carrying `description` and the token actually found.
/// `line` is reported only when the stream has no tokens left.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    kind: TokenKind,
                                                    description: &'static str,
                                                    line: usize)
                                                    -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(token) if token.kind == kind => Ok(token),
        other => Err(unexpected_delimiter(other, description, line)),
    }
}

/// Builds an `ExpectedDelimiter` error for `found`, falling back to
/// `fallback_line` when the token stream has run dry.
fn unexpected_delimiter(found: Option<&Token>,
                        expected: &'static str,
                        fallback_line: usize)
                        -> ParseError {
    match found {
        Some(token) => ParseError::ExpectedDelimiter { expected,
                                                       found: token.to_string(),
                                                       line: token.line },
        None => ParseError::ExpectedDelimiter { expected,
                                                found: "end of input".to_string(),
                                                line: fallback_line },
    }
}
