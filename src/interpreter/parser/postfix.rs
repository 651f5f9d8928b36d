use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parsed, parse_nested},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a primary followed by any chain of calls and indices.
///
/// Postfix operators bind tighter than every binary operator and chain
/// left to right, so `f(1)[0](2)` calls `f`, indexes the result and calls
/// that. Each link of the chain adds a level to the tree.
///
/// The rule is: `call := primary ( "(" arguments? ")" | "[" assign "]" )*`
pub(in crate::interpreter::parser) fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                                                        depth: usize)
                                                        -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let mut parsed = parse_primary(tokens, depth)?;

    loop {
        match tokens.peek() {
            Some(Token { kind: TokenKind::LParen,
                         line,
                         .. }) => {
                let line = *line;
                tokens.next();
                let (arguments, height) = parse_comma_separated(tokens,
                                                                depth,
                                                                line,
                                                                TokenKind::RParen,
                                                                "')' after function call")?;
                parsed = Parsed::node(Expr::Call { callee: Box::new(parsed.expr),
                                                   arguments,
                                                   line },
                                      height.max(parsed.height))?;
            },
            Some(Token { kind: TokenKind::LBracket,
                         line,
                         .. }) => {
                let line = *line;
                tokens.next();
                let index = parse_nested(tokens, depth, line)?;
                expect(tokens, TokenKind::RBracket, "']' after indexing expression", line)?;
                parsed = Parsed::node(Expr::Index { container: Box::new(parsed.expr),
                                                    index: Box::new(index.expr),
                                                    line },
                                      index.height.max(parsed.height))?;
            },
            _ => break,
        }
    }

    Ok(parsed)
}

/// Parses primary expressions.
///
/// Primary expressions are the atoms of the grammar:
/// - number literals,
/// - identifiers,
/// - parenthesized expressions,
/// - list literals.
///
/// The rule is: `primary := NUMBER | IDENTIFIER | "(" assign ")" | "["
/// elements? "]"`
///
/// # Errors
/// `UnexpectedEndOfInput` when the formula ends here, `UnexpectedToken` for
/// any token that cannot start an expression.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let Some(token) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 1 });
    };
    let line = token.line;

    match token.kind {
        TokenKind::Number(value) => Ok(Parsed::leaf(Expr::Number { value, line })),
        TokenKind::Identifier => Ok(Parsed::leaf(Expr::Variable { name: token.text.clone(),
                                                                  line })),
        TokenKind::LParen => {
            let parsed = parse_nested(tokens, depth, line)?;
            expect(tokens, TokenKind::RParen, "')' after grouping expression", line)?;
            Ok(parsed)
        },
        TokenKind::LBracket => {
            let (elements, height) = parse_comma_separated(tokens,
                                                           depth,
                                                           line,
                                                           TokenKind::RBracket,
                                                           "']' after list elements")?;
            Parsed::node(Expr::Array { elements, line }, height)
        },
        TokenKind::EndOfInput => Err(ParseError::UnexpectedEndOfInput { line }),
        _ => Err(ParseError::UnexpectedToken { token: token.text.clone(),
                                               line }),
    }
}
