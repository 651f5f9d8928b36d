use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, Parsed},
            postfix::parse_call,
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `term := factor (("+" | "-") factor)*`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `depth`: Current nesting depth, passed down to nested expressions.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
pub(in crate::interpreter::parser) fn parse_term<'a, I>(tokens: &mut Peekable<I>,
                                                        depth: usize)
                                                        -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_factor(tokens, depth)?;
    while let Some(token) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token.kind)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    {
        let line = token.line;
        tokens.next();
        let right = parse_factor(tokens, depth)?;
        left = binary_node(left, op, right, line)?;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*` and `/`.
///
/// The rule is: `factor := power (("*" | "/") power)*`
fn parse_factor<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_power(tokens, depth)?;
    while let Some(token) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token.kind)
          && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
    {
        let line = token.line;
        tokens.next();
        let right = parse_power(tokens, depth)?;
        left = binary_node(left, op, right, line)?;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is left-associative like every other binary operator:
/// `a ^ b ^ c` parses as `(a ^ b) ^ c`.
///
/// The rule is: `power := call ("^" call)*`
fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_call(tokens, depth)?;
    while let Some(token) = tokens.peek()
          && let Some(BinaryOperator::Pow) = token_to_binary_operator(token.kind)
    {
        let line = token.line;
        tokens.next();
        let right = parse_call(tokens, depth)?;
        left = binary_node(left, BinaryOperator::Pow, right, line)?;
    }
    Ok(left)
}

/// Joins two operands under `op`, one level above the taller of them.
fn binary_node(left: Parsed,
               op: BinaryOperator,
               right: Parsed,
               line: usize)
               -> ParseResult<Parsed> {
    let children = left.height.max(right.height);
    Parsed::node(Expr::BinaryOp { left: Box::new(left.expr),
                                  op,
                                  right: Box::new(right.expr),
                                  line },
                 children)
}

/// Maps a token kind to its binary operator, if it is one.
const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
