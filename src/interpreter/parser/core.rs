use std::iter::Peekable;

use log::debug;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::binary::parse_term,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply expressions may nest before the parser gives up.
///
/// The limit applies twice: to the parser's own recursion (groupings, calls,
/// indices, list literals and chained assignments), and to the height of the
/// tree it builds. Operator and postfix chains such as `1+1+1` or `a[0][0]`
/// are parsed in loops but still produce one tree level per operator, and
/// evaluating or dropping a tree recurses once per level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// A subtree together with its height (a leaf has height 1).
///
/// Heights are computed while the tree is built, so the limit is enforced
/// without walking the tree.
#[derive(Debug)]
pub(in crate::interpreter::parser) struct Parsed {
    pub expr:   Expr,
    pub height: usize,
}

impl Parsed {
    /// A node without children.
    pub const fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }

    /// A node whose tallest child has height `children`.
    ///
    /// # Errors
    /// `NestingTooDeep` when the node would exceed [`MAX_NESTING_DEPTH`].
    pub fn node(expr: Expr, children: usize) -> ParseResult<Self> {
        let height = children + 1;
        if height > MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                    line:  expr.line_number(), });
        }
        Ok(Self { expr, height })
    }
}

/// Parses a complete token sequence into a single tree.
///
/// The whole sequence must form one expression: after the root expression
/// only the end-of-input marker may remain.
///
/// Parsing keeps all of its state on the stack of this call, so one token
/// sequence can be parsed from several threads at once and repeated parses
/// produce equal trees.
///
/// # Errors
/// Returns a [`ParseError`] for unexpected tokens, unmatched delimiters,
/// invalid assignment targets, missing expressions, excessive nesting and
/// leftover tokens.
///
/// # Example
/// ```
/// use numfields::interpreter::{lexer::scan, parser::parse};
///
/// let tokens = scan("history[n-1] + history[n-2]").unwrap();
/// assert!(parse(&tokens).is_ok());
///
/// let tokens = scan("1 +").unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let parsed = parse_expression(&mut iter, 0)?;

    match iter.next() {
        None | Some(Token { kind: TokenKind::EndOfInput, .. }) => {
            debug!("parsed {} token(s) into a tree of height {}", tokens.len(), parsed.height);
            Ok(parsed.expr)
        },
        Some(token) => Err(ParseError::TrailingTokens { token: token.text.clone(),
                                                        line:  token.line, }),
    }
}

/// Parses a full expression.
///
/// This is the entry point for every nested expression. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assign`
pub(in crate::interpreter::parser) fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                                                              depth: usize)
                                                              -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    parse_assign(tokens, depth)
}

/// Parses an expression one nesting level deeper than `depth`.
///
/// Every construct that re-enters [`parse_expression`] goes through here so
/// that recursion is bounded by [`MAX_NESTING_DEPTH`].
pub(in crate::interpreter::parser) fn parse_nested<'a, I>(tokens: &mut Peekable<I>,
                                                          depth: usize,
                                                          line: usize)
                                                          -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                line });
    }
    parse_expression(tokens, depth + 1)
}

/// Parses assignments.
///
/// The target is parsed as an ordinary term first; when a `=` follows, the
/// target must turn out to be a variable (giving [`Expr::Assign`]) or an
/// index expression (giving [`Expr::IndexAssign`]). The right side is again
/// an assignment, so `x = y = 3` binds both names.
///
/// Grammar: `assign := term ("=" assign)*`
///
/// # Errors
/// `InvalidAssignmentTarget` when anything else stands left of `=`; the
/// target is checked before the right side is parsed.
fn parse_assign<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Parsed>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_term(tokens, depth)?;

    while let Some(Token { kind: TokenKind::Equals,
                           line,
                           .. }) = tokens.peek()
    {
        let line = *line;
        tokens.next();

        let Parsed { expr, height } = left;
        left = match expr {
            Expr::Variable { name, .. } => {
                let value = parse_nested(tokens, depth, line)?;
                Parsed::node(Expr::Assign { name,
                                            value: Box::new(value.expr),
                                            line },
                             value.height)?
            },
            Expr::Index { container, index, .. } => {
                let value = parse_nested(tokens, depth, line)?;
                Parsed::node(Expr::IndexAssign { container,
                                                 index,
                                                 value: Box::new(value.expr),
                                                 line },
                             value.height.max(height - 1))?
            },
            _ => return Err(ParseError::InvalidAssignmentTarget { line }),
        };
    }

    Ok(left)
}
