/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST against a [`evaluator::Context`] of
/// variable bindings, performs arithmetic, reads and writes lists, and calls
/// host functions.
///
/// # Responsibilities
/// - Evaluates every AST variant, with exhaustive matching.
/// - Treats unbound variables and out-of-range list positions as zero.
/// - Reports runtime errors such as calling a number or indexing a function.
pub mod evaluator;
/// The lexer module tokenizes formulas for further parsing.
///
/// The lexer reads the raw formula text and produces a sequence of tokens:
/// numbers, identifiers, operators and delimiters. This is the first stage
/// of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source text and
///   line.
/// - Distinguishes integer and real literals.
/// - Reports lexical errors for characters outside the language.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per precedence level.
///
/// # Responsibilities
/// - Converts tokens into a single [`crate::ast::Expr`] root.
/// - Validates assignment targets and delimiters, reporting errors with
///   line info.
/// - Bounds nesting depth.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Numbers (integer or real), shared lists of numbers, and host functions.
pub mod value;
