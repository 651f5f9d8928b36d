use std::{cell::RefCell, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::Expr,
    error::{EvalError, FormulaError},
    interpreter::{
        evaluator::{Context, EvalResult, function::SUM},
        lexer::scan,
        parser::parse,
        value::{Number, Value},
    },
};

/// Seed used when the caller supplies none: `[0, 1]`.
pub const DEFAULT_SEED: &[Number] = &[Number::Integer(0), Number::Integer(1)];

/// Sequence length used when the caller supplies none.
pub const DEFAULT_LENGTH: usize = 10;

/// A parsed formula, ready to be evaluated any number of times.
///
/// Parsing happens once in [`Formula::parse`]; the tree is never modified
/// afterwards, so [`Formula::generate`] and [`Formula::evaluate`] can be
/// called repeatedly with independent contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    tree:   Expr,
}

// A parsed formula holds no shared ownership, so one can be evaluated from
// several threads at once, each with its own context.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Formula>();
};

impl Formula {
    /// Scans and parses `source`.
    ///
    /// # Errors
    /// [`FormulaError::Scan`] or [`FormulaError::Parse`].
    ///
    /// # Example
    /// ```
    /// use numfields::Formula;
    ///
    /// assert!(Formula::parse("history[n-1] * 2").is_ok());
    /// assert!(Formula::parse("history[n-1] *").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = scan(source)?;
        let tree = parse(&tokens)?;

        Ok(Self { source: source.to_string(),
                  tree })
    }

    /// The text the formula was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree.
    #[must_use]
    pub const fn tree(&self) -> &Expr {
        &self.tree
    }

    /// Evaluates the formula once against a caller-built context.
    ///
    /// # Errors
    /// Any [`EvalError`] raised while walking the tree.
    pub fn evaluate(&self, context: &mut Context) -> EvalResult<Value> {
        context.eval(&self.tree)
    }

    /// Generates a sequence of `length` terms starting from `seed`.
    ///
    /// The seed is copied verbatim into the result. Every further position
    /// `n` is computed by evaluating the formula in a fresh context holding
    /// `n`, the shared `history` list (the sequence so far) and the `sum`
    /// builtin. The new term is appended to `history` before the next
    /// position is computed. When `length` does not exceed the seed length,
    /// the seed is returned unchanged.
    ///
    /// Writes the formula makes into `history` stay in the returned
    /// sequence.
    ///
    /// # Errors
    /// The first [`EvalError`] raised by any term, or
    /// [`EvalError::ExpectedNumber`] when a term evaluates to a list or a
    /// function. No partial sequence is returned.
    ///
    /// # Example
    /// ```
    /// use numfields::{Formula, Number};
    ///
    /// let squares = Formula::parse("n * n").unwrap();
    /// let terms = squares.generate(&[], 4).unwrap();
    ///
    /// assert_eq!(terms, [0, 1, 4, 9].map(Number::Integer));
    /// ```
    pub fn generate(&self, seed: &[Number], length: usize) -> Result<Vec<Number>, EvalError> {
        let history = Rc::new(RefCell::new(seed.to_vec()));

        for n in seed.len()..length {
            let history_handle = Value::List(Rc::clone(&history));
            let mut context = Context::new().with_variable("n", Number::from(n))
                                            .with_variable("history", history_handle)
                                            .with_variable("sum", SUM);
            let term = self.evaluate(&mut context)?.as_number(self.tree.line_number())?;
            trace!("term {n} = {term}");

            history.borrow_mut().push(term);
        }

        debug!("generated {} term(s) from '{}'", history.borrow().len(), self.source);
        Ok(history.take())
    }
}

/// Generates a numeric sequence from a formula.
///
/// Convenience wrapper around [`Formula::parse`] followed by
/// [`Formula::generate`].
///
/// # Errors
/// Scan and parse errors from the formula, and evaluation errors from any
/// generated term.
///
/// # Example
/// ```
/// use numfields::{Number, generate_sequence, sequence::DEFAULT_SEED};
///
/// let fibonacci = generate_sequence("history[n-1] + history[n-2]", DEFAULT_SEED, 6).unwrap();
/// assert_eq!(fibonacci, [0, 1, 1, 2, 3, 5].map(Number::Integer));
///
/// assert!(generate_sequence("1 +", DEFAULT_SEED, 6).is_err());
/// ```
pub fn generate_sequence(formula: &str,
                         seed: &[Number],
                         length: usize)
                         -> Result<Vec<Number>, FormulaError> {
    Ok(Formula::parse(formula)?.generate(seed, length)?)
}

/// Returns `true` if `formula` scans and parses.
///
/// The tree is never evaluated, so formulas that would fail at run time
/// (`[1](2)`) are still valid.
///
/// # Example
/// ```
/// use numfields::is_valid_formula;
///
/// assert!(is_valid_formula("history[n-1] + history[n-2]"));
/// assert!(is_valid_formula("[1](2)"));
/// assert!(!is_valid_formula("1 +"));
/// assert!(!is_valid_formula("@"));
/// ```
#[must_use]
pub fn is_valid_formula(formula: &str) -> bool {
    let tokens = match scan(formula) {
        Ok(tokens) => tokens,
        Err(e) => {
            debug!("rejected formula '{formula}': {e}");
            return false;
        },
    };

    match parse(&tokens) {
        Ok(_) => true,
        Err(e) => {
            debug!("rejected formula '{formula}': {e}");
            false
        },
    }
}
