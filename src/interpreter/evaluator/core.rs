use std::collections::HashMap;

use log::trace;

use crate::{
    ast::Expr,
    error::EvalError,
    interpreter::value::{Number, Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Stores the runtime evaluation context.
///
/// A context maps variable names to values. It starts out with whatever the
/// host binds (for sequence generation that is `n`, `history` and `sum`)
/// and grows as the formula assigns new names.
///
/// ## Usage
///
/// Contexts are cheap to build and are not shared between evaluations:
/// create one, bind the inputs, call [`Context::eval`]. Lists bound into a
/// context are shared handles, so writes made by the formula are visible to
/// the host afterwards.
///
/// ```
/// use numfields::{Number, Value, interpreter::evaluator::Context};
/// use numfields::interpreter::{lexer::scan, parser::parse};
///
/// let tree = parse(&scan("x = n * 2").unwrap()).unwrap();
/// let mut context = Context::new().with_variable("n", 21);
///
/// assert_eq!(context.eval(&tree).unwrap(), Value::from(42));
/// assert_eq!(context.get_variable("x"), Some(&Value::from(42)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    variables: HashMap<String, Value>,
}

impl Context {
    /// Creates a context with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` and returns the context, for chained construction.
    #[must_use]
    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_variable(name, value.into());
        self
    }

    /// Looks a variable up. `None` if the name was never bound.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds or rebinds a variable.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant and recurses into children left
    /// to right, so side effects (assignments, list writes) happen in source
    /// order.
    ///
    /// # Errors
    /// Any [`EvalError`]: arithmetic on non-numbers, calling a non-function,
    /// indexing a non-list, non-integral indices.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Variable { name, .. } => Ok(self.eval_variable(name)),
            Expr::Assign { name, value, .. } => self.eval_assign(name, value),
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
            Expr::Array { elements, line } => self.eval_array(elements, *line),
            Expr::Index { container,
                          index,
                          line, } => self.eval_index(container, index, *line),
            Expr::IndexAssign { container,
                                index,
                                value,
                                line, } => self.eval_index_assign(container, index, value, *line),
        }
    }

    /// Resolves a variable. Unbound names evaluate to the integer zero.
    fn eval_variable(&self, name: &str) -> Value {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None => {
                trace!("unbound variable '{name}' read as 0");
                Value::Number(Number::ZERO)
            },
        }
    }

    /// Evaluates `value`, binds it to `name` and returns it.
    fn eval_assign(&mut self, name: &str, value: &Expr) -> EvalResult<Value> {
        let value = self.eval(value)?;
        self.set_variable(name, value.clone());
        Ok(value)
    }
}
