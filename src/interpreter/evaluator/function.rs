use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{Builtin, Number, Value},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated and checked first; arguments are only
    /// evaluated, left to right, once the callee is known to be callable.
    ///
    /// # Errors
    /// `NotCallable` when the callee is a number or a list, and whatever the
    /// arguments or the function itself report.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       line: usize)
                                                       -> EvalResult<Value> {
        let function = *self.eval(callee)?.as_callable(line)?;
        let args = arguments.iter().map(|arg| self.eval(arg)).collect::<EvalResult<Vec<_>>>()?;

        function.call(&args, line)
    }
}

/// Adds up its arguments.
///
/// Starts from the integer zero, so `sum()` is `0`. Integer arguments keep the
/// result integral; any real argument makes it real.
///
/// # Errors
/// `ExpectedNumber` for a list or function argument.
///
/// # Example
/// ```
/// use numfields::{Value, interpreter::evaluator::function::sum};
///
/// assert_eq!(sum(&[Value::from(1), Value::from(2.5)], 1).unwrap(), Value::from(3.5));
/// assert_eq!(sum(&[], 1).unwrap(), Value::from(0));
/// ```
pub fn sum(args: &[Value], line: usize) -> EvalResult<Value> {
    args.iter()
        .try_fold(Number::ZERO, |total, arg| arg.as_number(line).map(|n| total + n))
        .map(Value::Number)
}

/// The `sum` builtin, bound by the sequence generator for every term.
pub const SUM: Builtin = Builtin { name: "sum",
                                   func: sum, };
