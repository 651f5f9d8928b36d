use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// The left operand is evaluated before the right one. Both must be
    /// numbers; the arithmetic itself is [`BinaryOperator::apply`].
    ///
    /// # Errors
    /// `ExpectedNumber` when either operand is a list or a function.
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            left: &Expr,
                                                            op: BinaryOperator,
                                                            right: &Expr,
                                                            line: usize)
                                                            -> EvalResult<Value> {
        let left = self.eval(left)?.as_number(line)?;
        let right = self.eval(right)?.as_number(line)?;

        Ok(Value::Number(op.apply(left, right)))
    }
}
