use std::{cell::RefCell, rc::Rc};

use log::trace;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{Number, Value},
    },
    util::num::resolve_index,
};

impl Context {
    /// Evaluates a list literal.
    ///
    /// Elements are evaluated in order and must all be numbers. Every
    /// evaluation of the literal produces a fresh list.
    ///
    /// # Errors
    /// `ExpectedNumber` for an element that is a list or a function.
    pub(in crate::interpreter::evaluator) fn eval_array(&mut self,
                                                        elements: &[Expr],
                                                        line: usize)
                                                        -> EvalResult<Value> {
        let values = elements.iter()
                             .map(|element| self.eval(element)?.as_number(element.line_number()))
                             .collect::<EvalResult<Vec<Number>>>()?;
        trace!("built list of {} element(s) on line {line}", values.len());

        Ok(Value::List(Rc::new(RefCell::new(values))))
    }

    /// Evaluates an indexed read, `container[index]`.
    ///
    /// Negative indices count from the end. Positions outside the list read
    /// as the integer zero.
    ///
    /// # Errors
    /// `NotIndexable` when the container is not a list, `ExpectedNumber`
    /// when the index is not a number, `InvalidIndex` when it is not whole.
    pub(in crate::interpreter::evaluator) fn eval_index(&mut self,
                                                        container: &Expr,
                                                        index: &Expr,
                                                        line: usize)
                                                        -> EvalResult<Value> {
        let container = self.eval(container)?;
        let list = container.as_list(line)?;
        let index = self.eval(index)?.as_number(line)?.to_index(line)?;

        let list = list.borrow();
        let Some(i) = resolve_index(index, list.len()) else {
            trace!("index {index} out of range on line {line}, read as 0");
            return Ok(Value::Number(Number::ZERO));
        };

        Ok(Value::Number(list[i]))
    }

    /// Evaluates an indexed write, `container[index] = value`.
    ///
    /// Container, index and value are evaluated in that order. The write goes
    /// through the shared list handle, so every name bound to the same list
    /// observes it. A write outside the list changes nothing and the
    /// expression evaluates to zero; otherwise it evaluates to the written
    /// value.
    ///
    /// # Errors
    /// As [`Context::eval_index`], plus `ExpectedNumber` when the value is
    /// not a number.
    pub(in crate::interpreter::evaluator) fn eval_index_assign(&mut self,
                                                               container: &Expr,
                                                               index: &Expr,
                                                               value: &Expr,
                                                               line: usize)
                                                               -> EvalResult<Value> {
        let container = self.eval(container)?;
        let list = container.as_list(line)?;
        let index = self.eval(index)?.as_number(line)?.to_index(line)?;
        let value = self.eval(value)?.as_number(line)?;

        let mut list = list.borrow_mut();
        let Some(i) = resolve_index(index, list.len()) else {
            trace!("index {index} out of range on line {line}, write dropped");
            return Ok(Value::Number(Number::ZERO));
        };
        list[i] = value;

        Ok(Value::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::EvalError,
        interpreter::{lexer::scan, parser::parse},
    };

    fn eval_in(context: &mut Context, source: &str) -> EvalResult<Value> {
        context.eval(&parse(&scan(source).unwrap()).unwrap())
    }

    fn list(values: &[i64]) -> Value {
        Value::from(values.iter().copied().map(Number::Integer).collect::<Vec<_>>())
    }

    #[test]
    fn reads_with_wrap_around() {
        let mut context = Context::new().with_variable("a", list(&[1, 2, 3]));

        assert_eq!(eval_in(&mut context, "a[0]"), Ok(Value::from(1)));
        assert_eq!(eval_in(&mut context, "a[-1]"), Ok(Value::from(3)));
        assert_eq!(eval_in(&mut context, "a[-3]"), Ok(Value::from(1)));
        assert_eq!(eval_in(&mut context, "a[1.0]"), Ok(Value::from(2)));
    }

    #[test]
    fn out_of_range_reads_are_zero() {
        let mut context = Context::new().with_variable("a", list(&[1, 2, 3]));

        assert_eq!(eval_in(&mut context, "a[3]"), Ok(Value::from(0)));
        assert_eq!(eval_in(&mut context, "a[-4]"), Ok(Value::from(0)));
        assert_eq!(eval_in(&mut context, "[][0]"), Ok(Value::from(0)));
    }

    #[test]
    fn writes_are_visible_through_every_alias() {
        let mut context = Context::new();

        assert_eq!(eval_in(&mut context, "a = [1, 2, 3]"), Ok(list(&[1, 2, 3])));
        eval_in(&mut context, "b = a").unwrap();
        assert_eq!(eval_in(&mut context, "b[0] = 9"), Ok(Value::from(9)));
        assert_eq!(eval_in(&mut context, "a[0]"), Ok(Value::from(9)));
        assert_eq!(eval_in(&mut context, "a[-1] = 7"), Ok(Value::from(7)));
        assert_eq!(context.get_variable("b"), Some(&list(&[9, 2, 7])));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut context = Context::new().with_variable("a", list(&[1, 2]));

        assert_eq!(eval_in(&mut context, "a[5] = 4"), Ok(Value::from(0)));
        assert_eq!(context.get_variable("a"), Some(&list(&[1, 2])));
    }

    #[test]
    fn literals_build_fresh_lists() {
        let tree = parse(&scan("[0]").unwrap()).unwrap();
        let mut context = Context::new();
        let first = context.eval(&tree).unwrap();
        let second = context.eval(&tree).unwrap();

        let (Value::List(first), Value::List(second)) = (first, second) else {
            panic!("list literal evaluated to a non-list");
        };
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn list_elements_must_be_numbers() {
        assert!(matches!(eval_in(&mut Context::new(), "[1, [2]]"),
                         Err(EvalError::ExpectedNumber { found: "list", .. })));
    }

    #[test]
    fn indexing_errors() {
        let mut context = Context::new().with_variable("a", list(&[1]));

        assert_eq!(eval_in(&mut context, "5[0]"),
                   Err(EvalError::NotIndexable { found: "number",
                                                 line:  1, }));
        assert_eq!(eval_in(&mut context, "a[0.5]"),
                   Err(EvalError::InvalidIndex { index: "0.5".to_string(),
                                                 line:  1, }));
        assert_eq!(eval_in(&mut context, "a[[0]]"),
                   Err(EvalError::ExpectedNumber { found: "list",
                                                   line:  1, }));
        assert!(matches!(eval_in(&mut context, "x[0] = 1"), Err(EvalError::NotIndexable { .. })));
        assert!(matches!(eval_in(&mut context, "a[0] = [1]"),
                         Err(EvalError::ExpectedNumber { .. })));
    }
}
