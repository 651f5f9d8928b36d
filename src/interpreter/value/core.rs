use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::EvalError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{builtin::Builtin, number::Number},
    },
};

/// A shared, mutable list of numbers.
///
/// Cloning a `List` clones the handle, not the elements: every clone sees
/// writes made through any other. This is how `history` written by a formula
/// stays visible to the sequence generator.
pub type List = Rc<RefCell<Vec<Number>>>;

/// Represents a runtime value in the interpreter.
///
/// The language has exactly three kinds of values. Each consumption site
/// (arithmetic, indexing, calling) accepts one kind and reports an
/// [`EvalError`] for the others.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number, integer or real.
    Number(Number),
    /// A list of numbers, shared by reference.
    List(List),
    /// A host-provided function such as `sum`.
    Callable(Builtin),
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Number(r.into())
    }
}

impl From<Vec<Number>> for Value {
    fn from(v: Vec<Number>) -> Self {
        Self::List(Rc::new(RefCell::new(v)))
    }
}

impl From<Builtin> for Value {
    fn from(b: Builtin) -> Self {
        Self::Callable(b)
    }
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Callable(_) => "function",
        }
    }

    /// Returns the number, or `ExpectedNumber` for lists and functions.
    ///
    /// # Example
    /// ```
    /// use numfields::{Number, Value};
    ///
    /// assert_eq!(Value::from(3).as_number(1).unwrap(), Number::Integer(3));
    /// assert!(Value::from(vec![Number::Integer(3)]).as_number(1).is_err());
    /// ```
    pub const fn as_number(&self, line: usize) -> EvalResult<Number> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(EvalError::ExpectedNumber { found: self.kind_name(),
                                                 line }),
        }
    }

    /// Returns the list handle, or `NotIndexable` for other values.
    pub const fn as_list(&self, line: usize) -> EvalResult<&List> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(EvalError::NotIndexable { found: self.kind_name(),
                                               line }),
        }
    }

    /// Returns the builtin, or `NotCallable` for other values.
    pub const fn as_callable(&self, line: usize) -> EvalResult<&Builtin> {
        match self {
            Self::Callable(builtin) => Ok(builtin),
            _ => Err(EvalError::NotCallable { found: self.kind_name(),
                                              line }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::List(list) => {
                write!(f, "[")?;

                for (index, value) in list.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Callable(builtin) => write!(f, "{builtin}"),
        }
    }
}
