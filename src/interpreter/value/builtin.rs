use std::fmt;

use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Signature of a host-provided function.
///
/// A builtin receives the evaluated arguments and the line of the call for
/// error reporting.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// A host-provided function that formulas can call.
///
/// Builtins are plain function pointers, so they carry no state and are
/// cheap to copy into every evaluation context.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// The name the function is shown under.
    pub name: &'static str,
    /// The implementation.
    pub func: BuiltinFn,
}

impl Builtin {
    /// Invokes the function with already evaluated arguments.
    pub fn call(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        (self.func)(args, line)
    }
}

/// Builtins compare by name; function pointer addresses are not stable.
impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}
