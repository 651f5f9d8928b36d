/// Host function values.
///
/// Defines `Builtin`, the callable value kind, as a named function pointer.
pub mod builtin;
/// The `Value` enum and its consumption rules.
pub mod core;
/// Integer/real numbers with overflow promotion and IEEE division.
pub mod number;

pub use self::{builtin::Builtin, core::{List, Value}, number::Number};
