/// Numeric conversion helpers.
///
/// Conversions between `i64`, `usize` and `f64` used by the number model and
/// list indexing, plus resolution of negative list indices.
pub mod num;
