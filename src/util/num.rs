/// Converts an `i64` to `f64`.
///
/// Values whose magnitude exceeds `2^53` are rounded to the
/// nearest representable `f64`; this is the intended behavior for numbers
/// that overflowed integer arithmetic.
///
/// ## Example
/// ```
/// use numfields::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `usize` to `f64`, rounding above `2^53`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Converts an `f64` to `i64` if the value is finite, within range, and not
/// fractional.
///
/// ## Returns
/// - `Some(i64)`: The converted value if it is exact.
/// - `None`: For `NaN`, infinities, out-of-range or fractional values.
///
/// ## Example
/// ```
/// use numfields::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(1000.0), Some(1000));
/// assert_eq!(f64_to_i64_checked(-2.0), Some(-2));
/// assert_eq!(f64_to_i64_checked(1.5), None);
/// assert_eq!(f64_to_i64_checked(1e20), None);
/// assert_eq!(f64_to_i64_checked(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_checked(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Resolves a possibly negative list index against a list of `len` elements.
///
/// Non-negative indices count from the front; negative indices count from
/// the back, so `-1` is the last element. Anything outside `-len..len` is
/// out of range and yields `None`.
///
/// ## Example
/// ```
/// use numfields::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3), Some(0));
/// assert_eq!(resolve_index(-1, 3), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(-4, 3), None);
/// assert_eq!(resolve_index(-1, 0), None);
/// ```
#[must_use]
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let resolved = if index < 0 {
        let from_end = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(from_end)?
    } else {
        usize::try_from(index).ok()?
    };

    (resolved < len).then_some(resolved)
}
