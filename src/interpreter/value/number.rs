use std::{fmt, num::ParseFloatError, str::FromStr};

use ordered_float::OrderedFloat;

use crate::{
    error::EvalError,
    interpreter::evaluator::core::EvalResult,
    util::num::{f64_to_i64_checked, i64_to_f64},
};

/// A numeric value of the formula language.
///
/// Integer literals stay integers until an operation needs a real: integer
/// addition, subtraction, multiplication and non-negative powers are exact
/// and fall back to `f64` only when the result does not fit in an `i64`.
/// Division always produces a real.
///
/// Reals are stored as [`OrderedFloat`], so equality is total: `NaN` equals
/// `NaN`. Equality across variants is numeric, which means `Integer(2)`
/// equals `Real(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point value.
    Real(OrderedFloat<f64>),
}

impl Number {
    /// Integer zero, the value of unbound variables and out-of-range reads.
    pub const ZERO: Self = Self::Integer(0);

    /// Wraps an `f64` as a real number.
    #[must_use]
    pub const fn real(value: f64) -> Self {
        Self::Real(OrderedFloat(value))
    }

    /// Returns the value as an `f64`. Integers beyond 2^53 are rounded.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => i64_to_f64(n),
            Self::Real(r) => r.into_inner(),
        }
    }

    /// Returns `true` if the number is stored as an integer.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Raises `self` to the power `exponent`.
    ///
    /// An integer base with a non-negative integer exponent is computed
    /// exactly when the result fits in an `i64`. Every other combination,
    /// including negative and fractional exponents, uses `f64::powf`; a
    /// negative base with a fractional exponent therefore yields `NaN`.
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        if let (Self::Integer(base), Self::Integer(exp)) = (self, exponent)
           && let Ok(exp) = u32::try_from(exp)
           && let Some(result) = base.checked_pow(exp)
        {
            return Self::Integer(result);
        }
        Self::real(self.as_f64().powf(exponent.as_f64()))
    }

    /// Converts the number to a list index.
    ///
    /// Integers are used as-is. Reals are accepted when they hold a whole
    /// value (`2.0`); fractional and non-finite reals are rejected.
    pub fn to_index(self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(n),
            Self::Real(r) => {
                f64_to_i64_checked(r.into_inner()).ok_or_else(|| {
                                                      EvalError::InvalidIndex { index:
                                                                                    self.to_string(),
                                                                                line }
                                                  })
            },
        }
    }
}

/// Integer `+`, `-` and `*` are exact; on overflow the operation is redone in
/// `f64` rather than failing.
macro_rules! checked_integer_op {
    ($trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl std::ops::$trait for Number {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                if let (Self::Integer(a), Self::Integer(b)) = (self, rhs)
                   && let Some(result) = a.$checked(b)
                {
                    return Self::Integer(result);
                }
                Self::real(self.as_f64() $op rhs.as_f64())
            }
        }
    };
}

checked_integer_op!(Add, add, checked_add, +);
checked_integer_op!(Sub, sub, checked_sub, -);
checked_integer_op!(Mul, mul, checked_mul, *);

/// True division. Always returns a real.
///
/// Division by zero follows IEEE-754 instead of failing: a non-zero dividend
/// gives a signed infinity and `0 / 0` gives `NaN`.
///
/// # Example
/// ```
/// use numfields::Number;
///
/// assert_eq!(Number::Integer(7) / Number::Integer(2), Number::real(3.5));
/// assert_eq!(Number::Integer(1) / Number::Integer(0), Number::real(f64::INFINITY));
/// assert_eq!(Number::Integer(0) / Number::Integer(0), Number::real(f64::NAN));
/// ```
impl std::ops::Div for Number {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::real(self.as_f64() / rhs.as_f64())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            _ => OrderedFloat(self.as_f64()) == OrderedFloat(other.as_f64()),
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::real(value)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::real(crate::util::num::usize_to_f64(value)),
                                         Self::Integer)
    }
}

/// Parses `"42"` as an integer and anything else `f64` accepts as a real.
impl FromStr for Number {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Integer(n));
        }
        s.parse::<f64>().map(Self::real)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_integral() {
        let a = Number::Integer(6);
        let b = Number::Integer(4);

        assert!((a + b).is_integer());
        assert!((a - b).is_integer());
        assert!((a * b).is_integer());
        assert_eq!((a - b), Number::Integer(2));
    }

    #[test]
    fn division_is_true_division() {
        assert_eq!(Number::Integer(1) / Number::Integer(2), Number::real(0.5));
        assert!(!(Number::Integer(4) / Number::Integer(2)).is_integer());
        assert_eq!(Number::Integer(4) / Number::Integer(2), Number::Integer(2));
    }

    #[test]
    fn overflow_promotes_to_real() {
        let big = Number::Integer(i64::MAX);

        assert_eq!(big * Number::Integer(2), Number::real(2.0 * i64_to_f64(i64::MAX)));
        assert!(!(Number::Integer(i64::MAX) + Number::Integer(1)).is_integer());
        assert!(!Number::Integer(10).pow(Number::Integer(40)).is_integer());
    }

    #[test]
    fn powers() {
        assert_eq!(Number::Integer(2).pow(Number::Integer(10)), Number::Integer(1024));
        assert_eq!(Number::Integer(2).pow(Number::Integer(-1)), Number::real(0.5));
        assert_eq!(Number::Integer(9).pow(Number::real(0.5)), Number::real(3.0));
        assert!(Number::Integer(-8).pow(Number::real(0.5)).as_f64().is_nan());
    }

    #[test]
    fn nan_equals_nan() {
        assert_eq!(Number::real(f64::NAN), Number::real(f64::NAN));
        assert_ne!(Number::real(f64::NAN), Number::ZERO);
    }

    #[test]
    fn index_conversion() {
        assert_eq!(Number::Integer(-3).to_index(1), Ok(-3));
        assert_eq!(Number::real(2.0).to_index(1), Ok(2));
        assert!(matches!(Number::real(1.5).to_index(4),
                         Err(EvalError::InvalidIndex { line: 4, .. })));
        assert!(Number::real(f64::INFINITY).to_index(1).is_err());
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("12".parse::<Number>(), Ok(Number::Integer(12)));
        assert!("12".parse::<Number>().is_ok_and(Number::is_integer));
        assert_eq!("-0.25".parse::<Number>(), Ok(Number::real(-0.25)));
        assert!("abc".parse::<Number>().is_err());
    }
}
