//! Exact rational scalars.
//!
//! Every entry the engine touches is a [`Rational`]: an arbitrary-precision
//! numerator over a strictly positive denominator, kept in lowest terms after
//! every operation. Fixed-width integers are not enough here: the exact binary
//! value of a float like `0.1` already carries a `2^55` denominator, and a
//! handful of products during elimination would overflow `i64`.

use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Largest decimal exponent accepted when parsing scientific notation.
///
/// `1e1000000` is a valid rational, but materialising it would allocate
/// megabytes for a single matrix entry.
pub const MAX_EXPONENT: i64 = 1000;

/// Exact fraction `numer / denom` with `denom > 0` and `gcd(|numer|, denom) = 1`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

/// Reasons a textual or floating value is not a rational number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseRationalError {
    /// Nothing left after trimming whitespace.
    #[error("empty value")]
    Empty,
    /// Not an integer, fraction, decimal or scientific literal.
    #[error("'{0}' is not a number")]
    Malformed(String),
    /// `p/0`.
    #[error("'{0}' has a zero denominator")]
    ZeroDenominator(String),
    /// Exponent magnitude above [`MAX_EXPONENT`].
    #[error("exponent of '{0}' is out of range")]
    ExponentOutOfRange(String),
    /// NaN or an infinity.
    #[error("{0} is not a finite number")]
    NonFinite(f64),
}

impl Rational {
    /// Integer `value / 1`.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self(BigRational::from_integer(value.into()))
    }

    /// `numer / denom` reduced to lowest terms; `None` when `denom` is zero.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Option<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return None;
        }
        Some(Self(BigRational::new(numer.into(), denom)))
    }

    /// The exact binary fraction stored in `value`.
    ///
    /// `0.5` is `1/2`, but `0.1` is `3602879701896397/36028797018963968`:
    /// no rounding towards "nicer" fractions takes place.
    pub fn from_f64(value: f64) -> Result<Self, ParseRationalError> {
        BigRational::from_float(value)
            .map(Self)
            .ok_or(ParseRationalError::NonFinite(value))
    }

    /// Numerator, carrying the sign.
    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    /// Denominator, always positive.
    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    /// `true` when the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// `true` for values strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.recip()))
        }
    }

    /// Nearest `f64`, for display and approximate comparisons only.
    pub fn to_f64(&self) -> f64 {
        match (self.numer().to_f64(), self.denom().to_f64()) {
            (Some(n), Some(d)) => n / d,
            _ => f64::NAN,
        }
    }
}

// --- Parsing ---------------------------------------------------------------------

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Accepts `-3`, `3/4`, `0.25`, `.5`, `2.`, `1.5e-3`, and a fraction of
    /// any two of those (`1.5/2`). Decimal text is read as a decimal fraction,
    /// so `"0.1"` is exactly `1/10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseRationalError::Empty);
        }

        match text.split_once('/') {
            Some((numer, denom)) => {
                let numer = parse_decimal(numer.trim(), text)?;
                let denom = parse_decimal(denom.trim(), text)?;
                if denom.is_zero() {
                    return Err(ParseRationalError::ZeroDenominator(text.to_string()));
                }
                Ok(Self(numer / denom))
            }
            None => parse_decimal(text, text).map(Self),
        }
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
fn parse_decimal(part: &str, whole: &str) -> Result<BigRational, ParseRationalError> {
    let malformed = || ParseRationalError::Malformed(whole.to_string());

    let (negative, unsigned) = match part.as_bytes().first() {
        Some(b'-') => (true, &part[1..]),
        Some(b'+') => (false, &part[1..]),
        _ => (false, part),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => {
            let exp_text = &unsigned[at + 1..];
            let exp_digits = exp_text.strip_prefix(['+', '-']).unwrap_or(exp_text);
            if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let exponent: i64 = exp_text
                .parse()
                .ok()
                .filter(|e: &i64| e.abs() <= MAX_EXPONENT)
                .ok_or_else(|| ParseRationalError::ExponentOutOfRange(whole.to_string()))?;
            (&unsigned[..at], exponent)
        }
        None => (unsigned, 0),
    };

    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |d: &str| d.bytes().all(|b| b.is_ascii_digit());
    if int_digits.len() + frac_digits.len() == 0 || !all_digits(int_digits) || !all_digits(frac_digits) {
        return Err(malformed());
    }

    let digits = format!("{int_digits}{frac_digits}");
    let mut numer: BigInt = digits.parse().map_err(|_| malformed())?;
    if negative {
        numer = -numer;
    }

    let scale = exponent - frac_digits.len() as i64;
    let power: BigInt = Pow::pow(BigInt::from(10u8), scale.unsigned_abs());
    Ok(if scale >= 0 {
        BigRational::from_integer(numer * power)
    } else {
        BigRational::new(numer, power)
    })
}

// --- num-traits ------------------------------------------------------------------

impl Zero for Rational {
    #[inline]
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    #[inline]
    fn one() -> Self {
        Self(BigRational::one())
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0.is_one()
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

// --- Arithmetic ------------------------------------------------------------------

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Rational {
            type Output = Rational;

            #[inline]
            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a Rational> for &'a Rational {
            type Output = Rational;

            #[inline]
            fn $method(self, rhs: &'a Rational) -> Rational {
                Rational((&self.0).$method(&rhs.0))
            }
        }

        impl<'a> $trait<&'a Rational> for Rational {
            type Output = Rational;

            #[inline]
            fn $method(self, rhs: &'a Rational) -> Rational {
                Rational(self.0.$method(&rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// Division by zero panics, as it does for `BigRational`; callers divide by pivots only.
forward_binop!(Div, div);

impl Neg for Rational {
    type Output = Rational;

    #[inline]
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    #[inline]
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

// --- Conversions -----------------------------------------------------------------

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from_integer(value)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

// --- Formatting ------------------------------------------------------------------

impl Display for Rational {
    /// `p` for integers, `p/q` otherwise.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

/// Serialized as its exact text, e.g. `"-3"` or `"1/2"`.
impl Serialize for Rational {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
