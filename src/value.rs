//! The numeric value representation and its canonicalizer.
//!
//! A [`Value`] is always stored in the narrowest representation that holds it
//! exactly: a `Big` never holds anything in the inclusive range
//! [`i64::MIN`, `i64::MAX`]. [`Value::from_big`] is the single gate through
//! which arbitrary-precision results re-enter the tower, and it is where the
//! invariant is enforced. The 32-bit form is opportunistic; `Int64` is always
//! acceptable for values that would also fit 32 bits.

use std::borrow::Cow;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::compare;

/// Exclusive upper bound of the i64 range as a double: 2^63.
pub(crate) const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// A number held by the tower: a machine word, an arbitrary-precision
/// integer, or an IEEE-754 double. Immutable; every operation returns a
/// fresh value.
#[derive(Clone, Debug)]
pub enum Value {
    /// 32-bit signed integer, used opportunistically.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// Arbitrary-precision integer; never holds a value that fits 64 bits.
    Big(BigInt),
    /// IEEE-754 double.
    Float(f64),
}

impl Value {
    /// Demotes an arbitrary-precision result to the narrowest exact
    /// representation. The sole constructor of the `Big` variant.
    pub fn from_big(value: BigInt) -> Self {
        match value.to_i64() {
            Some(fits) => Self::from_i64(fits),
            None => Self::Big(value),
        }
    }

    /// Narrows a 64-bit value to 32 bits when it fits.
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(narrow) => Self::Int32(narrow),
            Err(_) => Self::Int64(value),
        }
    }

    /// Converts a finite double to the narrowest integer representation,
    /// truncating toward zero. Returns `None` for NaN and infinities.
    pub fn from_f64_trunc(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if (-TWO_POW_63..TWO_POW_63).contains(&value) {
            Some(Self::from_i64(value as i64))
        } else {
            BigInt::from_f64(value).map(Self::Big)
        }
    }

    /// True for the three integer representations.
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::Float(_))
    }

    /// The machine-word reading of this value, when it has one.
    pub fn as_machine(&self) -> Option<i64> {
        match self {
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            Self::Big(_) | Self::Float(_) => None,
        }
    }

    /// The integer reading of this value as an arbitrary-precision number.
    /// Borrows for `Big`, allocates for machine words, `None` for floats.
    pub(crate) fn as_big(&self) -> Option<Cow<'_, BigInt>> {
        match self {
            Self::Int32(v) => Some(Cow::Owned(BigInt::from(*v))),
            Self::Int64(v) => Some(Cow::Owned(BigInt::from(*v))),
            Self::Big(big) => Some(Cow::Borrowed(big)),
            Self::Float(_) => None,
        }
    }

    /// Whether the value fits a 32-bit signed integer exactly.
    pub fn fits_i32(&self) -> bool {
        match self {
            Self::Int32(_) => true,
            Self::Int64(v) => i32::try_from(*v).is_ok(),
            Self::Big(_) | Self::Float(_) => false,
        }
    }

    /// Whether the value fits a 64-bit signed integer exactly. Always false
    /// for `Big` by the canonical-form invariant.
    pub fn fits_i64(&self) -> bool {
        matches!(self, Self::Int32(_) | Self::Int64(_))
    }

    /// The double reading of this value; lossy for wide integers.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int32(v) => f64::from(*v),
            Self::Int64(v) => *v as f64,
            Self::Big(big) => crate::big::to_f64(big),
            Self::Float(f) => *f,
        }
    }

    /// Width of the value in bytes: the machine word size for machine
    /// integers, the magnitude's byte count for `Big`.
    pub fn size_bytes(&self) -> Option<u64> {
        match self {
            Self::Int32(_) | Self::Int64(_) => Some(8),
            Self::Big(big) => Some((crate::big::bit_length(big) + 7) / 8),
            Self::Float(_) => None,
        }
    }
}

/// Numeric equality across representations: `1i32 == 1i64`, integers
/// compare exactly against floats, and NaN is equal to nothing.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare::eq(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Big(big) => write!(f, "{big}"),
            Self::Float(float) => write!(f, "{float}"),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::from_big(value)
    }
}
