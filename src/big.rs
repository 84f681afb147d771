//! Adapter over the `num-bigint` primitives.
//!
//! This layer always operates in arbitrary precision and performs no overflow
//! detection of its own; every arithmetic result is routed through the
//! canonicalizer ([`Value::from_big`]) before it is handed back, so callers
//! never see a `Big` that would fit a machine word.

use std::cmp::Ordering;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Pow, Signed, ToPrimitive, Zero};

use crate::error::ArithmeticError;
use crate::value::Value;

pub fn add(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a + b)
}

pub fn sub(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a - b)
}

pub fn mul(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a * b)
}

/// Truncating quotient and remainder in one pass. Callers needing floor
/// semantics apply the correction on top (see `divmod`).
pub fn div_rem_trunc(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt), ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a.div_rem(b))
}

/// Remainder of floor division; sign follows the divisor or is zero.
pub fn mod_floor(a: &BigInt, b: &BigInt) -> Result<Value, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(Value::from_big(a.mod_floor(b)))
}

pub fn neg(a: &BigInt) -> Value {
    Value::from_big(-a)
}

pub fn abs(a: &BigInt) -> Value {
    Value::from_big(a.abs())
}

pub fn bitand(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a & b)
}

pub fn bitor(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a | b)
}

pub fn bitxor(a: &BigInt, b: &BigInt) -> Value {
    Value::from_big(a ^ b)
}

/// Bitwise complement under two's-complement semantics: `!a == -a - 1`.
pub fn not(a: &BigInt) -> Value {
    Value::from_big(-(a + 1u32))
}

pub fn shift_left(a: &BigInt, count: usize) -> Value {
    Value::from_big(a << count)
}

/// Arithmetic right shift; rounds toward negative infinity like the rest of
/// the tower's shift semantics.
pub fn shift_right(a: &BigInt, count: usize) -> Value {
    Value::from_big(a >> count)
}

/// Exact power with a machine-width non-negative exponent.
pub fn pow(base: &BigInt, exponent: u64) -> Value {
    Value::from_big(Pow::pow(base, exponent))
}

/// Double approximation of `base^exponent` for magnitudes where the exact
/// computation is intractable.
pub fn pow_f64(base: &BigInt, exponent: f64) -> f64 {
    to_f64(base).powf(exponent)
}

pub fn compare(a: &BigInt, b: &BigInt) -> Ordering {
    a.cmp(b)
}

/// -1, 0 or +1.
pub fn sign(a: &BigInt) -> i32 {
    match a.sign() {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

/// Two's-complement bit length, excluding the sign: `bits(a)` for
/// non-negative `a`, `bits(-a - 1)` for negative `a`.
pub fn bit_length(a: &BigInt) -> u64 {
    if a.is_negative() {
        (-(a + 1u32)).bits()
    } else {
        a.bits()
    }
}

/// Tests the bit at `index` under two's-complement semantics. `bit(0)` is
/// the parity bit for negative values as well.
pub fn test_bit(a: &BigInt, index: u64) -> bool {
    if index == 0 {
        return a.is_odd();
    }
    if a.is_negative() {
        !(-(a + 1u32)).bit(index)
    } else {
        a.bit(index)
    }
}

/// Nearest double; infinite when the magnitude exceeds the double range.
pub fn to_f64(a: &BigInt) -> f64 {
    a.to_f64().unwrap_or(f64::NAN)
}

/// Exact conversion to a machine word; fails if the value does not fit.
pub fn to_i64_exact(a: &BigInt) -> Option<i64> {
    a.to_i64()
}

/// Radix string conversion; lowercase digits, `-` prefix for negatives.
pub fn to_str_radix(a: &BigInt, radix: u32) -> Result<String, ArithmeticError> {
    if !(2..=36).contains(&radix) {
        return Err(ArithmeticError::InvalidRadix(radix));
    }
    Ok(a.to_str_radix(radix))
}
