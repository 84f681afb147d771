//! Floor division and modulo across the tower.
//!
//! The defining law, for nonzero `b`: `a == b * q + r`, with `q == floor(a/b)`
//! and `r` either zero or carrying the divisor's sign. Machine operands run
//! truncating division and correct the pair when the remainder's sign
//! disagrees with the divisor; the one machine case that cannot be expressed
//! in 64 bits (`i64::MIN / -1`) takes the arbitrary-precision path.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::big;
use crate::error::ArithmeticError;
use crate::value::Value;

/// Floor quotient and remainder in one pass.
pub fn floor_div_mod(a: &Value, b: &Value) -> Result<(Value, Value), ArithmeticError> {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => float_div_mod(a.to_f64(), b.to_f64()),
        _ => match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => floor_div_mod_i64(x, y),
            _ => match (a.as_big(), b.as_big()) {
                (Some(x), Some(y)) => floor_div_mod_big(&x, &y),
                _ => Err(ArithmeticError::NotApplicable),
            },
        },
    }
}

/// Floor quotient alone, with the small-by-wide fast path.
pub fn floor_div(a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
    if let (Some(x), Value::Big(y)) = (a.as_machine(), b) {
        // |b| exceeds any machine word, so the quotient is a proper
        // fraction: 0 when the signs agree, -1 when they do not.
        return Ok(Value::Int32(
            if x == 0 || (x < 0) == (big::sign(y) < 0) {
                0
            } else {
                -1
            },
        ));
    }
    floor_div_mod(a, b).map(|(quotient, _)| quotient)
}

/// Floor remainder alone, with the power-of-two masking fast path.
pub fn floor_mod(a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
    if let (Some(x), Some(y)) = (a.as_machine(), b.as_machine()) {
        if x >= 0 && y > 0 && y & (y - 1) == 0 {
            return Ok(Value::from_i64(x & (y - 1)));
        }
    }
    floor_div_mod(a, b).map(|(_, remainder)| remainder)
}

fn floor_div_mod_i64(a: i64, b: i64) -> Result<(Value, Value), ArithmeticError> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let quotient = match a.checked_div(b) {
        Some(q) => q,
        // i64::MIN / -1 is the lone machine overflow.
        None => return floor_div_mod_big(&BigInt::from(a), &BigInt::from(b)),
    };
    let remainder = a - quotient * b;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        Ok((Value::from_i64(quotient - 1), Value::from_i64(remainder + b)))
    } else {
        Ok((Value::from_i64(quotient), Value::from_i64(remainder)))
    }
}

fn floor_div_mod_big(a: &BigInt, b: &BigInt) -> Result<(Value, Value), ArithmeticError> {
    let (quotient, remainder) = big::div_rem_trunc(a, b)?;
    if !remainder.is_zero() && (remainder < BigInt::zero()) != (b < &BigInt::zero()) {
        Ok((
            Value::from_big(quotient - 1),
            Value::from_big(remainder + b),
        ))
    } else {
        Ok((Value::from_big(quotient), Value::from_big(remainder)))
    }
}

/// Float divmod: the remainder is the IEEE remainder corrected to the
/// divisor's sign, the quotient is the floored ratio narrowed to an integer.
fn float_div_mod(a: f64, b: f64) -> Result<(Value, Value), ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let nearest = (a / b).round_ties_even();
    let mut remainder = a - b * nearest;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        remainder += b;
    }
    if remainder.is_nan() {
        return Err(ArithmeticError::FloatDomain("NaN"));
    }
    let quotient = ((a - remainder) / b).floor();
    match Value::from_f64_trunc(quotient) {
        Some(narrowed) => Ok((narrowed, Value::Float(remainder))),
        None => Err(ArithmeticError::FloatDomain(if quotient.is_nan() {
            "NaN"
        } else {
            "Infinity"
        })),
    }
}

/// The `%` operator on doubles: fmod corrected to the divisor's sign. NaN
/// operands flow through; only a zero divisor is an error.
pub fn float_mod(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let mut remainder = a % b;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        remainder += b;
    }
    Ok(remainder)
}
