//! Overflow-checked machine arithmetic and the promotion dispatch.
//!
//! The fast path runs on machine words with checked arithmetic; a 32-bit
//! overflow widens to 64 bits and a 64-bit overflow widens to arbitrary
//! precision through the adapter, which canonicalizes the result back down.
//! The dispatchers here accept any pair of [`Value`]s so the higher layers
//! never re-implement the representation ladder; float operands fall through
//! to double arithmetic.

use num_bigint::BigInt;

use crate::big;
use crate::error::ArithmeticError;
use crate::value::Value;

/// Checked 64-bit add, widening to arbitrary precision on overflow.
pub fn add_i64(a: i64, b: i64) -> Value {
    match a.checked_add(b) {
        Some(sum) => Value::from_i64(sum),
        None => Value::from_big(BigInt::from(a) + b),
    }
}

/// Checked 64-bit subtract, widening to arbitrary precision on overflow.
pub fn sub_i64(a: i64, b: i64) -> Value {
    match a.checked_sub(b) {
        Some(diff) => Value::from_i64(diff),
        None => Value::from_big(BigInt::from(a) - b),
    }
}

/// Checked 64-bit multiply, widening to arbitrary precision on overflow.
pub fn mul_i64(a: i64, b: i64) -> Value {
    match a.checked_mul(b) {
        Some(product) => Value::from_i64(product),
        None => Value::from_big(BigInt::from(a) * b),
    }
}

/// Checked 64-bit negate; only `i64::MIN` widens.
pub fn neg_i64(a: i64) -> Value {
    match a.checked_neg() {
        Some(negated) => Value::from_i64(negated),
        None => Value::from_big(-BigInt::from(a)),
    }
}

pub fn add(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => Value::Float(a.to_f64() + b.to_f64()),
        _ => match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => add_i64(x, y),
            _ => big_binary(a, b, big::add),
        },
    }
}

pub fn sub(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => Value::Float(a.to_f64() - b.to_f64()),
        _ => match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => sub_i64(x, y),
            _ => big_binary(a, b, big::sub),
        },
    }
}

pub fn mul(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => Value::Float(a.to_f64() * b.to_f64()),
        _ => match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => mul_i64(x, y),
            _ => big_binary(a, b, big::mul),
        },
    }
}

pub fn neg(a: &Value) -> Value {
    match a {
        Value::Int32(v) => match v.checked_neg() {
            Some(negated) => Value::Int32(negated),
            None => Value::Int64(-i64::from(*v)),
        },
        Value::Int64(v) => neg_i64(*v),
        Value::Big(wide) => big::neg(wide),
        Value::Float(f) => Value::Float(-f),
    }
}

/// Both operands are integers and at least one is `Big`.
fn big_binary(a: &Value, b: &Value, op: fn(&BigInt, &BigInt) -> Value) -> Value {
    match (a.as_big(), b.as_big()) {
        (Some(x), Some(y)) => op(&x, &y),
        // Unreachable under the float guard in the callers; keep a harmless
        // result rather than a panic path.
        _ => Value::Float(f64::NAN),
    }
}

/// Whether `value << count` still fits a 64-bit word. Conservative for
/// negative values (uses the complement's leading zeros).
fn can_shift_into_i64(value: i64, count: u64) -> bool {
    let magnitude = if value < 0 { !value } else { value };
    u64::from(magnitude.leading_zeros()) > count
}

/// Left shift with the configured ceiling; negative counts shift right.
pub fn shl(value: &Value, count: &Value, limit: u64) -> Result<Value, ArithmeticError> {
    // The receiver's applicability decides before any count is examined.
    if matches!(value, Value::Float(_)) {
        return Err(ArithmeticError::NotApplicable);
    }
    let n = match count {
        Value::Float(_) => return Err(ArithmeticError::NotApplicable),
        Value::Big(wide) => {
            // A canonical Big count is beyond any usable width: a positive
            // count overflows the ceiling, a negative one collapses the
            // right shift it stands for.
            return if big::sign(wide) > 0 {
                Err(ArithmeticError::ShiftRangeTooLarge)
            } else {
                shr_collapsed(value)
            };
        }
        _ => match count.as_machine() {
            Some(n) => n,
            None => return Err(ArithmeticError::NotApplicable),
        },
    };
    if n < 0 {
        return shr_unsigned(value, n.unsigned_abs(), limit);
    }
    shl_unsigned(value, n.unsigned_abs(), limit)
}

/// Right shift with the configured ceiling; negative counts shift left.
pub fn shr(value: &Value, count: &Value, limit: u64) -> Result<Value, ArithmeticError> {
    if matches!(value, Value::Float(_)) {
        return Err(ArithmeticError::NotApplicable);
    }
    let n = match count {
        Value::Float(_) => return Err(ArithmeticError::NotApplicable),
        Value::Big(wide) => {
            return if big::sign(wide) > 0 {
                shr_collapsed(value)
            } else {
                Err(ArithmeticError::ShiftRangeTooLarge)
            };
        }
        _ => match count.as_machine() {
            Some(n) => n,
            None => return Err(ArithmeticError::NotApplicable),
        },
    };
    if n < 0 {
        return shl_unsigned(value, n.unsigned_abs(), limit);
    }
    shr_unsigned(value, n.unsigned_abs(), limit)
}

fn shl_unsigned(value: &Value, count: u64, limit: u64) -> Result<Value, ArithmeticError> {
    if count > limit {
        return Err(ArithmeticError::ShiftRangeTooLarge);
    }
    match value {
        Value::Float(_) => Err(ArithmeticError::NotApplicable),
        Value::Big(wide) => Ok(big::shift_left(wide, count as usize)),
        _ => match value.as_machine() {
            Some(v) if can_shift_into_i64(v, count) => Ok(Value::from_i64(v << count)),
            Some(v) => Ok(big::shift_left(&BigInt::from(v), count as usize)),
            None => Err(ArithmeticError::NotApplicable),
        },
    }
}

fn shr_unsigned(value: &Value, count: u64, limit: u64) -> Result<Value, ArithmeticError> {
    if count > limit {
        return Err(ArithmeticError::ShiftRangeTooLarge);
    }
    match value {
        Value::Float(_) => Err(ArithmeticError::NotApplicable),
        Value::Big(wide) => Ok(big::shift_right(wide, count as usize)),
        _ => match value.as_machine() {
            Some(v) if count >= 63 => Ok(Value::Int32(if v < 0 { -1 } else { 0 })),
            Some(v) => Ok(Value::from_i64(v >> count)),
            None => Err(ArithmeticError::NotApplicable),
        },
    }
}

/// Right shift by a count wider than any value: every integer collapses to
/// its sign word.
fn shr_collapsed(value: &Value) -> Result<Value, ArithmeticError> {
    match value {
        Value::Float(_) => Err(ArithmeticError::NotApplicable),
        Value::Big(wide) => Ok(Value::Int32(if big::sign(wide) < 0 { -1 } else { 0 })),
        _ => match value.as_machine() {
            Some(v) => Ok(Value::Int32(if v < 0 { -1 } else { 0 })),
            None => Err(ArithmeticError::NotApplicable),
        },
    }
}
