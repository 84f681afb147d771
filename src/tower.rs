//! The external dispatch surface.
//!
//! A [`Tower`] holds the configured limits and routes every operation to the
//! narrowest representation that can express it, promoting transparently and
//! demoting results through the canonicalizer. All methods are pure and take
//! `&self`; a `Tower` can be shared freely across threads.

use std::cmp::Ordering;

use crate::big;
use crate::compare;
use crate::divmod;
use crate::error::ArithmeticError;
use crate::machine;
use crate::pow::{self, PowOutcome};
use crate::radix;
use crate::round::{self, RoundingMode};
use crate::value::Value;

/// Limits for the unbounded-cost paths. Explicit configuration, no
/// process-wide tunables.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Bit-size threshold past which exponentiation falls back to a double
    /// approximation.
    pub pow_digit_limit: u64,
    /// Largest accepted shift magnitude; beyond it shifts fail rather than
    /// allocate.
    pub shift_limit: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pow_digit_limit: 32 * 1024 * 1024,
            shift_limit: 1 << 32,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Tower {
    config: Config,
}

impl Tower {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn neg(&self, a: &Value) -> Value {
        machine::neg(a)
    }

    pub fn abs(&self, a: &Value) -> Value {
        match a {
            Value::Big(wide) => big::abs(wide),
            Value::Float(f) => Value::Float(f.abs()),
            _ => match a.as_machine() {
                Some(v) if v < 0 => machine::neg_i64(v),
                Some(v) => Value::from_i64(v),
                None => a.clone(),
            },
        }
    }

    /// Bitwise complement, `-a - 1`. Integers only.
    pub fn complement(&self, a: &Value) -> Result<Value, ArithmeticError> {
        match a {
            Value::Big(wide) => Ok(big::not(wide)),
            Value::Float(_) => Err(ArithmeticError::NotApplicable),
            _ => match a.as_machine() {
                Some(v) => Ok(Value::from_i64(!v)),
                None => Err(ArithmeticError::NotApplicable),
            },
        }
    }

    /// Bits needed for the two's-complement magnitude, sign excluded.
    pub fn bit_length(&self, a: &Value) -> Result<Value, ArithmeticError> {
        match a {
            Value::Big(wide) => Ok(Value::from_i64(big::bit_length(wide) as i64)),
            Value::Float(_) => Err(ArithmeticError::NotApplicable),
            _ => match a.as_machine() {
                Some(v) => {
                    let magnitude = if v < 0 { !v } else { v };
                    Ok(Value::Int32(64 - magnitude.leading_zeros() as i32))
                }
                None => Err(ArithmeticError::NotApplicable),
            },
        }
    }

    pub fn add(&self, a: &Value, b: &Value) -> Value {
        machine::add(a, b)
    }

    pub fn sub(&self, a: &Value, b: &Value) -> Value {
        machine::sub(a, b)
    }

    pub fn mul(&self, a: &Value, b: &Value) -> Value {
        machine::mul(a, b)
    }

    /// `/`: floor division between integers, true division once a float is
    /// involved (where dividing by zero is an infinity, not an error).
    pub fn div(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        if a.is_integer() && b.is_integer() {
            divmod::floor_div(a, b)
        } else {
            Ok(Value::Float(a.to_f64() / b.to_f64()))
        }
    }

    /// Always-integer division: a float quotient is floored and narrowed,
    /// and a zero float divisor is an error like the integer case.
    pub fn idiv(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        if a.is_integer() && b.is_integer() {
            return divmod::floor_div(a, b);
        }
        let divisor = b.to_f64();
        if divisor == 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        let quotient = (a.to_f64() / divisor).floor();
        Value::from_f64_trunc(quotient).ok_or(ArithmeticError::FloatDomain(
            if quotient.is_nan() { "NaN" } else { "Infinity" },
        ))
    }

    pub fn modulo(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        if a.is_integer() && b.is_integer() {
            divmod::floor_mod(a, b)
        } else {
            divmod::float_mod(a.to_f64(), b.to_f64()).map(Value::Float)
        }
    }

    pub fn divmod(&self, a: &Value, b: &Value) -> Result<(Value, Value), ArithmeticError> {
        divmod::floor_div_mod(a, b)
    }

    pub fn pow(&self, a: &Value, b: &Value) -> Result<PowOutcome, ArithmeticError> {
        let outcome = pow::pow(a, b, self.config.pow_digit_limit)?;
        if !outcome.exact {
            tracing::warn!("in a**b, b may be too big");
        }
        Ok(outcome)
    }

    pub fn bit_and(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        self.bitwise(a, b, |x, y| x & y, big::bitand)
    }

    pub fn bit_or(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        self.bitwise(a, b, |x, y| x | y, big::bitor)
    }

    pub fn bit_xor(&self, a: &Value, b: &Value) -> Result<Value, ArithmeticError> {
        self.bitwise(a, b, |x, y| x ^ y, big::bitxor)
    }

    fn bitwise(
        &self,
        a: &Value,
        b: &Value,
        narrow: fn(i64, i64) -> i64,
        wide: fn(&num_bigint::BigInt, &num_bigint::BigInt) -> Value,
    ) -> Result<Value, ArithmeticError> {
        if !a.is_integer() || !b.is_integer() {
            return Err(ArithmeticError::NotApplicable);
        }
        match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => Ok(Value::from_i64(narrow(x, y))),
            _ => match (a.as_big(), b.as_big()) {
                (Some(x), Some(y)) => Ok(wide(&x, &y)),
                _ => Err(ArithmeticError::NotApplicable),
            },
        }
    }

    pub fn shl(&self, a: &Value, count: &Value) -> Result<Value, ArithmeticError> {
        machine::shl(a, count, self.config.shift_limit)
    }

    pub fn shr(&self, a: &Value, count: &Value) -> Result<Value, ArithmeticError> {
        machine::shr(a, count, self.config.shift_limit)
    }

    pub fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        compare::compare(a, b)
    }

    pub fn eq(&self, a: &Value, b: &Value) -> bool {
        compare::eq(a, b)
    }

    pub fn lt(&self, a: &Value, b: &Value) -> Result<bool, ArithmeticError> {
        self.ordered(a, b).map(|ord| ord == Ordering::Less)
    }

    pub fn le(&self, a: &Value, b: &Value) -> Result<bool, ArithmeticError> {
        self.ordered(a, b).map(|ord| ord != Ordering::Greater)
    }

    pub fn gt(&self, a: &Value, b: &Value) -> Result<bool, ArithmeticError> {
        self.ordered(a, b).map(|ord| ord == Ordering::Greater)
    }

    pub fn ge(&self, a: &Value, b: &Value) -> Result<bool, ArithmeticError> {
        self.ordered(a, b).map(|ord| ord != Ordering::Less)
    }

    fn ordered(&self, a: &Value, b: &Value) -> Result<Ordering, ArithmeticError> {
        compare::compare(a, b).ok_or(ArithmeticError::NotApplicable)
    }

    pub fn to_f(&self, a: &Value) -> f64 {
        a.to_f64()
    }

    /// Decimal by default, any radix in 2..=36 for integers.
    pub fn to_s(&self, a: &Value, radix: Option<u32>) -> Result<String, ArithmeticError> {
        match radix {
            None => Ok(a.to_string()),
            Some(r) => radix::int_to_string(a, r),
        }
    }

    /// Rounds in `mode`; `ndigits` of `None` means to the integer. Integer
    /// receivers only move for negative digit counts.
    pub fn round(
        &self,
        a: &Value,
        ndigits: Option<i32>,
        mode: RoundingMode,
    ) -> Result<Value, ArithmeticError> {
        match a {
            Value::Float(x) => match ndigits {
                None => round::round_to_int(*x, mode),
                Some(n) => round::round_digits(*x, n, mode),
            },
            _ => round::int_round_digits(a, ndigits.unwrap_or(0), mode),
        }
    }

    pub fn floor(&self, a: &Value, ndigits: Option<i32>) -> Result<Value, ArithmeticError> {
        self.round(a, ndigits, RoundingMode::Floor)
    }

    pub fn ceil(&self, a: &Value, ndigits: Option<i32>) -> Result<Value, ArithmeticError> {
        self.round(a, ndigits, RoundingMode::Ceiling)
    }

    pub fn truncate(&self, a: &Value, ndigits: Option<i32>) -> Result<Value, ArithmeticError> {
        match a {
            Value::Float(x) => match ndigits {
                None => round::truncate_to_int(*x),
                Some(n) => round::truncate_digits(*x, n),
            },
            _ => round::int_truncate_digits(a, ndigits.unwrap_or(0)),
        }
    }
}
