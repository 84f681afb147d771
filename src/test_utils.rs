//! Shared test helpers.

#![allow(clippy::expect_used, clippy::panic)]

use num_bigint::BigInt;

use crate::value::Value;

/// Parses a decimal literal wider than any machine word.
pub fn bigint(digits: &str) -> BigInt {
    BigInt::parse_bytes(digits.as_bytes(), 10).expect("valid decimal literal")
}

/// A machine integer in canonical form.
pub fn int(value: i64) -> Value {
    Value::from_i64(value)
}
