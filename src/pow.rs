//! Exponentiation across the tower.
//!
//! Machine bases run binary exponentiation through checked multiplies, so
//! intermediates promote transparently; once anything overflows, the rest of
//! the power is finished exactly in arbitrary precision. Magnitudes past the
//! configured digit limit fall back to a double approximation, flagged on the
//! outcome so the dispatch layer can surface the advisory.

use num_bigint::BigInt;

use crate::big;
use crate::error::ArithmeticError;
use crate::machine;
use crate::value::Value;

/// A power result and whether it is exact. `exact` is false only on the
/// huge-magnitude fallbacks, where the value is a double approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct PowOutcome {
    pub value: Value,
    pub exact: bool,
}

impl PowOutcome {
    fn exact(value: Value) -> Self {
        Self { value, exact: true }
    }

    fn approximate(value: Value) -> Self {
        Self {
            value,
            exact: false,
        }
    }
}

/// `base ^ exponent`. Negative integer exponents and complex-valued cases
/// are `NotApplicable`: the caller's coercion layer owns them.
pub fn pow(
    base: &Value,
    exponent: &Value,
    digit_limit: u64,
) -> Result<PowOutcome, ArithmeticError> {
    if let Value::Float(_) = base {
        return float_base(base.to_f64(), exponent);
    }
    match exponent {
        Value::Float(e) => {
            if sign_of(base) < 0 {
                // A negative base under a fractional power leaves the reals.
                return Err(ArithmeticError::NotApplicable);
            }
            Ok(PowOutcome::exact(Value::Float(base.to_f64().powf(*e))))
        }
        Value::Big(e) => big_exponent(base, e),
        _ => match exponent.as_machine() {
            Some(e) if e < 0 => Err(ArithmeticError::NotApplicable),
            Some(e) => machine_exponent(base, e as u64, digit_limit),
            None => Err(ArithmeticError::NotApplicable),
        },
    }
}

fn float_base(base: f64, exponent: &Value) -> Result<PowOutcome, ArithmeticError> {
    let e = exponent.to_f64();
    if base < 0.0 && e.fract() != 0.0 {
        return Err(ArithmeticError::NotApplicable);
    }
    Ok(PowOutcome::exact(Value::Float(base.powf(e))))
}

/// An exponent too wide for a machine word. The 0/±1 bases are decided by
/// value and parity before the sign of the exponent is even considered;
/// everything else saturates to positive infinity with the advisory, the
/// sign of the base notwithstanding.
fn big_exponent(base: &Value, exponent: &BigInt) -> Result<PowOutcome, ArithmeticError> {
    match base.as_machine() {
        Some(0) => return Ok(PowOutcome::exact(Value::Int32(0))),
        Some(1) => return Ok(PowOutcome::exact(Value::Int32(1))),
        Some(-1) => {
            let odd = big::test_bit(exponent, 0);
            return Ok(PowOutcome::exact(Value::Int32(if odd { -1 } else { 1 })));
        }
        _ => {}
    }
    if big::sign(exponent) < 0 {
        return Err(ArithmeticError::NotApplicable);
    }
    Ok(PowOutcome::approximate(Value::Float(f64::INFINITY)))
}

fn machine_exponent(
    base: &Value,
    exponent: u64,
    digit_limit: u64,
) -> Result<PowOutcome, ArithmeticError> {
    if let Value::Big(wide) = base {
        return Ok(big_base(wide, exponent, digit_limit));
    }
    let b = match base.as_machine() {
        Some(b) => b,
        None => return Err(ArithmeticError::NotApplicable),
    };
    if exponent == 0 {
        return Ok(PowOutcome::exact(Value::Int32(1)));
    }
    let value = match b {
        0 => Value::Int32(0),
        1 => Value::Int32(1),
        -1 => Value::Int32(if exponent & 1 == 1 { -1 } else { 1 }),
        2 if exponent <= 62 => Value::from_i64(1_i64 << exponent),
        _ => return Ok(pow_machine(b, exponent, digit_limit)),
    };
    Ok(PowOutcome::exact(value))
}

/// Magnitude heuristic: when the result would run past the digit limit,
/// approximate in doubles instead of allocating it.
fn big_base(base: &BigInt, exponent: u64, digit_limit: u64) -> PowOutcome {
    let bits = big::bit_length(base);
    let too_big = bits > digit_limit
        || bits
            .checked_mul(exponent)
            .map_or(true, |product| product > digit_limit);
    if too_big {
        PowOutcome::approximate(Value::Float(big::pow_f64(base, exponent as f64)))
    } else {
        PowOutcome::exact(big::pow(base, exponent))
    }
}

/// Square-and-multiply over checked machine arithmetic. The first overflow
/// hands the loop state to arbitrary precision, where the remaining power
/// is `accumulator * base ^ exponent`.
fn pow_machine(mut base: i64, mut exponent: u64, digit_limit: u64) -> PowOutcome {
    let mut accumulator = 1_i64;
    while exponent > 0 {
        if exponent & 1 == 0 {
            match base.checked_mul(base) {
                Some(squared) => {
                    base = squared;
                    exponent >>= 1;
                }
                None => return finish_wide(accumulator, base, exponent, digit_limit),
            }
        } else {
            match accumulator.checked_mul(base) {
                Some(grown) => {
                    accumulator = grown;
                    exponent -= 1;
                }
                None => return finish_wide(accumulator, base, exponent, digit_limit),
            }
        }
    }
    PowOutcome::exact(Value::from_i64(accumulator))
}

/// The overflowed loop state re-enters through the wide-base guard, so the
/// digit limit still bounds the remaining work and the double fallback
/// carries the accumulator along.
fn finish_wide(accumulator: i64, base: i64, exponent: u64, digit_limit: u64) -> PowOutcome {
    let rest = big_base(&BigInt::from(base), exponent, digit_limit);
    PowOutcome {
        value: machine::mul(&Value::from_i64(accumulator), &rest.value),
        exact: rest.exact,
    }
}

fn sign_of(value: &Value) -> i32 {
    match value {
        Value::Big(wide) => big::sign(wide),
        _ => match value.as_machine() {
            Some(v) => v.signum() as i32,
            None => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bigint, int};

    const LIMIT: u64 = 32 * 1024 * 1024;

    fn p(base: Value, exponent: Value) -> PowOutcome {
        match pow(&base, &exponent, LIMIT) {
            Ok(outcome) => outcome,
            Err(e) => panic!("pow failed: {e}"),
        }
    }

    #[test]
    fn machine_powers_stay_machine() {
        assert_eq!(p(int(3), int(4)).value, Value::Int32(81));
        assert_eq!(p(int(-3), int(3)).value, Value::Int32(-27));
        assert_eq!(p(int(10), int(18)).value, Value::Int64(1_000_000_000_000_000_000));
        assert_eq!(p(int(7), int(0)).value, Value::Int32(1));
        assert_eq!(p(int(0), int(0)).value, Value::Int32(1));
        assert_eq!(p(int(0), int(5)).value, Value::Int32(0));
        assert_eq!(p(int(-1), int(9)).value, Value::Int32(-1));
        assert_eq!(p(int(-1), int(8)).value, Value::Int32(1));
    }

    #[test]
    fn base_two_uses_the_shift_path() {
        assert_eq!(p(int(2), int(62)).value, Value::Int64(1_i64 << 62));
        assert_eq!(
            p(int(2), int(64)).value,
            Value::from_big(bigint("18446744073709551616"))
        );
    }

    #[test]
    fn overflow_hands_off_to_arbitrary_precision() {
        let outcome = p(int(10), int(30));
        assert!(outcome.exact);
        assert_eq!(
            outcome.value,
            Value::from_big(bigint("1000000000000000000000000000000"))
        );
        // Odd exponent exercises the accumulator overflow branch.
        let outcome = p(int(3), int(41));
        assert_eq!(outcome.value, Value::from_big(bigint("36472996377170786403")));
    }

    #[test]
    fn machine_base_respects_the_digit_limit() {
        // 3^1000 promotes mid-loop; with a 64-bit digit limit the remaining
        // power must fall back to a double approximation, not an exact
        // 1585-bit allocation.
        let outcome = match pow(&int(3), &int(1000), 64) {
            Ok(outcome) => outcome,
            Err(e) => panic!("{e}"),
        };
        assert!(!outcome.exact);
        match outcome.value {
            Value::Float(approx) => assert!(approx.is_infinite() && approx > 0.0),
            other => panic!("expected a double approximation, got {other}"),
        }
        // The same shape under the default limit stays exact.
        let exact = p(int(3), int(1000));
        assert!(exact.exact);
        assert!(matches!(exact.value, Value::Big(_)));
    }

    #[test]
    fn negative_integer_exponent_is_not_ours() {
        assert_eq!(
            pow(&int(2), &int(-3), LIMIT),
            Err(ArithmeticError::NotApplicable)
        );
    }

    #[test]
    fn wide_base_heuristic() {
        let wide = Value::from_big(bigint("18446744073709551616"));
        let outcome = p(wide.clone(), int(2));
        assert!(outcome.exact);
        assert_eq!(
            outcome.value,
            Value::from_big(bigint("340282366920938463463374607431768211456"))
        );
        // 65 bits * a huge exponent trips the limit.
        let outcome = p(wide, Value::from_i64(i64::MAX));
        assert!(!outcome.exact);
        assert_eq!(outcome.value, Value::Float(f64::INFINITY));
    }

    #[test]
    fn wide_exponent_saturates() {
        let huge = Value::from_big(bigint("18446744073709551616"));
        let outcome = p(int(3), huge.clone());
        assert!(!outcome.exact);
        assert_eq!(outcome.value, Value::Float(f64::INFINITY));
        // Positive infinity even for a negative odd base.
        let outcome = p(int(-3), huge.clone());
        assert_eq!(outcome.value, Value::Float(f64::INFINITY));
        // The 0/±1 bases are decided before the exponent's sign is read.
        let neg_huge = Value::from_big(bigint("-18446744073709551616"));
        assert_eq!(p(int(1), neg_huge.clone()).value, Value::Int32(1));
        assert_eq!(p(int(-1), huge).value, Value::Int32(1));
        assert_eq!(p(int(-1), Value::from_big(bigint("18446744073709551617"))).value, Value::Int32(-1));
        assert_eq!(p(int(0), neg_huge.clone()).value, Value::Int32(0));
        assert_eq!(
            pow(&int(3), &neg_huge, LIMIT),
            Err(ArithmeticError::NotApplicable)
        );
    }

    #[test]
    fn float_operands() {
        assert_eq!(p(Value::Float(2.0), int(10)).value, Value::Float(1024.0));
        assert_eq!(p(int(2), Value::Float(0.5)).value, Value::Float(2.0_f64.sqrt()));
        assert_eq!(
            p(Value::Float(-2.0), Value::Float(2.0)).value,
            Value::Float(4.0)
        );
        assert_eq!(
            pow(&int(-2), &Value::Float(0.5), LIMIT),
            Err(ArithmeticError::NotApplicable)
        );
        assert_eq!(
            pow(&Value::Float(-2.0), &Value::Float(0.5), LIMIT),
            Err(ArithmeticError::NotApplicable)
        );
    }
}
