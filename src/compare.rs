//! Three-way comparison across every representation pair.
//!
//! Machine/machine and big/big comparisons are exact by construction. A
//! machine word against a finite double compares as doubles, which is exact
//! because every machine word that meets a double here is within the double's
//! integer-exact range or the ordering is decided by magnitude alone. An
//! arbitrary-precision integer against a finite double cannot go through a
//! double conversion without losing the answer, so it compares the truncated
//! double exactly and breaks ties with the fractional part's sign.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::big;
use crate::value::Value;

/// Numeric ordering; `None` only when a float operand is NaN.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y),
        (Value::Big(x), Value::Float(y)) => big_f64(x, *y),
        (Value::Float(x), Value::Big(y)) => big_f64(y, *x).map(Ordering::reverse),
        (Value::Float(x), _) => match b.as_machine() {
            Some(y) => x.partial_cmp(&(y as f64)),
            None => None,
        },
        (_, Value::Float(y)) => match a.as_machine() {
            Some(x) => (x as f64).partial_cmp(y),
            None => None,
        },
        (Value::Big(x), Value::Big(y)) => Some(big::compare(x, y)),
        // A canonical Big is outside the machine range; its sign decides.
        (Value::Big(x), _) => Some(if big::sign(x) > 0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }),
        (_, Value::Big(y)) => Some(if big::sign(y) > 0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }),
        _ => match (a.as_machine(), b.as_machine()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => None,
        },
    }
}

/// Exact ordering of an arbitrary-precision integer against a double.
fn big_f64(a: &BigInt, b: f64) -> Option<Ordering> {
    if b.is_nan() {
        return None;
    }
    if b.is_infinite() {
        return Some(if b > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let truncated = b.trunc();
    let whole = BigInt::from_f64(truncated)?;
    match a.cmp(&whole) {
        Ordering::Equal => {
            // Equal whole parts: the double's fraction breaks the tie.
            let fraction = b - truncated;
            if fraction > 0.0 {
                Some(Ordering::Less)
            } else if fraction < 0.0 {
                Some(Ordering::Greater)
            } else {
                Some(Ordering::Equal)
            }
        }
        decided => Some(decided),
    }
}

/// Numeric equality; false whenever the ordering is undefined.
pub fn eq(a: &Value, b: &Value) -> bool {
    compare(a, b) == Some(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bigint, int};

    #[test]
    fn machine_orderings_are_exact() {
        assert_eq!(compare(&int(1), &int(2)), Some(Ordering::Less));
        assert_eq!(compare(&Value::Int32(5), &Value::Int64(5)), Some(Ordering::Equal));
        assert_eq!(
            compare(&int(i64::MIN), &int(i64::MAX)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn big_sign_decides_against_machine() {
        let wide = Value::from_big(bigint("18446744073709551616"));
        let neg_wide = Value::from_big(bigint("-18446744073709551616"));
        assert_eq!(compare(&wide, &int(i64::MAX)), Some(Ordering::Greater));
        assert_eq!(compare(&neg_wide, &int(i64::MIN)), Some(Ordering::Less));
        assert_eq!(compare(&int(0), &wide), Some(Ordering::Less));
    }

    #[test]
    fn big_against_double_is_exact() {
        // 2^64 and the doubles straddling it.
        let wide = Value::from_big(bigint("18446744073709551616"));
        assert_eq!(
            compare(&wide, &Value::Float(18_446_744_073_709_551_616.0)),
            Some(Ordering::Equal)
        );
        // 2^64 + 1 equals 2^64 after a double conversion; the exact compare
        // must still order it above.
        let wide_plus = Value::from_big(bigint("18446744073709551617"));
        assert_eq!(
            compare(&wide_plus, &Value::Float(18_446_744_073_709_551_616.0)),
            Some(Ordering::Greater)
        );
        // Fractional tiebreak.
        assert_eq!(
            compare(&wide, &Value::Float(18_446_744_073_709_551_616.5)),
            Some(Ordering::Equal),
            "18446744073709551616.5 is not representable; it rounds to 2^64"
        );
    }

    #[test]
    fn fractional_tiebreak() {
        // Doubles wide enough to meet a canonical Big have no fraction; the
        // tiebreak is exercised on the helper directly.
        use num_bigint::BigInt;
        assert_eq!(big_f64(&BigInt::from(3), 3.5), Some(Ordering::Less));
        assert_eq!(big_f64(&BigInt::from(-3), -3.5), Some(Ordering::Greater));
        assert_eq!(big_f64(&BigInt::from(3), 3.0), Some(Ordering::Equal));
    }

    #[test]
    fn infinities_and_nan() {
        let wide = Value::from_big(bigint("18446744073709551616"));
        assert_eq!(
            compare(&wide, &Value::Float(f64::INFINITY)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare(&wide, &Value::Float(f64::NEG_INFINITY)),
            Some(Ordering::Greater)
        );
        assert_eq!(compare(&wide, &Value::Float(f64::NAN)), None);
        assert_eq!(compare(&Value::Float(f64::NAN), &int(0)), None);
        assert_eq!(
            compare(&Value::Float(f64::NAN), &Value::Float(f64::NAN)),
            None
        );
    }

    #[test]
    fn machine_against_double() {
        assert_eq!(compare(&int(3), &Value::Float(3.5)), Some(Ordering::Less));
        assert_eq!(compare(&Value::Float(3.0), &int(3)), Some(Ordering::Equal));
        assert_eq!(compare(&int(-1), &Value::Float(-1.5)), Some(Ordering::Greater));
    }

    #[test]
    fn equality_is_ordering_equal() {
        assert!(eq(&int(7), &Value::Float(7.0)));
        assert!(!eq(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
        assert!(!eq(&int(7), &Value::from_big(bigint("18446744073709551616"))));
    }
}
