//! Float rounding in four modes, with decimal-place scaling, plus the
//! integer decimal rounding that negative digit counts reduce to.
//!
//! Positive digit counts scale by a power of ten, round in the requested
//! mode, and rescale. The scaled value can land within one ULP of a tie or
//! an integer boundary, so each mode probes the adjacent representable
//! double against the unscaled input and keeps the strictly closer result.
//! frexp-based shortcuts skip the scaling when the digit count is beyond
//! the double's precision (return the input) or beneath its magnitude
//! (collapse to zero or the sign-appropriate unit).

use num_bigint::BigInt;

use crate::compare;
use crate::divmod;
use crate::error::ArithmeticError;
use crate::machine;
use crate::value::Value;

/// How to resolve a value sitting between two representable results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Nearest, ties away from zero.
    HalfUp,
    /// Nearest, ties to even.
    HalfEven,
}

/// Rounds a double to an integer value. NaN and infinities have no integer
/// reading and are domain errors.
pub fn round_to_int(x: f64, mode: RoundingMode) -> Result<Value, ArithmeticError> {
    let rounded = match mode {
        RoundingMode::Ceiling => reject_non_finite(x)?.ceil(),
        RoundingMode::Floor => reject_non_finite(x)?.floor(),
        RoundingMode::HalfUp => reject_non_finite(x)?.round(),
        RoundingMode::HalfEven => reject_non_finite(x)?.round_ties_even(),
    };
    narrow(rounded)
}

/// Rounds a double toward zero to an integer value.
pub fn truncate_to_int(x: f64) -> Result<Value, ArithmeticError> {
    narrow(reject_non_finite(x)?.trunc())
}

/// Rounds a double at a decimal position: a float result for positive
/// `ndigits`, an integer otherwise.
pub fn round_digits(x: f64, ndigits: i32, mode: RoundingMode) -> Result<Value, ArithmeticError> {
    if ndigits == 0 {
        return round_to_int(x, mode);
    }
    if ndigits < 0 {
        // Reduce to an integer first, in the mode's own direction for the
        // directed modes and toward zero for the nearest modes.
        let whole = match mode {
            RoundingMode::Ceiling | RoundingMode::Floor => round_to_int(x, mode)?,
            RoundingMode::HalfUp | RoundingMode::HalfEven => truncate_to_int(x)?,
        };
        return int_round_digits(&whole, ndigits, mode);
    }
    if !x.is_finite() || x == 0.0 {
        return Ok(Value::Float(if x == 0.0 { 0.0 } else { x }));
    }
    let binexp = frexp_exp(x);
    if round_overflow(ndigits, binexp) {
        return Ok(Value::Float(x));
    }
    if round_underflow(ndigits, binexp) {
        // The directed modes still reach the sign-appropriate unit through
        // the scaled path; only the side rounding toward zero collapses.
        let collapses = match mode {
            RoundingMode::Ceiling => x < 0.0,
            RoundingMode::Floor => x > 0.0,
            RoundingMode::HalfUp | RoundingMode::HalfEven => true,
        };
        if collapses {
            return Ok(Value::Float(0.0));
        }
    }
    let scale = 10_f64.powi(ndigits);
    let scaled = match mode {
        RoundingMode::Ceiling => scaled_ceil(x, scale),
        RoundingMode::Floor => scaled_floor(x, scale),
        RoundingMode::HalfUp => scaled_half_up(x, scale),
        RoundingMode::HalfEven => scaled_half_even(x, scale),
    };
    Ok(Value::Float(scaled / scale))
}

/// `truncate` at a decimal position: toward zero, so the floor path for
/// positive inputs and the ceiling path for negative ones.
pub fn truncate_digits(x: f64, ndigits: i32) -> Result<Value, ArithmeticError> {
    if ndigits == 0 {
        return truncate_to_int(x);
    }
    let mode = if x > 0.0 {
        RoundingMode::Floor
    } else {
        RoundingMode::Ceiling
    };
    round_digits(x, ndigits, mode)
}

/// Rounds an integer to a multiple of `10^-ndigits`. Non-negative digit
/// counts leave an integer unchanged.
pub fn int_round_digits(
    value: &Value,
    ndigits: i32,
    mode: RoundingMode,
) -> Result<Value, ArithmeticError> {
    if !value.is_integer() {
        return Err(ArithmeticError::NotApplicable);
    }
    if ndigits >= 0 {
        return Ok(value.clone());
    }
    let step = pow10(ndigits.unsigned_abs());
    match mode {
        RoundingMode::Floor => {
            let quotient = divmod::floor_div(value, &step)?;
            Ok(machine::mul(&quotient, &step))
        }
        RoundingMode::Ceiling => {
            let (quotient, remainder) = divmod::floor_div_mod(value, &step)?;
            if compare::eq(&remainder, &Value::Int32(0)) {
                Ok(value.clone())
            } else {
                let up = machine::add(&quotient, &Value::Int32(1));
                Ok(machine::mul(&up, &step))
            }
        }
        RoundingMode::HalfUp | RoundingMode::HalfEven => {
            round_magnitude(value, &step, ndigits.unsigned_abs(), mode)
        }
    }
}

/// Truncates an integer to a multiple of `10^-ndigits` (toward zero).
pub fn int_truncate_digits(value: &Value, ndigits: i32) -> Result<Value, ArithmeticError> {
    if !value.is_integer() {
        return Err(ArithmeticError::NotApplicable);
    }
    if ndigits >= 0 {
        return Ok(value.clone());
    }
    let magnitude = ndigits.unsigned_abs();
    if rounds_to_nothing(value, magnitude) {
        return Ok(Value::Int32(0));
    }
    let step = pow10(magnitude);
    let negative = is_negative(value);
    let x = if negative { machine::neg(value) } else { value.clone() };
    let quotient = divmod::floor_div(&x, &step)?;
    let truncated = machine::mul(&quotient, &step);
    Ok(if negative {
        machine::neg(&truncated)
    } else {
        truncated
    })
}

/// The nearest modes work on the magnitude and restore the sign, so a tie
/// always rounds away from (or, for half-even, relative to) zero the same
/// way on both sides.
fn round_magnitude(
    value: &Value,
    step: &Value,
    magnitude: u32,
    mode: RoundingMode,
) -> Result<Value, ArithmeticError> {
    if rounds_to_nothing(value, magnitude) {
        return Ok(Value::Int32(0));
    }
    let negative = is_negative(value);
    let x = if negative { machine::neg(value) } else { value.clone() };
    let half = divmod::floor_div(step, &Value::Int32(2))?;
    let mut quotient = divmod::floor_div(&machine::add(&x, &half), step)?;
    if mode == RoundingMode::HalfEven {
        // Exactly on the tie: clear the low bit.
        let overshoot = machine::sub(&machine::mul(&quotient, step), &x);
        if compare::eq(&overshoot, &half) {
            let parity = divmod::floor_mod(&quotient, &Value::Int32(2))?;
            quotient = machine::sub(&quotient, &parity);
        }
    }
    let rounded = machine::mul(&quotient, step);
    Ok(if negative {
        machine::neg(&rounded)
    } else {
        rounded
    })
}

/// Magnitude shortcut: when `10^magnitude / 2` exceeds the value's byte
/// size can possibly hold, the result is zero without computing the power.
/// `log_256(10) > 0.415241` and `log_256(2) = 0.125`.
fn rounds_to_nothing(value: &Value, magnitude: u32) -> bool {
    match value.size_bytes() {
        Some(size) => 0.415241 * f64::from(magnitude) - 0.125 > size as f64,
        None => false,
    }
}

fn is_negative(value: &Value) -> bool {
    compare::compare(value, &Value::Int32(0)) == Some(std::cmp::Ordering::Less)
}

fn pow10(exponent: u32) -> Value {
    match 10_i64.checked_pow(exponent) {
        Some(power) => Value::from_i64(power),
        None => Value::from_big(num_traits::Pow::pow(&BigInt::from(10), exponent)),
    }
}

fn reject_non_finite(x: f64) -> Result<f64, ArithmeticError> {
    if x.is_nan() {
        Err(ArithmeticError::FloatDomain("NaN"))
    } else if x.is_infinite() {
        Err(ArithmeticError::FloatDomain("Infinity"))
    } else {
        Ok(x)
    }
}

fn narrow(rounded: f64) -> Result<Value, ArithmeticError> {
    Value::from_f64_trunc(rounded).ok_or(ArithmeticError::FloatDomain("Infinity"))
}

/// The binary exponent frexp would report: `x == m * 2^exp`, `0.5 <= |m| < 1`.
fn frexp_exp(x: f64) -> i32 {
    let field = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if field == 0 {
        // Subnormal: normalize by 2^64 first.
        let scaled = ((x * 18_446_744_073_709_551_616.0).to_bits() >> 52) & 0x7ff;
        scaled as i32 - 1022 - 64
    } else {
        field - 1022
    }
}

/// The digit count asks for more precision than the double carries; the
/// input is already its own answer.
fn round_overflow(ndigits: i32, binexp: i32) -> bool {
    ndigits >= 17 - if binexp > 0 { binexp / 4 } else { binexp / 3 - 1 }
}

/// The digit count is coarser than the double's magnitude.
fn round_underflow(ndigits: i32, binexp: i32) -> bool {
    ndigits < -(if binexp > 0 { binexp / 3 + 1 } else { binexp / 4 })
}

fn scaled_half_up(x: f64, scale: f64) -> f64 {
    let mut f = (x * scale).round();
    if x > 0.0 {
        if (f + 0.5) / scale <= x {
            f += 1.0;
        }
    } else if (f - 0.5) / scale >= x {
        f -= 1.0;
    }
    f
}

fn scaled_half_even(x: f64, scale: f64) -> f64 {
    let xs = x * scale;
    if x > 0.0 {
        let f = xs.floor();
        let mut d = xs - f;
        if d > 0.5 {
            d = 1.0;
        } else if d == 0.5 || (f + 0.5) / scale <= x {
            d = f % 2.0;
        } else {
            d = 0.0;
        }
        f + d
    } else {
        let f = xs.ceil();
        let mut d = f - xs;
        if d > 0.5 {
            d = 1.0;
        } else if d == 0.5 || (f - 0.5) / scale >= x {
            d = (-f) % 2.0;
        } else {
            d = 0.0;
        }
        f - d
    }
}

fn scaled_ceil(x: f64, scale: f64) -> f64 {
    let mut d = (x * scale).ceil();
    if (d - 1.0) / scale >= x {
        d -= 1.0;
    }
    d
}

fn scaled_floor(x: f64, scale: f64) -> f64 {
    let mut d = (x * scale).floor();
    if (d + 1.0) / scale <= x {
        d += 1.0;
    }
    d
}
