//! Integer to string conversion in radixes 2 through 36.

use crate::big;
use crate::error::ArithmeticError;
use crate::value::Value;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Formats an integer in `radix`, lowercase, `-` prefixed for negatives.
pub fn int_to_string(value: &Value, radix: u32) -> Result<String, ArithmeticError> {
    if !(2..=36).contains(&radix) {
        return Err(ArithmeticError::InvalidRadix(radix));
    }
    match value {
        Value::Big(wide) => big::to_str_radix(wide, radix),
        Value::Float(_) => Err(ArithmeticError::NotApplicable),
        _ => match value.as_machine() {
            Some(v) => Ok(machine_to_string(v, radix)),
            None => Err(ArithmeticError::NotApplicable),
        },
    }
}

fn machine_to_string(value: i64, radix: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    // Work on the unsigned magnitude so i64::MIN needs no special case.
    let mut magnitude = value.unsigned_abs();
    let base = u64::from(radix);
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % base) as usize]);
        magnitude /= base;
    }
    let mut out = String::with_capacity(digits.len() + 1);
    if value < 0 {
        out.push('-');
    }
    for &digit in digits.iter().rev() {
        out.push(char::from(digit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bigint, int};

    #[test]
    fn machine_digit_loop() {
        assert_eq!(int_to_string(&int(0), 2), Ok("0".to_owned()));
        assert_eq!(int_to_string(&int(255), 16), Ok("ff".to_owned()));
        assert_eq!(int_to_string(&int(-255), 16), Ok("-ff".to_owned()));
        assert_eq!(int_to_string(&int(35), 36), Ok("z".to_owned()));
        assert_eq!(int_to_string(&int(10), 2), Ok("1010".to_owned()));
        assert_eq!(
            int_to_string(&int(i64::MIN), 16),
            Ok("-8000000000000000".to_owned())
        );
    }

    #[test]
    fn wide_values_use_the_adapter() {
        let wide = Value::from_big(bigint("18446744073709551616"));
        assert_eq!(int_to_string(&wide, 16), Ok("10000000000000000".to_owned()));
        assert_eq!(
            int_to_string(&wide, 10),
            Ok("18446744073709551616".to_owned())
        );
    }

    #[test]
    fn radix_bounds() {
        assert_eq!(int_to_string(&int(1), 1), Err(ArithmeticError::InvalidRadix(1)));
        assert_eq!(
            int_to_string(&int(1), 37),
            Err(ArithmeticError::InvalidRadix(37))
        );
        assert_eq!(
            int_to_string(&Value::Float(1.0), 10),
            Err(ArithmeticError::NotApplicable)
        );
    }
}
