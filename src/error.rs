//! Error types for numeric tower operations.
//!
//! Every error is surfaced synchronously at the point of detection; the core
//! never retries or recovers internally. `NotApplicable` is not a failure of
//! the core itself: it tells the caller that an operand falls outside the
//! integer/float domain this crate owns, so the caller can run its own
//! coercion protocol.

use std::fmt;

/// Errors that can occur during numeric tower operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Integer division or modulo by zero.
    DivisionByZero,
    /// Radix outside the supported range [2, 36] in string conversion.
    InvalidRadix(u32),
    /// Shift magnitude exceeding the configured safety ceiling.
    ShiftRangeTooLarge,
    /// Float operation left the real domain ("NaN" or "Infinity").
    FloatDomain(&'static str),
    /// Operand the numeric core does not handle; the caller owns coercion.
    NotApplicable,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "divided by 0"),
            Self::InvalidRadix(radix) => write!(f, "invalid radix {radix}"),
            Self::ShiftRangeTooLarge => write!(f, "shift width too big"),
            Self::FloatDomain(message) => write!(f, "{message}"),
            Self::NotApplicable => {
                write!(f, "operand type not handled by the numeric core")
            }
        }
    }
}

impl std::error::Error for ArithmeticError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "divided by 0");
        assert_eq!(
            ArithmeticError::InvalidRadix(37).to_string(),
            "invalid radix 37"
        );
        assert_eq!(
            ArithmeticError::ShiftRangeTooLarge.to_string(),
            "shift width too big"
        );
        assert_eq!(ArithmeticError::FloatDomain("NaN").to_string(), "NaN");
    }
}
