#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! A numeric tower over machine integers, arbitrary-precision integers and
//! IEEE-754 doubles.
//!
//! Arithmetic runs on machine words while values fit and promotes
//! transparently to [`num_bigint::BigInt`] when they do not; every
//! arbitrary-precision result is demoted back to the narrowest exact
//! representation, so a [`Value::Big`] never holds anything a machine word
//! could. On top of the representation ladder sit floor division and modulo,
//! binary exponentiation with configurable magnitude limits, exact
//! integer/float comparison, float rounding in four modes with decimal
//! scaling, and radix string conversion.
//!
//! [`Tower`] is the dispatch surface; all of its operations are pure and a
//! tower can be shared across threads.
//!
//! ```
//! use numtower::{Tower, Value};
//!
//! let tower = Tower::default();
//! let mut acc = Value::Int32(1);
//! for k in 1..=30_i64 {
//!     acc = tower.mul(&acc, &Value::from(k));
//! }
//! // 30! promoted past 64 bits along the way.
//! assert!(matches!(acc, Value::Big(_)));
//! ```

mod big;
mod compare;
mod divmod;
mod error;
mod machine;
mod pow;
mod radix;
mod round;
mod tower;
mod value;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ArithmeticError;
pub use pow::PowOutcome;
pub use round::RoundingMode;
pub use tower::{Config, Tower};
pub use value::Value;
