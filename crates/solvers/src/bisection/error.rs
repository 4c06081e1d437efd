use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during a bisection solve.
#[derive(Debug, Error)]
pub enum Error {
    /// The ends are equal or not finite.
    #[error("invalid bracket [{lower}, {upper}]")]
    InvalidBracket { lower: f64, upper: f64 },

    /// The function has the same sign at both ends.
    #[error("no sign change between f({lower}) = {f_lower} and f({upper}) = {f_upper}")]
    SameSign {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("function evaluation failed at x = {x}")]
    Function {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("function returned {value} at x = {x}")]
    NonFinite { x: f64, value: f64 },
}
