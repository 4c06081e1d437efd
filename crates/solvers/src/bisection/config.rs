#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the bisection solver.
///
/// The solve converges once the bracket is narrower than
/// `abs_tol + rel_tol·|midpoint|` or `|f(midpoint)| <= value_tol`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub max_iters: usize,
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub value_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            abs_tol: 1e-12,
            rel_tol: 1e-12,
            value_tol: 0.0,
        }
    }
}

impl Config {
    /// Validates the tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        let valid = |tol: f64| tol.is_finite() && tol >= 0.0;
        if !valid(self.abs_tol) {
            return Err("abs_tol must be finite and non-negative");
        }
        if !valid(self.rel_tol) {
            return Err("rel_tol must be finite and non-negative");
        }
        if !valid(self.value_tol) {
            return Err("value_tol must be finite and non-negative");
        }
        Ok(())
    }
}
