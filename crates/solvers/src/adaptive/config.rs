#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the adaptive stepper.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Target relative local error per step.
    pub tolerance: f64,

    /// Largest factor the step may grow by between calls.
    pub max_growth: f64,

    /// Smallest factor the step may shrink to between calls.
    pub min_shrink: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_growth: 4.0,
            min_shrink: 0.1,
        }
    }
}

impl Config {
    /// Validates the tolerance and the growth limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive, if
    /// `max_growth` is not finite and at least one, or if `min_shrink` is not
    /// in `(0, 1]`.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err("tolerance must be finite and positive");
        }
        if !self.max_growth.is_finite() || self.max_growth < 1.0 {
            return Err("max_growth must be finite and at least one");
        }
        if !(self.min_shrink > 0.0 && self.min_shrink <= 1.0) {
            return Err("min_shrink must be in (0, 1]");
        }
        Ok(())
    }

    /// Suggests the next step size from the current one and its error.
    ///
    /// Follows `dt' = dt·(tolerance/error)^(1/5)`, the optimal step for a
    /// method whose local error scales as `dt⁵`, limited to
    /// `[min_shrink·dt, max_growth·dt]`. A zero error grows the step by
    /// `max_growth`.
    #[must_use]
    pub fn next_step(&self, dt: f64, error: f64) -> f64 {
        let factor = if error > 0.0 {
            (self.tolerance / error).powf(0.2)
        } else {
            self.max_growth
        };
        dt * factor.clamp(self.min_shrink, self.max_growth)
    }
}
