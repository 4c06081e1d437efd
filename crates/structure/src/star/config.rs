#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stellar_solvers::{adaptive, bisection};

/// How the surface is placed once a step carries the pressure to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfacePolicy {
    /// The first sample with non-positive pressure is the surface, with its
    /// pressure clamped to zero.
    ///
    /// The surface radius is biased outward by up to one step.
    #[default]
    Freeze,

    /// The surface is located inside the final step by bisecting on the step
    /// length until the pressure vanishes.
    Bisect,
}

/// Configuration for a single star solve.
///
/// Lengths are in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Radius of the first sample, just outside the coordinate singularity.
    pub start_radius: f64,

    /// Step size of the first integration step.
    pub initial_step: f64,

    /// Upper bound on any step size.
    pub max_step: f64,

    /// Number of steps after which the solve gives up.
    pub max_steps: usize,

    /// Radius beyond which the solve gives up.
    pub max_radius: f64,

    pub surface: SurfacePolicy,

    /// Adaptive stepper settings.
    pub step: adaptive::Config,

    /// Bisection settings used by [`SurfacePolicy::Bisect`].
    pub refine: bisection::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_radius: 1e-6,
            initial_step: 1e-3,
            max_step: f64::INFINITY,
            max_steps: 100_000,
            max_radius: 1e7,
            surface: SurfacePolicy::Freeze,
            step: adaptive::Config::default(),
            refine: bisection::Config::default(),
        }
    }
}

impl Config {
    /// Validates the radii, step bounds, and nested solver configs.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.start_radius.is_finite() || self.start_radius <= 0.0 {
            return Err("start_radius must be finite and positive");
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err("initial_step must be finite and positive");
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err("max_step must be positive");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be at least one");
        }
        if self.max_radius.is_nan() || self.max_radius <= self.start_radius {
            return Err("max_radius must exceed start_radius");
        }
        self.step.validate()?;
        self.refine.validate()
    }
}
