#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::StepIntegrable;

/// The integrated state of a star at some radial coordinate.
///
/// Both fields are in geometrized units (G = c = 1, lengths in kilometres),
/// so mass is a length and pressure is an inverse area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    /// Enclosed gravitational mass.
    pub mass: f64,

    /// Pressure.
    pub pressure: f64,
}

impl State {
    /// Creates a state from mass and pressure.
    #[must_use]
    pub const fn new(mass: f64, pressure: f64) -> Self {
        Self { mass, pressure }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.pressure.is_finite()
    }

    /// Returns `true` once the pressure has dropped to zero or below.
    #[must_use]
    pub fn is_surface(&self) -> bool {
        self.pressure <= 0.0
    }

    /// Returns the state with a negative pressure clamped to zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            pressure: self.pressure.max(0.0),
            ..self
        }
    }
}

/// Radial derivative of a [`State`], `(dm/dr, dp/dr)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivative {
    /// `dm/dr`, the mass gradient.
    pub mass: f64,
    /// `dp/dr`, the pressure gradient.
    pub pressure: f64,
}

impl Derivative {
    /// The zero derivative, which holds a state fixed.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a derivative from `dm/dr` and `dp/dr`.
    #[must_use]
    pub const fn new(mass: f64, pressure: f64) -> Self {
        Self { mass, pressure }
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.mass.is_finite() && self.pressure.is_finite()
    }

    /// Combines the four classic Runge-Kutta stage slopes into
    /// `(k1 + 2·k2 + 2·k3 + k4) / 6`.
    #[must_use]
    pub fn rk4_blend(k1: &Self, k2: &Self, k3: &Self, k4: &Self) -> Self {
        let blend = |a: f64, b: f64, c: f64, d: f64| (a + 2.0 * b + 2.0 * c + d) / 6.0;
        Self {
            mass: blend(k1.mass, k2.mass, k3.mass, k4.mass),
            pressure: blend(k1.pressure, k2.pressure, k3.pressure, k4.pressure),
        }
    }
}

impl StepIntegrable<f64> for State {
    type Derivative = Derivative;

    fn step(&self, derivative: &Derivative, delta: f64) -> Self {
        Self {
            mass: self.mass + derivative.mass * delta,
            pressure: self.pressure + derivative.pressure * delta,
        }
    }
}
