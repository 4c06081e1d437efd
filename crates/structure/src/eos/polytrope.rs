use stellar_core::{EosError, EquationOfState};

use super::{valid_density, valid_pressure};

/// A polytropic equation of state, `p = K ρ^Γ`.
///
/// The energy density includes the internal energy of an adiabatic gas,
/// `ε = ρ + p / (Γ - 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polytrope {
    k: f64,
    gamma: f64,
}

impl Polytrope {
    /// Creates a polytrope from its constant `K` and adiabatic index `Γ`.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidParameter`] unless `K` is finite and
    /// positive and `Γ` is finite and greater than one.
    pub fn new(k: f64, gamma: f64) -> Result<Self, EosError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(EosError::InvalidParameter {
                name: "k",
                value: k,
            });
        }
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(EosError::InvalidParameter {
                name: "gamma",
                value: gamma,
            });
        }
        Ok(Self { k, gamma })
    }

    /// Creates a polytrope from its constant `K` and polytropic index `n`,
    /// where `Γ = 1 + 1/n`.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidParameter`] unless `K` and `n` are finite
    /// and positive.
    pub fn from_index(k: f64, n: f64) -> Result<Self, EosError> {
        if !n.is_finite() || n <= 0.0 {
            return Err(EosError::InvalidParameter {
                name: "n",
                value: n,
            });
        }
        Self::new(k, 1.0 + 1.0 / n)
    }

    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl EquationOfState for Polytrope {
    fn energy_density(&self, pressure: f64) -> Result<f64, EosError> {
        let density = self.density(pressure)?;
        Ok(density + pressure / (self.gamma - 1.0))
    }

    fn density(&self, pressure: f64) -> Result<f64, EosError> {
        let pressure = valid_pressure(pressure)?;
        Ok((pressure / self.k).powf(self.gamma.recip()))
    }

    fn pressure(&self, density: f64) -> Result<f64, EosError> {
        let density = valid_density(density)?;
        Ok(self.k * density.powf(self.gamma))
    }
}
