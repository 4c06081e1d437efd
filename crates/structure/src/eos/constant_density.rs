use stellar_core::{EosError, EquationOfState};

use super::valid_pressure;

/// Incompressible matter with the same density at every pressure.
///
/// Energy density equals rest-mass density, so the model has closed-form
/// Newtonian and TOV stars to compare against. Pressure is not a function of
/// density, so a central condition for this model must be a pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDensity {
    density: f64,
}

impl ConstantDensity {
    /// Creates the model from its density.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidParameter`] unless the density is finite and
    /// positive.
    pub fn new(density: f64) -> Result<Self, EosError> {
        if density.is_finite() && density > 0.0 {
            Ok(Self { density })
        } else {
            Err(EosError::InvalidParameter {
                name: "density",
                value: density,
            })
        }
    }

    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }
}

impl EquationOfState for ConstantDensity {
    fn energy_density(&self, pressure: f64) -> Result<f64, EosError> {
        valid_pressure(pressure)?;
        Ok(self.density)
    }

    fn density(&self, pressure: f64) -> Result<f64, EosError> {
        valid_pressure(pressure)?;
        Ok(self.density)
    }

    fn pressure(&self, _density: f64) -> Result<f64, EosError> {
        Err(EosError::NotInvertible {
            model: "constant density",
        })
    }
}
