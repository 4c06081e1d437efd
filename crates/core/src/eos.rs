use thiserror::Error;

/// The capabilities a matter model provides to the structure equations.
///
/// All quantities are in geometrized units (G = c = 1, lengths in kilometres):
/// pressure, rest-mass density, and energy density are all inverse areas.
///
/// `pressure` and `density` must be monotonic and mutually near-inverse over
/// the model's valid domain, so `pressure(density(p)) ≈ p`. A model asked for
/// a value outside its domain returns an [`EosError`] rather than a NaN.
pub trait EquationOfState {
    /// Energy density `ε` at the given pressure, used by the TOV equations.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidPressure`] outside the model's domain.
    fn energy_density(&self, pressure: f64) -> Result<f64, EosError>;

    /// Rest-mass density `ρ` at the given pressure.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidPressure`] outside the model's domain.
    fn density(&self, pressure: f64) -> Result<f64, EosError>;

    /// Pressure at the given rest-mass density.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidDensity`] outside the model's domain, or
    /// [`EosError::NotInvertible`] if pressure is not a function of density.
    fn pressure(&self, density: f64) -> Result<f64, EosError>;
}

impl<T: EquationOfState + ?Sized> EquationOfState for &T {
    fn energy_density(&self, pressure: f64) -> Result<f64, EosError> {
        (**self).energy_density(pressure)
    }

    fn density(&self, pressure: f64) -> Result<f64, EosError> {
        (**self).density(pressure)
    }

    fn pressure(&self, density: f64) -> Result<f64, EosError> {
        (**self).pressure(density)
    }
}

/// Errors an [`EquationOfState`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EosError {
    /// The pressure is outside the model's valid domain.
    #[error("pressure {pressure} is outside the equation of state's domain")]
    InvalidPressure { pressure: f64 },

    /// The density is outside the model's valid domain.
    #[error("density {density} is outside the equation of state's domain")]
    InvalidDensity { density: f64 },

    /// Pressure cannot be recovered from density for this model.
    ///
    /// For example, an incompressible fluid has the same density at every pressure.
    #[error("`{model}` cannot compute pressure from density")]
    NotInvertible { model: &'static str },

    /// A model parameter is outside the range the model is defined for.
    #[error("invalid equation of state parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
