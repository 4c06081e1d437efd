//! Reference equations of state.
//!
//! These models have closed-form properties, which makes them useful for
//! checking the integrator against known stellar solutions. Realistic nuclear
//! matter models implement [`EquationOfState`](stellar_core::EquationOfState)
//! in downstream crates.
//!
//! All values are in geometrized units (km⁻² for pressure and densities).

mod constant_density;
mod polytrope;

pub use constant_density::ConstantDensity;
pub use polytrope::Polytrope;

use stellar_core::EosError;

/// Checks that a pressure is finite and non-negative.
pub(crate) fn valid_pressure(pressure: f64) -> Result<f64, EosError> {
    if pressure.is_finite() && pressure >= 0.0 {
        Ok(pressure)
    } else {
        Err(EosError::InvalidPressure { pressure })
    }
}

/// Checks that a density is finite and non-negative.
pub(crate) fn valid_density(density: f64) -> Result<f64, EosError> {
    if density.is_finite() && density >= 0.0 {
        Ok(density)
    } else {
        Err(EosError::InvalidDensity { density })
    }
}
