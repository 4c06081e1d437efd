use std::f64::consts::PI;

use stellar_core::{Derivative, EosError, EquationOfState, State, StructureEquations};

/// Newtonian hydrostatic equilibrium.
///
/// ```text
/// dm/dr = 4π ρ r²
/// dp/dr = -ρ m / r²
/// ```
///
/// where `ρ` is the rest-mass density the equation of state gives at `p`.
#[derive(Debug, Clone, Copy)]
pub struct Newtonian<E> {
    eos: E,
}

impl<E: EquationOfState> Newtonian<E> {
    #[must_use]
    pub fn new(eos: E) -> Self {
        Self { eos }
    }
}

impl<E: EquationOfState> StructureEquations for Newtonian<E> {
    type Error = EosError;

    fn derivative(&self, radius: f64, state: &State) -> Result<Derivative, Self::Error> {
        let State { mass, pressure } = *state;
        if pressure < 0.0 {
            return Ok(Derivative::ZERO);
        }

        let r = radius;
        let density = self.eos.density(pressure)?;

        Ok(Derivative::new(
            4.0 * PI * density * r * r,
            -density * mass / (r * r),
        ))
    }
}
