use std::f64::consts::PI;

use stellar_core::{Derivative, EosError, EquationOfState, State, StructureEquations};

/// The Tolman-Oppenheimer-Volkoff equations.
///
/// ```text
/// dm/dr = 4π ε r²
/// dp/dr = -(ε + p)(m + 4π r³ p) / (r (r - 2m))
/// ```
///
/// where `ε` is the energy density the equation of state gives at `p`.
#[derive(Debug, Clone, Copy)]
pub struct Tov<E> {
    eos: E,
}

impl<E: EquationOfState> Tov<E> {
    #[must_use]
    pub fn new(eos: E) -> Self {
        Self { eos }
    }
}

impl<E: EquationOfState> StructureEquations for Tov<E> {
    type Error = EosError;

    fn derivative(&self, radius: f64, state: &State) -> Result<Derivative, Self::Error> {
        let State { mass, pressure } = *state;
        if pressure < 0.0 {
            return Ok(Derivative::ZERO);
        }

        let r = radius;
        let energy_density = self.eos.energy_density(pressure)?;

        let dm = 4.0 * PI * energy_density * r * r;
        let dp = -(energy_density + pressure) * (mass + 4.0 * PI * r * r * r * pressure)
            / (r * (r - 2.0 * mass));

        Ok(Derivative::new(dm, dp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::eos::{ConstantDensity, Polytrope};

    #[test]
    fn matches_closed_form() {
        let eos = ConstantDensity::new(2.0e-3).expect("valid density");
        let tov = Tov::new(eos);
        let (r, m, p) = (5.0, 0.8, 1.0e-4);

        let derivative = tov
            .derivative(r, &State::new(m, p))
            .expect("valid pressure");

        assert_relative_eq!(derivative.mass, 4.0 * PI * 2.0e-3 * 25.0, max_relative = 1e-12);
        assert_relative_eq!(
            derivative.pressure,
            -(2.0e-3 + p) * (m + 4.0 * PI * 125.0 * p) / (5.0 * (5.0 - 1.6)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn negative_pressure_freezes_state() {
        let tov = Tov::new(Polytrope::new(100.0, 2.0).expect("valid polytrope"));
        let derivative = tov
            .derivative(10.0, &State::new(1.0, -1.0e-9))
            .expect("guard avoids the equation of state");

        assert_eq!(derivative, Derivative::ZERO);
    }

    #[test]
    fn finite_just_outside_the_centre() {
        let eos = Polytrope::new(100.0, 2.0).expect("valid polytrope");
        let tov = Tov::new(&eos);
        let central_pressure = 1.0e-4;

        for r0 in [1e-9, 1e-6, 1e-3] {
            let derivative = tov
                .derivative(r0, &State::new(0.0, central_pressure))
                .expect("valid pressure");
            assert!(derivative.is_finite(), "r0 = {r0}");
            assert!(derivative.pressure <= 0.0);
        }
    }

    #[test]
    fn pressure_gradient_steepens_with_mass() {
        let tov = Tov::new(Polytrope::new(100.0, 2.0).expect("valid polytrope"));
        let light = tov.derivative(8.0, &State::new(0.5, 5.0e-5)).expect("valid");
        let heavy = tov.derivative(8.0, &State::new(1.5, 5.0e-5)).expect("valid");

        assert!(heavy.pressure < light.pressure);
        assert_relative_eq!(heavy.mass, light.mass);
    }
}
