//! Adaptive 4th-order Runge-Kutta stepping with step-doubling error control.
//!
//! Each call advances the state over one nominal step `dt` twice: once as a
//! single classic RK4 step (`y1`) and once as two RK4 half steps (`y2`).
//! Because RK4's local error scales as `dt⁵`, the difference between the two
//! is about fifteen times the error left in `y2`:
//!
//! ```text
//! err      = |y1 - y2| / 15
//! dt_next  = dt · (tolerance / err)^(1/5)
//! ```
//!
//! The stepper never rejects a step. It returns `y2`, the more accurate of the
//! two results, and leaves it to the caller to use the suggested step size
//! on the next call.

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use stellar_core::{Derivative, State, StepIntegrable, StructureEquations};

/// The outcome of one adaptive step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State at `radius + dt`, from two half steps.
    pub state: State,

    /// Scaled error estimate, comparable to [`Config::tolerance`].
    pub error: f64,

    /// Suggested size for the next step.
    pub next_step: f64,
}

/// An adaptive RK4 stepper bound to a set of structure equations.
#[derive(Debug, Clone)]
pub struct Stepper<'a, E> {
    equations: &'a E,
    config: Config,
    floor: State,
}

impl<'a, E: StructureEquations> Stepper<'a, E> {
    /// Creates a stepper with the given configuration.
    #[must_use]
    pub fn new(equations: &'a E, config: Config) -> Self {
        Self {
            equations,
            config,
            floor: State::new(f64::MIN_POSITIVE, f64::MIN_POSITIVE),
        }
    }

    /// Sets the smallest magnitude each component's error is measured
    /// against.
    ///
    /// The error of each component is taken relative to the larger of its
    /// magnitude before and after the step, but never relative to less than
    /// its floor. Without a floor, a component decaying towards zero drives
    /// the step size towards zero with it.
    #[must_use]
    pub fn with_floor(mut self, floor: State) -> Self {
        self.floor = State::new(
            floor.mass.abs().max(f64::MIN_POSITIVE),
            floor.pressure.abs().max(f64::MIN_POSITIVE),
        );
        self
    }

    /// Returns the stepper's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Advances `state` from `radius` by `dt` and estimates the local error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VanishingStep`] if `dt` is not a positive finite
    /// number large enough to move `radius`, [`Error::NonFiniteState`] if the
    /// starting or resulting state is not finite, and [`Error::Equations`] if
    /// a derivative evaluation fails.
    pub fn step(&self, radius: f64, state: &State, dt: f64) -> Result<Step, Error<E::Error>> {
        check_step::<E::Error>(radius, state, dt)?;

        let k1 = self
            .equations
            .derivative(radius, state)
            .map_err(|source| Error::Equations { radius, source })?;

        let full = rk4_from_slope(self.equations, radius, state, dt, &k1)
            .map_err(|source| Error::Equations { radius, source })?;
        let halves = two_half_steps(self.equations, radius, state, dt, &k1)
            .map_err(|source| Error::Equations { radius, source })?;

        if !full.is_finite() || !halves.is_finite() {
            return Err(Error::NonFiniteState { radius, step: dt });
        }

        let error = self.scaled_error(state, &full, &halves);
        Ok(Step {
            state: halves,
            error,
            next_step: self.config.next_step(dt, error),
        })
    }

    /// Advances `state` by `dt` exactly as [`Stepper::step`] does, without
    /// estimating the error.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Stepper::step`].
    pub fn advance(&self, radius: f64, state: &State, dt: f64) -> Result<State, Error<E::Error>> {
        check_step::<E::Error>(radius, state, dt)?;

        let k1 = self
            .equations
            .derivative(radius, state)
            .map_err(|source| Error::Equations { radius, source })?;
        let next = two_half_steps(self.equations, radius, state, dt, &k1)
            .map_err(|source| Error::Equations { radius, source })?;

        if next.is_finite() {
            Ok(next)
        } else {
            Err(Error::NonFiniteState { radius, step: dt })
        }
    }

    /// Richardson estimate of the error left in `halves`, as a fraction of
    /// each component's scale, maximized over components.
    fn scaled_error(&self, start: &State, full: &State, halves: &State) -> f64 {
        let scale = |start: f64, end: f64, floor: f64| start.abs().max(end.abs()).max(floor);

        let mass = (full.mass - halves.mass).abs()
            / (15.0 * scale(start.mass, halves.mass, self.floor.mass));
        let pressure = (full.pressure - halves.pressure).abs()
            / (15.0 * scale(start.pressure, halves.pressure, self.floor.pressure));

        mass.max(pressure)
    }
}

/// Takes one classic RK4 step of size `h` from `radius`.
///
/// # Errors
///
/// Returns the equations' error if any stage evaluation fails.
pub fn rk4<E: StructureEquations>(
    equations: &E,
    radius: f64,
    state: &State,
    h: f64,
) -> Result<State, E::Error> {
    let k1 = equations.derivative(radius, state)?;
    rk4_from_slope(equations, radius, state, h, &k1)
}

fn rk4_from_slope<E: StructureEquations>(
    equations: &E,
    radius: f64,
    state: &State,
    h: f64,
    k1: &Derivative,
) -> Result<State, E::Error> {
    let half = 0.5 * h;
    let k2 = equations.derivative(radius + half, &state.step(k1, half))?;
    let k3 = equations.derivative(radius + half, &state.step(&k2, half))?;
    let k4 = equations.derivative(radius + h, &state.step(&k3, h))?;

    Ok(state.step(&Derivative::rk4_blend(k1, &k2, &k3, &k4), h))
}

fn two_half_steps<E: StructureEquations>(
    equations: &E,
    radius: f64,
    state: &State,
    dt: f64,
    k1: &Derivative,
) -> Result<State, E::Error> {
    let half = 0.5 * dt;
    let midway = rk4_from_slope(equations, radius, state, half, k1)?;
    rk4(equations, radius + half, &midway, half)
}

fn check_step<E>(radius: f64, state: &State, dt: f64) -> Result<(), Error<E>> {
    #[allow(clippy::float_cmp)]
    if !dt.is_finite() || dt <= 0.0 || radius + 0.5 * dt == radius {
        return Err(Error::VanishingStep { radius, step: dt });
    }
    if !state.is_finite() || !radius.is_finite() {
        return Err(Error::NonFiniteState { radius, step: dt });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    /// `dm/dr = 3r²`, `dp/dr = -p`: mass is `r³`, pressure decays exponentially.
    struct CubicAndDecay;

    impl StructureEquations for CubicAndDecay {
        type Error = Infallible;

        fn derivative(&self, radius: f64, state: &State) -> Result<Derivative, Self::Error> {
            Ok(Derivative::new(3.0 * radius * radius, -state.pressure))
        }
    }

    /// Fails whenever the pressure goes negative.
    struct Strict;

    #[derive(Debug, thiserror::Error)]
    #[error("negative pressure")]
    struct NegativePressure;

    impl StructureEquations for Strict {
        type Error = NegativePressure;

        fn derivative(&self, _radius: f64, state: &State) -> Result<Derivative, Self::Error> {
            if state.pressure < 0.0 {
                Err(NegativePressure)
            } else {
                Ok(Derivative::new(0.0, -1.0))
            }
        }
    }

    /// Blows up at the origin.
    struct Singular;

    impl StructureEquations for Singular {
        type Error = Infallible;

        fn derivative(&self, radius: f64, _state: &State) -> Result<Derivative, Self::Error> {
            Ok(Derivative::new(1.0 / radius, 0.0))
        }
    }

    #[test]
    fn polynomial_mass_is_exact() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let step = stepper
            .step(1.0, &State::new(1.0, 1.0), 0.5)
            .expect("step succeeds");

        assert_relative_eq!(step.state.mass, 1.5_f64.powi(3), max_relative = 1e-14);
    }

    #[test]
    fn decay_is_accurate_and_error_is_small() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let step = stepper
            .step(0.0, &State::new(0.0, 1.0), 0.1)
            .expect("step succeeds");

        assert_relative_eq!(step.state.pressure, (-0.1_f64).exp(), max_relative = 1e-8);
        assert!(step.error > 0.0);
        assert!(step.error < 1e-7);
    }

    #[test]
    fn error_estimate_tracks_true_error() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let dt = 0.4;
        let step = stepper
            .step(0.0, &State::new(0.0, 1.0), dt)
            .expect("step succeeds");

        let true_error = (step.state.pressure - (-dt).exp()).abs() / (-dt).exp();
        assert!(step.error > 0.2 * true_error && step.error < 5.0 * true_error);
    }

    #[test]
    fn larger_steps_suggest_relatively_smaller_followups() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let start = State::new(0.0, 1.0);

        let small = stepper.step(0.0, &start, 0.05).expect("step succeeds");
        let large = stepper.step(0.0, &start, 0.8).expect("step succeeds");

        assert!(large.error > small.error);
        assert!(large.next_step / 0.8 < small.next_step / 0.05);
    }

    #[test]
    fn advance_matches_step_state() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let start = State::new(0.2, 3.0);

        let step = stepper.step(0.5, &start, 0.3).expect("step succeeds");
        let advanced = stepper.advance(0.5, &start, 0.3).expect("advance succeeds");

        assert_eq!(step.state, advanced);
    }

    #[test]
    fn floor_relaxes_error_for_vanishing_component() {
        let start = State::new(1.0, 1e-12);
        let loose = Stepper::new(&CubicAndDecay, Config::default()).with_floor(State::new(1.0, 1.0));
        let tight = Stepper::new(&CubicAndDecay, Config::default());

        let loose = loose.step(1.0, &start, 0.5).expect("step succeeds");
        let tight = tight.step(1.0, &start, 0.5).expect("step succeeds");

        assert!(loose.error < tight.error);
        assert!(loose.next_step >= tight.next_step);
    }

    #[test]
    fn rejects_vanishing_step() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let state = State::new(0.0, 1.0);

        for dt in [0.0, -1.0, f64::NAN, 1e-30] {
            let result = stepper.step(1.0e6, &state, dt);
            assert!(
                matches!(result, Err(Error::VanishingStep { .. })),
                "dt = {dt} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_finite_state() {
        let stepper = Stepper::new(&CubicAndDecay, Config::default());
        let result = stepper.step(1.0, &State::new(f64::NAN, 1.0), 0.1);
        assert!(matches!(result, Err(Error::NonFiniteState { .. })));
    }

    #[test]
    fn reports_divergence_from_singular_equations() {
        let stepper = Stepper::new(&Singular, Config::default());
        let result = stepper.step(0.0, &State::new(0.0, 1.0), 0.1);

        let err = result.expect_err("derivative is infinite at r = 0");
        assert!(err.is_divergence());
    }

    #[test]
    fn equation_errors_carry_the_radius() {
        let stepper = Stepper::new(&Strict, Config::default());
        let result = stepper.step(2.0, &State::new(0.0, 0.1), 1.0);

        match result {
            Err(Error::Equations { radius, .. }) => assert_relative_eq!(radius, 2.0),
            other => panic!("expected an equations error, got {other:?}"),
        }
    }

    #[test]
    fn single_rk4_step_integrates_quadratic_exactly() {
        let state = rk4(&CubicAndDecay, 0.0, &State::new(0.0, 0.0), 2.0).expect("rk4 succeeds");
        assert_relative_eq!(state.mass, 8.0, max_relative = 1e-14);
    }
}
