//! Integrates a single star from its centre to its surface.
//!
//! The solve starts at a small radius `r₀` outside the coordinate singularity
//! with the central pressure and the mass of a uniform sphere of radius `r₀`.
//! It takes adaptive RK4 steps outward until a step carries the pressure to
//! zero, then converts the profile to kilometres, solar masses, and dyn/cm².
//!
//! ```text
//! r₀ ──step──▶ r₁ ──step──▶ … ──step──▶ R   (p(R) ≤ 0)
//! ```
//!
//! Steps are never rejected. The error estimate of each step only sizes the
//! next one.

mod config;
mod event;
mod solution;
mod surface;

pub use config::{Config, SurfacePolicy};
pub use event::{Action, Event};
pub use solution::{Sample, Solution, Status, Trajectory};

use log::{debug, trace, warn};
use stellar_core::{
    EosError, EquationOfState, Observer, State, StructureEquations, units::ConversionTable,
};
use stellar_solvers::adaptive::Stepper;

use crate::{CentralCondition, EquationType, Error, Newtonian, Tov};

/// Solves for the structure of one star.
///
/// # Observer
///
/// The observer receives an [`Event`] after each interior step and may return
/// [`Action::StopEarly`] to end the solve with
/// [`Status::StoppedByObserver`].
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `config` fails validation.
/// - [`Error::Unit`] or [`Error::Eos`] if the central condition cannot be
///   resolved to a positive pressure.
/// - [`Error::Equations`] if the equation of state fails during integration.
/// - [`Error::IntegrationDiverged`] if a step vanishes or the state becomes
///   non-finite.
/// - [`Error::NonConvergent`] if the surface is not reached within
///   `config.max_steps` steps or `config.max_radius`.
/// - [`Error::Surface`] if [`SurfacePolicy::Bisect`] cannot locate the
///   surface inside the final step.
pub fn solve<E, Obs>(
    eos: &E,
    equation: EquationType,
    central: &CentralCondition,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    E: EquationOfState,
    Obs: Observer<Event, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let table = ConversionTable::standard();
    let central_pressure = central.central_pressure(eos, table)?;
    debug!("solving {equation} star from {central} (p_c = {central_pressure:e} km⁻²)");

    match equation {
        EquationType::Tov => integrate(&Tov::new(eos), central_pressure, config, table, observer),
        EquationType::Newtonian => {
            integrate(&Newtonian::new(eos), central_pressure, config, table, observer)
        }
    }
}

/// Solves for the structure of one star without observation.
///
/// # Errors
///
/// Returns the same errors as [`solve`].
pub fn solve_unobserved<E: EquationOfState>(
    eos: &E,
    equation: EquationType,
    central: &CentralCondition,
    config: &Config,
) -> Result<Solution, Error> {
    solve(eos, equation, central, config, ())
}

/// Solves for one star from loosely typed inputs with the default config.
///
/// `kind` is `"pressure"` or `"density"` and `units` is `"cgs"`, `"si"`, or
/// `"geom"`. Returns the aligned radius (km), mass (M☉), and pressure
/// (dyn/cm²) sequences.
///
/// # Errors
///
/// Returns [`Error::Unit`] for an unrecognized `kind` or `units`, and
/// otherwise the same errors as [`solve`].
pub fn solve_star<E: EquationOfState>(
    eos: &E,
    equation: EquationType,
    value: f64,
    kind: &str,
    units: &str,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), Error> {
    let central = CentralCondition::parse(value, kind, units)?;
    let solution = solve_unobserved(eos, equation, &central, &Config::default())?;
    Ok(solution.trajectory.into_parts())
}

/// Integrates `equations` outward from the central pressure, in geometrized
/// units, until the surface.
fn integrate<S, Obs>(
    equations: &S,
    central_pressure: f64,
    config: &Config,
    table: &ConversionTable,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: StructureEquations<Error = EosError>,
    Obs: Observer<Event, Action>,
{
    let stepper =
        Stepper::new(equations, config.step).with_floor(State::new(0.0, central_pressure));

    let mut radius = config.start_radius;
    let mut state = initial_state(equations, radius, central_pressure)?;
    let mut dt = config.initial_step;

    let mut samples = vec![(radius, state)];
    let finish = |samples: &[(f64, State)], status, steps| Solution {
        status,
        trajectory: Trajectory::from_geometrized(samples, table),
        steps,
    };

    for step in 1..=config.max_steps {
        let dt_used = dt.min(config.max_step);
        let next = stepper.step(radius, &state, dt_used)?;
        let next_radius = radius + dt_used;

        trace!(
            "step {step}: r = {next_radius:e}, m = {:e}, p = {:e}, dt = {dt_used:e}, error = {:e}",
            next.state.mass, next.state.pressure, next.error
        );

        if next.state.is_surface() {
            let (surface_radius, surface_state) = match config.surface {
                SurfacePolicy::Freeze => (next_radius, next.state.clamped()),
                SurfacePolicy::Bisect => {
                    surface::bisect(&stepper, radius, &state, dt_used, &config.refine)?
                }
            };
            debug!(
                "surface at r = {surface_radius} km, m = {} km after {step} steps",
                surface_state.mass
            );
            samples.push((surface_radius, surface_state));
            return Ok(finish(&samples, Status::Surface, step));
        }

        samples.push((next_radius, next.state));

        let event = Event {
            step,
            radius: next_radius,
            state: next.state,
            step_size: dt_used,
            error: next.error,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!("stopped by observer at r = {next_radius} km");
            return Ok(finish(&samples, Status::StoppedByObserver, step));
        }

        if next_radius > config.max_radius {
            warn!("passed max radius {} km without reaching the surface", config.max_radius);
            return Err(Error::NonConvergent {
                steps: step,
                radius: next_radius,
            });
        }

        radius = next_radius;
        state = next.state;
        dt = next.next_step;
    }

    warn!("surface not reached within {} steps", config.max_steps);
    Err(Error::NonConvergent {
        steps: config.max_steps,
        radius,
    })
}

/// The state at `start_radius`: the central pressure, and the mass of a
/// uniform sphere at the central energy density.
fn initial_state<S>(equations: &S, start_radius: f64, central_pressure: f64) -> Result<State, Error>
where
    S: StructureEquations<Error = EosError>,
{
    let slope = equations.derivative(start_radius, &State::new(0.0, central_pressure))?;
    Ok(State::new(
        start_radius * slope.mass / 3.0,
        central_pressure,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use stellar_core::units::UnitSystem;

    use crate::eos::{ConstantDensity, Polytrope};

    fn polytrope() -> Polytrope {
        Polytrope::new(100.0, 2.0).expect("valid polytrope")
    }

    #[test]
    fn profile_is_monotonic_and_ends_at_the_surface() {
        let eos = polytrope();
        let central = CentralCondition::geometrized_density(1e-3);

        for equation in [EquationType::Tov, EquationType::Newtonian] {
            let solution = solve_unobserved(&eos, equation, &central, &Config::default())
                .expect("polytrope has a surface");
            assert_eq!(solution.status, Status::Surface);

            let trajectory = &solution.trajectory;
            assert_eq!(trajectory.len(), solution.steps + 1);
            assert!(trajectory.radius().windows(2).all(|w| w[0] < w[1]));
            assert!(trajectory.mass().windows(2).all(|w| w[0] <= w[1]));
            assert!(trajectory.pressure()[..trajectory.len() - 1].iter().all(|&p| p > 0.0));
            assert_relative_eq!(trajectory.surface().pressure, 0.0);
        }
    }

    #[test]
    fn newtonian_polytrope_radius_matches_lane_emden() {
        // n = 1 polytrope: R = π √(K / 2π), independent of central density.
        let eos = polytrope();
        let central = CentralCondition::geometrized_density(1e-4);
        let config = Config {
            max_step: 0.05,
            ..Config::default()
        };

        let solution = solve_unobserved(&eos, EquationType::Newtonian, &central, &config)
            .expect("polytrope has a surface");

        let expected = std::f64::consts::PI * (100.0 / (2.0 * std::f64::consts::PI)).sqrt();
        assert_relative_eq!(solution.trajectory.surface().radius, expected, max_relative = 1e-2);
    }

    #[test]
    fn relativity_makes_stars_smaller() {
        let eos = polytrope();
        let central = CentralCondition::geometrized_density(2e-3);
        let config = Config::default();

        let tov = solve_unobserved(&eos, EquationType::Tov, &central, &config).expect("tov");
        let newtonian =
            solve_unobserved(&eos, EquationType::Newtonian, &central, &config).expect("newtonian");

        let tov = tov.trajectory.surface();
        let newtonian = newtonian.trajectory.surface();
        assert!(tov.radius < newtonian.radius);
        assert!(tov.mass < newtonian.mass);
    }

    #[test]
    fn bisection_pulls_the_surface_inside_the_last_step() {
        let eos = ConstantDensity::new(1e-3).expect("valid density");
        let central = CentralCondition::pressure(1e-5, UnitSystem::Geometrized);
        let config = Config {
            max_step: 0.5,
            ..Config::default()
        };

        let frozen = solve_unobserved(&eos, EquationType::Newtonian, &central, &config)
            .expect("frozen surface");
        let bisected = solve_unobserved(
            &eos,
            EquationType::Newtonian,
            &central,
            &Config {
                surface: SurfacePolicy::Bisect,
                ..config
            },
        )
        .expect("bisected surface");

        let (frozen, bisected) = (&frozen.trajectory, &bisected.trajectory);
        assert_eq!(frozen.len(), bisected.len());

        let last = frozen.len() - 1;
        let before = frozen.radius()[last - 1];
        assert_relative_eq!(bisected.radius()[last - 1], before);
        assert!(bisected.surface().radius > before);
        assert!(bisected.surface().radius <= frozen.surface().radius);
    }

    #[test]
    fn step_budget_is_enforced() {
        let config = Config {
            max_steps: 5,
            ..Config::default()
        };
        let result = solve_unobserved(
            &polytrope(),
            EquationType::Tov,
            &CentralCondition::geometrized_density(1e-3),
            &config,
        );
        assert!(matches!(result, Err(Error::NonConvergent { steps: 5, .. })));
    }

    #[test]
    fn radius_budget_is_enforced() {
        let config = Config {
            max_radius: 1.0,
            ..Config::default()
        };
        let result = solve_unobserved(
            &polytrope(),
            EquationType::Newtonian,
            &CentralCondition::geometrized_density(1e-3),
            &config,
        );
        assert!(matches!(result, Err(Error::NonConvergent { .. })));
    }

    #[test]
    fn observer_can_stop_early() {
        let mut seen = Vec::new();
        let observer = |event: &Event| {
            seen.push(event.radius);
            (event.step == 3).then_some(Action::StopEarly)
        };

        let solution = solve(
            &polytrope(),
            EquationType::Tov,
            &CentralCondition::geometrized_density(1e-3),
            &Config::default(),
            observer,
        )
        .expect("stopped early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 3);
        assert_eq!(seen.len(), 3);
        assert_eq!(solution.trajectory.len(), 4);
        assert!(solution.trajectory.surface().pressure > 0.0);
    }

    #[test]
    fn loosely_typed_entry_point_matches_typed_solve() {
        let eos = polytrope();
        let (radius, mass, pressure) =
            solve_star(&eos, EquationType::Tov, 1e-3, "density", "geom").expect("valid inputs");

        let solution = solve_unobserved(
            &eos,
            EquationType::Tov,
            &CentralCondition::geometrized_density(1e-3),
            &Config::default(),
        )
        .expect("valid inputs");

        assert_eq!(radius.len(), solution.trajectory.len());
        assert_eq!(mass, solution.trajectory.mass());
        assert_eq!(pressure, solution.trajectory.pressure());

        assert!(matches!(
            solve_star(&eos, EquationType::Tov, 1e-3, "density", "furlongs"),
            Err(Error::Unit(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_solving() {
        let config = Config {
            start_radius: -1.0,
            ..Config::default()
        };
        let result = solve_unobserved(
            &polytrope(),
            EquationType::Tov,
            &CentralCondition::geometrized_density(1e-3),
            &config,
        );
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    /// Uniform density above `floor`. Below it the energy density is
    /// infinite, or out of domain when `infinite` is false.
    struct Truncated {
        floor: f64,
        infinite: bool,
    }

    impl EquationOfState for Truncated {
        fn energy_density(&self, pressure: f64) -> Result<f64, EosError> {
            if pressure >= self.floor {
                Ok(1e-3)
            } else if self.infinite {
                Ok(f64::INFINITY)
            } else {
                Err(EosError::InvalidPressure { pressure })
            }
        }

        fn density(&self, pressure: f64) -> Result<f64, EosError> {
            self.energy_density(pressure)
        }

        fn pressure(&self, _density: f64) -> Result<f64, EosError> {
            Err(EosError::NotInvertible { model: "truncated" })
        }
    }

    #[test]
    fn non_finite_profile_is_reported_as_divergence() {
        let eos = Truncated {
            floor: 0.9e-4,
            infinite: true,
        };
        let central = CentralCondition::pressure(1e-4, UnitSystem::Geometrized);

        match solve_unobserved(&eos, EquationType::Tov, &central, &Config::default()) {
            Err(Error::IntegrationDiverged { radius, step }) => {
                assert!(radius > 0.0 && radius < 7.0, "diverged at r = {radius}");
                assert!(step > 0.0);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn eos_failure_keeps_the_radius_of_the_step() {
        let eos = Truncated {
            floor: 0.9e-4,
            infinite: false,
        };
        let central = CentralCondition::pressure(1e-4, UnitSystem::Geometrized);

        match solve_unobserved(&eos, EquationType::Tov, &central, &Config::default()) {
            Err(Error::Equations { radius, source }) => {
                assert!(radius > 0.0 && radius < 7.0, "failed at r = {radius}");
                assert!(matches!(source, EosError::InvalidPressure { pressure } if pressure < 0.9e-4));
            }
            other => panic!("expected an equation of state failure, got {other:?}"),
        }
    }
}
