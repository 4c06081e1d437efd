//! Bisection root finding for a scalar function of one variable.
//!
//! The star solver uses this to locate where the pressure reaches zero inside
//! the integration step that crossed the surface.

mod bracket;
mod config;
mod error;

pub use config::Config;
pub use error::Error;

use std::error::Error as StdError;

use stellar_core::Observer;

use bracket::Bracket;

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best point found so far.
    StopEarly,
}

/// Emitted after each midpoint evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// Bracket the midpoint split.
    pub lower: f64,
    pub upper: f64,
    pub midpoint: f64,
    /// Function value at the midpoint.
    pub value: f64,
}

/// Indicates how a bisection solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket or the function value fell within tolerance.
    Converged,
    /// The iteration limit was reached first.
    MaxIters,
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub status: Status,
    /// Estimate of the root.
    pub root: f64,
    /// Function value at `root`.
    pub value: f64,
    /// Final bracket, which still contains a sign change.
    pub bracket: [f64; 2],
    pub iters: usize,
}

/// Finds a root of `f` between the two ends of `bracket`.
///
/// The ends may be given in either order, and `f` must change sign between
/// them. An end where `|f|` is already within `config.value_tol` is returned
/// without iterating.
///
/// # Errors
///
/// Returns an error if the config or bracket is invalid, if `f` has the same
/// sign at both ends, or if `f` fails or returns a non-finite value.
pub fn solve<F, E, Obs>(
    mut f: F,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
    Obs: Observer<Event, Action>,
{
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let mut evaluate = |x: f64| match f(x) {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(Error::NonFinite { x, value }),
        Err(source) => Err(Error::Function {
            x,
            source: Box::new(source),
        }),
    };

    let mut bracket = Bracket::new(bracket, &mut evaluate)?;
    let finish = |bracket: &Bracket, status, iters| {
        let (root, value) = bracket.best();
        Solution {
            status,
            root,
            value,
            bracket: bracket.ends(),
            iters,
        }
    };

    if bracket.best().1.abs() <= config.value_tol {
        return Ok(finish(&bracket, Status::Converged, 0));
    }
    bracket.check_sign_change()?;

    for iter in 1..=config.max_iters {
        let [lower, upper] = bracket.ends();
        let midpoint = bracket.midpoint();
        let value = evaluate(midpoint)?;
        bracket.split(midpoint, value);

        let event = Event {
            iter,
            lower,
            upper,
            midpoint,
            value,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(finish(&bracket, Status::StoppedByObserver, iter));
        }

        let narrow = upper - lower <= config.abs_tol + config.rel_tol * midpoint.abs();
        if narrow || value.abs() <= config.value_tol {
            return Ok(Solution {
                status: Status::Converged,
                root: midpoint,
                value,
                bracket: bracket.ends(),
                iters: iter,
            });
        }
    }

    Ok(finish(&bracket, Status::MaxIters, config.max_iters))
}

/// Runs bisection without observation.
///
/// # Errors
///
/// Returns the same errors as [`solve`].
pub fn solve_unobserved<F, E>(f: F, bracket: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: StdError + Send + Sync + 'static,
{
    solve(f, bracket, config, ())
}
