use log::trace;
use stellar_core::{EosError, State, StructureEquations};
use stellar_solvers::{adaptive::Stepper, bisection};

use crate::Error;

/// Locates where the pressure vanishes inside the step of length `dt` taken
/// from `(radius, state)`.
///
/// Bisects on the partial step length, advancing from the same starting
/// point exactly as the full step did, and returns the surface radius with
/// its state. The returned pressure is clamped to zero.
pub(super) fn bisect<S>(
    stepper: &Stepper<'_, S>,
    radius: f64,
    state: &State,
    dt: f64,
    config: &bisection::Config,
) -> Result<(f64, State), Error>
where
    S: StructureEquations<Error = EosError>,
{
    let pressure_after = |h: f64| {
        if h <= 0.0 || radius + 0.5 * h <= radius {
            return Ok(state.pressure);
        }
        stepper.advance(radius, state, h).map(|next| next.pressure)
    };

    let solution =
        bisection::solve_unobserved(pressure_after, [0.0, dt], config).map_err(Error::Surface)?;
    trace!(
        "surface bisection finished with {:?} after {} iterations (h = {:e} of {dt:e})",
        solution.status, solution.iters, solution.root
    );

    let h = solution.root;
    let surface = if h <= 0.0 || radius + 0.5 * h <= radius {
        *state
    } else {
        stepper.advance(radius, state, h)?
    };

    Ok((radius + h, surface.clamped()))
}
