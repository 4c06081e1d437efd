//! Mass-radius curves from families of central conditions.
//!
//! Each central condition is solved independently with [`star::solve`], and
//! the surface radius and total mass of each star become one point of the
//! curve. Points stay aligned with their central conditions by index.
//!
//! [`solve`] stops at the first failed star. [`solve_lenient`] records a NaN
//! point for each failure and carries on, and [`solve_parallel`] splits the
//! stars across threads.

use std::{num::NonZeroUsize, thread};

use log::{info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stellar_core::{EquationOfState, units::UnitSystem};

use crate::{
    CentralCondition, EquationType, Error, ValueKind,
    star::{self, Config, Sample},
};

/// Surface radii (km) and masses (M☉), one entry per central condition.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassRadiusCurve {
    pub radius: Vec<f64>,
    pub mass: Vec<f64>,
}

impl MassRadiusCurve {
    #[must_use]
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    /// Iterates over `(radius, mass)` pairs in input order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.radius.iter().copied().zip(self.mass.iter().copied())
    }

    /// Returns the index, radius, and mass of the heaviest star.
    ///
    /// On a curve ordered by central density this is the turning point that
    /// separates stable from unstable stars. NaN points are skipped, and
    /// `None` is returned if no finite point exists.
    #[must_use]
    pub fn max_mass(&self) -> Option<(usize, f64, f64)> {
        self.points()
            .enumerate()
            .filter(|(_, (radius, mass))| radius.is_finite() && mass.is_finite())
            .max_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))
            .map(|(index, (radius, mass))| (index, radius, mass))
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            radius: Vec::with_capacity(capacity),
            mass: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, radius: f64, mass: f64) {
        self.radius.push(radius);
        self.mass.push(mass);
    }
}

/// A star that could not be solved during a lenient sweep.
#[derive(Debug)]
pub struct Failure {
    /// Position of the central condition in the input.
    pub index: usize,
    pub central: CentralCondition,
    pub error: Error,
}

/// Solves every central condition in order.
///
/// # Errors
///
/// Returns the error of the first star that fails to solve.
pub fn solve<E: EquationOfState>(
    eos: &E,
    equation: EquationType,
    centrals: &[CentralCondition],
    config: &Config,
) -> Result<MassRadiusCurve, Error> {
    let mut curve = MassRadiusCurve::with_capacity(centrals.len());

    for (index, central) in centrals.iter().enumerate() {
        let surface = solve_surface(eos, equation, central, config)?;
        info!(
            "star {}/{}: R = {:.4} km, M = {:.4} M☉",
            index + 1,
            centrals.len(),
            surface.radius,
            surface.mass
        );
        curve.push(surface.radius, surface.mass);
    }

    Ok(curve)
}

/// Solves every central condition in order, recording failures instead of
/// stopping at them.
///
/// A failed star appears in the curve as a NaN radius and mass, so the curve
/// stays aligned with `centrals`.
pub fn solve_lenient<E: EquationOfState>(
    eos: &E,
    equation: EquationType,
    centrals: &[CentralCondition],
    config: &Config,
) -> (MassRadiusCurve, Vec<Failure>) {
    let mut curve = MassRadiusCurve::with_capacity(centrals.len());
    let mut failures = Vec::new();

    for (index, central) in centrals.iter().enumerate() {
        match solve_surface(eos, equation, central, config) {
            Ok(surface) => curve.push(surface.radius, surface.mass),
            Err(error) => {
                warn!("skipping star {index} ({central}): {error}");
                curve.push(f64::NAN, f64::NAN);
                failures.push(Failure {
                    index,
                    central: *central,
                    error,
                });
            }
        }
    }

    (curve, failures)
}

/// Solves the central conditions on up to `threads` scoped threads.
///
/// Produces the same curve as [`solve`].
///
/// # Errors
///
/// Returns the error of the lowest-indexed star that fails to solve.
///
/// # Panics
///
/// Resumes the panic of any worker thread that panicked.
pub fn solve_parallel<E: EquationOfState + Sync>(
    eos: &E,
    equation: EquationType,
    centrals: &[CentralCondition],
    config: &Config,
    threads: NonZeroUsize,
) -> Result<MassRadiusCurve, Error> {
    if centrals.is_empty() {
        return Ok(MassRadiusCurve::default());
    }
    let chunk_size = centrals.len().div_ceil(threads.get());

    let chunks: Vec<Vec<Result<Sample, Error>>> = thread::scope(|scope| {
        let handles: Vec<_> = centrals
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|central| solve_surface(eos, equation, central, config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut curve = MassRadiusCurve::with_capacity(centrals.len());
    for result in chunks.into_iter().flatten() {
        let surface = result?;
        curve.push(surface.radius, surface.mass);
    }
    info!("solved {} stars on {} threads", curve.len(), threads);

    Ok(curve)
}

/// Sweeps raw central values that share a kind and unit system, using the
/// default star config.
///
/// `kind` is `"pressure"` or `"density"` and `units` is `"cgs"`, `"si"`, or
/// `"geom"`.
///
/// # Errors
///
/// Returns [`Error::Unit`] for an unrecognized `kind` or `units`, and
/// otherwise the same errors as [`solve`].
pub fn mass_radius<E: EquationOfState>(
    eos: &E,
    centrals: &[f64],
    equation: EquationType,
    kind: &str,
    units: &str,
) -> Result<MassRadiusCurve, Error> {
    let kind: ValueKind = kind.parse()?;
    let units: UnitSystem = units.parse()?;
    let centrals: Vec<_> = centrals
        .iter()
        .map(|&value| CentralCondition::new(value, kind, units))
        .collect();

    solve(eos, equation, &centrals, &Config::default())
}

fn solve_surface<E: EquationOfState>(
    eos: &E,
    equation: EquationType,
    central: &CentralCondition,
    config: &Config,
) -> Result<Sample, Error> {
    let solution = star::solve_unobserved(eos, equation, central, config)?;
    Ok(solution.trajectory.surface())
}
