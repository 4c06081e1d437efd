use stellar_core::{EosError, units::UnitError};
use stellar_solvers::{adaptive, bisection};
use thiserror::Error;

/// Errors that can occur while solving for a star or a mass-radius curve.
#[derive(Debug, Error)]
pub enum Error {
    /// A unit system or quantity could not be resolved.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// The equation of state was asked for a value outside its domain.
    #[error(transparent)]
    Eos(#[from] EosError),

    /// The equation of state failed during the step starting at `radius`.
    #[error("equation of state failed in the step from r = {radius} km")]
    Equations {
        radius: f64,
        #[source]
        source: EosError,
    },

    /// No structure equations go by this name.
    #[error("unknown equation type `{name}` (expected tov or newtonian)")]
    UnknownEquationType { name: String },

    /// The step size vanished or the state became non-finite.
    #[error("integration diverged at r = {radius} km with step {step} km")]
    IntegrationDiverged { radius: f64, step: f64 },

    /// The pressure never reached zero within the step or radius budget.
    #[error("surface not reached after {steps} steps (r = {radius} km)")]
    NonConvergent { steps: usize, radius: f64 },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// Refining the surface location inside the final step failed.
    #[error("failed to locate the surface")]
    Surface(#[source] bisection::Error),
}

impl From<adaptive::Error<EosError>> for Error {
    fn from(err: adaptive::Error<EosError>) -> Self {
        match err {
            adaptive::Error::Equations { radius, source } => Self::Equations { radius, source },
            adaptive::Error::VanishingStep { radius, step }
            | adaptive::Error::NonFiniteState { radius, step } => {
                Self::IntegrationDiverged { radius, step }
            }
        }
    }
}
