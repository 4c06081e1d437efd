use thiserror::Error;

/// Errors that can occur while taking an adaptive step.
///
/// Generic over the structure equations' error so callers can recover it
/// without downcasting.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error("structure equations failed at r = {radius}")]
    Equations {
        radius: f64,
        #[source]
        source: E,
    },

    #[error("step size {step} vanished at r = {radius}")]
    VanishingStep { radius: f64, step: f64 },

    #[error("state became non-finite stepping {step} from r = {radius}")]
    NonFiniteState { radius: f64, step: f64 },
}

impl<E> Error<E> {
    /// Returns `true` if the error means the integration diverged rather than
    /// the equations failing.
    #[must_use]
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::VanishingStep { .. } | Self::NonFiniteState { .. })
    }
}
