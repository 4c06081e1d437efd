use crate::{Derivative, State};

/// A set of stellar structure equations.
///
/// Maps the radial coordinate and the current [`State`] to the state's radial
/// derivative. Implementations hold whatever matter model they need, chosen
/// once when the equations are built, so the integrator only ever sees
/// `(r, state) -> derivative`.
///
/// Every formulation is singular at `r = 0`; callers start integrating at a
/// small positive radius.
pub trait StructureEquations {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes `(dm/dr, dp/dr)` at `radius`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the matter model cannot be evaluated at the
    /// state's pressure.
    fn derivative(&self, radius: f64, state: &State) -> Result<Derivative, Self::Error>;
}

impl<T: StructureEquations + ?Sized> StructureEquations for &T {
    type Error = T::Error;

    fn derivative(&self, radius: f64, state: &State) -> Result<Derivative, Self::Error> {
        (**self).derivative(radius, state)
    }
}
