/// A state that can be advanced along an independent variable using its
/// derivative.
///
/// Stepping computes `state + derivative * delta`. For stellar structure the
/// independent variable is the radial coordinate, but `Delta` is left generic
/// so the trait reads the same for any coordinate the state is stepped along.
pub trait StepIntegrable<Delta> {
    /// The derivative of the state with respect to `Delta`.
    type Derivative;

    /// Returns the state after stepping `delta` along `derivative`.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for the [`StepIntegrable::Derivative`] of a state type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
