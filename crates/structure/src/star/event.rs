use stellar_core::State;

/// Control actions an observer can take during a star solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and return the profile so far.
    StopEarly,
}

/// Emitted after each accepted interior step.
///
/// Values are in geometrized units, as the integrator sees them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Step counter, starting at 1.
    pub step: usize,
    /// Radius reached by the step.
    pub radius: f64,
    pub state: State,
    /// Size of the step just taken.
    pub step_size: f64,
    /// Weighted error estimate of the step.
    pub error: f64,
}
