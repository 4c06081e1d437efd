//! Core traits and types for stellar structure integration.
//!
//! This crate defines the shared abstractions that the integrator and the
//! star-level solvers build on:
//!
//! - [`State`] and [`Derivative`] — the `(m, p)` state of a star at a radius
//!   and its radial derivative, in geometrized units
//! - [`StepIntegrable`] — stepping a state forward with a derivative
//! - [`StructureEquations`] — maps `(r, state)` to the radial derivative
//! - [`EquationOfState`] — the capability contract a matter model provides
//! - [`Observer`] — receives solver events and optionally returns actions
//! - [`units`] — the unit systems and the conversion table between them

mod eos;
mod equations;
mod observer;
mod state;
mod step;

pub mod units;

pub use eos::{EosError, EquationOfState};
pub use equations::StructureEquations;
pub use observer::Observer;
pub use state::{Derivative, State};
pub use step::{DerivativeOf, StepIntegrable};
