//! Numerical solvers for stellar structure integration.
//!
//! - [`adaptive`] — a single-step adaptive 4th-order Runge-Kutta stepper that
//!   estimates its local error by step doubling
//! - [`bisection`] — a bracketing root finder, used to pin down where the
//!   pressure reaches zero within the last step of an integration

pub mod adaptive;
pub mod bisection;
