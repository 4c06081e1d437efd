//! Stellar structure integration from the centre of a star to its surface.
//!
//! Given an [`EquationOfState`](stellar_core::EquationOfState), this crate
//! integrates the relativistic (TOV) or Newtonian structure equations outward
//! from a central condition until the pressure vanishes, and sweeps families
//! of central conditions into a mass-radius curve.
//!
//! - [`equations`] — the [`Tov`] and [`Newtonian`] structure equations
//! - [`eos`] — reference matter models with closed-form properties
//! - [`central`] — central conditions in any supported unit system
//! - [`star`] — integrates one star and returns its radial profile
//! - [`sweep`] — integrates many stars into a [`MassRadiusCurve`]
//!
//! # Example
//!
//! ```
//! use stellar_structure::{
//!     CentralCondition, EquationType, eos::Polytrope, star,
//! };
//!
//! let eos = Polytrope::new(100.0, 2.0)?;
//! let central = CentralCondition::geometrized_density(1.0e-3);
//!
//! let solution = star::solve_unobserved(&eos, EquationType::Tov, &central, &star::Config::default())?;
//! let surface = solution.trajectory.surface();
//! assert!(surface.radius > 0.0 && surface.mass > 0.0);
//! # Ok::<(), stellar_structure::Error>(())
//! ```

mod error;

pub mod central;
pub mod eos;
pub mod equations;
pub mod star;
pub mod sweep;

pub use central::{CentralCondition, ValueKind};
pub use equations::{EquationType, Newtonian, Tov};
pub use error::Error;
pub use star::{Sample, Trajectory, solve_star};
pub use sweep::{MassRadiusCurve, mass_radius};
