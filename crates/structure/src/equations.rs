//! Stellar structure equations.
//!
//! Both formulations map `(r, (m, p))` to `(dm/dr, dp/dr)` in geometrized
//! units and hold their equation of state for the whole solve. Neither is
//! defined at `r = 0`.
//!
//! A state with negative pressure gets the zero derivative. The adaptive
//! stepper probes past the surface while estimating its error, and freezing
//! the state there keeps the equation of state inside its domain.

mod newtonian;
mod tov;

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use newtonian::Newtonian;
pub use tov::Tov;

use crate::Error;

/// Selects which structure equations a solve uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EquationType {
    /// Tolman-Oppenheimer-Volkoff hydrostatic equilibrium in general relativity.
    Tov,
    /// Newtonian hydrostatic equilibrium.
    Newtonian,
}

impl fmt::Display for EquationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tov => "tov",
            Self::Newtonian => "newtonian",
        })
    }
}

impl FromStr for EquationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tov" => Ok(Self::Tov),
            "newton" | "newtonian" => Ok(Self::Newtonian),
            _ => Err(Error::UnknownEquationType { name: s.to_owned() }),
        }
    }
}
