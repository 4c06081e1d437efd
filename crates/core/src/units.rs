//! Unit systems and conversion between them.
//!
//! The integrator works in geometrized units, where `G = c = 1` and lengths
//! are measured in kilometres. Mass is then a length (km) while pressure,
//! energy density, and rest-mass density are inverse areas (km⁻²).
//!
//! Central conditions are usually known in cgs or SI, and results are
//! reported in km, solar masses, and dyn/cm². The [`ConversionTable`] holds
//! the factors for every `(system, quantity, system)` triple.

pub mod constants;
mod table;

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use table::ConversionTable;

/// A system of units a value can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// Centimetre, gram, dyn/cm², g/cm³.
    Cgs,
    /// Metre, kilogram, Pa, kg/m³.
    Si,
    /// `G = c = 1` with lengths in kilometres.
    #[cfg_attr(feature = "serde", serde(alias = "geom"))]
    Geometrized,
}

impl UnitSystem {
    pub const ALL: [Self; 3] = [Self::Cgs, Self::Si, Self::Geometrized];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Cgs => 0,
            Self::Si => 1,
            Self::Geometrized => 2,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cgs => "cgs",
            Self::Si => "si",
            Self::Geometrized => "geom",
        })
    }
}

impl FromStr for UnitSystem {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cgs" => Ok(Self::Cgs),
            "si" => Ok(Self::Si),
            "geom" | "geometrized" => Ok(Self::Geometrized),
            _ => Err(UnitError::UnknownUnitSystem { name: s.to_owned() }),
        }
    }
}

/// A physical quantity the conversion table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quantity {
    Length,
    Mass,
    /// Pressure, and energy density which shares its dimensions.
    Pressure,
    /// Rest-mass density.
    Density,
}

impl Quantity {
    pub const ALL: [Self; 4] = [Self::Length, Self::Mass, Self::Pressure, Self::Density];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Length => 0,
            Self::Mass => 1,
            Self::Pressure => 2,
            Self::Density => 3,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Pressure => "pressure",
            Self::Density => "density",
        })
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(Self::Length),
            "mass" => Ok(Self::Mass),
            "pressure" => Ok(Self::Pressure),
            "density" => Ok(Self::Density),
            _ => Err(UnitError::UnknownQuantity { name: s.to_owned() }),
        }
    }
}

/// Errors from unit lookup and conversion table validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// No unit system goes by this name.
    #[error("unknown unit system `{name}` (expected cgs, si, or geom)")]
    UnknownUnitSystem { name: String },

    /// No convertible quantity goes by this name.
    #[error("unknown quantity `{name}` (expected length, mass, pressure, or density)")]
    UnknownQuantity { name: String },

    /// A table entry is zero, negative, or non-finite.
    #[error("invalid {quantity} factor {factor} from {from} to {to}")]
    InvalidFactor {
        from: UnitSystem,
        quantity: Quantity,
        to: UnitSystem,
        factor: f64,
    },

    /// A direct factor disagrees with the route through geometrized units.
    #[error(
        "inconsistent {quantity} factor from {from} to {to}: direct {direct}, via geom {via_geometrized}"
    )]
    InconsistentTable {
        from: UnitSystem,
        quantity: Quantity,
        to: UnitSystem,
        direct: f64,
        via_geometrized: f64,
    },
}
