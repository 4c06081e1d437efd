//! Central conditions a star is integrated from.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stellar_core::{
    EosError, EquationOfState,
    units::{ConversionTable, Quantity, UnitError, UnitSystem},
};
use uom::si::f64::{MassDensity, Pressure};

use crate::Error;

/// Whether a central value is a pressure or a rest-mass density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    Pressure,
    Density,
}

impl ValueKind {
    /// The quantity whose conversion factors apply to values of this kind.
    #[must_use]
    pub fn quantity(self) -> Quantity {
        match self {
            Self::Pressure => Quantity::Pressure,
            Self::Density => Quantity::Density,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.quantity(), f)
    }
}

impl FromStr for ValueKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Quantity>() {
            Ok(Quantity::Pressure) => Ok(Self::Pressure),
            Ok(Quantity::Density) => Ok(Self::Density),
            _ => Err(UnitError::UnknownQuantity { name: s.to_owned() }),
        }
    }
}

/// A central pressure or density, tagged with its unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CentralCondition {
    pub value: f64,
    pub kind: ValueKind,
    pub units: UnitSystem,
}

impl CentralCondition {
    #[must_use]
    pub const fn new(value: f64, kind: ValueKind, units: UnitSystem) -> Self {
        Self { value, kind, units }
    }

    /// A central pressure in `units`.
    #[must_use]
    pub const fn pressure(value: f64, units: UnitSystem) -> Self {
        Self::new(value, ValueKind::Pressure, units)
    }

    /// A central rest-mass density in `units`.
    #[must_use]
    pub const fn density(value: f64, units: UnitSystem) -> Self {
        Self::new(value, ValueKind::Density, units)
    }

    /// A central rest-mass density in km⁻².
    #[must_use]
    pub const fn geometrized_density(value: f64) -> Self {
        Self::density(value, UnitSystem::Geometrized)
    }

    /// Builds a central condition from loosely typed names, such as
    /// `("density", "cgs")`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::UnknownQuantity`] or
    /// [`UnitError::UnknownUnitSystem`] if either name is not recognized.
    pub fn parse(value: f64, kind: &str, units: &str) -> Result<Self, UnitError> {
        Ok(Self::new(value, kind.parse()?, units.parse()?))
    }

    /// A central pressure from a dimensioned quantity.
    #[must_use]
    pub fn from_pressure(pressure: Pressure) -> Self {
        let table = ConversionTable::standard();
        Self::pressure(table.geometrized_pressure(pressure), UnitSystem::Geometrized)
    }

    /// A central rest-mass density from a dimensioned quantity.
    #[must_use]
    pub fn from_mass_density(density: MassDensity) -> Self {
        let table = ConversionTable::standard();
        Self::geometrized_density(table.geometrized_density(density))
    }

    /// Resolves the central pressure in geometrized units.
    ///
    /// Densities are converted to geometrized units first and then to a
    /// pressure through the equation of state.
    ///
    /// # Errors
    ///
    /// Returns [`EosError::InvalidPressure`] or [`EosError::InvalidDensity`]
    /// if the value is not finite and positive, and propagates errors from
    /// the equation of state.
    pub fn central_pressure<E: EquationOfState>(
        &self,
        eos: &E,
        table: &ConversionTable,
    ) -> Result<f64, Error> {
        let value = table.convert(
            self.value,
            self.kind.quantity(),
            self.units,
            UnitSystem::Geometrized,
        );

        let pressure = match self.kind {
            ValueKind::Pressure => value,
            ValueKind::Density => {
                if !value.is_finite() || value <= 0.0 {
                    return Err(EosError::InvalidDensity { density: value }.into());
                }
                eos.pressure(value)?
            }
        };

        if pressure.is_finite() && pressure > 0.0 {
            Ok(pressure)
        } else {
            Err(EosError::InvalidPressure { pressure }.into())
        }
    }
}

impl fmt::Display for CentralCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "central {} {:e} ({})", self.kind, self.value, self.units)
    }
}
