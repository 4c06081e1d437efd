use uom::si::{
    f64::{Length, Mass, MassDensity, Pressure},
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
};

use super::{
    Quantity, UnitError, UnitSystem,
    constants::{CM_PER_KM, G_OVER_C2, G_OVER_C4, SOLAR_MASS},
};

const SYSTEMS: usize = UnitSystem::ALL.len();
const QUANTITIES: usize = Quantity::ALL.len();

/// Factors indexed as `[from][quantity][to]`.
type Factors = [[[f64; SYSTEMS]; QUANTITIES]; SYSTEMS];

/// Relative tolerance for the consistency check in [`ConversionTable::new`].
const CONSISTENCY_TOL: f64 = 1e-12;

/// Square kilometres per square centimetre, inverted: cm⁻² to km⁻².
const KM2_PER_CM2: f64 = CM_PER_KM * CM_PER_KM;

/// One unit of each `[system][quantity]` expressed in geometrized units.
const TO_GEOMETRIZED: [[f64; QUANTITIES]; SYSTEMS] = [
    // cgs: cm, g, dyn/cm², g/cm³
    [
        1.0 / CM_PER_KM,
        G_OVER_C2 / CM_PER_KM,
        G_OVER_C4 * KM2_PER_CM2,
        G_OVER_C2 * KM2_PER_CM2,
    ],
    // SI: m, kg, Pa, kg/m³
    [
        1.0e2 / CM_PER_KM,
        1.0e3 * G_OVER_C2 / CM_PER_KM,
        1.0e1 * G_OVER_C4 * KM2_PER_CM2,
        1.0e-3 * G_OVER_C2 * KM2_PER_CM2,
    ],
    // geom: km, km, km⁻², km⁻²
    [1.0; QUANTITIES],
];

const fn expand(to_geometrized: &[[f64; QUANTITIES]; SYSTEMS]) -> Factors {
    let mut factors = [[[0.0; SYSTEMS]; QUANTITIES]; SYSTEMS];
    let mut from = 0;
    while from < SYSTEMS {
        let mut quantity = 0;
        while quantity < QUANTITIES {
            let mut to = 0;
            while to < SYSTEMS {
                factors[from][quantity][to] =
                    to_geometrized[from][quantity] / to_geometrized[to][quantity];
                to += 1;
            }
            quantity += 1;
        }
        from += 1;
    }
    factors
}

static STANDARD: ConversionTable = ConversionTable {
    factors: expand(&TO_GEOMETRIZED),
};

/// Multiplicative conversion factors between unit systems.
///
/// Every `(from, quantity, to)` triple has an entry, since the table is
/// indexed by the [`UnitSystem`] and [`Quantity`] enums. A table is only
/// constructed after checking that every factor is finite and positive and
/// that converting directly agrees with converting through geometrized units.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    factors: Factors,
}

impl ConversionTable {
    /// Returns the table built from the CODATA/IAU constants in
    /// [`constants`](super::constants).
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Creates a table from explicit `[from][quantity][to]` factors.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::InvalidFactor`] for a non-finite or non-positive
    /// factor, and [`UnitError::InconsistentTable`] if any direct factor
    /// disagrees with the product of its legs through geometrized units.
    pub fn new(factors: Factors) -> Result<Self, UnitError> {
        let table = Self { factors };
        table.validate()?;
        Ok(table)
    }

    /// Creates a table from the size of one unit of each system's quantities
    /// in geometrized units.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::InvalidFactor`] if any entry is non-finite or
    /// non-positive.
    pub fn from_geometrized(
        to_geometrized: [[f64; QUANTITIES]; SYSTEMS],
    ) -> Result<Self, UnitError> {
        Self::new(expand(&to_geometrized))
    }

    fn validate(&self) -> Result<(), UnitError> {
        for from in UnitSystem::ALL {
            for quantity in Quantity::ALL {
                for to in UnitSystem::ALL {
                    let factor = self.factor(from, quantity, to);
                    if !factor.is_finite() || factor <= 0.0 {
                        return Err(UnitError::InvalidFactor {
                            from,
                            quantity,
                            to,
                            factor,
                        });
                    }
                }
            }
        }

        let geom = UnitSystem::Geometrized;
        for from in UnitSystem::ALL {
            for quantity in Quantity::ALL {
                for to in UnitSystem::ALL {
                    let direct = self.factor(from, quantity, to);
                    let via_geometrized = if from == to {
                        1.0
                    } else {
                        self.factor(from, quantity, geom) * self.factor(geom, quantity, to)
                    };
                    if (direct - via_geometrized).abs() > CONSISTENCY_TOL * direct.abs() {
                        return Err(UnitError::InconsistentTable {
                            from,
                            quantity,
                            to,
                            direct,
                            via_geometrized,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns the factor that converts `quantity` from `from` to `to`.
    #[must_use]
    pub fn factor(&self, from: UnitSystem, quantity: Quantity, to: UnitSystem) -> f64 {
        self.factors[from.index()][quantity.index()][to.index()]
    }

    /// Converts `value` of `quantity` from `from` to `to`.
    #[must_use]
    pub fn convert(&self, value: f64, quantity: Quantity, from: UnitSystem, to: UnitSystem) -> f64 {
        value * self.factor(from, quantity, to)
    }

    /// Converts a geometrized length to kilometres.
    #[must_use]
    pub fn to_kilometers(&self, length: f64) -> f64 {
        self.convert(length, Quantity::Length, UnitSystem::Geometrized, UnitSystem::Cgs) / CM_PER_KM
    }

    /// Converts a geometrized mass to solar masses.
    #[must_use]
    pub fn to_solar_masses(&self, mass: f64) -> f64 {
        self.convert(mass, Quantity::Mass, UnitSystem::Geometrized, UnitSystem::Cgs) / SOLAR_MASS
    }

    /// Converts a geometrized pressure to dyn/cm².
    #[must_use]
    pub fn to_cgs_pressure(&self, pressure: f64) -> f64 {
        self.convert(pressure, Quantity::Pressure, UnitSystem::Geometrized, UnitSystem::Cgs)
    }

    /// Expresses a dimensioned length in geometrized units.
    #[must_use]
    pub fn geometrized_length(&self, length: Length) -> f64 {
        self.from_si(length.get::<meter>(), Quantity::Length)
    }

    /// Expresses a dimensioned mass in geometrized units.
    #[must_use]
    pub fn geometrized_mass(&self, mass: Mass) -> f64 {
        self.from_si(mass.get::<kilogram>(), Quantity::Mass)
    }

    /// Expresses a dimensioned pressure in geometrized units.
    #[must_use]
    pub fn geometrized_pressure(&self, pressure: Pressure) -> f64 {
        self.from_si(pressure.get::<pascal>(), Quantity::Pressure)
    }

    /// Expresses a dimensioned mass density in geometrized units.
    #[must_use]
    pub fn geometrized_density(&self, density: MassDensity) -> f64 {
        self.from_si(density.get::<kilogram_per_cubic_meter>(), Quantity::Density)
    }

    /// Creates a dimensioned length from a geometrized one.
    #[must_use]
    pub fn length(&self, length: f64) -> Length {
        Length::new::<meter>(self.to_si(length, Quantity::Length))
    }

    /// Creates a dimensioned mass from a geometrized one.
    #[must_use]
    pub fn mass(&self, mass: f64) -> Mass {
        Mass::new::<kilogram>(self.to_si(mass, Quantity::Mass))
    }

    /// Creates a dimensioned pressure from a geometrized one.
    #[must_use]
    pub fn pressure(&self, pressure: f64) -> Pressure {
        Pressure::new::<pascal>(self.to_si(pressure, Quantity::Pressure))
    }

    fn from_si(&self, value: f64, quantity: Quantity) -> f64 {
        self.convert(value, quantity, UnitSystem::Si, UnitSystem::Geometrized)
    }

    fn to_si(&self, value: f64, quantity: Quantity) -> f64 {
        self.convert(value, quantity, UnitSystem::Geometrized, UnitSystem::Si)
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        STANDARD.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        length::{centimeter, kilometer},
        mass::gram,
        mass_density::gram_per_cubic_centimeter,
    };

    use crate::units::constants::SOLAR_MASS_KM;

    #[test]
    fn standard_table_is_valid() {
        let table = ConversionTable::new(STANDARD.factors).expect("standard table validates");
        assert_eq!(&table, ConversionTable::standard());
    }

    #[test]
    fn cgs_round_trip_through_geometrized() {
        let table = ConversionTable::standard();
        let samples = [
            (Quantity::Length, 1.2e6),
            (Quantity::Mass, 2.8e33),
            (Quantity::Pressure, 3.5e35),
            (Quantity::Density, 7.0e14),
        ];

        for (quantity, value) in samples {
            let geom = table.convert(value, quantity, UnitSystem::Cgs, UnitSystem::Geometrized);
            let back = table.convert(geom, quantity, UnitSystem::Geometrized, UnitSystem::Cgs);
            assert_relative_eq!(back, value, max_relative = 1e-14);
        }
    }

    #[test]
    fn direct_factors_match_route_through_geometrized() {
        let table = ConversionTable::standard();
        let geom = UnitSystem::Geometrized;
        for quantity in Quantity::ALL {
            let direct = table.factor(UnitSystem::Si, quantity, UnitSystem::Cgs);
            let via = table.factor(UnitSystem::Si, quantity, geom)
                * table.factor(geom, quantity, UnitSystem::Cgs);
            assert_relative_eq!(direct, via, max_relative = 1e-14);
        }
    }

    #[test]
    fn si_to_cgs_agrees_with_uom() {
        let table = ConversionTable::standard();
        let (si, cgs) = (UnitSystem::Si, UnitSystem::Cgs);

        assert_relative_eq!(
            table.factor(si, Quantity::Length, cgs),
            Length::new::<meter>(1.0).get::<centimeter>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            table.factor(si, Quantity::Mass, cgs),
            Mass::new::<kilogram>(1.0).get::<gram>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            table.factor(si, Quantity::Density, cgs),
            MassDensity::new::<kilogram_per_cubic_meter>(1.0).get::<gram_per_cubic_centimeter>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(table.factor(si, Quantity::Pressure, cgs), 10.0);
    }

    #[test]
    fn geometrized_lengths_are_kilometres() {
        let table = ConversionTable::standard();
        assert_relative_eq!(table.to_kilometers(12.5), 12.5, max_relative = 1e-14);
        assert_relative_eq!(
            table.length(12.5).get::<kilometer>(),
            12.5,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            table.geometrized_length(Length::new::<kilometer>(3.0)),
            3.0,
            max_relative = 1e-14
        );
    }

    #[test]
    fn solar_mass_converts_to_one() {
        let table = ConversionTable::standard();
        let sun = Mass::new::<gram>(SOLAR_MASS);
        let geom = table.geometrized_mass(sun);
        assert_relative_eq!(geom, SOLAR_MASS_KM, max_relative = 1e-12);
        assert_relative_eq!(table.to_solar_masses(geom), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn dimensioned_pressure_round_trips() {
        let table = ConversionTable::standard();
        let pressure = Pressure::new::<pascal>(3.0e34);
        let geom = table.geometrized_pressure(pressure);
        assert_relative_eq!(
            table.pressure(geom).get::<pascal>(),
            3.0e34,
            max_relative = 1e-12
        );
        assert_relative_eq!(table.to_cgs_pressure(geom), 3.0e35, max_relative = 1e-12);
    }

    #[test]
    fn rejects_non_positive_factor() {
        let mut to_geometrized = TO_GEOMETRIZED;
        to_geometrized[UnitSystem::Si.index()][Quantity::Mass.index()] = 0.0;

        let err = ConversionTable::from_geometrized(to_geometrized).unwrap_err();
        assert!(matches!(
            err,
            UnitError::InvalidFactor {
                quantity: Quantity::Mass,
                ..
            }
        ));
    }

    #[test]
    fn rejects_inconsistent_direct_factor() {
        let mut factors = STANDARD.factors;
        let (cgs, si) = (UnitSystem::Cgs.index(), UnitSystem::Si.index());
        factors[cgs][Quantity::Pressure.index()][si] *= 1.5;

        let err = ConversionTable::new(factors).unwrap_err();
        assert!(matches!(
            err,
            UnitError::InconsistentTable {
                quantity: Quantity::Pressure,
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_unit_identity() {
        let mut factors = STANDARD.factors;
        let cgs = UnitSystem::Cgs.index();
        factors[cgs][Quantity::Length.index()][cgs] = 2.0;

        assert!(matches!(
            ConversionTable::new(factors),
            Err(UnitError::InconsistentTable { .. })
        ));
    }
}
