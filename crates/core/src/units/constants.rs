//! Physical constants in cgs units (CODATA 2018, IAU 2015).

/// Newtonian gravitational constant, cm³/(g·s²).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-8;

/// Speed of light in vacuum, cm/s.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e10;

/// Nominal solar mass, g.
pub const SOLAR_MASS: f64 = 1.988_47e33;

/// Centimetres per kilometre.
pub const CM_PER_KM: f64 = 1.0e5;

/// `G/c²`, the length of one gram in cm.
pub const G_OVER_C2: f64 = GRAVITATIONAL_CONSTANT / (SPEED_OF_LIGHT * SPEED_OF_LIGHT);

/// `G/c⁴`, converting dyn/cm² (or erg/cm³) to cm⁻².
pub const G_OVER_C4: f64 = G_OVER_C2 / (SPEED_OF_LIGHT * SPEED_OF_LIGHT);

/// The solar mass in geometrized units, km.
pub const SOLAR_MASS_KM: f64 = G_OVER_C2 * SOLAR_MASS / CM_PER_KM;
