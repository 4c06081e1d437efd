#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use stellar_core::{
    State,
    units::{ConversionTable, constants::SOLAR_MASS},
};
use uom::si::{
    f64::{Length, Mass, Pressure},
    length::kilometer,
    mass::gram,
    pressure::pascal,
};

/// Pascals per dyn/cm².
const PASCAL_PER_BARYE: f64 = 0.1;

/// Indicates how a star solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The pressure reached zero and the last sample is the surface.
    Surface,
    /// An observer stopped the solve before the surface was reached.
    StoppedByObserver,
}

/// The result of a star solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: Status,
    pub trajectory: Trajectory,
    /// Number of integration steps taken.
    pub steps: usize,
}

/// One point of a stellar profile in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Radius in kilometres.
    pub radius: f64,
    /// Enclosed mass in solar masses.
    pub mass: f64,
    /// Pressure in dyn/cm².
    pub pressure: f64,
}

impl Sample {
    #[must_use]
    pub fn radius_length(&self) -> Length {
        Length::new::<kilometer>(self.radius)
    }

    #[must_use]
    pub fn mass_quantity(&self) -> Mass {
        Mass::new::<gram>(self.mass * SOLAR_MASS)
    }

    #[must_use]
    pub fn pressure_quantity(&self) -> Pressure {
        Pressure::new::<pascal>(self.pressure * PASCAL_PER_BARYE)
    }
}

/// A radial profile from the start radius outward, in physical units.
///
/// Radius (km), enclosed mass (M☉), and pressure (dyn/cm²) are stored as
/// aligned sequences. A trajectory always holds at least one sample, and
/// radius increases strictly from one sample to the next.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Profile"))]
pub struct Trajectory {
    radius: Vec<f64>,
    mass: Vec<f64>,
    pressure: Vec<f64>,
}

/// Unchecked sequences read by a deserializer.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct Profile {
    radius: Vec<f64>,
    mass: Vec<f64>,
    pressure: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<Profile> for Trajectory {
    type Error = &'static str;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        let Profile {
            radius,
            mass,
            pressure,
        } = profile;

        if radius.is_empty() {
            return Err("a trajectory holds at least one sample");
        }
        if mass.len() != radius.len() || pressure.len() != radius.len() {
            return Err("radius, mass, and pressure must have the same length");
        }

        Ok(Self {
            radius,
            mass,
            pressure,
        })
    }
}

impl Trajectory {
    /// Converts geometrized `(radius, state)` samples to physical units.
    ///
    /// `samples` must not be empty.
    pub(crate) fn from_geometrized(samples: &[(f64, State)], table: &ConversionTable) -> Self {
        let mut radius = Vec::with_capacity(samples.len());
        let mut mass = Vec::with_capacity(samples.len());
        let mut pressure = Vec::with_capacity(samples.len());

        for (r, state) in samples {
            radius.push(table.to_kilometers(*r));
            mass.push(table.to_solar_masses(state.mass));
            pressure.push(table.to_cgs_pressure(state.pressure));
        }

        debug_assert!(!radius.is_empty(), "a trajectory holds at least one sample");
        Self {
            radius,
            mass,
            pressure,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.radius.len()
    }

    /// Returns `true` if there are no samples, which never holds for a
    /// trajectory returned by a solve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radius.is_empty()
    }

    #[must_use]
    pub fn radius(&self) -> &[f64] {
        &self.radius
    }

    #[must_use]
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    #[must_use]
    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    /// Returns the sample at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            radius: *self.radius.get(index)?,
            mass: *self.mass.get(index)?,
            pressure: *self.pressure.get(index)?,
        })
    }

    /// Returns the last sample.
    ///
    /// For a solve that ended with [`Status::Surface`], this is the star's
    /// surface radius and total mass.
    #[must_use]
    pub fn surface(&self) -> Sample {
        let last = self.len() - 1;
        Sample {
            radius: self.radius[last],
            mass: self.mass[last],
            pressure: self.pressure[last],
        }
    }

    /// Iterates over the samples from the start radius outward.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = Sample> + '_ {
        (0..self.len()).map(|i| Sample {
            radius: self.radius[i],
            mass: self.mass[i],
            pressure: self.pressure[i],
        })
    }

    /// Consumes the trajectory and returns `(radius, mass, pressure)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.radius, self.mass, self.pressure)
    }
}
