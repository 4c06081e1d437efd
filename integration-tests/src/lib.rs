//! Closed-form stellar solutions the integrator is checked against.
//!
//! All values are in geometrized units (km, km⁻²).

use std::f64::consts::PI;

/// A star's radius and total mass, both in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub radius: f64,
    pub mass: f64,
}

/// Newtonian star of uniform density.
///
/// Hydrostatic equilibrium gives `p(r) = p_c - (2π/3) ρ² r²`, so the surface
/// sits at `R = √(3 p_c / 2πρ²)`.
#[must_use]
pub fn newtonian_uniform(density: f64, central_pressure: f64) -> Star {
    let radius = (3.0 * central_pressure / (2.0 * PI * density * density)).sqrt();
    Star {
        radius,
        mass: uniform_mass(density, radius),
    }
}

/// Newtonian `n = 1` polytrope, `p = K ρ²`.
///
/// The Lane-Emden solution is `θ(ξ) = sin ξ / ξ` with `r = α ξ` and
/// `α = √(K / 2π)`, so the radius is `π α` whatever the central density.
#[must_use]
pub fn newtonian_n1_polytrope(k: f64, central_density: f64) -> Star {
    let alpha = (k / (2.0 * PI)).sqrt();
    Star {
        radius: PI * alpha,
        mass: 4.0 * PI * PI * alpha.powi(3) * central_density,
    }
}

/// Relativistic star of uniform energy density (Schwarzschild interior).
///
/// Inverts `p_c = ε (1 - s) / (3s - 1)` with `s = √(1 - 2M/R)` and
/// `M = (4π/3) ε R³`.
#[must_use]
pub fn schwarzschild_interior(energy_density: f64, central_pressure: f64) -> Star {
    let x = central_pressure / energy_density;
    let s = (1.0 + x) / (1.0 + 3.0 * x);
    let radius = (3.0 * (1.0 - s * s) / (8.0 * PI * energy_density)).sqrt();
    Star {
        radius,
        mass: uniform_mass(energy_density, radius),
    }
}

fn uniform_mass(density: f64, radius: f64) -> f64 {
    4.0 / 3.0 * PI * density * radius.powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn schwarzschild_interior_reproduces_central_pressure() {
        let star = schwarzschild_interior(1e-3, 1e-4);
        let s = (1.0 - 2.0 * star.mass / star.radius).sqrt();
        assert_relative_eq!(1e-3 * (1.0 - s) / (3.0 * s - 1.0), 1e-4, max_relative = 1e-12);
    }

    #[test]
    fn weak_field_limit_is_newtonian() {
        let relativistic = schwarzschild_interior(1e-3, 1e-8);
        let newtonian = newtonian_uniform(1e-3, 1e-8);
        assert_relative_eq!(relativistic.radius, newtonian.radius, max_relative = 1e-4);
    }
}
