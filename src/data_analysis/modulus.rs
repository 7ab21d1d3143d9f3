// src/data_analysis/modulus.rs
//
// Young's modulus from the fundamental bending frequency of a uniform beam
// with a solid rectangular cross-section.

use serde::{Deserialize, Serialize};

use crate::constants::{CANTILEVER_FUNDAMENTAL_MODE_FACTOR, PASCALS_PER_GIGAPASCAL};

/// How the beam is held. Selects the fundamental-mode eigenvalue factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// Clamped at one end, free at the other.
    #[default]
    Cantilever,
}

impl BoundaryCondition {
    pub fn mode_factor(&self) -> f64 {
        match self {
            BoundaryCondition::Cantilever => CANTILEVER_FUNDAMENTAL_MODE_FACTOR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryCondition::Cantilever => "cantilever",
        }
    }
}

/// Second moment of area of a solid rectangle bending about its width: b * h^3 / 12.
pub fn moment_of_inertia(width_m: f64, thickness_m: f64) -> f64 {
    width_m * thickness_m.powi(3) / 12.0
}

/// E = ((f / factor)^2 * rho * b * h * L^4) / I, returned in GPa.
///
/// A zero frequency gives 0; a zero moment of inertia gives a non-finite value.
pub fn youngs_modulus_gpa(
    frequency_hz: f64,
    width_m: f64,
    thickness_m: f64,
    density_kg_m3: f64,
    moment_of_inertia_m4: f64,
    length_m: f64,
    boundary: BoundaryCondition,
) -> f64 {
    let mass_per_length = density_kg_m3 * width_m * thickness_m;
    let modulus_pa = ((frequency_hz / boundary.mode_factor()).powi(2)
        * mass_per_length
        * length_m.powi(4))
        / moment_of_inertia_m4;
    modulus_pa / PASCALS_PER_GIGAPASCAL
}

/// Beam cross-section and material, with the moment of inertia computed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamGeometry {
    pub width_m: f64,
    pub thickness_m: f64,
    pub density_kg_m3: f64,
    pub moment_of_inertia_m4: f64,
}

impl BeamGeometry {
    pub fn new(width_m: f64, thickness_m: f64, density_kg_m3: f64) -> Self {
        Self {
            width_m,
            thickness_m,
            density_kg_m3,
            moment_of_inertia_m4: moment_of_inertia(width_m, thickness_m),
        }
    }

    pub fn modulus_gpa(
        &self,
        frequency_hz: f64,
        length_m: f64,
        boundary: BoundaryCondition,
    ) -> f64 {
        youngs_modulus_gpa(
            frequency_hz,
            self.width_m,
            self.thickness_m,
            self.density_kg_m3,
            self.moment_of_inertia_m4,
            length_m,
            boundary,
        )
    }
}
