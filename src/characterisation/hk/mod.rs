//! Horvath-Kawazoe family of micropore models
//!
//! A model of this family predicts, for a pore of size ℓ, the relative
//! pressure at which it fills:
//!
//! $$\ln\frac{p}{p_0} = \frac{N_A}{RT}\,\bar\varepsilon(\ell)$$
//!
//! where ε̄ is the average interaction energy of an adsorbate molecule with
//! the pore walls (and, for Rege-Yang, with the layers already adsorbed).
//! Inverting this relation point by point turns an isotherm into a
//! pore-size distribution.
//!
//! # Module Organization
//!
//! - [`horvath_kawazoe`]: original HK potentials (slit, Saito-Foley
//!   cylinder, Cheng-Yang sphere)
//! - [`rege_yang`]: layer-resolved Rege-Yang potentials
//! - [`solve`]: per-point inversion, with the optional Cheng-Yang term
//! - [`distribution`]: conversion of widths and loadings into a PSD
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::characterisation::hk::{build_potential, HkParameters, PoreGeometry, PsdModel};
//! use adsorb_rs::physics::registry;
//!
//! let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
//! let carbon = registry::get_hk_model("Carbon(HK)").unwrap();
//! let params = HkParameters::new(&nitrogen, &carbon, 77.355);
//!
//! let slit = build_potential(PsdModel::HK, PoreGeometry::Slit, &params);
//! // narrower pores fill at lower pressure
//! assert!(slit.potential(0.8) < slit.potential(1.2));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{AdsorptionError, Result};
use crate::physics::constants::n_over_rt;
use crate::physics::{dispersion_from_properties, AdsorbateProperties, MaterialProperties, PotentialModel};

// module declaration
pub mod distribution;
pub mod horvath_kawazoe;
pub mod rege_yang;
pub mod solve;

// re-export commonly used types for convenience
pub use distribution::{assemble_distribution, PsdResult};
pub use horvath_kawazoe::{HkCylinder, HkSlit, HkSphere};
pub use rege_yang::{RyCylinder, RySlit, RySphere};
pub use solve::{at_search_limit, solve_widths, BOUND_TOLERANCE, MAX_PORE_SIZE};

/// (2/5)^(1/6): distance of zero LJ energy over equilibrium distance
pub(crate) const SIGMA_RATIO: f64 = 0.858_374_219;

// =================================================================================================
// Selectors
// =================================================================================================

/// Micropore PSD model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PsdModel {
    /// Horvath-Kawazoe, `"HK"`
    #[default]
    HK,
    /// Horvath-Kawazoe with the Cheng-Yang correction, `"HK-CY"`
    HKCY,
    /// Rege-Yang, `"RY"`
    RY,
    /// Rege-Yang with the Cheng-Yang correction, `"RY-CY"`
    RYCY,
}

impl PsdModel {
    pub const ALL: [PsdModel; 4] = [PsdModel::HK, PsdModel::HKCY, PsdModel::RY, PsdModel::RYCY];

    pub fn name(&self) -> &'static str {
        match self {
            PsdModel::HK => "HK",
            PsdModel::HKCY => "HK-CY",
            PsdModel::RY => "RY",
            PsdModel::RYCY => "RY-CY",
        }
    }

    /// True for the Cheng-Yang corrected variants
    pub fn uses_cheng_yang(&self) -> bool {
        matches!(self, PsdModel::HKCY | PsdModel::RYCY)
    }

    /// True for the Rege-Yang variants
    pub fn is_rege_yang(&self) -> bool {
        matches!(self, PsdModel::RY | PsdModel::RYCY)
    }
}

impl FromStr for PsdModel {
    type Err = AdsorptionError;

    fn from_str(s: &str) -> Result<Self> {
        PsdModel::ALL.into_iter().find(|m| m.name() == s).ok_or_else(|| {
            let names: Vec<&str> = PsdModel::ALL.iter().map(|m| m.name()).collect();
            AdsorptionError::parameter(format!(
                "Model {s} not an option for psd. Available models are {names:?}"
            ))
        })
    }
}

impl fmt::Display for PsdModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pore geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoreGeometry {
    #[default]
    Slit,
    Cylinder,
    Sphere,
}

impl PoreGeometry {
    pub const ALL: [PoreGeometry; 3] = [PoreGeometry::Slit, PoreGeometry::Cylinder, PoreGeometry::Sphere];

    pub fn name(&self) -> &'static str {
        match self {
            PoreGeometry::Slit => "slit",
            PoreGeometry::Cylinder => "cylinder",
            PoreGeometry::Sphere => "sphere",
        }
    }

    /// Effective pore width from the solved size
    ///
    /// Slits are solved for the distance between wall nuclei, cylinders and
    /// spheres for a radius; one surface-atom diameter is removed in both
    /// cases.
    pub fn pore_width(&self, solved: f64, d_mat: f64) -> f64 {
        match self {
            PoreGeometry::Slit => solved - d_mat,
            PoreGeometry::Cylinder | PoreGeometry::Sphere => 2.0 * solved - d_mat,
        }
    }
}

impl FromStr for PoreGeometry {
    type Err = AdsorptionError;

    fn from_str(s: &str) -> Result<Self> {
        PoreGeometry::ALL.into_iter().find(|g| g.name() == s).ok_or_else(|| {
            let names: Vec<&str> = PoreGeometry::ALL.iter().map(|g| g.name()).collect();
            AdsorptionError::parameter(format!(
                "Geometry {s} not an option for pore size distribution. \
                 Available geometries are {names:?}"
            ))
        })
    }
}

impl fmt::Display for PoreGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Shared constants
// =================================================================================================

/// Constants shared by every potential of the family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HkParameters {
    /// Adsorbate diameter **\[nm\]**
    pub d_ads: f64,
    /// Surface atom diameter **\[nm\]**
    pub d_mat: f64,
    /// (d_ads + d_mat) / 2 **\[nm\]**
    pub d_eff: f64,
    /// Adsorbate surface density **\[m⁻²\]**
    pub n_ads: f64,
    /// Surface atom density **\[m⁻²\]**
    pub n_mat: f64,
    /// Adsorbate-adsorbate dispersion constant **\[J·m⁶\]**
    pub a_ads: f64,
    /// Adsorbate-material dispersion constant **\[J·m⁶\]**
    pub a_mat: f64,
    /// N_A / (R·T) **\[1/J\]**
    pub n_over_rt: f64,
}

impl HkParameters {
    pub fn new(adsorbate: &AdsorbateProperties, material: &MaterialProperties, temperature: f64) -> Self {
        let dispersion = dispersion_from_properties(adsorbate, material);

        Self {
            d_ads: adsorbate.molecular_diameter,
            d_mat: material.molecular_diameter,
            d_eff: (adsorbate.molecular_diameter + material.molecular_diameter) / 2.0,
            n_ads: adsorbate.surface_density,
            n_mat: material.surface_density,
            a_ads: dispersion.adsorbate,
            a_mat: dispersion.material,
            n_over_rt: n_over_rt(temperature),
        }
    }
}

/// Select the potential of a (model, geometry) pair
///
/// The Cheng-Yang variants share the potential of their base model; the
/// correction is applied by the solver.
pub fn build_potential(
    model: PsdModel,
    geometry: PoreGeometry,
    params: &HkParameters,
) -> Box<dyn PotentialModel> {
    match (model.is_rege_yang(), geometry) {
        (false, PoreGeometry::Slit) => Box::new(HkSlit::new(params)),
        (false, PoreGeometry::Cylinder) => Box::new(HkCylinder::new(params)),
        (false, PoreGeometry::Sphere) => Box::new(HkSphere::new(params)),
        (true, PoreGeometry::Slit) => Box::new(RySlit::new(params)),
        (true, PoreGeometry::Cylinder) => Box::new(RyCylinder::new(params)),
        (true, PoreGeometry::Sphere) => Box::new(RySphere::new(params)),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::registry;
    use approx::assert_relative_eq;

    pub(crate) fn nitrogen_on_carbon() -> HkParameters {
        let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
        let carbon = registry::get_hk_model("Carbon(HK)").unwrap();
        HkParameters::new(&nitrogen, &carbon, 77.355)
    }

    #[test]
    fn test_model_names_roundtrip() {
        for model in PsdModel::ALL {
            assert_eq!(model.name().parse::<PsdModel>().unwrap(), model);
        }
        for geometry in PoreGeometry::ALL {
            assert_eq!(geometry.to_string().parse::<PoreGeometry>().unwrap(), geometry);
        }
    }

    #[test]
    fn test_invalid_names() {
        let err = "XX".parse::<PsdModel>().unwrap_err();
        assert!(err.is_parameter());
        assert!(err.to_string().contains("HK-CY"));

        let err = "cone".parse::<PoreGeometry>().unwrap_err();
        assert!(err.to_string().contains("cone"));
        assert!(err.to_string().contains("sphere"));
    }

    #[test]
    fn test_model_flags() {
        assert!(!PsdModel::HK.uses_cheng_yang());
        assert!(PsdModel::RYCY.uses_cheng_yang());
        assert!(PsdModel::RY.is_rege_yang());
        assert!(!PsdModel::HKCY.is_rege_yang());
    }

    #[test]
    fn test_pore_width_transform() {
        assert_relative_eq!(PoreGeometry::Slit.pore_width(1.0, 0.34), 0.66);
        assert_relative_eq!(PoreGeometry::Cylinder.pore_width(1.0, 0.34), 1.66);
        assert_relative_eq!(PoreGeometry::Sphere.pore_width(0.5, 0.34), 0.66);
    }

    #[test]
    fn test_parameters() {
        let params = nitrogen_on_carbon();

        assert_relative_eq!(params.d_eff, 0.32);
        assert_relative_eq!(params.n_over_rt, 9.3633e20, max_relative = 1e-4);
        assert!(params.a_mat > params.a_ads);
    }

    #[test]
    fn test_build_potential_dispatch() {
        let params = nitrogen_on_carbon();

        let names: Vec<String> = PsdModel::ALL
            .iter()
            .flat_map(|&model| {
                PoreGeometry::ALL
                    .iter()
                    .map(move |&geometry| build_potential(model, geometry, &params).name().to_string())
            })
            .collect();

        assert_eq!(names[0], "HK slit");
        assert_eq!(names[4], "HK cylinder");
        assert_eq!(names[8], "RY sphere");
        assert_eq!(names.len(), 12);
    }
}
