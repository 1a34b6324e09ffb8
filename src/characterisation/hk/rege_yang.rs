//! Rege-Yang potentials
//!
//! Rege & Yang (2000) resolve the pore into concentric layers of adsorbate.
//! The first layer interacts with the wall, every further layer with the
//! layer before it, and the pore potential is the population-weighted
//! average over the layers.
//!
//! For slits the layers are flat and of equal population, so the average
//! reduces to a closed form in the number of layers `(ℓ − d_mat)/d_ads`.

use std::f64::consts::PI;

use crate::characterisation::hk::horvath_kawazoe::series_terms;
use crate::characterisation::hk::{HkParameters, SIGMA_RATIO};
use crate::physics::constants::NM_TO_M;
use crate::physics::PotentialModel;

/// Number of adsorbate layers in a curved pore of size `width`
///
/// Never fewer than one: the contact layer always exists.
fn layer_count(width: f64, d_mat: f64, d_ads: f64) -> usize {
    let layers = ((width - d_mat) / d_ads - 0.5) as i64;
    layers.max(1) as usize
}

// =================================================================================================
// Slit
// =================================================================================================

/// Layered slit pore
#[derive(Debug, Clone, PartialEq)]
pub struct RySlit {
    d_eff: f64,
    d_mat: f64,
    d_ads: f64,
    n_over_rt: f64,
    sigma_mat: f64,
    /// n_mat·A_mat / (2σ_mat⁴), SI
    surface_coefficient: f64,
    /// reduced LJ term at contact, (σ/d)¹⁰ − (σ/d)⁴
    contact_term: f64,
    /// adsorbate-adsorbate layer potential
    adsorbate_potential: f64,
    /// wall-contact layer potential
    surface_potential: f64,
}

impl RySlit {
    pub fn new(params: &HkParameters) -> Self {
        let sigma_mat = SIGMA_RATIO * params.d_eff;
        let sigma_ads = SIGMA_RATIO * params.d_ads;
        let contact_term = -SIGMA_RATIO.powi(4) + SIGMA_RATIO.powi(10);

        let adsorbate_potential =
            params.n_ads * params.a_ads / (2.0 * (sigma_ads * NM_TO_M).powi(4)) * contact_term;
        let surface_coefficient = params.n_mat * params.a_mat / (2.0 * (sigma_mat * NM_TO_M).powi(4));

        Self {
            d_eff: params.d_eff,
            d_mat: params.d_mat,
            d_ads: params.d_ads,
            n_over_rt: params.n_over_rt,
            sigma_mat,
            surface_coefficient,
            contact_term,
            adsorbate_potential,
            surface_potential: surface_coefficient * contact_term + adsorbate_potential,
        }
    }

    /// Molecule interacting with both walls at once
    fn two_surface(&self, width: f64) -> f64 {
        let ratio = self.sigma_mat / (width - self.d_eff);
        self.surface_coefficient * (self.contact_term - ratio.powi(4) + ratio.powi(10))
    }

    /// Two contact layers plus `n_layer − 2` bulk-like layers
    fn layer_average(&self, n_layer: f64) -> f64 {
        (2.0 * self.surface_potential + (n_layer - 2.0) * 2.0 * self.adsorbate_potential) / n_layer
    }
}

impl PotentialModel for RySlit {
    fn potential(&self, width: f64) -> f64 {
        let n_layer = (width - self.d_mat) / self.d_ads;
        if n_layer < 2.0 {
            self.n_over_rt * self.two_surface(width)
        } else {
            self.n_over_rt * self.layer_average(n_layer)
        }
    }

    fn lower_bound(&self) -> f64 {
        2.0 * self.d_eff
    }

    fn name(&self) -> &str {
        "RY slit"
    }

    fn description(&self) -> Option<&str> {
        Some("Rege-Yang layered slit pore")
    }
}

// =================================================================================================
// Cylinder
// =================================================================================================

/// Layered cylindrical pore
#[derive(Debug, Clone, PartialEq)]
pub struct RyCylinder {
    params: HkParameters,
}

impl RyCylinder {
    pub fn new(params: &HkParameters) -> Self {
        Self { params: *params }
    }

    /// Σ x_k·ratio^(2k), with x_k = x_(k−1)·((n + k)/k)², x_0 = 1
    fn k_sum(width: f64, ratio: f64, n: f64) -> f64 {
        let ratio2 = ratio * ratio;
        let mut x_k = 1.0;
        let mut ratio_k = 1.0;
        let mut sum = 1.0;

        for k in 1..series_terms(width) {
            let kf = k as f64;
            x_k *= ((-n - kf) / kf).powi(2);
            ratio_k *= ratio2;
            sum += x_k * ratio_k;
        }
        sum
    }

    /// Potential of a layer of molecules of diameter `d_x` and density
    /// `n_x` sitting inside a shell of relative radius `r2`
    fn layer_potential(width: f64, d_x: f64, n_x: f64, a_x: f64, r1: f64, r2: f64) -> f64 {
        0.75 * PI * n_x * a_x / (d_x * NM_TO_M).powi(4)
            * (0.656_25 * r1.powi(10) * Self::k_sum(width, r2, 4.5) - r1.powi(4) * Self::k_sum(width, r2, 1.5))
    }
}

impl PotentialModel for RyCylinder {
    fn potential(&self, width: f64) -> f64 {
        let p = &self.params;
        let mut weighted = 0.0;
        let mut population = 0.0;

        for layer in 1..=layer_count(width, p.d_mat, p.d_ads) {
            let offset = width - p.d_eff - (layer - 1) as f64 * p.d_ads;

            // molecules fitting around the ring of diameter 2·offset
            let ring = 2.0 * offset;
            let layer_population = if p.d_ads < ring {
                PI / (p.d_ads / ring).asin()
            } else {
                1.0
            };

            let layer_potential = if layer == 1 {
                Self::layer_potential(width, p.d_eff, p.n_mat, p.a_mat, p.d_eff / width, offset / width)
            } else {
                let outer = offset + p.d_ads;
                Self::layer_potential(width, p.d_ads, p.n_ads, p.a_ads, p.d_ads / outer, offset / outer)
            };

            weighted += layer_population * layer_potential;
            population += layer_population;
        }

        p.n_over_rt * weighted / population
    }

    fn lower_bound(&self) -> f64 {
        self.params.d_eff
    }

    fn name(&self) -> &str {
        "RY cylinder"
    }

    fn description(&self) -> Option<&str> {
        Some("Rege-Yang layered cylindrical pore")
    }
}

// =================================================================================================
// Sphere
// =================================================================================================

/// Layered spherical cavity
#[derive(Debug, Clone, PartialEq)]
pub struct RySphere {
    params: HkParameters,
    p12: f64,
    p22: f64,
}

impl RySphere {
    pub fn new(params: &HkParameters) -> Self {
        Self {
            params: *params,
            p12: params.a_mat / (4.0 * (params.d_eff * NM_TO_M).powi(6)),
            p22: params.a_ads / (4.0 * (params.d_ads * NM_TO_M).powi(6)),
        }
    }

    /// Shell of `n_m` molecules with potential depth `p_xx`
    fn layer_potential(n_m: f64, p_xx: f64, r1: f64, r2: f64) -> f64 {
        2.0 * n_m
            * p_xx
            * (-r1.powi(6) / (4.0 * r2) * ((1.0 - r2).powi(-4) - (1.0 + r2).powi(-4))
                + r1.powi(12) / (10.0 * r2) * ((1.0 - r2).powi(-10) - (1.0 + r2).powi(-10)))
    }
}

impl PotentialModel for RySphere {
    fn potential(&self, width: f64) -> f64 {
        let p = &self.params;
        let mut weighted = 0.0;
        let mut population = 0.0;
        let mut previous = 0.0;

        for layer in 1..=layer_count(width, p.d_mat, p.d_ads) {
            let offset = width - p.d_eff - (layer - 1) as f64 * p.d_ads;

            let (layer_population, layer_potential) = if layer == 1 {
                let surface_atoms = 4.0 * PI * (width * NM_TO_M).powi(2) * p.n_mat;
                let potential = Self::layer_potential(surface_atoms, self.p12, p.d_eff / width, offset / width);
                (surface_atoms, potential)
            } else {
                let molecules = 4.0 * PI * (offset * NM_TO_M).powi(2) * p.n_ads;
                let outer = offset + p.d_ads;
                let potential = Self::layer_potential(previous, self.p22, p.d_ads / outer, offset / outer);
                (molecules, potential)
            };

            weighted += layer_population * layer_potential;
            population += layer_population;
            previous = layer_population;
        }

        p.n_over_rt * weighted / population
    }

    fn lower_bound(&self) -> f64 {
        self.params.d_eff
    }

    fn name(&self) -> &str {
        "RY sphere"
    }

    fn description(&self) -> Option<&str> {
        Some("Rege-Yang layered spherical cavity")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characterisation::hk::tests::nitrogen_on_carbon;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_count() {
        // N2 on carbon: d_mat 0.34, d_ads 0.3
        assert_eq!(layer_count(0.33, 0.34, 0.3), 1);
        assert_eq!(layer_count(1.0, 0.34, 0.3), 1);
        assert_eq!(layer_count(1.2, 0.34, 0.3), 2);
        assert_eq!(layer_count(20.0, 0.34, 0.3), 65);
    }

    #[test]
    fn test_slit_switches_to_layer_average() {
        let params = nitrogen_on_carbon();
        let slit = RySlit::new(&params);

        // two layers exactly at ℓ = d_mat + 2·d_ads
        let switch = params.d_mat + 2.0 * params.d_ads;
        let above = slit.potential(switch + 1e-9);
        assert_relative_eq!(above, params.n_over_rt * slit.surface_potential, max_relative = 1e-6);

        // wide slits tend to the adsorbate-adsorbate layer potential
        let bulk = 2.0 * params.n_over_rt * slit.adsorbate_potential;
        assert_relative_eq!(slit.potential(1e4), bulk, max_relative = 1e-3);
    }

    #[test]
    fn test_single_layer_cylinder_weights_cancel() {
        let params = nitrogen_on_carbon();
        let cylinder = RyCylinder::new(&params);

        let width = 0.8;
        assert_eq!(layer_count(width, params.d_mat, params.d_ads), 1);

        let offset = width - params.d_eff;
        let expected = params.n_over_rt
            * RyCylinder::layer_potential(width, params.d_eff, params.n_mat, params.a_mat, params.d_eff / width, offset / width);
        assert_relative_eq!(cylinder.potential(width), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_k_sum_terms() {
        // 1 + ((n + 1)/1)² r² for a series truncated after one term
        let sum = RyCylinder::k_sum(0.07, 0.5, 1.5);
        assert_relative_eq!(sum, 1.0 + 6.25 * 0.25, max_relative = 1e-14);
        assert_eq!(RyCylinder::k_sum(0.01, 0.5, 1.5), 1.0);
    }

    #[test]
    fn test_reference_values() {
        let params = nitrogen_on_carbon();

        assert_relative_eq!(RySlit::new(&params).potential(1.0), -9.41233, max_relative = 1e-4);
        assert_relative_eq!(RyCylinder::new(&params).potential(1.0), -11.5200, max_relative = 1e-4);
        assert_relative_eq!(RySphere::new(&params).potential(1.0), -43.1194, max_relative = 1e-4);

        assert_relative_eq!(RyCylinder::new(&params).potential(1.82), -4.32849, max_relative = 1e-4);
        assert_relative_eq!(RySphere::new(&params).potential(1.82), -33.3823, max_relative = 1e-4);
    }

    #[test]
    fn test_potentials_are_attractive() {
        let params = nitrogen_on_carbon();
        let models: [Box<dyn PotentialModel>; 3] = [
            Box::new(RySlit::new(&params)),
            Box::new(RyCylinder::new(&params)),
            Box::new(RySphere::new(&params)),
        ];

        for model in &models {
            for width in [model.lower_bound() + 0.05, 1.0, 3.0, 10.0] {
                let phi = model.potential(width);
                assert!(phi < 0.0 && phi.is_finite(), "{} at {width}: {phi}", model.name());
            }
        }
    }
}
