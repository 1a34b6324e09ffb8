//! Original Horvath-Kawazoe potentials
//!
//! Each model sees one adsorbate molecule between the pore walls, with the
//! wall atoms and a layer of adsorbate smeared over the surface:
//!
//! - **slit**: Horvath & Kawazoe (1983), two infinite graphitic slabs
//! - **cylinder**: Saito & Foley (1991), a series in (d/r) truncated at
//!   `30·ℓ` terms
//! - **sphere**: Cheng & Yang (1994), a closed form in terms of
//!   T(x) = (1 + (−1)ˣ·(ℓ−d)/ℓ)⁻ˣ − (1 − (−1)ˣ·(ℓ−d)/ℓ)⁻ˣ
//!
//! All sizes in nm; coefficients are folded in SI at construction.

use std::f64::consts::PI;

use crate::characterisation::hk::{HkParameters, SIGMA_RATIO};
use crate::physics::constants::NM_TO_M;
use crate::physics::PotentialModel;

/// 21/32
const SERIES_REPULSION: f64 = 0.656_25;

// =================================================================================================
// Slit
// =================================================================================================

/// Slit pore between two infinite slabs
///
/// ℓ is the distance between the nuclei of the two opposite surface layers.
#[derive(Debug, Clone, PartialEq)]
pub struct HkSlit {
    d_eff: f64,
    coefficient: f64,
    sigma_p4_o3: f64,
    sigma_p10_o9: f64,
    const_term: f64,
}

impl HkSlit {
    pub fn new(params: &HkParameters) -> Self {
        let d_eff = params.d_eff;
        let sigma = SIGMA_RATIO * d_eff;
        let sigma_p4_o3 = sigma.powi(4) / 3.0;
        let sigma_p10_o9 = sigma.powi(10) / 9.0;

        let coefficient = params.n_over_rt
            * (params.n_ads * params.a_ads + params.n_mat * params.a_mat)
            / (sigma * NM_TO_M).powi(4);

        Self {
            d_eff,
            coefficient,
            sigma_p4_o3,
            sigma_p10_o9,
            const_term: sigma_p10_o9 / d_eff.powi(9) - sigma_p4_o3 / d_eff.powi(3),
        }
    }
}

impl PotentialModel for HkSlit {
    fn potential(&self, width: f64) -> f64 {
        let gap = width - self.d_eff;
        self.coefficient / (width - 2.0 * self.d_eff)
            * (self.sigma_p4_o3 / gap.powi(3) - self.sigma_p10_o9 / gap.powi(9) + self.const_term)
    }

    fn lower_bound(&self) -> f64 {
        2.0 * self.d_eff
    }

    fn name(&self) -> &str {
        "HK slit"
    }

    fn description(&self) -> Option<&str> {
        Some("Horvath-Kawazoe slit pore between two graphitic slabs")
    }
}

// =================================================================================================
// Cylinder
// =================================================================================================

/// Cylindrical pore (Saito-Foley)
///
/// ℓ is the radius to the nuclei of the wall atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct HkCylinder {
    d_eff: f64,
    coefficient: f64,
}

impl HkCylinder {
    pub fn new(params: &HkParameters) -> Self {
        let coefficient = 0.75 * PI * params.n_over_rt
            * (params.n_ads * params.a_ads + params.n_mat * params.a_mat)
            / (params.d_eff * NM_TO_M).powi(4);

        Self { d_eff: params.d_eff, coefficient }
    }
}

/// Number of terms for a series evaluated at size `width`
///
/// Thirty terms per nm of radius is enough for the series to converge.
pub(crate) fn series_terms(width: f64) -> usize {
    (width * 30.0) as usize
}

impl PotentialModel for HkCylinder {
    fn potential(&self, width: f64) -> f64 {
        let d_over_r = self.d_eff / width;
        let d_over_r4 = d_over_r.powi(4);
        let d_over_r10 = d_over_r.powi(10);
        let shell = (1.0 - d_over_r).powi(2);

        let mut a_k = 1.0;
        let mut b_k = 1.0;
        let mut shell_k = 1.0;
        let mut sum = SERIES_REPULSION * d_over_r10 - d_over_r4;

        for k in 1..series_terms(width) {
            let kf = k as f64;
            a_k *= ((-4.5 - kf) / kf).powi(2);
            b_k *= ((-1.5 - kf) / kf).powi(2);
            shell_k *= shell;
            sum += shell_k / (kf + 1.0) * (SERIES_REPULSION * a_k * d_over_r10 - b_k * d_over_r4);
        }

        self.coefficient * sum
    }

    fn lower_bound(&self) -> f64 {
        self.d_eff
    }

    fn name(&self) -> &str {
        "HK cylinder"
    }

    fn description(&self) -> Option<&str> {
        Some("Saito-Foley cylindrical pore")
    }
}

// =================================================================================================
// Sphere
// =================================================================================================

/// Spherical cavity (Cheng-Yang)
///
/// ℓ is the radius to the nuclei of the wall atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct HkSphere {
    d_eff: f64,
    n_over_rt: f64,
    n_ads: f64,
    n_mat: f64,
    /// adsorbate-surface potential depth
    p12: f64,
    /// adsorbate-adsorbate potential depth
    p22: f64,
}

impl HkSphere {
    pub fn new(params: &HkParameters) -> Self {
        Self {
            d_eff: params.d_eff,
            n_over_rt: params.n_over_rt,
            n_ads: params.n_ads,
            n_mat: params.n_mat,
            p12: params.a_mat / (4.0 * (params.d_eff * NM_TO_M).powi(6)),
            p22: params.a_ads / (4.0 * (params.d_ads * NM_TO_M).powi(6)),
        }
    }
}

impl PotentialModel for HkSphere {
    fn potential(&self, width: f64) -> f64 {
        let l_minus_d = width - self.d_eff;
        let d_over_l = self.d_eff / width;
        let ratio = l_minus_d / width;

        let n1 = 4.0 * PI * (width * NM_TO_M).powi(2) * self.n_mat;
        let n2 = 4.0 * PI * (l_minus_d * NM_TO_M).powi(2) * self.n_ads;

        let t_term = |x: i32| {
            let signed = if x % 2 == 0 { ratio } else { -ratio };
            (1.0 + signed).powi(-x) - (1.0 - signed).powi(-x)
        };

        self.n_over_rt
            * (6.0 * (n1 * self.p12 + n2 * self.p22) * (width / l_minus_d).powi(3))
            * (-d_over_l.powi(6) * (t_term(3) / 12.0 + t_term(2) / 8.0)
                + d_over_l.powi(12) * (t_term(9) / 90.0 + t_term(8) / 80.0))
    }

    fn lower_bound(&self) -> f64 {
        self.d_eff
    }

    fn name(&self) -> &str {
        "HK sphere"
    }

    fn description(&self) -> Option<&str> {
        Some("Cheng-Yang spherical cavity")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
