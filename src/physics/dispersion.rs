//! Kirkwood-Muller dispersion constants
//!
//! The Lennard-Jones attraction constants between an adsorbate molecule and
//! another adsorbate molecule ($A_a$), and between an adsorbate molecule and a
//! surface atom ($A_s$), follow from polarizability $\alpha$ and magnetic
//! susceptibility $\varkappa$:
//!
//! $$A_a = \frac{3}{2} m_e c^2 \alpha_a \varkappa_a$$
//!
//! $$A_s = \frac{6 m_e c^2 \alpha_a \alpha_s}{\alpha_a/\varkappa_a + \alpha_s/\varkappa_s}$$
//!
//! Inputs are in m³, results in J·m⁶.

use crate::physics::constants::{ELECTRON_MASS, NM3_TO_M3, SPEED_OF_LIGHT};
use crate::physics::data::{AdsorbateProperties, MaterialProperties};

/// Adsorbate-adsorbate and adsorbate-material dispersion constants **\[J·m⁶\]**
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionConstants {
    /// Adsorbate-adsorbate constant $A_a$
    pub adsorbate: f64,
    /// Adsorbate-material constant $A_s$
    pub material: f64,
}

/// Dispersion constant of the adsorbate with itself
///
/// `p_ads` and `m_ads` are polarizability and magnetic susceptibility in m³.
pub fn kirkwood_muller_dispersion_ads(p_ads: f64, m_ads: f64) -> f64 {
    1.5 * ELECTRON_MASS * SPEED_OF_LIGHT.powi(2) * p_ads * m_ads
}

/// Dispersion constant between the adsorbate and the material surface
///
/// All inputs in m³.
pub fn kirkwood_muller_dispersion_mat(p_mat: f64, m_mat: f64, p_ads: f64, m_ads: f64) -> f64 {
    6.0 * ELECTRON_MASS * SPEED_OF_LIGHT.powi(2) * p_ads * p_mat / (p_ads / m_ads + p_mat / m_mat)
}

/// Both dispersion constants from property sets given in nm³
pub fn dispersion_from_properties(
    adsorbate: &AdsorbateProperties,
    material: &MaterialProperties,
) -> DispersionConstants {
    let p_ads = adsorbate.polarizability * NM3_TO_M3;
    let p_mat = material.polarizability * NM3_TO_M3;
    let m_ads = adsorbate.magnetic_susceptibility * NM3_TO_M3;
    let m_mat = material.magnetic_susceptibility * NM3_TO_M3;

    DispersionConstants {
        adsorbate: kirkwood_muller_dispersion_ads(p_ads, m_ads),
        material: kirkwood_muller_dispersion_mat(p_mat, m_mat, p_ads, m_ads),
    }
}
