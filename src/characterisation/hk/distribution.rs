//! Pore-size distribution assembly
//!
//! Converts solved pore sizes and the matching loadings into a
//! distribution:
//!
//! - widths: slit `ℓ − d_mat`, cylinder and sphere `2ℓ − d_mat`
//! - adsorbed liquid volume `V = n·M/ρ/1000` **\[cm³/g\]** (n in mmol/g)
//! - `dV/dw` between consecutive points, reported at the midpoint width
//!
//! The Horvath-Kawazoe models drop points whose density falls outside
//! `1e-3 < |dV/dw| < 1e3`; Rege-Yang results are kept whole.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::characterisation::hk::PoreGeometry;
use crate::physics::AdsorbateProperties;

const MIN_DISTRIBUTION: f64 = 1e-3;
const MAX_DISTRIBUTION: f64 = 1e3;

/// Micropore size distribution
///
/// All three series have the same length; entry `i` describes the interval
/// between isotherm points `i` and `i + 1` (kernel pore `i` for a DFT fit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsdResult {
    /// Midpoint pore widths **\[nm\]**
    pub pore_widths: Vec<f64>,
    /// Differential pore volume dV/dw **\[cm³/g/nm\]**
    pub pore_distribution: Vec<f64>,
    /// Cumulative pore volume **\[cm³/g\]**
    pub pore_volume_cumulative: Vec<f64>,
}

impl PsdResult {
    pub fn len(&self) -> usize {
        self.pore_widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pore_widths.is_empty()
    }

    /// Largest cumulative volume, if any **\[cm³/g\]**
    pub fn total_pore_volume(&self) -> Option<f64> {
        self.pore_volume_cumulative.last().copied()
    }

    /// Width at the maximum of the distribution **\[nm\]**
    pub fn peak_width(&self) -> Option<f64> {
        self.pore_distribution
            .iter()
            .zip(self.pore_widths.iter())
            .filter(|(d, _)| d.is_finite())
            .max_by(|a, b| a.0.total_cmp(b.0))
            .map(|(_, &w)| w)
    }
}

/// Build a [`PsdResult`] from solved sizes and loadings (mmol/g)
///
/// `solved` and `loading` must have the same length; fewer than two points
/// give an empty result.
pub fn assemble_distribution(
    solved: &[f64],
    loading: &[f64],
    geometry: PoreGeometry,
    d_mat: f64,
    adsorbate: &AdsorbateProperties,
    filter: bool,
) -> PsdResult {
    let widths: Vec<f64> = solved.iter().map(|&l| geometry.pore_width(l, d_mat)).collect();
    let volumes: Vec<f64> = loading
        .iter()
        .map(|&n| n * adsorbate.molar_mass / adsorbate.liquid_density / 1000.0)
        .collect();

    let mut result = PsdResult::default();
    let mut dropped = 0;

    for (w, v) in widths.windows(2).zip(volumes.windows(2)) {
        let distribution = (v[1] - v[0]) / (w[1] - w[0]);

        if filter && !(MIN_DISTRIBUTION < distribution.abs() && distribution.abs() < MAX_DISTRIBUTION) {
            dropped += 1;
            continue;
        }

        result.pore_widths.push((w[0] + w[1]) / 2.0);
        result.pore_distribution.push(distribution);
        result.pore_volume_cumulative.push(v[1]);
    }

    if dropped > 0 {
        debug!("{dropped} PSD points outside ({MIN_DISTRIBUTION}, {MAX_DISTRIBUTION}) dropped");
    }

    result
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn liquid() -> AdsorbateProperties {
        AdsorbateProperties {
            molecular_diameter: 0.3,
            polarizability: 1.46e-3,
            magnetic_susceptibility: 2.0e-8,
            surface_density: 6.7e18,
            liquid_density: 1.0,
            molar_mass: 1000.0,
        }
    }

    #[test]
    fn test_slit_assembly() {
        // V = n with this liquid
        let result = assemble_distribution(&[1.0, 1.5, 2.5], &[0.1, 0.2, 0.25], PoreGeometry::Slit, 0.5, &liquid(), true);

        assert_eq!(result.len(), 2);
        assert_relative_eq!(result.pore_widths[0], 0.75);
        assert_relative_eq!(result.pore_widths[1], 1.5);
        assert_relative_eq!(result.pore_distribution[0], 0.2, max_relative = 1e-12);
        assert_relative_eq!(result.pore_distribution[1], 0.05, max_relative = 1e-12);
        assert_relative_eq!(result.pore_volume_cumulative[0], 0.2, max_relative = 1e-12);
        assert_relative_eq!(result.pore_volume_cumulative[1], 0.25, max_relative = 1e-12);
    }

    #[test]
    fn test_radius_geometries_double_width() {
        let slit = assemble_distribution(&[1.0, 2.0], &[0.1, 0.2], PoreGeometry::Slit, 0.3, &liquid(), false);
        let sphere = assemble_distribution(&[1.0, 2.0], &[0.1, 0.2], PoreGeometry::Sphere, 0.3, &liquid(), false);

        assert_relative_eq!(slit.pore_widths[0], 1.2);
        assert_relative_eq!(sphere.pore_widths[0], 2.7);
        assert_relative_eq!(sphere.pore_distribution[0], slit.pore_distribution[0] / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_filter_band() {
        let solved = [1.0, 1.0 + 1e-9, 2.0, 3.0, 1e6];
        let loading = [0.1, 0.2, 0.3, 0.3, 0.4];

        let filtered = assemble_distribution(&solved, &loading, PoreGeometry::Slit, 0.0, &liquid(), true);
        let kept = assemble_distribution(&solved, &loading, PoreGeometry::Slit, 0.0, &liquid(), false);

        // huge slope, regular, zero slope, tiny slope
        assert_eq!(kept.len(), 4);
        assert_eq!(filtered.len(), 1);
        assert_relative_eq!(filtered.pore_distribution[0], 0.1 / (1.0 - 1e-9), max_relative = 1e-6);
        assert!(filtered.pore_distribution.iter().all(|d| d.abs() > 1e-3 && d.abs() < 1e3));
    }

    #[test]
    fn test_filter_keeps_negative_slopes_by_magnitude() {
        let result = assemble_distribution(&[2.0, 1.0], &[0.1, 0.2], PoreGeometry::Slit, 0.0, &liquid(), true);
        assert_eq!(result.len(), 1);
        assert!(result.pore_distribution[0] < 0.0);
    }

    #[test]
    fn test_filter_drops_non_finite() {
        let result = assemble_distribution(&[1.0, 1.0], &[0.1, 0.2], PoreGeometry::Slit, 0.0, &liquid(), true);
        assert!(result.is_empty());

        let kept = assemble_distribution(&[1.0, 1.0], &[0.1, 0.2], PoreGeometry::Slit, 0.0, &liquid(), false);
        assert!(kept.pore_distribution[0].is_infinite());
    }

    #[test]
    fn test_short_series() {
        assert!(assemble_distribution(&[1.0], &[0.1], PoreGeometry::Slit, 0.0, &liquid(), true).is_empty());
        assert_eq!(PsdResult::default().total_pore_volume(), None);
    }

    #[test]
    fn test_summary_accessors() {
        let result = PsdResult {
            pore_widths: vec![0.5, 0.7, 0.9],
            pore_distribution: vec![0.1, 0.8, 0.3],
            pore_volume_cumulative: vec![0.05, 0.2, 0.25],
        };
        assert_eq!(result.peak_width(), Some(0.7));
        assert_eq!(result.total_pore_volume(), Some(0.25));
    }

    #[test]
    fn test_serialises_with_field_names() {
        let result = PsdResult {
            pore_widths: vec![0.5],
            pore_distribution: vec![0.1],
            pore_volume_cumulative: vec![0.05],
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"pore_volume_cumulative\":[0.05]"));
    }
}
