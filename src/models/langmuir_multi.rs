//! Multi-site Langmuir isotherm
//!
//! The material is modelled as several independent families of sites, each
//! with its own capacity and affinity:
//!
//! $$n(p) = \sum_i n_{m,i} \frac{K_i p}{1 + K_i p}
//! \qquad \pi(p) = \sum_i n_{m,i} \ln(1 + K_i p)$$
//!
//! Two named variants exist: dual-site (`DSLangmuir`), whose inverse is the
//! positive root of a quadratic, and triple-site (`TSLangmuir`), inverted
//! numerically.
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::models::{IsothermModel, MultiSiteLangmuir};
//!
//! let model = MultiSiteLangmuir::dual_site(2.0, 10.0, 3.0, 0.1).unwrap();
//! let n = model.loading(0.5);
//! assert!((model.pressure(n).unwrap() - 0.5).abs() < 1e-12);
//! ```

use crate::error::{AdsorptionError, Result};
use crate::models::traits::numeric_pressure;
use crate::models::IsothermModel;

/// Parameters of one family of sites
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteParams {
    /// Capacity of the site family **\[loading\]**
    pub n_m: f64,
    /// Affinity constant **\[1/pressure\]**
    pub k: f64,
}

/// Sum of independent Langmuir sites
#[derive(Clone, Debug, PartialEq)]
pub struct MultiSiteLangmuir {
    name: &'static str,
    sites: Vec<SiteParams>,
}

impl MultiSiteLangmuir {
    /// Create from any number of site families
    ///
    /// # Errors
    ///
    /// `ParameterError` if `sites` is empty or a parameter is not finite and
    /// positive.
    pub fn new(sites: Vec<SiteParams>) -> Result<Self> {
        if sites.is_empty() {
            return Err(AdsorptionError::parameter("Multi-site Langmuir needs at least one site"));
        }
        for (i, site) in sites.iter().enumerate() {
            if !(site.n_m.is_finite() && site.n_m > 0.0 && site.k.is_finite() && site.k > 0.0) {
                return Err(AdsorptionError::parameter(format!(
                    "Site {} parameters must be > 0, got n_m = {}, K = {}",
                    i + 1,
                    site.n_m,
                    site.k
                )));
            }
        }

        let name = match sites.len() {
            2 => "DSLangmuir",
            3 => "TSLangmuir",
            _ => "MultiSiteLangmuir",
        };
        Ok(Self { name, sites })
    }

    /// Dual-site Langmuir
    pub fn dual_site(n_m1: f64, k1: f64, n_m2: f64, k2: f64) -> Result<Self> {
        Self::new(vec![SiteParams { n_m: n_m1, k: k1 }, SiteParams { n_m: n_m2, k: k2 }])
    }

    /// Triple-site Langmuir
    pub fn triple_site(n_m1: f64, k1: f64, n_m2: f64, k2: f64, n_m3: f64, k3: f64) -> Result<Self> {
        Self::new(vec![
            SiteParams { n_m: n_m1, k: k1 },
            SiteParams { n_m: n_m2, k: k2 },
            SiteParams { n_m: n_m3, k: k3 },
        ])
    }

    pub fn sites(&self) -> &[SiteParams] {
        &self.sites
    }

    /// Total capacity Σ n_m
    pub fn capacity(&self) -> f64 {
        self.sites.iter().map(|s| s.n_m).sum()
    }

    /// Positive root of the dual-site quadratic
    ///
    /// n(1 + K₁p)(1 + K₂p) = n₁K₁p(1 + K₂p) + n₂K₂p(1 + K₁p)
    fn dual_site_pressure(&self, loading: f64) -> f64 {
        let (s1, s2) = (self.sites[0], self.sites[1]);

        let a = s1.k * s2.k * (loading - s1.n_m - s2.n_m);
        let b = loading * (s1.k + s2.k) - s1.n_m * s1.k - s2.n_m * s2.k;
        let c = loading;
        let root = (b * b - 4.0 * a * c).sqrt();

        // b < 0 below half coverage, where −b − √D cancels
        if b <= 0.0 {
            2.0 * c / (root - b)
        } else {
            (-b - root) / (2.0 * a)
        }
    }
}

impl IsothermModel for MultiSiteLangmuir {
    fn name(&self) -> &str {
        self.name
    }

    fn loading(&self, pressure: f64) -> f64 {
        self.sites
            .iter()
            .map(|s| {
                let kp = s.k * pressure;
                s.n_m * kp / (1.0 + kp)
            })
            .sum()
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading <= 0.0 {
            return Ok(0.0);
        }
        if loading >= self.capacity() {
            return Err(AdsorptionError::calculation(format!(
                "Loading {loading} is beyond the {} capacity {}",
                self.name,
                self.capacity()
            )));
        }
        if self.sites.len() == 2 {
            return Ok(self.dual_site_pressure(loading));
        }
        numeric_pressure(self, loading)
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        Ok(self.sites.iter().map(|s| s.n_m * (s.k * pressure).ln_1p()).sum())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Langmuir;
    use approx::assert_relative_eq;

    #[test]
    fn test_names() {
        assert_eq!(MultiSiteLangmuir::dual_site(1.0, 1.0, 1.0, 2.0).unwrap().name(), "DSLangmuir");
        let ts = MultiSiteLangmuir::triple_site(1.0, 1.0, 1.0, 2.0, 1.0, 3.0).unwrap();
        assert_eq!(ts.name(), "TSLangmuir");
        assert_eq!(ts.capacity(), 3.0);
    }

    #[test]
    fn test_single_site_reduces_to_langmuir() {
        let multi = MultiSiteLangmuir::new(vec![SiteParams { n_m: 2.0, k: 0.7 }]).unwrap();
        let single = Langmuir::new(2.0, 0.7).unwrap();

        for p in [0.01, 1.0, 50.0] {
            assert_relative_eq!(multi.loading(p), single.loading(p), max_relative = 1e-14);
            assert_relative_eq!(
                multi.spreading_pressure(p).unwrap(),
                single.spreading_pressure(p).unwrap(),
                max_relative = 1e-14
            );
        }
        assert_relative_eq!(
            multi.pressure(1.2).unwrap(),
            single.pressure(1.2).unwrap(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_dual_site_inverse() {
        let model = MultiSiteLangmuir::dual_site(2.0, 10.0, 3.0, 0.1).unwrap();

        for p in [1e-3, 0.2, 4.0, 100.0] {
            let n = model.loading(p);
            assert_relative_eq!(model.pressure(n).unwrap(), p, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_triple_site_inverses() {
        let model = MultiSiteLangmuir::triple_site(1.0, 50.0, 2.0, 1.0, 0.5, 0.01).unwrap();

        let n = model.loading(3.0);
        assert_relative_eq!(model.pressure(n).unwrap(), 3.0, max_relative = 1e-8);

        let pi = model.spreading_pressure(3.0).unwrap();
        assert_relative_eq!(model.spreading_pressure_inverse(pi).unwrap(), 3.0, max_relative = 1e-8);
    }

    #[test]
    fn test_low_pressure_inverses() {
        let dual = MultiSiteLangmuir::dual_site(2.0, 100.0, 3.0, 1.0).unwrap();
        let triple = MultiSiteLangmuir::triple_site(1.0, 10.0, 2.0, 0.1, 0.5, 100.0).unwrap();

        for p in [1e-14, 5e-13, 1e-10, 1e-6] {
            assert_relative_eq!(dual.pressure(dual.loading(p)).unwrap(), p, max_relative = 1e-9);

            for model in [&dual, &triple] {
                let pi = model.spreading_pressure(p).unwrap();
                assert_relative_eq!(model.spreading_pressure_inverse(pi).unwrap(), p, max_relative = 1e-8);
            }
        }

        // Henry regime: π → (Σ n_m K) p
        let p = triple.spreading_pressure_inverse(3e-11).unwrap();
        assert_relative_eq!(p, 3e-11 / 60.2, max_relative = 1e-6);
    }

    #[test]
    fn test_beyond_capacity() {
        let model = MultiSiteLangmuir::dual_site(2.0, 10.0, 3.0, 0.1).unwrap();
        assert!(model.pressure(5.0).is_err());
        assert_eq!(model.pressure(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_sites() {
        assert!(MultiSiteLangmuir::new(vec![]).is_err());
        assert!(MultiSiteLangmuir::dual_site(1.0, -1.0, 1.0, 1.0).is_err());
    }
}
