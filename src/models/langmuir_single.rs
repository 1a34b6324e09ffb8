//! Single-site Langmuir isotherm
//!
//! $$n(p) = n_m \frac{K p}{1 + K p}$$
//!
//! Every adsorption site is equivalent and holds at most one molecule. The
//! spreading pressure and both inverses have closed forms:
//!
//! $$\pi(p) = n_m \ln(1 + K p) \qquad p(n) = \frac{n}{K (n_m - n)}$$
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::models::{IsothermModel, Langmuir};
//!
//! let model = Langmuir::new(5.0, 0.2).unwrap();
//! assert_eq!(model.loading(5.0), 2.5);
//! assert_eq!(model.pressure(2.5).unwrap(), 5.0);
//! ```

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Langmuir isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Langmuir {
    /// Monolayer capacity n_m **\[loading\]**
    n_m: f64,
    /// Affinity constant K **\[1/pressure\]**
    k: f64,
}

impl Langmuir {
    /// Create a Langmuir model
    ///
    /// # Arguments
    ///
    /// * `n_m` - Monolayer capacity
    /// * `k` - Affinity constant
    ///
    /// # Errors
    ///
    /// `ParameterError` if either parameter is not finite and positive.
    pub fn new(n_m: f64, k: f64) -> Result<Self> {
        for (name, value) in [("n_m", n_m), ("K", k)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AdsorptionError::parameter(format!(
                    "Langmuir parameter {name} must be > 0, got {value}"
                )));
            }
        }
        Ok(Self { n_m, k })
    }

    pub fn n_m(&self) -> f64 {
        self.n_m
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl IsothermModel for Langmuir {
    fn name(&self) -> &str {
        "Langmuir"
    }

    fn loading(&self, pressure: f64) -> f64 {
        let kp = self.k * pressure;
        self.n_m * kp / (1.0 + kp)
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading >= self.n_m {
            return Err(AdsorptionError::calculation(format!(
                "Loading {loading} is beyond the Langmuir capacity {}",
                self.n_m
            )));
        }
        Ok(loading / (self.k * (self.n_m - loading)))
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        Ok(self.n_m * (self.k * pressure).ln_1p())
    }

    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        Ok((spreading_pressure / self.n_m).exp_m1() / self.k)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::{numeric_spreading_pressure, numeric_spreading_pressure_inverse};
    use approx::assert_relative_eq;

    #[test]
    fn test_half_coverage() {
        let model = Langmuir::new(3.0, 4.0).unwrap();
        assert_relative_eq!(model.loading(0.25), 1.5);
        assert_relative_eq!(model.pressure(1.5).unwrap(), 0.25);
    }

    #[test]
    fn test_closed_form_matches_quadrature() {
        let model = Langmuir::new(3.0, 4.0).unwrap();

        for p in [1e-4, 0.1, 1.0, 30.0] {
            let exact = model.spreading_pressure(p).unwrap();
            let numeric = numeric_spreading_pressure(&model, p).unwrap();
            assert_relative_eq!(exact, numeric, max_relative = 1e-8);
        }

        let exact = model.spreading_pressure_inverse(2.0).unwrap();
        let numeric = numeric_spreading_pressure_inverse(&model, 2.0).unwrap();
        assert_relative_eq!(exact, numeric, max_relative = 1e-7);
    }

    #[test]
    fn test_capacity_is_unreachable() {
        let model = Langmuir::new(3.0, 4.0).unwrap();
        assert!(model.pressure(3.0).unwrap_err().is_calculation());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Langmuir::new(-1.0, 1.0).is_err());
        assert!(Langmuir::new(1.0, f64::NAN).is_err());
    }
}
