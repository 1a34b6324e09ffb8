//! Quadratic isotherm
//!
//! Two molecules per site, with affinities Ka (one molecule) and Kb (two):
//!
//! $$n(p) = n_m \frac{K_a p + 2 K_b p^2}{1 + K_a p + K_b p^2}
//! \qquad \pi(p) = n_m \ln(1 + K_a p + K_b p^2)$$

use crate::error::{AdsorptionError, Result};
use crate::models::traits::numeric_spreading_pressure_inverse;
use crate::models::IsothermModel;

/// Quadratic isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Quadratic {
    n_m: f64,
    ka: f64,
    kb: f64,
}

impl Quadratic {
    /// # Errors
    ///
    /// `ParameterError` unless `n_m > 0`, `ka > 0` and `kb ≥ 0`.
    pub fn new(n_m: f64, ka: f64, kb: f64) -> Result<Self> {
        if !(n_m.is_finite() && n_m > 0.0 && ka.is_finite() && ka > 0.0 && kb.is_finite() && kb >= 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "Quadratic parameters must satisfy n_m > 0, Ka > 0, Kb >= 0, \
                 got n_m = {n_m}, Ka = {ka}, Kb = {kb}"
            )));
        }
        Ok(Self { n_m, ka, kb })
    }
}

impl IsothermModel for Quadratic {
    fn name(&self) -> &str {
        "Quadratic"
    }

    fn loading(&self, pressure: f64) -> f64 {
        let ap = self.ka * pressure;
        let bp2 = self.kb * pressure * pressure;
        self.n_m * (ap + 2.0 * bp2) / (1.0 + ap + bp2)
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        Ok(self.n_m * (self.ka * pressure + self.kb * pressure * pressure).ln_1p())
    }

    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        // Kb p² + Ka p − (e^{π/n_m} − 1) = 0
        let rhs = (spreading_pressure / self.n_m).exp_m1();
        if self.kb == 0.0 {
            return Ok(rhs / self.ka);
        }
        let discriminant = self.ka * self.ka + 4.0 * self.kb * rhs;
        if discriminant < 0.0 {
            return numeric_spreading_pressure_inverse(self, spreading_pressure);
        }
        // rationalised form, stable for small Kb
        Ok(2.0 * rhs / (self.ka + discriminant.sqrt()))
    }
}
