//! Approximate Temkin isotherm
//!
//! Langmuir with a first-order correction for lateral interactions of
//! strength θ, written with L = Kp/(1 + Kp):
//!
//! $$n(p) = n_m \left(L + \theta L^2 (L - 1)\right)$$
//!
//! $$\pi(p) = n_m \left(\ln(1 + K p)
//!   + \theta \left(\frac{2 K p + 1}{2 (1 + K p)^2} - \frac{1}{2}\right)\right)$$

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Approximate Temkin isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct TemkinApprox {
    n_m: f64,
    k: f64,
    theta: f64,
}

impl TemkinApprox {
    /// # Errors
    ///
    /// `ParameterError` unless `n_m > 0`, `k > 0` and `theta` is finite.
    pub fn new(n_m: f64, k: f64, theta: f64) -> Result<Self> {
        if !(n_m.is_finite() && n_m > 0.0 && k.is_finite() && k > 0.0 && theta.is_finite()) {
            return Err(AdsorptionError::parameter(format!(
                "TemkinApprox parameters must satisfy n_m > 0, K > 0, finite theta, \
                 got n_m = {n_m}, K = {k}, theta = {theta}"
            )));
        }
        Ok(Self { n_m, k, theta })
    }
}

impl IsothermModel for TemkinApprox {
    fn name(&self) -> &str {
        "TemkinApprox"
    }

    fn loading(&self, pressure: f64) -> f64 {
        let kp = self.k * pressure;
        let langmuir = kp / (1.0 + kp);
        self.n_m * (langmuir + self.theta * langmuir * langmuir * (langmuir - 1.0))
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        let kp = self.k * pressure;
        let one_plus_kp = 1.0 + kp;
        // (2Kp + 1)/(2(1 + Kp)²) − 1/2 = −K²p²/(2(1 + Kp)²)
        let interaction = -0.5 * (kp / one_plus_kp).powi(2);
        Ok(self.n_m * (kp.ln_1p() + self.theta * interaction))
    }
}
