//! Jensen-Seaton isotherm
//!
//! $$n(p) = K p \left[1 + \left(\frac{K p}{a (1 + b p)}\right)^c\right]^{-1/c}$$
//!
//! Henry regime K p at low pressure, a compressible saturated phase
//! a (1 + b p) at high pressure. Pressure and spreading pressure are solved
//! numerically.

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Jensen-Seaton isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct JensenSeaton {
    k: f64,
    a: f64,
    b: f64,
    c: f64,
}

impl JensenSeaton {
    /// # Errors
    ///
    /// `ParameterError` unless `k`, `a` and `c` are positive and `b ≥ 0`.
    pub fn new(k: f64, a: f64, b: f64, c: f64) -> Result<Self> {
        let positive = [k, a, c].iter().all(|v| v.is_finite() && *v > 0.0);
        if !(positive && b.is_finite() && b >= 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "JensenSeaton parameters must satisfy K, a, c > 0 and b >= 0, \
                 got K = {k}, a = {a}, b = {b}, c = {c}"
            )));
        }
        Ok(Self { k, a, b, c })
    }
}

impl IsothermModel for JensenSeaton {
    fn name(&self) -> &str {
        "JensenSeaton"
    }

    fn loading(&self, pressure: f64) -> f64 {
        let kp = self.k * pressure;
        let saturation = self.a * (1.0 + self.b * pressure);
        kp * (1.0 + (kp / saturation).powf(self.c)).powf(-1.0 / self.c)
    }
}
