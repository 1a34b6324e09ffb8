//! Freundlich isotherm
//!
//! $$n(p) = K p^{1/m} \qquad \pi(p) = m K p^{1/m} = m\,n(p)$$
//!
//! Empirical, with no saturation limit and no Henry regime: the model is
//! not thermodynamically consistent and IAST results built on it should be
//! treated with suspicion.

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Freundlich isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Freundlich {
    k: f64,
    m: f64,
}

impl Freundlich {
    /// # Errors
    ///
    /// `ParameterError` if either parameter is not finite and positive.
    pub fn new(k: f64, m: f64) -> Result<Self> {
        if !(k.is_finite() && k > 0.0 && m.is_finite() && m > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "Freundlich parameters must be > 0, got K = {k}, m = {m}"
            )));
        }
        Ok(Self { k, m })
    }
}

impl IsothermModel for Freundlich {
    fn name(&self) -> &str {
        "Freundlich"
    }

    fn loading(&self, pressure: f64) -> f64 {
        self.k * pressure.powf(1.0 / self.m)
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        Ok((loading / self.k).powf(self.m))
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        Ok(self.m * self.loading(pressure))
    }

    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        Ok((spreading_pressure / (self.m * self.k)).powf(self.m))
    }

    fn is_iast_compatible(&self) -> bool {
        false
    }
}
