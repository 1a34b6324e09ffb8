//! Henry's law
//!
//! $$n(p) = K_H p$$
//!
//! The simplest model: loading proportional to pressure, valid at low
//! coverage only.

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Linear isotherm n = K·p
#[derive(Clone, Debug, PartialEq)]
pub struct Henry {
    /// Henry constant **\[loading/pressure\]**
    k: f64,
}

impl Henry {
    /// # Errors
    ///
    /// `ParameterError` if `k` is not finite and positive.
    pub fn new(k: f64) -> Result<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(AdsorptionError::parameter(format!(
                "Henry constant must be > 0, got {k}"
            )));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> f64 {
        self.k
    }
}

impl IsothermModel for Henry {
    fn name(&self) -> &str {
        "Henry"
    }

    fn loading(&self, pressure: f64) -> f64 {
        self.k * pressure
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        Ok(loading / self.k)
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        Ok(self.k * pressure)
    }

    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        Ok(spreading_pressure / self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_henry_views() {
        let model = Henry::new(2.5).unwrap();

        assert_eq!(model.loading(2.0), 5.0);
        assert_eq!(model.pressure(5.0).unwrap(), 2.0);
        assert_eq!(model.spreading_pressure(2.0).unwrap(), 5.0);
        assert_relative_eq!(model.spreading_pressure_inverse(5.0).unwrap(), 2.0);
    }

    #[test]
    fn test_invalid_constant() {
        assert!(Henry::new(0.0).is_err());
        assert!(Henry::new(f64::INFINITY).is_err());
    }
}
