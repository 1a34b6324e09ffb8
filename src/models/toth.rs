//! Toth isotherm
//!
//! Langmuir with a heterogeneity exponent t (t = 1 is Langmuir):
//!
//! $$n(p) = n_m \frac{K p}{\left(1 + (K p)^t\right)^{1/t}}
//! \qquad p(n) = \frac{\theta}{K (1 - \theta^t)^{1/t}},\ \theta = n / n_m$$
//!
//! The spreading pressure has no closed form and is integrated.

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// Toth isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Toth {
    n_m: f64,
    k: f64,
    t: f64,
}

impl Toth {
    /// # Errors
    ///
    /// `ParameterError` if a parameter is not finite and positive.
    pub fn new(n_m: f64, k: f64, t: f64) -> Result<Self> {
        if ![n_m, k, t].iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "Toth parameters must be finite and > 0, got n_m = {n_m}, K = {k}, t = {t}"
            )));
        }
        Ok(Self { n_m, k, t })
    }
}

impl IsothermModel for Toth {
    fn name(&self) -> &str {
        "Toth"
    }

    fn loading(&self, pressure: f64) -> f64 {
        let kp = self.k * pressure;
        self.n_m * kp / (1.0 + kp.powf(self.t)).powf(1.0 / self.t)
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading <= 0.0 {
            return Ok(0.0);
        }
        if loading >= self.n_m {
            return Err(AdsorptionError::calculation(format!(
                "Loading {loading} is beyond the Toth capacity {}",
                self.n_m
            )));
        }
        let coverage = loading / self.n_m;
        Ok(coverage / (self.k * (1.0 - coverage.powf(self.t)).powf(1.0 / self.t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Langmuir;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_exponent_is_langmuir() {
        let toth = Toth::new(3.0, 0.4, 1.0).unwrap();
        let langmuir = Langmuir::new(3.0, 0.4).unwrap();

        for p in [1e-3, 1.0, 40.0] {
            assert_relative_eq!(toth.loading(p), langmuir.loading(p), max_relative = 1e-14);
            assert_relative_eq!(
                toth.spreading_pressure(p).unwrap(),
                langmuir.spreading_pressure(p).unwrap(),
                max_relative = 1e-8
            );
        }
    }

    #[test]
    fn test_inverses() {
        let model = Toth::new(4.0, 0.7, 0.5).unwrap();

        for p in [1e-10, 0.5, 30.0] {
            assert_relative_eq!(model.pressure(model.loading(p)).unwrap(), p, max_relative = 1e-12);
            let pi = model.spreading_pressure(p).unwrap();
            assert_relative_eq!(model.spreading_pressure_inverse(pi).unwrap(), p, max_relative = 1e-7);
        }
        assert!(model.pressure(4.0).unwrap_err().is_calculation());
    }
}
