//! Virial isotherm
//!
//! Pressure-explicit, a cubic virial expansion in the loading:
//!
//! $$\ln p = \ln n - \ln K + A n + B n^2 + C n^3$$
//!
//! The loading is solved for numerically. The spreading pressure follows
//! from π = ∫ n d(ln p) in closed form as a function of the loading.

use log::warn;

use crate::error::{AdsorptionError, Result};
use crate::models::traits::invert_increasing;
use crate::models::IsothermModel;

/// Virial isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Virial {
    k: f64,
    a: f64,
    b: f64,
    c: f64,
}

impl Virial {
    /// # Errors
    ///
    /// `ParameterError` unless `k > 0` and the coefficients are finite.
    pub fn new(k: f64, a: f64, b: f64, c: f64) -> Result<Self> {
        if !(k.is_finite() && k > 0.0 && [a, b, c].iter().all(|v| v.is_finite())) {
            return Err(AdsorptionError::parameter(format!(
                "Virial parameters must satisfy K > 0 and finite A, B, C, \
                 got K = {k}, A = {a}, B = {b}, C = {c}"
            )));
        }
        Ok(Self { k, a, b, c })
    }

    fn ln_pressure(&self, loading: f64) -> f64 {
        loading.ln() - self.k.ln() + loading * (self.a + loading * (self.b + loading * self.c))
    }
}

impl IsothermModel for Virial {
    fn name(&self) -> &str {
        "Virial"
    }

    /// NaN where ln p(n) stops increasing before `pressure` is reached
    fn loading(&self, pressure: f64) -> f64 {
        if pressure <= 0.0 {
            return 0.0;
        }
        let solved = invert_increasing(
            &|n| Ok(self.ln_pressure(n)),
            pressure.ln(),
            self.k * pressure,
            "Virial log-pressure",
        );
        solved.unwrap_or_else(|err| {
            warn!("Virial: no loading at p = {pressure}: {err}");
            f64::NAN
        })
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading <= 0.0 {
            return Ok(0.0);
        }
        Ok(self.ln_pressure(loading).exp())
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        let n = self.loading(pressure);
        if n.is_nan() {
            return Err(AdsorptionError::calculation(format!(
                "Virial loading at p = {pressure} could not be solved"
            )));
        }
        Ok(n * (1.0 + n * (self.a / 2.0 + n * (2.0 * self.b / 3.0 + n * 3.0 * self.c / 4.0))))
    }

    fn is_iast_compatible(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::{henry_constant, numeric_spreading_pressure};
    use approx::assert_relative_eq;

    fn model() -> Virial {
        Virial::new(2.0, 0.5, -0.02, 0.001).unwrap()
    }

    #[test]
    fn test_loading_inverts_pressure() {
        let model = model();

        for n in [1e-12, 0.1, 2.0, 9.0] {
            let p = model.pressure(n).unwrap();
            assert_relative_eq!(model.loading(p), n, max_relative = 1e-10);
        }
        assert_eq!(model.loading(0.0), 0.0);
        assert_relative_eq!(henry_constant(&model), 2.0, max_relative = 1e-6);
    }

    #[test]
    fn test_spreading_pressure_is_integral_of_loading() {
        let model = model();

        for p in [1e-8, 0.3, 20.0] {
            let numeric = numeric_spreading_pressure(&model, p).unwrap();
            assert_relative_eq!(model.spreading_pressure(p).unwrap(), numeric, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_not_for_iast() {
        assert!(!model().is_iast_compatible());
        assert!(Virial::new(0.0, 0.0, 0.0, 0.0).unwrap_err().is_parameter());
    }
}
