//! BET and GAB multilayer isotherms
//!
//! Both share one functional form, with a multilayer constant N that makes
//! the loading diverge at p = 1/N:
//!
//! $$n(p) = n_m \frac{C p}{(1 - N p)(1 - N p + C p)}
//! \qquad \pi(p) = n_m \ln\frac{1 - N p + C p}{1 - N p}$$
//!
//! GAB is the same curve written with its own constants, `N = K` and
//! `C_BET = C·K`. Only BET is treated as IAST-compatible.

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

/// BET-type multilayer isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct Bet {
    n_m: f64,
    c: f64,
    n: f64,
    name: &'static str,
}

impl Bet {
    /// BET with monolayer capacity `n_m`, constant `c` and multilayer constant `n`
    ///
    /// # Errors
    ///
    /// `ParameterError` if a parameter is not finite and positive.
    pub fn new(n_m: f64, c: f64, n: f64) -> Result<Self> {
        Self::checked(n_m, c, n, "BET")
    }

    /// GAB with monolayer capacity `n_m`, multilayer constant `k` and constant `c`
    ///
    /// # Errors
    ///
    /// `ParameterError` if a parameter is not finite and positive.
    pub fn gab(n_m: f64, k: f64, c: f64) -> Result<Self> {
        Self::checked(n_m, c * k, k, "GAB")
    }

    fn checked(n_m: f64, c: f64, n: f64, name: &'static str) -> Result<Self> {
        if ![n_m, c, n].iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "{name} parameters must be finite and > 0, got n_m = {n_m}, C = {c}, N = {n}"
            )));
        }
        Ok(Self { n_m, c, n, name })
    }

    /// Pressure at which the loading diverges
    pub fn pole(&self) -> f64 {
        1.0 / self.n
    }
}

impl IsothermModel for Bet {
    fn name(&self) -> &str {
        self.name
    }

    /// Infinite from the pole on
    fn loading(&self, pressure: f64) -> f64 {
        if pressure >= self.pole() {
            return f64::INFINITY;
        }
        let np = self.n * pressure;
        self.n_m * self.c * pressure / ((1.0 - np) * (1.0 - np + self.c * pressure))
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading <= 0.0 {
            return Ok(0.0);
        }
        // A p² + B p − n = 0 has exactly one root in (0, 1/N)
        let a = loading * self.n * (self.c - self.n);
        let b = self.n_m * self.c - loading * (self.c - 2.0 * self.n);
        Ok(2.0 * loading / (b + (b * b + 4.0 * a * loading).sqrt()))
    }

    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        if pressure >= self.pole() {
            return Err(AdsorptionError::calculation(format!(
                "{} spreading pressure diverges at p = {}, asked for p = {pressure}",
                self.name,
                self.pole()
            )));
        }
        Ok(self.n_m * (((self.c - self.n) * pressure).ln_1p() - (-self.n * pressure).ln_1p()))
    }

    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        let growth = (spreading_pressure / self.n_m).exp_m1();
        Ok(growth / (self.c + self.n * growth))
    }

    fn is_iast_compatible(&self) -> bool {
        self.name == "BET"
    }
}
