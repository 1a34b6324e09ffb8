//! Vacancy solution theory (VST) isotherms
//!
//! The adsorbed phase is a mixture of adsorbate and vacancies, which gives
//!
//! $$p = \frac{n_m}{K} \frac{\theta}{1 - \theta} f(\theta)$$
//!
//! with K the Henry constant and f the vacancy activity term, f(0) = 1.
//! Two activity models are available:
//!
//! - Flory-Huggins (`FH-VST`): ln f = a₁ᵥθ / (1 + a₁ᵥθ)
//! - Wilson (`W-VST`): two interaction constants Λ₁ᵥ and Λᵥ₁
//!
//! Both are pressure-explicit; the loading is solved for in
//! x = θ/(1 − θ), which maps the whole coverage range onto (0, ∞).

use log::warn;

use crate::error::{AdsorptionError, Result};
use crate::models::traits::invert_increasing;
use crate::models::IsothermModel;

/// Activity model of the vacancy mixture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VacancyActivity {
    FloryHuggins { a1v: f64 },
    Wilson { l1v: f64, lv1: f64 },
}

impl VacancyActivity {
    /// ln f(θ)
    fn ln_activity(&self, coverage: f64) -> f64 {
        match *self {
            VacancyActivity::FloryHuggins { a1v } => a1v * coverage / (1.0 + a1v * coverage),
            VacancyActivity::Wilson { l1v, lv1 } => {
                let vacancy = 1.0 - (1.0 - lv1) * coverage;
                let adsorbate = l1v + (1.0 - l1v) * coverage;
                (l1v * vacancy / adsorbate).ln()
                    - lv1 * (1.0 - lv1) * coverage / vacancy
                    - (1.0 - l1v) * coverage / adsorbate
            }
        }
    }
}

/// Vacancy solution theory isotherm
#[derive(Clone, Debug, PartialEq)]
pub struct VacancySolution {
    n_m: f64,
    k: f64,
    activity: VacancyActivity,
}

impl VacancySolution {
    /// Flory-Huggins VST
    ///
    /// # Errors
    ///
    /// `ParameterError` unless `n_m`, `k` are positive and `a1v > -1`.
    pub fn flory_huggins(n_m: f64, k: f64, a1v: f64) -> Result<Self> {
        if !(a1v.is_finite() && a1v > -1.0) {
            return Err(AdsorptionError::parameter(format!("FH-VST needs a1v > -1, got {a1v}")));
        }
        Self::checked(n_m, k, VacancyActivity::FloryHuggins { a1v })
    }

    /// Wilson VST
    ///
    /// # Errors
    ///
    /// `ParameterError` unless every parameter is finite and positive.
    pub fn wilson(n_m: f64, k: f64, l1v: f64, lv1: f64) -> Result<Self> {
        if ![l1v, lv1].iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "W-VST interaction constants must be > 0, got L1v = {l1v}, Lv1 = {lv1}"
            )));
        }
        Self::checked(n_m, k, VacancyActivity::Wilson { l1v, lv1 })
    }

    fn checked(n_m: f64, k: f64, activity: VacancyActivity) -> Result<Self> {
        if !(n_m.is_finite() && n_m > 0.0 && k.is_finite() && k > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "VST needs n_m > 0 and K > 0, got n_m = {n_m}, K = {k}"
            )));
        }
        Ok(Self { n_m, k, activity })
    }

    /// ln(K p / n_m) as a function of x = θ/(1 − θ)
    fn reduced_ln_pressure(&self, x: f64) -> f64 {
        x.ln() + self.activity.ln_activity(x / (1.0 + x))
    }
}

impl IsothermModel for VacancySolution {
    fn name(&self) -> &str {
        match self.activity {
            VacancyActivity::FloryHuggins { .. } => "FH-VST",
            VacancyActivity::Wilson { .. } => "W-VST",
        }
    }

    /// NaN where the pressure is not reached
    fn loading(&self, pressure: f64) -> f64 {
        if pressure <= 0.0 {
            return 0.0;
        }
        let henry_ratio = self.k * pressure / self.n_m;
        match invert_increasing(&|x| Ok(self.reduced_ln_pressure(x)), henry_ratio.ln(), henry_ratio, "VST pressure") {
            Ok(x) => self.n_m * x / (1.0 + x),
            Err(err) => {
                warn!("{}: no loading at p = {pressure}: {err}", self.name());
                f64::NAN
            }
        }
    }

    fn pressure(&self, loading: f64) -> Result<f64> {
        if loading <= 0.0 {
            return Ok(0.0);
        }
        if loading >= self.n_m {
            return Err(AdsorptionError::calculation(format!(
                "Loading {loading} is beyond the {} capacity {}",
                self.name(),
                self.n_m
            )));
        }
        let coverage = loading / self.n_m;
        Ok(self.n_m / self.k * coverage / (1.0 - coverage) * self.activity.ln_activity(coverage).exp())
    }

    fn is_iast_compatible(&self) -> bool {
        false
    }
}
