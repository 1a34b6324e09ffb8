//! Initial enthalpy of adsorption
//!
//! Two estimates of the enthalpy of adsorption at zero loading, from an
//! enthalpy column stored alongside the isotherm (kJ/mol):
//!
//! - [`initial_enthalpy_point`]: the first measured value
//! - [`initial_enthalpy_comp`]: a compound model fitted over the whole
//!   branch and evaluated at zero loading
//!
//! # Compound model
//!
//! With the loading normalised to its maximum:
//!
//! $$h(n) = c + a\,e^{b n} + p_a\,n^{q_a} + p_r\,n^{q_r}$$
//!
//! - `c`: constant contribution, bounded by the data and by the enthalpy
//!   of liquefaction
//! - `a·e^{bn}`: active sites and defects, decaying (`b ≤ 0`, `0 ≤ a ≤ 150`)
//! - `p_a·n^{q_a}`: attractive adsorbate-adsorbate term (`p_a ≥ 0`)
//! - `p_r·n^{q_r}`: repulsive adsorbate-adsorbate term (`p_r ≤ 0`)
//!
//! The fit minimises the relative residual sum of squares under the bound
//! set above, with `c − (other terms) ≥ 0` enforced at every loading. Four
//! starting points are tried and the best fit is kept.

use log::warn;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{AdsorptionError, Result};
use crate::isotherm::{Branch, IsothermData, LoadingBasis, LoadingUnit};
use crate::solver::NelderMead;

/// Names of the compound-model parameters, in vector order
pub const PARAM_NAMES: [&str; 7] = ["const", "preexp", "exp", "prepowa", "powa", "prepowr", "powr"];

/// Enthalpy values outside this range are treated as outliers **\[kJ/mol\]**
const ENTHALPY_RANGE: (f64, f64) = (0.0, 400.0);

/// Largest departure of h(0) from the first point before the fit is
/// distrusted **\[kJ/mol\]**
const MAX_DEPARTURE: f64 = 50.0;

/// Weight of the constraint violation in the objective
const CONSTRAINT_PENALTY: f64 = 1e4;

// =================================================================================================
// Parameters
// =================================================================================================

/// Parameters of the compound enthalpy model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnthalpyParams {
    #[serde(rename = "const")]
    pub constant: f64,
    pub preexp: f64,
    pub exp: f64,
    pub prepowa: f64,
    pub powa: f64,
    pub prepowr: f64,
    pub powr: f64,
}

impl EnthalpyParams {
    fn from_slice(values: &[f64]) -> Self {
        Self {
            constant: values[0],
            preexp: values[1],
            exp: values[2],
            prepowa: values[3],
            powa: values[4],
            prepowr: values[5],
            powr: values[6],
        }
    }

    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_vec(vec![
            self.constant,
            self.preexp,
            self.exp,
            self.prepowa,
            self.powa,
            self.prepowr,
            self.powr,
        ])
    }

    fn exponential_term(&self, loading: f64) -> f64 {
        self.preexp * (self.exp * loading).exp()
    }

    fn attractive_term(&self, loading: f64) -> f64 {
        self.prepowa * loading.powf(self.powa)
    }

    fn repulsive_term(&self, loading: f64) -> f64 {
        self.prepowr * loading.powf(self.powr)
    }

    /// Modelled enthalpy at a normalised loading
    pub fn enthalpy(&self, loading: f64) -> f64 {
        self.constant + self.exponential_term(loading) + self.attractive_term(loading) + self.repulsive_term(loading)
    }

    /// Constraint value; non-negative when the constant dominates
    pub fn constraint(&self, loading: f64) -> f64 {
        self.constant - self.exponential_term(loading) - self.attractive_term(loading) - self.repulsive_term(loading)
    }
}

// =================================================================================================
// Bounds
// =================================================================================================

/// Optional limits on one parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamBound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Caller overrides of the bounds derived from the data
///
/// Unset limits keep their default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnthalpyBounds {
    #[serde(default, rename = "const")]
    pub constant: ParamBound,
    #[serde(default)]
    pub preexp: ParamBound,
    #[serde(default)]
    pub exp: ParamBound,
    #[serde(default)]
    pub prepowa: ParamBound,
    #[serde(default)]
    pub powa: ParamBound,
    #[serde(default)]
    pub prepowr: ParamBound,
    #[serde(default)]
    pub powr: ParamBound,
}

impl EnthalpyBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the limits of the parameter called `name`
    ///
    /// # Errors
    ///
    /// `ParameterError` if `name` is not one of [`PARAM_NAMES`].
    pub fn with_bound(mut self, name: &str, min: Option<f64>, max: Option<f64>) -> Result<Self> {
        let slot = match name {
            "const" => &mut self.constant,
            "preexp" => &mut self.preexp,
            "exp" => &mut self.exp,
            "prepowa" => &mut self.prepowa,
            "powa" => &mut self.powa,
            "prepowr" => &mut self.prepowr,
            "powr" => &mut self.powr,
            other => {
                return Err(AdsorptionError::parameter(format!(
                    "Unknown enthalpy parameter '{other}', expected one of {PARAM_NAMES:?}"
                )));
            }
        };
        *slot = ParamBound { min, max };
        Ok(self)
    }

    fn overrides(&self) -> [ParamBound; 7] {
        [self.constant, self.preexp, self.exp, self.prepowa, self.powa, self.prepowr, self.powr]
    }

    /// Reject NaN limits
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in PARAM_NAMES.iter().zip(self.overrides()) {
            if [bound.min, bound.max].into_iter().flatten().any(f64::is_nan) {
                return Err(AdsorptionError::parameter(format!("Bound on '{name}' is NaN")));
            }
        }
        Ok(())
    }

    /// Apply the overrides on top of `defaults`
    fn apply(&self, defaults: [(f64, f64); 7]) -> Result<Vec<(f64, f64)>> {
        PARAM_NAMES
            .iter()
            .zip(defaults)
            .zip(self.overrides())
            .map(|((name, (lo, hi)), bound)| {
                let lo = bound.min.unwrap_or(lo);
                let hi = bound.max.unwrap_or(hi);
                if lo > hi {
                    return Err(AdsorptionError::parameter(format!(
                        "Bounds on '{name}' are inverted: ({lo}, {hi})"
                    )));
                }
                Ok((lo, hi))
            })
            .collect()
    }
}

// =================================================================================================
// Results
// =================================================================================================

/// Outcome of an initial-enthalpy calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialEnthalpyResult {
    /// Enthalpy of adsorption at zero loading **\[kJ/mol\]**
    pub initial_enthalpy: f64,
    /// Fitted compound model, absent for the point method
    pub params: Option<EnthalpyParams>,
    /// Objective value of the retained fit
    pub residual: Option<f64>,
    /// Set when the fit was rejected in favour of the first point
    pub point_fallback: bool,
}

// =================================================================================================
// Calculations
// =================================================================================================

fn enthalpy_column(isotherm: &dyn IsothermData, key: &str, branch: Branch) -> Result<Vec<f64>> {
    isotherm
        .other_data(key, branch)
        .ok_or_else(|| AdsorptionError::parameter(format!("Could not find enthalpy column '{key}' in isotherm")))
}

/// Initial enthalpy taken as the first point of the enthalpy column
///
/// # Errors
///
/// `ParameterError` if the column is missing or empty.
pub fn initial_enthalpy_point(isotherm: &dyn IsothermData, key: &str, branch: Branch) -> Result<InitialEnthalpyResult> {
    let enthalpy = enthalpy_column(isotherm, key, branch)?;
    let first = enthalpy
        .first()
        .copied()
        .ok_or_else(|| AdsorptionError::parameter(format!("Enthalpy column '{key}' is empty")))?;

    Ok(InitialEnthalpyResult {
        initial_enthalpy: first,
        params: None,
        residual: None,
        point_fallback: false,
    })
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Initial enthalpy from the compound model fit
///
/// # Errors
///
/// - `ParameterError`: missing enthalpy column, invalid or inverted bounds
/// - `CalculationError`: no enthalpy point inside (0, 400] kJ/mol, or no
///   starting guess produced a finite fit
pub fn initial_enthalpy_comp(
    isotherm: &dyn IsothermData,
    key: &str,
    branch: Branch,
    bounds: &EnthalpyBounds,
) -> Result<InitialEnthalpyResult> {
    bounds.validate()?;

    let loading = isotherm.loading(branch, LoadingUnit::Mmol, LoadingBasis::Molar)?;
    let raw_enthalpy = enthalpy_column(isotherm, key, branch)?;
    let max_loading = loading.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (loading, enthalpy): (Vec<f64>, Vec<f64>) = loading
        .iter()
        .map(|n| n / max_loading)
        .zip(raw_enthalpy.iter().copied())
        .filter(|(_, h)| *h > ENTHALPY_RANGE.0 && *h <= ENTHALPY_RANGE.1)
        .unzip();

    if enthalpy.is_empty() {
        return Err(AdsorptionError::calculation(format!(
            "No enthalpy point of '{key}' inside ({}, {}] kJ/mol",
            ENTHALPY_RANGE.0,
            ENTHALPY_RANGE.1
        )));
    }

    // ====== Bounds ======

    let (average, deviation) = mean_and_std(&enthalpy);
    let mut const_min = average - 2.0 * deviation;

    let liquefaction = isotherm
        .adsorbate()
        .ok_or_else(|| AdsorptionError::calculation("unknown adsorbate"))
        .and_then(|adsorbate| adsorbate.enthalpy_liquefaction(isotherm.temperature()));
    match liquefaction {
        Ok(value) => const_min = const_min.max(value),
        Err(e) => warn!("Could not calculate liquid enthalpy, perhaps in supercritical regime: {e}"),
    }
    let const_avg = average.max(const_min);

    let limits = bounds.apply([
        (const_min, const_avg),
        (0.0, 150.0),
        (f64::NEG_INFINITY, 0.0),
        (0.0, f64::INFINITY),
        (1.0, 50.0),
        (f64::NEG_INFINITY, 0.0),
        (1.0, 50.0),
    ])?;

    // ====== Fit ======

    let objective = |x: &DVector<f64>| {
        let params = EnthalpyParams::from_slice(x.as_slice());
        let residual: f64 = loading
            .iter()
            .zip(enthalpy.iter())
            .map(|(&n, &h)| ((h - params.enthalpy(n)) / h).powi(2))
            .sum();
        let violation: f64 = loading.iter().map(|&n| params.constraint(n).min(0.0).powi(2)).sum();
        residual + CONSTRAINT_PENALTY * violation
    };

    let clamp_enthalpy = |h: f64| h.clamp(0.0, 150.0);
    let dep_first = clamp_enthalpy(enthalpy[0]) - const_avg;
    let dep_last = clamp_enthalpy(enthalpy[enthalpy.len() - 1]) - const_avg;
    let guesses = [
        // constant only
        [const_avg, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0],
        // matched start and end
        [const_avg, dep_first, 0.0, dep_last, 1.0, dep_last, 1.0],
        // steep exponential, gentle attraction
        [const_avg, 1.5 * dep_first, -10.0, 0.01, 3.0, 0.0, 1.0],
        // no exponential, gentle repulsion
        [const_avg, 0.0, 0.0, 0.0, 3.0, -0.01, 3.0],
    ];

    let minimizer = NelderMead::new();
    let mut best: Option<(EnthalpyParams, f64)> = None;

    for guess in guesses {
        let Ok(fit) = minimizer.minimize(&objective, DVector::from_row_slice(&guess), &limits) else {
            continue;
        };
        if fit.fun.is_finite() && best.is_none_or(|(_, fun)| fit.fun < fun) {
            best = Some((EnthalpyParams::from_slice(fit.x.as_slice()), fit.fun));
        }
    }

    let (params, residual) = best.ok_or_else(|| {
        AdsorptionError::calculation("Minimization of RSS fitting failed with all guesses")
    })?;

    let fitted = params.enthalpy(0.0);
    let first = enthalpy[0];
    if (fitted - first).abs() > MAX_DEPARTURE {
        warn!("Probable offshoot for exponent ({fitted} vs {first} kJ/mol), reverting to point method");
        let point = initial_enthalpy_point(isotherm, key, branch)?;
        return Ok(InitialEnthalpyResult {
            initial_enthalpy: point.initial_enthalpy,
            params: Some(params),
            residual: Some(residual),
            point_fallback: true,
        });
    }

    Ok(InitialEnthalpyResult {
        initial_enthalpy: fitted,
        params: Some(params),
        residual: Some(residual),
        point_fallback: false,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isotherm::{Adsorbate, PointIsotherm};
    use approx::assert_relative_eq;

    fn calorimetry(loading: Vec<f64>, enthalpy: Vec<f64>) -> PointIsotherm {
        let pressure = (1..=loading.len()).map(|i| i as f64 * 0.01).collect();
        PointIsotherm::new(pressure, loading, 77.355)
            .unwrap()
            .with_adsorbate(Adsorbate::find("nitrogen").unwrap())
            .with_other_data("enthalpy", enthalpy)
            .unwrap()
    }

    #[test]
    fn test_model_terms() {
        let params = EnthalpyParams {
            constant: 20.0,
            preexp: 30.0,
            exp: -8.0,
            prepowa: 2.0,
            powa: 2.0,
            prepowr: -1.0,
            powr: 1.0,
        };

        assert_relative_eq!(params.enthalpy(0.0), 50.0);
        assert_relative_eq!(params.enthalpy(1.0), 20.0 + 30.0 * (-8.0_f64).exp() + 2.0 - 1.0);
        assert_relative_eq!(params.constraint(1.0), 20.0 - 30.0 * (-8.0_f64).exp() - 2.0 + 1.0);
        assert_eq!(params.to_vector().len(), 7);
    }

    #[test]
    fn test_point_method() {
        let isotherm = calorimetry(vec![1.0, 2.0, 3.0], vec![42.0, 30.0, 25.0]);
        let result = initial_enthalpy_point(&isotherm, "enthalpy", Branch::Adsorption).unwrap();

        assert_eq!(result.initial_enthalpy, 42.0);
        assert!(result.params.is_none());
    }

    #[test]
    fn test_missing_column() {
        let isotherm = calorimetry(vec![1.0, 2.0, 3.0], vec![42.0, 30.0, 25.0]);

        let err = initial_enthalpy_point(&isotherm, "heat", Branch::Adsorption).unwrap_err();
        assert!(err.is_parameter());
        let err = initial_enthalpy_comp(&isotherm, "heat", Branch::Adsorption, &EnthalpyBounds::new()).unwrap_err();
        assert!(err.is_parameter());
    }

    #[test]
    fn test_compound_fit_recovers_exponential() {
        let loading: Vec<f64> = (1..=20).map(|i| 0.05 * i as f64).collect();
        let enthalpy = loading.iter().map(|n| 20.0 + 30.0 * (-8.0 * n).exp()).collect();
        let isotherm = calorimetry(loading, enthalpy);

        let result = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &EnthalpyBounds::new()).unwrap();

        assert!(!result.point_fallback);
        assert!((result.initial_enthalpy - 50.0).abs() < 1.0, "{}", result.initial_enthalpy);
        let params = result.params.unwrap();
        assert!(params.exp <= 0.0);
        assert!(params.preexp >= 0.0 && params.preexp <= 150.0);
    }

    #[test]
    fn test_constant_enthalpy() {
        let loading: Vec<f64> = (1..=10).map(|i| 0.1 * i as f64).collect();
        let isotherm = calorimetry(loading, vec![25.0; 10]);

        let result = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &EnthalpyBounds::new()).unwrap();
        assert_relative_eq!(result.initial_enthalpy, 25.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fallback_to_point_method() {
        let loading: Vec<f64> = (1..=10).map(|i| 0.1 * i as f64).collect();
        let isotherm = calorimetry(loading, vec![25.0; 10]);
        let bounds = EnthalpyBounds::new()
            .with_bound("const", Some(100.0), Some(100.0))
            .unwrap()
            .with_bound("preexp", Some(0.0), Some(0.0))
            .unwrap();

        let result = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &bounds).unwrap();

        assert!(result.point_fallback);
        assert_eq!(result.initial_enthalpy, 25.0);
    }

    #[test]
    fn test_outliers_only() {
        let isotherm = calorimetry(vec![1.0, 2.0, 3.0], vec![-5.0, 500.0, 1e4]);
        let err = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &EnthalpyBounds::new()).unwrap_err();
        assert!(err.is_calculation());

        let isotherm = calorimetry(vec![1.0, 2.0], vec![0.0, 0.0]);
        let err = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &EnthalpyBounds::new()).unwrap_err();
        assert!(err.is_calculation());
    }

    #[test]
    fn test_zero_enthalpy_points_are_skipped() {
        // a blank reading would divide the relative residual by zero
        let loading: Vec<f64> = (1..=10).map(|i| 0.1 * i as f64).collect();
        let mut enthalpy = vec![25.0; 10];
        enthalpy[0] = 0.0;
        enthalpy[6] = 0.0;
        let isotherm = calorimetry(loading, enthalpy);

        let result = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &EnthalpyBounds::new()).unwrap();

        assert!(!result.point_fallback);
        assert_relative_eq!(result.initial_enthalpy, 25.0, epsilon = 1e-3);
        assert!(result.residual.unwrap().is_finite());
    }

    #[test]
    fn test_bound_overrides() {
        assert!(EnthalpyBounds::new().with_bound("gamma", None, None).is_err());

        let inverted = EnthalpyBounds::new().with_bound("powa", Some(5.0), Some(2.0)).unwrap();
        let isotherm = calorimetry(vec![1.0, 2.0, 3.0], vec![42.0, 30.0, 25.0]);
        let err = initial_enthalpy_comp(&isotherm, "enthalpy", Branch::Adsorption, &inverted).unwrap_err();
        assert!(err.is_parameter());

        let nan = EnthalpyBounds::new().with_bound("exp", Some(f64::NAN), None).unwrap();
        assert!(nan.validate().is_err());
    }
}
