//! Forward and reverse IAST
//!
//! # Forward
//!
//! Given the gas-phase partial pressures, find π such that
//!
//! $$f(\pi) = \sum_i \frac{p_i}{p_i^0(\pi)} - 1 = 0$$
//!
//! `f` decreases with π. At `π = minᵢ πᵢ(pᵢ)` one term equals one, so
//! `f ≥ 0`; at `π = maxᵢ πᵢ(N·pᵢ)` every term is at most `1/N`, so `f ≤ 0`.
//!
//! # Reverse
//!
//! Given the adsorbed fractions and the total pressure P, find π such that
//!
//! $$g(\pi) = \sum_i x_i\,p_i^0(\pi) - P = 0$$
//!
//! `g` increases with π, is non-positive at `minᵢ πᵢ(P)` and non-negative
//! at `maxᵢ πᵢ(P)`.
//!
//! Both roots are searched in ln π: at low pressure π is proportional to
//! the partial pressures and may be many decades below one.

use log::debug;
use nalgebra::DVector;
use serde::Serialize;

use crate::error::{AdsorptionError, ErrorSlot, Result};
use crate::iast::{check_components, check_fractions, check_pressure, warn_incompatible};
use crate::models::IsothermModel;
use crate::solver::{expand_log_bracket, BrentRoot};

const MAX_BRACKET_EXPANSIONS: usize = 60;

// =================================================================================================
// Results
// =================================================================================================

/// Adsorbed phase in equilibrium with a known gas phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IastResult {
    /// Mole fractions x_i in the adsorbed phase
    pub adsorbed_mole_fractions: DVector<f64>,
    /// Component loadings x_i·n_T
    pub loadings: DVector<f64>,
    /// Total adsorbed amount n_T
    pub total_loading: f64,
    /// Common reduced spreading pressure π
    pub spreading_pressure: f64,
}

/// Gas phase in equilibrium with a known adsorbed phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseIastResult {
    pub partial_pressures: DVector<f64>,
    /// Mole fractions y_i in the gas phase
    pub gas_mole_fractions: DVector<f64>,
    pub loadings: DVector<f64>,
    pub total_loading: f64,
    pub spreading_pressure: f64,
}

// =================================================================================================
// Shared steps
// =================================================================================================

/// Pure-component pressures at a spreading pressure
fn pure_pressures(components: &[&dyn IsothermModel], spreading_pressure: f64) -> Result<Vec<f64>> {
    components
        .iter()
        .map(|model| model.spreading_pressure_inverse(spreading_pressure))
        .collect()
}

/// Total loading and component loadings of an ideal adsorbed mixture
fn mixture_loadings(components: &[&dyn IsothermModel], fractions: &[f64], pure: &[f64]) -> (DVector<f64>, f64) {
    let inverse_total: f64 = components
        .iter()
        .zip(fractions.iter().zip(pure.iter()))
        .filter(|(_, (x, _))| **x > 0.0)
        .map(|(model, (x, p0))| x / model.loading(*p0))
        .sum();
    let total = 1.0 / inverse_total;

    (DVector::from_iterator(fractions.len(), fractions.iter().map(|x| x * total)), total)
}

/// Root of a monotone function of π on `[lower, upper]`, widening the
/// bracket if rounding left it without a sign change
fn solve_spreading_pressure(f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<f64> {
    let (lower, upper) = expand_log_bracket(f, lower, upper, MAX_BRACKET_EXPANSIONS)
        .map_err(|e| AdsorptionError::calculation(format!("Could not bracket the spreading pressure: {e}")))?;

    let root = BrentRoot::new().find_log_root(f, lower, upper)?;
    if !root.converged {
        debug!("Spreading pressure search stopped after {} iterations", root.iterations);
    }
    Ok(root.root)
}

// =================================================================================================
// Forward
// =================================================================================================

/// Adsorbed-phase composition from gas-phase partial pressures
///
/// Components at zero partial pressure are absent from the adsorbed phase.
///
/// # Errors
///
/// - `ParameterError`: fewer than two components, length mismatch,
///   negative or non-finite pressures, all pressures zero
/// - `CalculationError`: no bracket or root for the spreading pressure
pub fn iast(components: &[&dyn IsothermModel], partial_pressures: &[f64]) -> Result<IastResult> {
    check_components(components, partial_pressures, "partial pressures")?;
    if partial_pressures.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(AdsorptionError::parameter(format!(
            "Partial pressures must be finite and >= 0, got {partial_pressures:?}"
        )));
    }
    if partial_pressures.iter().all(|p| *p == 0.0) {
        return Err(AdsorptionError::parameter("At least one partial pressure must be > 0"));
    }
    warn_incompatible(components);

    let present: Vec<(&dyn IsothermModel, f64)> = components
        .iter()
        .copied()
        .zip(partial_pressures.iter().copied())
        .filter(|(_, p)| *p > 0.0)
        .collect();
    let count = components.len() as f64;

    let mut lower = f64::INFINITY;
    let mut upper = 0.0_f64;
    for (model, p) in &present {
        lower = lower.min(model.spreading_pressure(*p)?);
        upper = upper.max(model.spreading_pressure(count * p)?);
    }

    let errors = ErrorSlot::new();
    let objective = |pi: f64| {
        present
            .iter()
            .map(|(model, p)| p / errors.value(model.spreading_pressure_inverse(pi)))
            .sum::<f64>()
            - 1.0
    };

    // f(lower) ≤ 0 only through rounding, with a single component present
    let solved = if objective(lower) <= 0.0 {
        Ok(lower)
    } else {
        solve_spreading_pressure(&objective, lower, upper)
    };
    let spreading_pressure = errors.check(solved)?;

    let pure = pure_pressures(components, spreading_pressure)?;
    let fractions: Vec<f64> = partial_pressures
        .iter()
        .zip(pure.iter())
        .map(|(p, p0)| if *p > 0.0 { p / p0 } else { 0.0 })
        .collect();
    let (loadings, total_loading) = mixture_loadings(components, &fractions, &pure);

    Ok(IastResult {
        adsorbed_mole_fractions: DVector::from_vec(fractions),
        loadings,
        total_loading,
        spreading_pressure,
    })
}

// =================================================================================================
// Reverse
// =================================================================================================

/// Gas-phase composition from adsorbed-phase mole fractions
///
/// # Errors
///
/// - `ParameterError`: fewer than two components, length mismatch,
///   fractions outside [0, 1] or not summing to one, non-positive total
///   pressure
/// - `CalculationError`: no bracket or root for the spreading pressure
pub fn reverse_iast(
    components: &[&dyn IsothermModel],
    adsorbed_mole_fractions: &[f64],
    total_pressure: f64,
) -> Result<ReverseIastResult> {
    check_components(components, adsorbed_mole_fractions, "adsorbed mole fractions")?;
    check_fractions(adsorbed_mole_fractions)?;
    check_pressure(total_pressure, "Total pressure")?;
    warn_incompatible(components);

    let mut lower = f64::INFINITY;
    let mut upper = 0.0_f64;
    for model in components {
        let pi = model.spreading_pressure(total_pressure)?;
        lower = lower.min(pi);
        upper = upper.max(pi);
    }

    let errors = ErrorSlot::new();
    let objective = |pi: f64| {
        components
            .iter()
            .zip(adsorbed_mole_fractions.iter())
            .map(|(model, x)| x * errors.value(model.spreading_pressure_inverse(pi)))
            .sum::<f64>()
            - total_pressure
    };
    let solved = solve_spreading_pressure(&objective, lower, upper);
    let spreading_pressure = errors.check(solved)?;

    let pure = pure_pressures(components, spreading_pressure)?;
    let partial: Vec<f64> = adsorbed_mole_fractions.iter().zip(pure.iter()).map(|(x, p0)| x * p0).collect();
    let gas: Vec<f64> = partial.iter().map(|p| p / total_pressure).collect();
    let (loadings, total_loading) = mixture_loadings(components, adsorbed_mole_fractions, &pure);

    Ok(ReverseIastResult {
        partial_pressures: DVector::from_vec(partial),
        gas_mole_fractions: DVector::from_vec(gas),
        loadings,
        total_loading,
        spreading_pressure,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Henry, Langmuir, MultiSiteLangmuir, Quadratic};
    use approx::assert_relative_eq;

    /// Extended Langmuir loadings for components of equal capacity
    fn extended_langmuir(n_m: f64, k: &[f64], p: &[f64]) -> Vec<f64> {
        let denominator = 1.0 + k.iter().zip(p).map(|(k, p)| k * p).sum::<f64>();
        k.iter().zip(p).map(|(k, p)| n_m * k * p / denominator).collect()
    }

    #[test]
    fn test_equal_capacity_langmuir_is_extended_langmuir() {
        let a = Langmuir::new(4.0, 0.5).unwrap();
        let b = Langmuir::new(4.0, 3.0).unwrap();
        let c = Langmuir::new(4.0, 0.1).unwrap();
        let components: [&dyn IsothermModel; 3] = [&a, &b, &c];
        let pressures = [0.7, 0.2, 1.5];

        let result = iast(&components, &pressures).unwrap();
        let expected = extended_langmuir(4.0, &[0.5, 3.0, 0.1], &pressures);

        for (n, e) in result.loadings.iter().zip(expected.iter()) {
            assert_relative_eq!(*n, *e, max_relative = 1e-8);
        }
        assert_relative_eq!(result.adsorbed_mole_fractions.sum(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(result.total_loading, expected.iter().sum::<f64>(), max_relative = 1e-8);
    }

    #[test]
    fn test_henry_pair() {
        // linear isotherms: x_i ∝ K_i p_i
        let a = Henry::new(2.0).unwrap();
        let b = Henry::new(6.0).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let result = iast(&components, &[0.5, 0.5]).unwrap();
        assert_relative_eq!(result.adsorbed_mole_fractions[0], 0.25, max_relative = 1e-9);
        assert_relative_eq!(result.adsorbed_mole_fractions[1], 0.75, max_relative = 1e-9);
    }

    #[test]
    fn test_absent_component() {
        let a = Langmuir::new(3.0, 1.0).unwrap();
        let b = Langmuir::new(5.0, 2.0).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let result = iast(&components, &[0.0, 0.4]).unwrap();
        assert_eq!(result.adsorbed_mole_fractions[0], 0.0);
        assert_relative_eq!(result.adsorbed_mole_fractions[1], 1.0, max_relative = 1e-9);
        assert_relative_eq!(result.loadings[1], b.loading(0.4), max_relative = 1e-9);
    }

    #[test]
    fn test_forward_reverse_round_trip() {
        let a = Langmuir::new(3.0, 0.4).unwrap();
        let b = Quadratic::new(2.0, 1.5, 0.3).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let forward = iast(&components, &[0.6, 0.4]).unwrap();
        let fractions: Vec<f64> = forward.adsorbed_mole_fractions.iter().copied().collect();
        let reverse = reverse_iast(&components, &fractions, 1.0).unwrap();

        assert_relative_eq!(reverse.partial_pressures[0], 0.6, max_relative = 1e-6);
        assert_relative_eq!(reverse.partial_pressures[1], 0.4, max_relative = 1e-6);
        assert_relative_eq!(reverse.gas_mole_fractions.sum(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(reverse.total_loading, forward.total_loading, max_relative = 1e-6);
        assert_relative_eq!(reverse.spreading_pressure, forward.spreading_pressure, max_relative = 1e-6);
    }

    #[test]
    fn test_identical_components() {
        let a = Langmuir::new(2.0, 1.0).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &a];

        let result = iast(&components, &[0.3, 0.3]).unwrap();
        assert_relative_eq!(result.adsorbed_mole_fractions[0], 0.5, max_relative = 1e-9);
        assert_relative_eq!(result.total_loading, a.loading(0.6), max_relative = 1e-9);
    }

    #[test]
    fn test_forward_parameter_errors() {
        let a = Langmuir::new(2.0, 1.0).unwrap();
        let b = Langmuir::new(2.0, 3.0).unwrap();
        let single: [&dyn IsothermModel; 1] = [&a];
        let pair: [&dyn IsothermModel; 2] = [&a, &b];

        assert!(iast(&single, &[0.1]).unwrap_err().is_parameter());
        assert!(iast(&pair, &[0.1]).unwrap_err().is_parameter());
        assert!(iast(&pair, &[-0.1, 0.2]).unwrap_err().is_parameter());
        assert!(iast(&pair, &[0.0, 0.0]).unwrap_err().is_parameter());
    }

    #[test]
    fn test_reverse_parameter_errors() {
        let a = Langmuir::new(2.0, 1.0).unwrap();
        let b = Langmuir::new(2.0, 3.0).unwrap();
        let single: [&dyn IsothermModel; 1] = [&a];
        let pair: [&dyn IsothermModel; 2] = [&a, &b];

        assert!(reverse_iast(&single, &[0.1], 2.0).unwrap_err().is_parameter());
        assert!(reverse_iast(&pair, &[0.1], 2.0).unwrap_err().is_parameter());
        assert!(reverse_iast(&pair, &[0.1, 0.4], 2.0).unwrap_err().is_parameter());
        assert!(reverse_iast(&pair, &[0.5, 0.5], 0.0).unwrap_err().is_parameter());
    }

    #[test]
    fn test_henry_regime_with_numeric_inverse() {
        // DSLangmuir has no closed-form π⁻¹; K_H = 2·100 + 3·1 against 2·0.5
        let a = MultiSiteLangmuir::dual_site(2.0, 100.0, 3.0, 1.0).unwrap();
        let b = Langmuir::new(2.0, 0.5).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        for p in [1e-12, 1e-10, 1e-8] {
            let result = iast(&components, &[p, p]).unwrap();

            assert_relative_eq!(result.adsorbed_mole_fractions[0], 203.0 / 204.0, max_relative = 1e-5);
            assert_relative_eq!(result.total_loading, a.loading(p) + b.loading(p), max_relative = 1e-5);
            assert!(result.spreading_pressure > 0.0);

            let fractions: Vec<f64> = result.adsorbed_mole_fractions.iter().copied().collect();
            let reverse = reverse_iast(&components, &fractions, 2.0 * p).unwrap();
            assert_relative_eq!(reverse.partial_pressures[0], p, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_model_errors_reach_the_caller() {
        /// Refuses to invert, to check that the error is not swallowed
        struct Unfitted;

        impl IsothermModel for Unfitted {
            fn name(&self) -> &str {
                "Unfitted"
            }

            fn loading(&self, pressure: f64) -> f64 {
                pressure
            }

            fn spreading_pressure_inverse(&self, _spreading_pressure: f64) -> Result<f64> {
                Err(AdsorptionError::parameter("Unfitted has no inverse"))
            }
        }

        let a = Langmuir::new(2.0, 1.0).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &Unfitted];

        let err = iast(&components, &[0.2, 0.3]).unwrap_err();
        assert_eq!(err, AdsorptionError::parameter("Unfitted has no inverse"));

        let err = reverse_iast(&components, &[0.5, 0.5], 1.0).unwrap_err();
        assert_eq!(err, AdsorptionError::parameter("Unfitted has no inverse"));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let a = Langmuir::new(3.0, 0.4).unwrap();
        let b = Langmuir::new(2.0, 1.1).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        assert_eq!(iast(&components, &[0.3, 0.9]).unwrap(), iast(&components, &[0.3, 0.9]).unwrap());
    }
}
