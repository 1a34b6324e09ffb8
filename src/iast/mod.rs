//! Ideal Adsorbed Solution Theory
//!
//! IAST predicts mixture adsorption from the pure-component isotherms. At
//! equilibrium every component of the adsorbed phase sits at the same
//! reduced spreading pressure π, and the adsorbed phase mixes ideally:
//!
//! $$p_i = x_i\,p_i^0(\pi) \qquad \sum_i x_i = 1 \qquad
//!   \frac{1}{n_T} = \sum_i \frac{x_i}{n_i(p_i^0)}$$
//!
//! where `pᵢ⁰(π)` is the pressure at which the pure component reaches π.
//! Both directions reduce to a one-dimensional root search on π.
//!
//! # Module Organization
//!
//! - [`equilibrium`]: forward ([`iast`]) and reverse ([`reverse_iast`])
//!   solutions for any number of components
//! - [`binary`]: selectivity and x–y sweeps for a pair of components
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::iast::iast;
//! use adsorb_rs::models::{IsothermModel, Langmuir};
//!
//! let methane = Langmuir::new(5.0, 0.5).unwrap();
//! let ethane = Langmuir::new(5.0, 2.0).unwrap();
//! let components: [&dyn IsothermModel; 2] = [&methane, &ethane];
//!
//! let result = iast(&components, &[0.5, 0.5]).unwrap();
//! // ethane is the stronger adsorbate
//! assert!(result.adsorbed_mole_fractions[1] > result.adsorbed_mole_fractions[0]);
//! ```

use log::warn;

use crate::error::{AdsorptionError, Result};
use crate::models::IsothermModel;

// module declaration
pub mod binary;
pub mod equilibrium;

// re-export commonly used types for convenience
pub use binary::{iast_binary_svp, iast_binary_vle, SelectivityCurve, VleCurve, VLE_POINTS};
pub use equilibrium::{iast, reverse_iast, IastResult, ReverseIastResult};

/// Largest accepted departure of a fraction vector's sum from one
pub const FRACTION_TOLERANCE: f64 = 1e-6;

// =================================================================================================
// Shared validation
// =================================================================================================

/// Check the component count against a per-component vector
fn check_components(components: &[&dyn IsothermModel], values: &[f64], what: &str) -> Result<()> {
    if components.len() < 2 {
        return Err(AdsorptionError::parameter(format!(
            "IAST needs at least two components, got {}",
            components.len()
        )));
    }
    if components.len() != values.len() {
        return Err(AdsorptionError::parameter(format!(
            "Got {} components but {} {what}",
            components.len(),
            values.len()
        )));
    }
    Ok(())
}

/// Mole fractions: each in [0, 1], summing to one
fn check_fractions(fractions: &[f64]) -> Result<()> {
    if fractions.iter().any(|x| !(0.0..=1.0).contains(x)) {
        return Err(AdsorptionError::parameter(format!(
            "Mole fractions must lie in [0, 1], got {fractions:?}"
        )));
    }
    let sum: f64 = fractions.iter().sum();
    if (sum - 1.0).abs() > FRACTION_TOLERANCE {
        return Err(AdsorptionError::parameter(format!(
            "Mole fractions must add up to 1, got {fractions:?} (sum {sum})"
        )));
    }
    Ok(())
}

fn check_pressure(pressure: f64, what: &str) -> Result<()> {
    if !pressure.is_finite() || pressure <= 0.0 {
        return Err(AdsorptionError::parameter(format!("{what} must be > 0, got {pressure}")));
    }
    Ok(())
}

/// Warn about models that break the IAST assumptions
fn warn_incompatible(components: &[&dyn IsothermModel]) {
    for model in components.iter().filter(|m| !m.is_iast_compatible()) {
        warn!(
            "Model {} is not thermodynamically consistent, IAST results may be unreliable",
            model.name()
        );
    }
}

// =================================================================================================
// Tests
// =================================================================================================
