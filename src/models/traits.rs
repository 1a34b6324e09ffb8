//! Model isotherm trait
//!
//! A model isotherm is a fitted function n(p). IAST needs four views of it:
//! - `loading(p)`: the function itself
//! - `pressure(n)`: its inverse
//! - `spreading_pressure(p)`: the reduced spreading pressure
//!   π(p) = ∫₀ᵖ n(p')/p' dp'
//! - `spreading_pressure_inverse(π)`: the pressure at which π is reached
//!
//! Only `loading` is mandatory. The other three have numerical defaults
//! (adaptive quadrature, and a Brent root in ln p started from the Henry
//! regime) that closed-form models override. Both inverses keep a relative
//! precision down to pressures of 1e-15 and below.

use crate::error::{AdsorptionError, ErrorSlot, Result};
use crate::solver::{expand_log_bracket, AdaptiveQuadrature, BrentRoot};

/// Pressure at which the Henry slope n'(0) is estimated
const HENRY_PRESSURE: f64 = 1e-9;
/// Far beyond any physical pressure once the steps reach their cap
const MAX_BRACKET_EXPANSIONS: usize = 100;

// =================================================================================================
// Isotherm Model Trait
// =================================================================================================

/// Trait for fitted isotherm models
///
/// # Mandatory Point
/// `loading` must be increasing in pressure and vanish at p = 0 for the
/// numerical inverses to be well defined.
pub trait IsothermModel: Send + Sync {
    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Loading at `pressure`
    fn loading(&self, pressure: f64) -> f64;

    /// Pressure at which `loading` is reached
    ///
    /// # Errors
    ///
    /// `CalculationError` if the loading is never reached.
    fn pressure(&self, loading: f64) -> Result<f64> {
        numeric_pressure(self, loading)
    }

    /// Reduced spreading pressure π(p) = ∫₀ᵖ n(p')/p' dp'
    fn spreading_pressure(&self, pressure: f64) -> Result<f64> {
        numeric_spreading_pressure(self, pressure)
    }

    /// Pressure at which the reduced spreading pressure equals `spreading_pressure`
    fn spreading_pressure_inverse(&self, spreading_pressure: f64) -> Result<f64> {
        numeric_spreading_pressure_inverse(self, spreading_pressure)
    }

    /// Whether the model is thermodynamically consistent for IAST
    fn is_iast_compatible(&self) -> bool {
        true
    }
}

// =================================================================================================
// Numerical defaults
// =================================================================================================

/// Initial slope n(p)/p of the loading, where the Henry regime holds
pub fn henry_constant<M: IsothermModel + ?Sized>(model: &M) -> f64 {
    model.loading(HENRY_PRESSURE) / HENRY_PRESSURE
}

/// Solve `g(x) = target` for x > 0, with g increasing, starting near `seed`
///
/// The search runs in ln x, so the root keeps its relative precision at any
/// magnitude. A non-positive or non-finite seed starts from one.
pub fn invert_increasing(g: &dyn Fn(f64) -> Result<f64>, target: f64, seed: f64, what: &str) -> Result<f64> {
    let seed = if seed.is_finite() && seed > 0.0 { seed } else { 1.0 };

    let errors = ErrorSlot::new();
    let residual = |p: f64| errors.value(g(p)) - target;

    let bracket = expand_log_bracket(&residual, 0.5 * seed, 2.0 * seed, MAX_BRACKET_EXPANSIONS);
    if let Some(err) = errors.take() {
        return Err(err);
    }
    let (lower, upper) = bracket.map_err(|err| match err {
        AdsorptionError::Calculation(_) => {
            AdsorptionError::calculation(format!("{what} {target} is never reached"))
        }
        other => other,
    })?;

    let root = BrentRoot::new().find_log_root(&residual, lower, upper);
    Ok(errors.check(root)?.root)
}

/// Numerical inverse of [`IsothermModel::loading`]
pub fn numeric_pressure<M: IsothermModel + ?Sized>(model: &M, loading: f64) -> Result<f64> {
    if loading <= 0.0 {
        return Ok(0.0);
    }
    // n(p) → K_H·p
    invert_increasing(&|p| Ok(model.loading(p)), loading, loading / henry_constant(model), "Loading")
}

/// Spreading pressure by adaptive quadrature of n(p)/p
///
/// The integrand is scaled by n(p) so that the quadrature tolerance is
/// relative to π, also when π ≪ 1.
pub fn numeric_spreading_pressure<M: IsothermModel + ?Sized>(model: &M, pressure: f64) -> Result<f64> {
    if pressure <= 0.0 {
        return Ok(0.0);
    }
    let reference = model.loading(pressure);
    if !(reference.is_finite() && reference > 0.0) {
        return Err(AdsorptionError::calculation(format!(
            "{} loading at {pressure} is {reference}, cannot integrate the spreading pressure",
            model.name()
        )));
    }
    let scaled = AdaptiveQuadrature::new().integrate(&|p| model.loading(p) / (p * reference), 0.0, pressure)?;
    Ok(scaled * reference)
}

/// Numerical inverse of [`IsothermModel::spreading_pressure`]
pub fn numeric_spreading_pressure_inverse<M: IsothermModel + ?Sized>(
    model: &M,
    spreading_pressure: f64,
) -> Result<f64> {
    if spreading_pressure <= 0.0 {
        return Ok(0.0);
    }
    // π(p) → K_H·p
    invert_increasing(
        &|p| model.spreading_pressure(p),
        spreading_pressure,
        spreading_pressure / henry_constant(model),
        "Spreading pressure",
    )
}
