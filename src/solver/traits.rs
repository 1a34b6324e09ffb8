//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! Every numerical method in this crate falls into one of three shapes:
//! - minimise a scalar function on an interval (`ScalarMinimizer`)
//! - find a sign change of a scalar function on an interval (`RootFinder`)
//! - minimise a function of several variables (`Simplex`, see methods)
//!
//! All of them are driven by the same `SolverConfiguration` (tolerance and
//! iteration cap) and report how they finished, so that the caller decides
//! what a missed tolerance means.

use crate::error::{AdsorptionError, Result};

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a numerical method
///
/// # Examples
///
/// ```rust
/// use adsorb_rs::solver::SolverConfiguration;
///
/// // Pore-width minimiser defaults
/// let config = SolverConfiguration::bounded_minimization();
/// assert_eq!(config.tolerance, 1e-5);
/// assert_eq!(config.max_iterations, 500);
///
/// // Custom root finding
/// let config = SolverConfiguration::new(1e-10, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Convergence tolerance on the abscissa (or simplex size)
    pub tolerance: f64,

    /// Safety limit on function evaluations / iterations
    pub max_iterations: usize,
}

impl SolverConfiguration {
    /// Create a configuration from its parameters
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self { tolerance, max_iterations }
    }

    /// Bounded scalar minimisation: x-tolerance 1e-5, 500 evaluations
    pub fn bounded_minimization() -> Self {
        Self::new(1e-5, 500)
    }

    /// Bracketed root finding: x-tolerance 2e-12, 100 iterations
    pub fn root_finding() -> Self {
        Self::new(2e-12, 100)
    }

    /// Simplex minimisation: 1e-4 on points and values, 100 000 iterations
    pub fn simplex() -> Self {
        Self::new(1e-4, 100_000)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0) || !self.tolerance.is_finite() {
            return Err(AdsorptionError::parameter(format!(
                "Tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(AdsorptionError::parameter("Maximum iterations must be positive"));
        }
        Ok(())
    }
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self::bounded_minimization()
    }
}

// =================================================================================================
// Results
// =================================================================================================

/// Outcome of a scalar minimisation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinimizeResult {
    /// Best abscissa found
    pub x: f64,

    /// Function value at `x`
    pub fun: f64,

    /// Number of function evaluations
    pub evaluations: usize,

    /// True when the tolerance was met before the evaluation cap
    pub converged: bool,
}

/// Outcome of a root search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootResult {
    /// Root estimate
    pub root: f64,

    /// Iterations performed
    pub iterations: usize,

    /// True when the tolerance was met before the iteration cap
    pub converged: bool,
}

// =================================================================================================
// Traits
// =================================================================================================

/// Minimise `f` on the open interval `(lower, upper)`
///
/// Implementations never evaluate `f` at the bounds themselves and never
/// fail: the best point found is always returned, with
/// [`MinimizeResult::converged`] telling whether the tolerance was met.
pub trait ScalarMinimizer: Send + Sync {
    fn minimize(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> MinimizeResult;

    /// Name of the method (used to display and logging)
    fn name(&self) -> &str;
}

/// Find `x` in `[lower, upper]` with `f(x) = 0`
pub trait RootFinder: Send + Sync {
    /// # Errors
    ///
    /// `CalculationError` if `f(lower)` and `f(upper)` have the same sign or
    /// are not finite.
    fn find_root(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<RootResult>;

    /// Name of the method (used to display and logging)
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(SolverConfiguration::bounded_minimization().validate().is_ok());
        assert!(SolverConfiguration::root_finding().validate().is_ok());
        assert!(SolverConfiguration::simplex().validate().is_ok());
        assert_eq!(SolverConfiguration::default(), SolverConfiguration::bounded_minimization());
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(SolverConfiguration::new(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::new(f64::NAN, 10).validate().is_err());
        assert!(SolverConfiguration::new(1e-6, 0).validate().is_err());
    }
}
