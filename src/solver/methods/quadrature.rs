//! Adaptive Gauss-Legendre quadrature
//!
//! Each interval is integrated with a 5-point Gauss-Legendre rule and with
//! the same rule on its two halves. If the two estimates agree within the
//! tolerance the halves are accepted, otherwise both halves are subdivided
//! again. Nodes are interior, so integrands singular at an end point (such
//! as n(p)/p at p = 0) are never evaluated there.

use log::debug;

use crate::error::{AdsorptionError, Result};
use crate::solver::SolverConfiguration;

const NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

const WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Adaptive Gauss-Legendre integrator
///
/// `tolerance` is relative to the magnitude of the integral (absolute below
/// 1), `max_iterations` caps the number of subdivisions.
///
/// # Example
///
/// ```rust
/// use adsorb_rs::solver::AdaptiveQuadrature;
///
/// let integral = AdaptiveQuadrature::new().integrate(&|x| x.sin(), 0.0, std::f64::consts::PI).unwrap();
/// assert!((integral - 2.0).abs() < 1e-10);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveQuadrature {
    config: SolverConfiguration,
}

impl AdaptiveQuadrature {
    /// Create with tolerance 1e-10 and at most 10 000 subdivisions
    pub fn new() -> Self {
        Self::with_configuration(SolverConfiguration::new(1e-10, 10_000))
    }

    pub fn with_configuration(config: SolverConfiguration) -> Self {
        Self { config }
    }

    /// Integrate `f` over `[a, b]`
    ///
    /// # Errors
    ///
    /// `CalculationError` if the integrand is not finite at a node.
    pub fn integrate(&self, f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<f64> {
        if a == b {
            return Ok(0.0);
        }

        let tolerance = self.config.tolerance;
        let mut total = 0.0;
        let mut subdivisions = 0;

        let whole = gauss_legendre(f, a, b);
        let mut stack = vec![(a, b, whole, 0_u32)];

        while let Some((lo, hi, estimate, depth)) = stack.pop() {
            let mid = 0.5 * (lo + hi);
            let left = gauss_legendre(f, lo, mid);
            let right = gauss_legendre(f, mid, hi);
            let refined = left + right;

            if !refined.is_finite() {
                return Err(AdaptiveQuadrature::non_finite(lo, hi));
            }

            let scale = refined.abs().max(1.0);
            let exhausted = subdivisions >= self.config.max_iterations || depth >= 60;
            if (refined - estimate).abs() <= tolerance * scale || exhausted {
                if exhausted {
                    debug!("Quadrature subdivision limit reached on [{lo}, {hi}]");
                }
                total += refined;
            } else {
                subdivisions += 1;
                stack.push((lo, mid, left, depth + 1));
                stack.push((mid, hi, right, depth + 1));
            }
        }

        Ok(total)
    }

    fn non_finite(lo: f64, hi: f64) -> AdsorptionError {
        AdsorptionError::calculation(format!("Integrand is not finite on [{lo}, {hi}]"))
    }
}

impl Default for AdaptiveQuadrature {
    fn default() -> Self {
        Self::new()
    }
}

/// 5-point Gauss-Legendre estimate on `[a, b]`
fn gauss_legendre(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let half = 0.5 * (b - a);
    let centre = 0.5 * (a + b);
    NODES
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(node, weight)| weight * f(centre + half * node))
        .sum::<f64>()
        * half
}
