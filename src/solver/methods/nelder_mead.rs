//! Bounded Nelder-Mead simplex minimiser
//!
//! Standard reflection / expansion / contraction / shrink moves
//! (ρ = 1, χ = 2, ψ = ½, σ = ½). Every trial point is clipped into the box
//! bounds, which may be infinite on either side. Constraints are left to the
//! objective (e.g. as a penalty term).

use log::debug;
use nalgebra::DVector;

use crate::error::{AdsorptionError, Result};
use crate::solver::SolverConfiguration;

const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// Relative perturbation of non-zero coordinates for the initial simplex
const NONZERO_DELTA: f64 = 0.05;
/// Absolute perturbation of zero coordinates for the initial simplex
const ZERO_DELTA: f64 = 0.000_25;

/// Outcome of a simplex minimisation
#[derive(Clone, Debug, PartialEq)]
pub struct SimplexResult {
    /// Best point found
    pub x: DVector<f64>,

    /// Objective value at `x`
    pub fun: f64,

    /// Iterations performed
    pub iterations: usize,

    /// True when the simplex shrank below the tolerance
    pub converged: bool,
}

/// Nelder-Mead minimiser with box bounds
///
/// `tolerance` applies both to the simplex extent and to the spread of
/// objective values, `max_iterations` caps the iterations (and the number of
/// function evaluations at twice that).
///
/// # Example
///
/// ```rust
/// use adsorb_rs::solver::NelderMead;
/// use nalgebra::DVector;
///
/// let rosenbrock = |x: &DVector<f64>| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2);
/// let bounds = [(-2.0, 2.0), (-1.0, 3.0)];
///
/// let result = NelderMead::new()
///     .minimize(&rosenbrock, DVector::from_vec(vec![-1.2, 1.0]), &bounds)
///     .unwrap();
/// assert!((result.x[0] - 1.0).abs() < 1e-2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NelderMead {
    config: SolverConfiguration,
}

impl NelderMead {
    /// Create with tolerance 1e-4 and at most 100 000 iterations
    pub fn new() -> Self {
        Self::with_configuration(SolverConfiguration::simplex())
    }

    pub fn with_configuration(config: SolverConfiguration) -> Self {
        Self { config }
    }

    /// Minimise `f` from `x0` inside `bounds` (one `(lower, upper)` per coordinate)
    ///
    /// # Errors
    ///
    /// `ParameterError` if `bounds` does not match `x0` or a bound pair is
    /// inverted; `CalculationError` if the objective is NaN at every vertex
    /// of the initial simplex.
    pub fn minimize(
        &self,
        f: &dyn Fn(&DVector<f64>) -> f64,
        x0: DVector<f64>,
        bounds: &[(f64, f64)],
    ) -> Result<SimplexResult> {
        let n = x0.len();
        if bounds.len() != n {
            return Err(AdsorptionError::parameter(format!(
                "{} bounds given for {n} variables",
                bounds.len()
            )));
        }
        if let Some((i, (lo, hi))) = bounds.iter().enumerate().find(|(_, (lo, hi))| lo > hi) {
            return Err(AdsorptionError::parameter(format!(
                "Bound {i} is inverted: ({lo}, {hi})"
            )));
        }

        let clip = |mut x: DVector<f64>| {
            for (xi, (lo, hi)) in x.iter_mut().zip(bounds.iter()) {
                *xi = xi.clamp(*lo, *hi);
            }
            x
        };
        // NaN never wins a comparison
        let eval = |x: &DVector<f64>| {
            let value = f(x);
            if value.is_nan() { f64::INFINITY } else { value }
        };

        // ====== Initial simplex ======

        let x0 = clip(x0);
        let mut simplex: Vec<DVector<f64>> = Vec::with_capacity(n + 1);
        simplex.push(x0.clone());
        for k in 0..n {
            let mut y = x0.clone();
            y[k] = if y[k] != 0.0 { (1.0 + NONZERO_DELTA) * y[k] } else { ZERO_DELTA };
            // reflect vertices pushed above an upper bound back inside
            if y[k] > bounds[k].1 {
                y[k] = 2.0 * bounds[k].1 - y[k];
            }
            simplex.push(clip(y));
        }

        let mut values: Vec<f64> = simplex.iter().map(|x| eval(x)).collect();
        if values.iter().all(|v| v.is_infinite()) {
            return Err(AdsorptionError::calculation(
                "Objective is not defined anywhere on the initial simplex",
            ));
        }

        let mut evaluations = n + 1;
        let max_evaluations = self.config.max_iterations.saturating_mul(2);
        let tolerance = self.config.tolerance;
        let mut iterations = 0;
        let mut converged = false;

        sort_simplex(&mut simplex, &mut values);

        while iterations < self.config.max_iterations && evaluations < max_evaluations {
            let x_spread = simplex[1..]
                .iter()
                .map(|x| (x - &simplex[0]).amax())
                .fold(0.0_f64, f64::max);
            let f_spread = values[1..]
                .iter()
                .map(|v| (values[0] - v).abs())
                .fold(0.0_f64, f64::max);
            if x_spread <= tolerance && f_spread <= tolerance {
                converged = true;
                break;
            }

            let worst = simplex[n].clone();
            let centroid = simplex[..n].iter().fold(DVector::zeros(n), |acc, x| acc + x) / n as f64;

            let xr = clip(&centroid * (1.0 + RHO) - &worst * RHO);
            let fxr = eval(&xr);
            evaluations += 1;

            let mut shrink = false;
            if fxr < values[0] {
                let xe = clip(&centroid * (1.0 + RHO * CHI) - &worst * (RHO * CHI));
                let fxe = eval(&xe);
                evaluations += 1;
                if fxe < fxr {
                    simplex[n] = xe;
                    values[n] = fxe;
                } else {
                    simplex[n] = xr;
                    values[n] = fxr;
                }
            } else if fxr < values[n - 1] {
                simplex[n] = xr;
                values[n] = fxr;
            } else if fxr < values[n] {
                // outside contraction
                let xc = clip(&centroid * (1.0 + PSI * RHO) - &worst * (PSI * RHO));
                let fxc = eval(&xc);
                evaluations += 1;
                if fxc <= fxr {
                    simplex[n] = xc;
                    values[n] = fxc;
                } else {
                    shrink = true;
                }
            } else {
                // inside contraction
                let xcc = clip(&centroid * (1.0 - PSI) + &worst * PSI);
                let fxcc = eval(&xcc);
                evaluations += 1;
                if fxcc < values[n] {
                    simplex[n] = xcc;
                    values[n] = fxcc;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = simplex[0].clone();
                for j in 1..=n {
                    simplex[j] = clip(&best + (&simplex[j] - &best) * SIGMA);
                    values[j] = eval(&simplex[j]);
                }
                evaluations += n;
            }

            iterations += 1;
            sort_simplex(&mut simplex, &mut values);
        }

        if !converged {
            debug!("Nelder-Mead stopped after {iterations} iterations ({evaluations} evaluations)");
        }

        Ok(SimplexResult {
            x: simplex[0].clone(),
            fun: values[0],
            iterations,
            converged,
        })
    }
}

impl Default for NelderMead {
    fn default() -> Self {
        Self::new()
    }
}

/// Order vertices by increasing objective value
fn sort_simplex(simplex: &mut Vec<DVector<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}
