//! Non-negative least squares
//!
//! Lawson-Hanson active set method for
//!
//! $$\min_x \lVert A x - b \rVert_2 \quad \text{subject to } x \ge 0$$
//!
//! Each pass moves the coordinate with the largest positive gradient into
//! the passive set and solves the unconstrained problem on that set (SVD);
//! coordinates that turn negative are walked back to zero and released.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{AdsorptionError, Result};
use crate::solver::SolverConfiguration;

/// Outcome of a non-negative least squares solve
#[derive(Clone, Debug, PartialEq)]
pub struct NnlsResult {
    /// Solution, every entry ≥ 0
    pub x: DVector<f64>,

    /// ‖A x − b‖₂
    pub residual_norm: f64,

    /// Passes of the outer loop
    pub iterations: usize,

    /// False when the iteration cap was hit
    pub converged: bool,
}

/// Lawson-Hanson solver
///
/// `max_iterations` caps the outer passes; zero selects three times the
/// number of unknowns. The gradient tolerance is derived from the matrix.
///
/// # Example
///
/// ```rust
/// use adsorb_rs::solver::Nnls;
/// use nalgebra::{DMatrix, DVector};
///
/// let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// let b = DVector::from_vec(vec![2.0, -1.0, 1.0]);
///
/// let result = Nnls::new().solve(&a, &b).unwrap();
/// assert!((result.x[0] - 1.5).abs() < 1e-12);
/// assert_eq!(result.x[1], 0.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Nnls {
    config: SolverConfiguration,
}

impl Default for Nnls {
    fn default() -> Self {
        Self::new()
    }
}

impl Nnls {
    pub fn new() -> Self {
        Self::with_configuration(SolverConfiguration::new(f64::EPSILON, 0))
    }

    pub fn with_configuration(config: SolverConfiguration) -> Self {
        Self { config }
    }

    /// Solve for `x ≥ 0`
    ///
    /// # Errors
    ///
    /// `ParameterError` if `b` does not match the rows of `a` or either
    /// holds non-finite values; `CalculationError` if a subproblem cannot
    /// be solved.
    pub fn solve(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> Result<NnlsResult> {
        let (rows, cols) = a.shape();
        if b.len() != rows {
            return Err(AdsorptionError::parameter(format!(
                "Right-hand side has {} entries for a {rows}x{cols} matrix",
                b.len()
            )));
        }
        if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
            return Err(AdsorptionError::parameter("Least squares data must be finite"));
        }

        let max_iterations = match self.config.max_iterations {
            0 => 3 * cols,
            n => n,
        };
        let norm_1 = a.column_iter().map(|c| c.abs().sum()).fold(0.0, f64::max);
        let tolerance = 10.0 * self.config.tolerance * norm_1 * rows.max(cols) as f64;

        let mut x = DVector::zeros(cols);
        let mut passive = vec![false; cols];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            let gradient = a.tr_mul(&(b - a * &x));
            let entering = (0..cols)
                .filter(|&j| !passive[j] && gradient[j] > tolerance)
                .max_by(|&i, &j| gradient[i].total_cmp(&gradient[j]));
            let Some(entering) = entering else {
                converged = true;
                break;
            };
            passive[entering] = true;
            iterations += 1;

            loop {
                let z = passive_solution(a, b, &passive)?;
                let infeasible: Vec<usize> = (0..cols).filter(|&j| passive[j] && z[j] <= 0.0).collect();
                if infeasible.is_empty() {
                    x = z;
                    break;
                }

                // walk towards z until the first coordinate reaches zero
                let (step, blocking) = infeasible
                    .iter()
                    .map(|&j| {
                        let gap = x[j] - z[j];
                        (if gap > 0.0 { x[j] / gap } else { 0.0 }, j)
                    })
                    .fold((f64::INFINITY, infeasible[0]), |best, next| if next.0 < best.0 { next } else { best });
                x += (z - &x) * step;
                x[blocking] = 0.0;
                passive[blocking] = false;

                for j in 0..cols {
                    if passive[j] && x[j] <= tolerance {
                        passive[j] = false;
                        x[j] = 0.0;
                    }
                }
            }
        }

        if !converged {
            debug!("NNLS stopped after {iterations} passes");
        }
        let residual_norm = (a * &x - b).norm();
        Ok(NnlsResult { x, residual_norm, iterations, converged })
    }
}

/// Unconstrained least squares on the passive columns, zero elsewhere
fn passive_solution(a: &DMatrix<f64>, b: &DVector<f64>, passive: &[bool]) -> Result<DVector<f64>> {
    let columns: Vec<usize> = (0..passive.len()).filter(|&j| passive[j]).collect();
    let sub = DMatrix::from_fn(a.nrows(), columns.len(), |r, c| a[(r, columns[c])]);

    let solved = sub
        .svd(true, true)
        .solve(b, f64::EPSILON)
        .map_err(|err| AdsorptionError::calculation(format!("NNLS subproblem failed: {err}")))?;

    let mut z = DVector::zeros(passive.len());
    for (c, &j) in columns.iter().enumerate() {
        z[j] = solved[c];
    }
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_non_negative_solution() {
        let a = DMatrix::from_row_slice(
            4,
            3,
            &[1.0, 2.0, 0.5, 0.3, 1.0, 2.0, 4.0, 0.1, 1.0, 1.0, 1.0, 1.0],
        );
        let expected = DVector::from_vec(vec![1.0, 0.0, 2.0]);
        let b = &a * &expected;

        let result = Nnls::new().solve(&a, &b).unwrap();
        assert!(result.converged);
        for j in 0..3 {
            assert_relative_eq!(result.x[j], expected[j], epsilon = 1e-10);
        }
        assert!(result.residual_norm < 1e-10);
    }

    #[test]
    fn test_negative_coordinate_is_clamped() {
        // unconstrained optimum is (2, -1)
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![2.0, -1.0, 1.0]);

        let result = Nnls::new().solve(&a, &b).unwrap();
        assert_relative_eq!(result.x[0], 1.5, epsilon = 1e-12);
        assert_eq!(result.x[1], 0.0);
        assert_relative_eq!(result.residual_norm, 1.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_all_negative_gives_zero() {
        let a = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let b = DVector::from_vec(vec![-1.0, -2.0]);

        let result = Nnls::new().solve(&a, &b).unwrap();
        assert_eq!(result.x[0], 0.0);
        assert_eq!(result.iterations, 0);
        assert!(result.converged);
    }

    #[test]
    fn test_shape_errors() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        assert!(Nnls::new().solve(&a, &b).unwrap_err().is_parameter());
    }
}
