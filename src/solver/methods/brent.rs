//! Brent's methods for scalar problems
//!
//! # Bounded minimisation
//!
//! [`BoundedBrent`] combines golden-section search with successive parabolic
//! interpolation on a fixed interval `(a, b)`. The first trial point is the
//! golden-section point
//!
//! ```text
//! x₀ = a + (3 − √5)/2 · (b − a)
//! ```
//!
//! and each iteration fits a parabola through the three best points, falling
//! back to a golden step whenever the parabola is not trusted. The search
//! stops when the bracket has shrunk below `2·tol₁`, with
//! `tol₁ = √ε·|x| + xatol/3`.
//!
//! # Root finding
//!
//! [`BrentRoot`] is the classic bracketing root finder: inverse quadratic
//! interpolation (or secant) steps, guarded by bisection. It requires a sign
//! change on the initial interval; [`expand_log_bracket`] finds one for
//! functions of a positive variable, and [`BrentRoot::find_log_root`] then
//! searches in ln x so that the tolerance is relative.
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::solver::{BoundedBrent, BrentRoot, RootFinder, ScalarMinimizer};
//!
//! let result = BoundedBrent::new().minimize(&|x| (x - 2.0).powi(2), 0.0, 5.0);
//! assert!((result.x - 2.0).abs() < 1e-5);
//!
//! let root = BrentRoot::new().find_root(&|x| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root.root - 2f64.sqrt()).abs() < 1e-10);
//! ```

use log::debug;

use crate::error::{AdsorptionError, Result};
use crate::solver::{MinimizeResult, RootFinder, RootResult, ScalarMinimizer, SolverConfiguration};

/// (3 − √5)/2
const GOLDEN_MEAN: f64 = 0.381_966_011_250_105_1;

// =================================================================================================
// Bounded Brent minimiser
// =================================================================================================

/// Golden-section / parabolic minimiser on a bounded interval
#[derive(Clone, Copy, Debug)]
pub struct BoundedBrent {
    config: SolverConfiguration,
}

impl BoundedBrent {
    /// Create with x-tolerance 1e-5 and at most 500 evaluations
    pub fn new() -> Self {
        Self::with_configuration(SolverConfiguration::bounded_minimization())
    }

    pub fn with_configuration(config: SolverConfiguration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &SolverConfiguration {
        &self.config
    }
}

impl Default for BoundedBrent {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarMinimizer for BoundedBrent {
    fn minimize(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> MinimizeResult {
        let xatol = self.config.tolerance;
        let max_evaluations = self.config.max_iterations;
        let sqrt_eps = f64::EPSILON.sqrt();

        let (mut a, mut b) = (lower, upper);

        // xf: best point, nfc: second best, fulc: previous second best
        let mut fulc = a + GOLDEN_MEAN * (b - a);
        let mut nfc = fulc;
        let mut xf = fulc;
        let mut rat = 0.0_f64;
        let mut e = 0.0_f64;

        let mut fx = f(xf);
        let mut evaluations = 1;
        let mut ffulc = fx;
        let mut fnfc = fx;

        let mut xm = 0.5 * (a + b);
        let mut tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
        let mut tol2 = 2.0 * tol1;
        let mut converged = true;

        while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
            let mut golden = true;

            // parabolic fit
            if e.abs() > tol1 {
                golden = false;
                let mut r = (xf - nfc) * (fx - ffulc);
                let mut q = (xf - fulc) * (fx - fnfc);
                let mut p = (xf - fulc) * q - (xf - nfc) * r;
                q = 2.0 * (q - r);
                if q > 0.0 {
                    p = -p;
                }
                q = q.abs();
                r = e;
                e = rat;

                if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                    rat = p / q;
                    let x = xf + rat;
                    if (x - a) < tol2 || (b - x) < tol2 {
                        let si = if xm - xf >= 0.0 { 1.0 } else { -1.0 };
                        rat = tol1 * si;
                    }
                } else {
                    golden = true;
                }
            }

            if golden {
                e = if xf >= xm { a - xf } else { b - xf };
                rat = GOLDEN_MEAN * e;
            }

            let si = if rat >= 0.0 { 1.0 } else { -1.0 };
            let x = xf + si * rat.abs().max(tol1);
            let fu = f(x);
            evaluations += 1;

            if fu <= fx {
                if x >= xf {
                    a = xf;
                } else {
                    b = xf;
                }
                fulc = nfc;
                ffulc = fnfc;
                nfc = xf;
                fnfc = fx;
                xf = x;
                fx = fu;
            } else {
                if x < xf {
                    a = x;
                } else {
                    b = x;
                }
                if fu <= fnfc || nfc == xf {
                    fulc = nfc;
                    ffulc = fnfc;
                    nfc = x;
                    fnfc = fu;
                } else if fu <= ffulc || fulc == xf || fulc == nfc {
                    fulc = x;
                    ffulc = fu;
                }
            }

            xm = 0.5 * (a + b);
            tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
            tol2 = 2.0 * tol1;

            if evaluations >= max_evaluations {
                converged = false;
                debug!(
                    "Bounded Brent reached {max_evaluations} evaluations on [{lower}, {upper}], \
                     keeping x = {xf}"
                );
                break;
            }
        }

        MinimizeResult {
            x: xf,
            fun: fx,
            evaluations,
            converged: converged && xf.is_finite() && !fx.is_nan(),
        }
    }

    fn name(&self) -> &str {
        "Bounded Brent"
    }
}

// =================================================================================================
// Brent root finder
// =================================================================================================

/// Bracketing root finder (inverse quadratic interpolation + bisection)
#[derive(Clone, Copy, Debug)]
pub struct BrentRoot {
    config: SolverConfiguration,
}

impl BrentRoot {
    /// Create with x-tolerance 2e-12 and at most 100 iterations
    pub fn new() -> Self {
        Self::with_configuration(SolverConfiguration::root_finding())
    }

    pub fn with_configuration(config: SolverConfiguration) -> Self {
        Self { config }
    }
}

impl Default for BrentRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl RootFinder for BrentRoot {
    fn find_root(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<RootResult> {
        let xtol = self.config.tolerance;
        let rtol = 4.0 * f64::EPSILON;

        let mut xpre = lower;
        let mut xcur = upper;
        let mut fpre = f(xpre);
        let mut fcur = f(xcur);

        if !fpre.is_finite() || !fcur.is_finite() {
            return Err(AdsorptionError::calculation(format!(
                "Root function is not finite at the bracket [{lower}, {upper}]"
            )));
        }
        if fpre == 0.0 {
            return Ok(RootResult { root: xpre, iterations: 0, converged: true });
        }
        if fcur == 0.0 {
            return Ok(RootResult { root: xcur, iterations: 0, converged: true });
        }
        if fpre.signum() == fcur.signum() {
            return Err(AdsorptionError::calculation(format!(
                "No sign change on [{lower}, {upper}]: f = ({fpre}, {fcur})"
            )));
        }

        let mut xblk = 0.0;
        let mut fblk = 0.0;
        let mut spre = 0.0;
        let mut scur = 0.0;

        for iteration in 0..self.config.max_iterations {
            if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
                xblk = xpre;
                fblk = fpre;
                spre = xcur - xpre;
                scur = spre;
            }
            if fblk.abs() < fcur.abs() {
                xpre = xcur;
                xcur = xblk;
                xblk = xpre;
                fpre = fcur;
                fcur = fblk;
                fblk = fpre;
            }

            let delta = (xtol + rtol * xcur.abs()) / 2.0;
            let sbis = (xblk - xcur) / 2.0;
            if fcur == 0.0 || sbis.abs() < delta {
                return Ok(RootResult { root: xcur, iterations: iteration, converged: true });
            }

            if spre.abs() > delta && fcur.abs() < fpre.abs() {
                let stry = if xpre == xblk {
                    // secant
                    -fcur * (xcur - xpre) / (fcur - fpre)
                } else {
                    // inverse quadratic
                    let dpre = (fpre - fcur) / (xpre - xcur);
                    let dblk = (fblk - fcur) / (xblk - xcur);
                    -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
                };

                if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                    spre = scur;
                    scur = stry;
                } else {
                    spre = sbis;
                    scur = sbis;
                }
            } else {
                spre = sbis;
                scur = sbis;
            }

            xpre = xcur;
            fpre = fcur;
            if scur.abs() > delta {
                xcur += scur;
            } else {
                xcur += if sbis > 0.0 { delta } else { -delta };
            }
            fcur = f(xcur);
        }

        debug!("Brent root search did not converge in {} iterations", self.config.max_iterations);
        Ok(RootResult { root: xcur, iterations: self.config.max_iterations, converged: false })
    }

    fn name(&self) -> &str {
        "Brent"
    }
}

// =================================================================================================
// Bracket expansion
// =================================================================================================

/// Largest single step of [`expand_log_bracket`]
const MAX_LOG_STEP: f64 = 1e8;

/// Widen a bracket on (0, ∞) until the monotone `f` changes sign
///
/// The end on the far side of the root from the sign of `f` moves
/// geometrically: `upper *= factor` or `lower /= factor`. The factor starts
/// at e and is squared after every step (capped at 1e8), so roots near 1e-15
/// or 1e15 are bracketed within a dozen evaluations. Needs `0 < lower ≤ upper`.
///
/// # Errors
///
/// - `ParameterError` for a bracket outside (0, ∞)
/// - `CalculationError` if `f` stops being finite or no sign change is
///   found within `max_expansions`
pub fn expand_log_bracket(
    f: &dyn Fn(f64) -> f64,
    mut lower: f64,
    mut upper: f64,
    max_expansions: usize,
) -> Result<(f64, f64)> {
    if !(lower > 0.0 && upper >= lower && upper.is_finite()) {
        return Err(AdsorptionError::parameter(format!(
            "Logarithmic bracket needs 0 < lower <= upper, got [{lower}, {upper}]"
        )));
    }

    let mut f_lower = f(lower);
    let mut f_upper = f(upper);
    let mut factor = std::f64::consts::E;

    for _ in 0..=max_expansions {
        if !f_lower.is_finite() || !f_upper.is_finite() || lower == 0.0 || !upper.is_finite() {
            break;
        }
        if f_lower == 0.0 || f_upper == 0.0 || f_lower.signum() != f_upper.signum() {
            return Ok((lower, upper));
        }

        // both ends on the same side: the slope says which way the root is
        let increasing = f_upper >= f_lower;
        if (f_lower > 0.0) == increasing {
            upper = lower;
            f_upper = f_lower;
            lower /= factor;
            f_lower = f(lower);
        } else {
            lower = upper;
            f_lower = f_upper;
            upper *= factor;
            f_upper = f(upper);
        }
        factor = (factor * factor).min(MAX_LOG_STEP);
    }

    Err(AdsorptionError::calculation(format!(
        "Could not bracket a root on (0, inf), last tried [{lower}, {upper}] with f = ({f_lower}, {f_upper})"
    )))
}

impl BrentRoot {
    /// Root of `f` on `[lower, upper] ⊂ (0, ∞)`, searched in ln x
    ///
    /// The x-tolerance then applies to ln x, which makes it a relative
    /// tolerance on the root whatever its magnitude.
    ///
    /// # Errors
    ///
    /// As [`RootFinder::find_root`], plus `ParameterError` for a
    /// non-positive bound.
    pub fn find_log_root(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<RootResult> {
        if !(lower > 0.0 && upper > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "Logarithmic root search needs positive bounds, got [{lower}, {upper}]"
            )));
        }
        let result = self.find_root(&|u: f64| f(u.exp()), lower.ln(), upper.ln())?;
        Ok(RootResult { root: result.root.exp(), ..result })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
