//! Per-point inversion of a potential model
//!
//! For every isotherm point the solver finds the pore size whose filling
//! pressure matches the measured relative pressure, by minimising
//!
//! $$\left(e^{\phi(\ell) - s} - p\right)^2 \qquad \ell \in (\ell_{min}, 50)$$
//!
//! with a bounded Brent search. `s` is zero for the plain models and the
//! Cheng-Yang term `1 + ln(1 − θ)/θ` for the corrected ones, θ being the
//! loading normalised by the last loading of the series.
//!
//! A width within [`BOUND_TOLERANCE`] of either end of the search interval
//! is reported with a warning: the potential cannot reach the pressure
//! inside the interval and the width is only a bound.
//!
//! Points are independent: with the `parallel` feature the solve runs on
//! Rayon once the series reaches [`parallel_threshold`] points. Results are
//! identical either way.

use log::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics::PotentialModel;
use crate::solver::{parallel_threshold, BoundedBrent, ScalarMinimizer};

/// Upper bound of the pore-size search **\[nm\]**
pub const MAX_PORE_SIZE: f64 = 50.0;

/// Distance from a search bound under which a width counts as pinned **\[nm\]**
pub const BOUND_TOLERANCE: f64 = 1e-3;

const MIN_COVERAGE: f64 = 1e-12;
const MAX_COVERAGE: f64 = 1.0 - 1e-9;

/// Cheng-Yang corrections for a loading series
///
/// Coverages are clamped into (0, 1) so the correction stays finite at the
/// first and last points.
fn cheng_yang_corrections(loading: &[f64]) -> Vec<f64> {
    let last = loading.last().copied().unwrap_or(0.0);

    loading
        .iter()
        .map(|&n| {
            let raw = if last > 0.0 { n / last } else { 0.0 };
            let coverage = raw.clamp(MIN_COVERAGE, MAX_COVERAGE);
            if coverage != raw {
                debug!("Coverage {raw} clamped to {coverage} for the Cheng-Yang term");
            }
            1.0 + (-coverage).ln_1p() / coverage
        })
        .collect()
}

/// Whether `width` sits on one of the bounds of the pore-size search
pub fn at_search_limit(potential: &dyn PotentialModel, width: f64) -> bool {
    width - potential.lower_bound() < BOUND_TOLERANCE || MAX_PORE_SIZE - width < BOUND_TOLERANCE
}

/// Pore size matching a single relative pressure
fn solve_point(potential: &dyn PotentialModel, minimizer: &BoundedBrent, pressure: f64, correction: f64) -> f64 {
    let objective = |width: f64| ((potential.potential(width) - correction).exp() - pressure).powi(2);
    let result = minimizer.minimize(&objective, potential.lower_bound(), MAX_PORE_SIZE);

    if !result.converged {
        debug!(
            "{}: no converged width for p = {pressure}, keeping {}",
            potential.name(),
            result.x
        );
    }
    if at_search_limit(potential, result.x) {
        warn!(
            "{}: p = {pressure} is not reached inside ({:.4}, {MAX_PORE_SIZE}) nm, width pinned at {:.4} nm",
            potential.name(),
            potential.lower_bound(),
            result.x
        );
    }
    result.x
}

/// Solve every point of a (pressure, loading) series
///
/// Returns the raw solved sizes (slit: nuclei distance, cylinder and
/// sphere: radius), one per point and in the same order. `loading` is only
/// read when `cheng_yang` is set.
///
/// # Example
///
/// ```rust
/// use adsorb_rs::characterisation::hk::{build_potential, solve_widths, HkParameters, PoreGeometry, PsdModel};
/// use adsorb_rs::physics::registry;
///
/// let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
/// let carbon = registry::get_hk_model("Carbon(HK)").unwrap();
/// let params = HkParameters::new(&nitrogen, &carbon, 77.355);
/// let slit = build_potential(PsdModel::HK, PoreGeometry::Slit, &params);
///
/// let widths = solve_widths(&[1e-6, 1e-4], &[1.0, 2.0], slit.as_ref(), false);
/// assert!(widths[0] < widths[1]);
/// ```
pub fn solve_widths(pressure: &[f64], loading: &[f64], potential: &dyn PotentialModel, cheng_yang: bool) -> Vec<f64> {
    let corrections = if cheng_yang {
        cheng_yang_corrections(loading)
    } else {
        vec![0.0; pressure.len()]
    };
    let minimizer = BoundedBrent::new();
    let kernel = |(&p, &s): (&f64, &f64)| solve_point(potential, &minimizer, p, s);

    if pressure.len() >= parallel_threshold() {
        // Above threshold: Rayon when the feature is compiled in.
        #[cfg(feature = "parallel")]
        {
            debug!("{}: solving {} points in parallel", potential.name(), pressure.len());
            pressure.par_iter().zip(corrections.par_iter()).map(kernel).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pressure.iter().zip(corrections.iter()).map(kernel).collect()
        }
    } else {
        pressure.iter().zip(corrections.iter()).map(kernel).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
