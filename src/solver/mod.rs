//! Numerical solvers
//!
//! This module provides traits and implementations for the numerical methods
//! the characterisation routines rely on. A numerical method only sees a
//! closure: the physics (which function, which interval) stays with the
//! caller.
//!
//! # Module Organization
//!
//! - **`traits`**: Core trait definitions and types
//!   - `ScalarMinimizer` / `RootFinder`: interfaces for interval methods
//!   - `SolverConfiguration`: tolerance and iteration cap
//!   - `MinimizeResult` / `RootResult`: outcome with convergence flag
//!
//! - **Method implementations**:
//!   - `BoundedBrent`: bounded scalar minimiser
//!   - `BrentRoot` and `expand_log_bracket`: bracketing root finding
//!   - `AdaptiveQuadrature`: Gauss-Legendre integration
//!   - `NelderMead`: bounded simplex minimiser
//!   - `Nnls`: non-negative least squares
//!
//! # Quick Start Example
//!
//! ```rust
//! use adsorb_rs::solver::{BoundedBrent, ScalarMinimizer, SolverConfiguration};
//!
//! // Configure HOW to solve
//! let config = SolverConfiguration::new(1e-8, 200);
//! config.validate().unwrap();
//!
//! // WHAT to solve is just a closure
//! let target = 0.1_f64;
//! let objective = |x: f64| ((-1.0 / x).exp() - target).powi(2);
//!
//! let result = BoundedBrent::with_configuration(config).minimize(&objective, 0.01, 10.0);
//! assert!((result.x - 1.0 / 10f64.ln()).abs() < 1e-6);
//! ```
//!
//! # Error Handling
//!
//! Minimisers never fail: they return their best point and a `converged`
//! flag. Root finders fail with a `CalculationError` when the interval does
//! not bracket a root.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Isotherms with at least this many points have their pore widths solved on
// the rayon pool. The value lives in an AtomicUsize and can be changed at
// runtime; Relaxed ordering is enough for a performance hint.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of isotherm points above which the per-point pore-width
/// solve switches to parallel iteration.
///
/// Each point costs a few hundred potential evaluations (each a series of
/// up to 1 500 terms for cylinders).
const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The pore-width solver iterates sequentially when an isotherm has fewer
/// points than this value, and switches to Rayon when it has at least as
/// many, but only when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use adsorb_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use adsorb_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. Prevents one test from leaking a modified
/// threshold value into the next. Guards are serialised on a lock, so two
/// tests never see each other's threshold.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(2);
/// // threshold is now 2 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{MinimizeResult, RootFinder, RootResult, ScalarMinimizer, SolverConfiguration};

pub use methods::{
    expand_log_bracket,
    AdaptiveQuadrature,
    BoundedBrent,
    BrentRoot,
    NelderMead,
    Nnls,
    NnlsResult,
    SimplexResult,
};

// =================================================================================================
// Tests
// =================================================================================================
