//! Error types
//!
//! Two kinds of failure exist in this crate:
//!
//! - [`AdsorptionError::Parameter`]: the caller passed something invalid
//!   (unknown model name, missing property, mismatched vector lengths...).
//!   Always raised before any numerical work starts.
//! - [`AdsorptionError::Calculation`]: the numbers themselves make the
//!   computation infeasible (too few points in the pressure window, no
//!   bracket for a root, no candidate from a fit).

use std::cell::RefCell;

use thiserror::Error;

/// Error raised by the characterisation and IAST routines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdsorptionError {
    /// Invalid or missing caller input
    #[error("Parameter error: {0}")]
    Parameter(String),

    /// Numerical infeasibility discovered during the computation
    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl AdsorptionError {
    /// Shorthand for a [`AdsorptionError::Parameter`]
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::Parameter(message.into())
    }

    /// Shorthand for a [`AdsorptionError::Calculation`]
    pub fn calculation(message: impl Into<String>) -> Self {
        Self::Calculation(message.into())
    }

    /// True for parameter errors
    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// True for calculation errors
    pub fn is_calculation(&self) -> bool {
        matches!(self, Self::Calculation(_))
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AdsorptionError>;

/// First error raised inside a closure that has to return a plain `f64`
///
/// The solvers take `Fn(f64) -> f64`. A fallible evaluation parks its error
/// here and hands NaN to the solver, which then stops; the caller asks the
/// slot before looking at the solver outcome.
///
/// ```rust
/// use adsorb_rs::error::{AdsorptionError, ErrorSlot};
///
/// let errors = ErrorSlot::new();
/// let value = errors.value(Err(AdsorptionError::calculation("no root")));
/// assert!(value.is_nan());
/// assert!(errors.check(Ok(value)).unwrap_err().is_calculation());
/// ```
#[derive(Debug, Default)]
pub struct ErrorSlot(RefCell<Option<AdsorptionError>>);

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value of `result`, or NaN after recording its error
    pub fn value(&self, result: Result<f64>) -> f64 {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.0.borrow_mut().get_or_insert(err);
                f64::NAN
            }
        }
    }

    /// Remove the recorded error, if any
    pub fn take(&self) -> Option<AdsorptionError> {
        self.0.borrow_mut().take()
    }

    /// The recorded error if there is one, `result` otherwise
    pub fn check<T>(&self, result: Result<T>) -> Result<T> {
        match self.take() {
            Some(err) => Err(err),
            None => result,
        }
    }
}
