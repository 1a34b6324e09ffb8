//! Common utilities for integration tests

pub mod mock_isotherms;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_isotherms::{
    calorimetry_isotherm,
    log_pressures,
    nitrogen_on_carbon,
    with_mirrored_desorption,
    NITROGEN_TEMPERATURE,
};
pub use test_helpers::{assert_non_decreasing, assert_strictly_increasing, relative_error};
