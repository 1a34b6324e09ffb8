//! Physical properties and potential models
//!
//! This module holds everything the pore-size solvers need to know about
//! the **physics** of the adsorbate/material pair, independently of how the
//! numbers are later inverted:
//!
//! - **Properties**: molecular diameter, polarizability, magnetic
//!   susceptibility and surface density of both partners
//! - **Dispersion constants**: Kirkwood-Muller coefficients derived from them
//! - **Potential models**: the reduced potential ln(p/p0) a molecule sees in
//!   a pore of a given width
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The potential provides the **equation** φ(ℓ) = ln(p/p0)
//! - The solver provides the **method** to invert it for ℓ
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::physics::{registry, dispersion_from_properties};
//!
//! let carbon = registry::get_hk_model("Carbon(HK)").unwrap();
//! let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
//!
//! let constants = dispersion_from_properties(&nitrogen, &carbon);
//! assert!(constants.adsorbate > 0.0);
//! assert!(constants.material > 0.0);
//! ```

// module declaration
pub mod constants;
pub mod data;
pub mod dispersion;
pub mod registry;
pub mod traits;

// re-export commonly used types for convenience
pub use data::{AdsorbateProperties, MaterialProperties, ADSORBATE_KEYS, HK_KEYS};
pub use dispersion::{
    dispersion_from_properties,
    kirkwood_muller_dispersion_ads,
    kirkwood_muller_dispersion_mat,
    DispersionConstants,
};
pub use traits::PotentialModel;
