//! adsorb-rs: Micropore Characterisation and Mixture Adsorption
//!
//! Turns gas adsorption isotherms into material descriptors and mixture
//! predictions:
//!
//! - micropore size distributions from the Horvath-Kawazoe family of
//!   models (HK, HK-CY, RY, RY-CY) in slit, cylindrical and spherical pores,
//!   or from a fit of a DFT kernel
//! - multi-component equilibria with Ideal Adsorbed Solution Theory
//! - the initial enthalpy of adsorption from calorimetric data
//!
//! # Architecture
//!
//! adsorb-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Potential and isotherm models define the physics (what to solve)
//!    - Numerical methods only ever see closures (how to solve)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design (`PotentialModel`, `IsothermModel`,
//!      `IsothermData`) for easy extension
//!    - Closed enums for model, geometry and branch selectors
//!
//! # Quick Start
//!
//! ```rust
//! use adsorb_rs::prelude::*;
//!
//! # fn main() -> adsorb_rs::error::Result<()> {
//! // 1. An isotherm: N2 at 77 K on a microporous carbon
//! let pressure: Vec<f64> = (0..25).map(|i| 10f64.powf(-6.0 + 0.22 * i as f64)).collect();
//! let loading: Vec<f64> = pressure.iter().map(|p| 10.0 * 1e3 * p / (1.0 + 1e3 * p)).collect();
//! let isotherm = PointIsotherm::new(pressure, loading, 77.355)?
//!     .with_adsorbate(Adsorbate::find("nitrogen")?);
//!
//! // 2. Choose model, geometry and branch
//! let settings = PsdSettings::from_names("HK-CY", "cylinder", "ads")?;
//!
//! // 3. Run the calculation
//! let psd = psd_microporous(&isotherm, &settings)?;
//!
//! // 4. Access results
//! println!("Peak pore width: {:?} nm", psd.peak_width());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`characterisation`]: pore-size distribution and initial enthalpy
//! - [`iast`]: mixture equilibria
//! - [`models`]: model isotherms used by IAST
//! - [`isotherm`]: isotherm data contract and in-memory isotherm
//! - [`physics`]: material and adsorbate properties, dispersion constants
//! - [`solver`]: numerical methods
//! - [`output`]: CSV export
//!
//! # Features
//!
//! - `parallel`: solve pore widths on the rayon thread pool for long
//!   isotherms (see [`solver::parallel_threshold`])

// Core modules
pub mod error;
pub mod physics;

pub mod characterisation;
pub mod iast;
pub mod isotherm;
pub mod models;
pub mod solver;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use adsorb_rs::prelude::*;
    //! ```
    pub use crate::characterisation::{initial_enthalpy_comp,
                                      initial_enthalpy_point,
                                      psd_dft,
                                      psd_microporous,
                                      DftKernel,
                                      DftSettings,
                                      EnthalpyBounds,
                                      MaterialModel,
                                      PoreGeometry,
                                      PsdModel,
                                      PsdResult,
                                      PsdSettings};
    pub use crate::error::AdsorptionError;
    pub use crate::iast::{iast,
                          iast_binary_svp,
                          iast_binary_vle,
                          reverse_iast};
    pub use crate::isotherm::{Adsorbate,
                              Branch,
                              IsothermData,
                              PointIsotherm};
    pub use crate::models::{IsothermModel, ModelKind};
    pub use crate::physics::PotentialModel;
}
