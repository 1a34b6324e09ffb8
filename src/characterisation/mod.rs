//! Material characterisation from isotherms
//!
//! # Module Organization
//!
//! - [`psd_microporous`](mod@psd_microporous): settings and driver for the
//!   micropore size distribution
//! - [`psd_dft`](mod@psd_dft): pore size distribution from a DFT kernel
//! - [`hk`]: Horvath-Kawazoe and Rege-Yang potentials, the per-point solver
//!   and the distribution assembly
//! - [`initial_enthalpy`]: enthalpy of adsorption at zero loading from
//!   calorimetric data

// module declaration
pub mod hk;
pub mod initial_enthalpy;
pub mod psd_dft;
pub mod psd_microporous;

// re-export commonly used types for convenience
pub use hk::{PoreGeometry, PsdModel, PsdResult};
pub use initial_enthalpy::{
    initial_enthalpy_comp,
    initial_enthalpy_point,
    EnthalpyBounds,
    EnthalpyParams,
    InitialEnthalpyResult,
    ParamBound,
};
pub use psd_dft::{psd_dft, DftKernel, DftSettings};
pub use psd_microporous::{psd_microporous, MaterialModel, PsdSettings};
