//! Numerical methods
//!
//! This module contains the concrete implementations of the
//! [`ScalarMinimizer`](crate::solver::ScalarMinimizer) and
//! [`RootFinder`](crate::solver::RootFinder) traits, plus the two
//! stand-alone tools the rest of the crate needs.
//!
//! # Available Methods
//!
//! - **[`BoundedBrent`]**: golden-section + parabolic minimiser on an interval
//!   - Use: inverting a potential model for a pore width
//! - **[`BrentRoot`]**: bracketing root finder
//!   - Use: IAST spreading-pressure equations, inverse isotherms
//! - **[`AdaptiveQuadrature`]**: adaptive 5-point Gauss-Legendre
//!   - Use: spreading pressure of models without a closed form
//! - **[`NelderMead`]**: bounded simplex minimiser
//!   - Use: initial enthalpy compound fit
//! - **[`Nnls`]**: Lawson-Hanson non-negative least squares
//!   - Use: fitting a DFT kernel to an isotherm
//!
//! # Design Philosophy
//!
//! Each method is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless**: Holds only its configuration, reusable across calls
//! - **Forgiving**: Reports non-convergence instead of failing where a best
//!   estimate is still meaningful

mod brent;
mod nelder_mead;
mod nnls;
mod quadrature;

// Re-exports for convenience
pub use brent::{expand_log_bracket, BoundedBrent, BrentRoot};
pub use nelder_mead::{NelderMead, SimplexResult};
pub use nnls::{Nnls, NnlsResult};
pub use quadrature::AdaptiveQuadrature;
