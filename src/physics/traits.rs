//! Potential model trait
//!
//! This module defines the core API shared by every pore-geometry model:
//! - `PotentialModel`: width → reduced potential ln(p/p0)

// =================================================================================================
// Potential Model Trait
// =================================================================================================

/// Trait for micropore potential models
///
/// # Responsibility
/// Computes the reduced adsorption potential (dimensionless, equal to the
/// ln(p/p0) at which the pore fills) for a pore of a given size.
/// Does NOT invert it (that's the Solver's job).
///
/// The model provides the "physics" (equation), the Solver provides
/// the "numerics" (method to invert it).
///
/// # Size convention
///
/// `width` is whatever the geometry parameterises on: the distance between
/// nuclei of opposite walls for slits, the radius to the nuclei of the wall
/// atoms for cylinders and spheres. The assembler converts it to an
/// effective pore width afterwards.
///
/// # Mandatory Point
/// Implementations must be pure: same width in, same value out. They are
/// shared across threads when the per-point solve runs in parallel.
pub trait PotentialModel: Send + Sync {
    /// Reduced potential at `width` **\[nm\]**
    ///
    /// May be singular (or meaningless) at and below [`Self::lower_bound`].
    fn potential(&self, width: f64) -> f64;

    /// Smallest size the solver may search, exclusive **\[nm\]**
    fn lower_bound(&self) -> f64;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
