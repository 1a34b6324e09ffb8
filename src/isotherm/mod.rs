//! Isotherm data contract
//!
//! The characterisation routines never own isotherm data: they read it
//! through the [`IsothermData`] trait, which exposes each branch as ordered
//! numeric sequences in the unit the caller asks for.
//!
//! [`PointIsotherm`] is the in-memory implementation used throughout the
//! crate and its tests.
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::isotherm::{Adsorbate, Branch, IsothermData, LoadingBasis, LoadingUnit, PointIsotherm};
//!
//! let isotherm = PointIsotherm::new(
//!     vec![0.01, 0.05, 0.1, 0.2],
//!     vec![1.0, 2.0, 2.5, 2.8],
//!     77.355,
//! )
//! .unwrap()
//! .with_adsorbate(Adsorbate::find("nitrogen").unwrap());
//!
//! let loading = isotherm
//!     .loading(Branch::Adsorption, LoadingUnit::Mol, LoadingBasis::Molar)
//!     .unwrap();
//! assert_eq!(loading[0], 0.001);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{AdsorptionError, Result};

// module declaration
pub mod adsorbate;
pub mod point;

// re-export commonly used types for convenience
pub use adsorbate::Adsorbate;
pub use point::PointIsotherm;

// =================================================================================================
// Selectors
// =================================================================================================

/// Isotherm branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Branch {
    /// Increasing pressure, `"ads"`
    #[default]
    Adsorption,
    /// Decreasing pressure, `"des"`
    Desorption,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Adsorption => "ads",
            Branch::Desorption => "des",
        }
    }
}

impl FromStr for Branch {
    type Err = AdsorptionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ads" => Ok(Branch::Adsorption),
            "des" => Ok(Branch::Desorption),
            other => Err(AdsorptionError::parameter(format!(
                "Branch '{other}' not an option. Select either 'ads' or 'des'"
            ))),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How pressure values are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressureMode {
    /// p/p0, dimensionless
    #[default]
    Relative,
    /// Absolute pressure, in the isotherm's own unit
    Absolute,
}

/// Unit of the adsorbed amount (per gram of material)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingUnit {
    #[default]
    Mmol,
    Mol,
    Mg,
    G,
}

/// Basis of the adsorbed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingBasis {
    /// Amount of substance
    #[default]
    Molar,
    /// Mass of adsorbate
    Mass,
}

impl LoadingUnit {
    /// Basis this unit belongs to
    pub fn basis(&self) -> LoadingBasis {
        match self {
            LoadingUnit::Mmol | LoadingUnit::Mol => LoadingBasis::Molar,
            LoadingUnit::Mg | LoadingUnit::G => LoadingBasis::Mass,
        }
    }
}

// =================================================================================================
// Isotherm Data Trait
// =================================================================================================

/// Read access to isotherm data
///
/// Sequences returned by [`loading`](Self::loading),
/// [`pressure`](Self::pressure) and [`other_data`](Self::other_data) for the
/// same branch are index-aligned.
pub trait IsothermData {
    /// Adsorbed amount on `branch`, per gram of material
    ///
    /// # Errors
    ///
    /// `ParameterError` if the branch does not exist, or if the conversion
    /// needs information the isotherm lacks (e.g. molar mass).
    fn loading(&self, branch: Branch, unit: LoadingUnit, basis: LoadingBasis) -> Result<Vec<f64>>;

    /// Pressure on `branch`
    ///
    /// # Errors
    ///
    /// `ParameterError` if the branch does not exist or the mode cannot be
    /// converted to.
    fn pressure(&self, branch: Branch, mode: PressureMode) -> Result<Vec<f64>>;

    /// Any other column recorded with the isotherm (e.g. `"enthalpy"`)
    fn other_data(&self, key: &str, branch: Branch) -> Option<Vec<f64>>;

    /// Temperature **\[K\]**
    fn temperature(&self) -> f64;

    /// Adsorbate, when known
    fn adsorbate(&self) -> Option<&Adsorbate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_from_str() {
        assert_eq!("ads".parse::<Branch>().unwrap(), Branch::Adsorption);
        assert_eq!("des".parse::<Branch>().unwrap(), Branch::Desorption);

        let err = "both".parse::<Branch>().unwrap_err();
        assert!(err.is_parameter());
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_branch_display_roundtrip() {
        for branch in [Branch::Adsorption, Branch::Desorption] {
            assert_eq!(branch.to_string().parse::<Branch>().unwrap(), branch);
        }
    }

    #[test]
    fn test_unit_basis() {
        assert_eq!(LoadingUnit::Mmol.basis(), LoadingBasis::Molar);
        assert_eq!(LoadingUnit::G.basis(), LoadingBasis::Mass);
    }
}
