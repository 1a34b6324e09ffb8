//! Adsorbate and material property sets
//!
//! The Horvath-Kawazoe family of models needs a fixed set of molecular
//! properties for both partners of the adsorption pair. They usually come
//! from a registry (see [`crate::physics::registry`]) or from a user-supplied
//! property map, which is validated here so that a missing key fails fast,
//! before any numerical work.
//!
//! | Key                       | Unit            | Material | Adsorbate |
//! |---------------------------|-----------------|----------|-----------|
//! | `molecular_diameter`      | nm              | ✓        | ✓         |
//! | `polarizability`          | nm³             | ✓        | ✓         |
//! | `magnetic_susceptibility` | nm³             | ✓        | ✓         |
//! | `surface_density`         | molecules/m²    | ✓        | ✓         |
//! | `liquid_density`          | g/cm³           |          | ✓         |
//! | `adsorbate_molar_mass`    | g/mol           |          | ✓         |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AdsorptionError, Result};

/// Keys every material (and adsorbate) model must define
pub const HK_KEYS: [&str; 4] = [
    "molecular_diameter",
    "polarizability",
    "magnetic_susceptibility",
    "surface_density",
];

/// Keys an adsorbate model must define on top of [`HK_KEYS`]
pub const ADSORBATE_KEYS: [&str; 2] = ["liquid_density", "adsorbate_molar_mass"];

// =================================================================================================
// Helpers
// =================================================================================================

/// Check a property map for completeness and physical sanity
///
/// Every key in `required` must be present, finite and strictly positive.
fn check_map(map: &HashMap<String, f64>, required: &[&str], what: &str) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| !map.contains_key(*key))
        .collect();

    if !missing.is_empty() {
        return Err(AdsorptionError::parameter(format!(
            "{what} properties are missing parameters: {missing:?}"
        )));
    }

    for key in required {
        let value = map[*key];
        if !value.is_finite() || value <= 0.0 {
            return Err(AdsorptionError::parameter(format!(
                "{what} property '{key}' must be finite and > 0, got {value}"
            )));
        }
    }

    Ok(())
}

// =================================================================================================
// MaterialProperties
// =================================================================================================

/// Surface-atom properties of the adsorbent material
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use adsorb_rs::physics::MaterialProperties;
///
/// let mut map = HashMap::new();
/// map.insert("molecular_diameter".to_string(), 0.34);
/// map.insert("polarizability".to_string(), 1.02e-3);
/// map.insert("magnetic_susceptibility".to_string(), 1.35e-7);
/// map.insert("surface_density".to_string(), 3.845e19);
///
/// let carbon = MaterialProperties::from_map(&map).unwrap();
/// assert_eq!(carbon.molecular_diameter, 0.34);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Diameter of the surface atom **\[nm\]**
    pub molecular_diameter: f64,

    /// Polarizability **\[nm³\]**
    pub polarizability: f64,

    /// Magnetic susceptibility **\[nm³\]**
    pub magnetic_susceptibility: f64,

    /// Number of surface atoms per unit area **\[molecules/m²\]**
    pub surface_density: f64,
}

impl MaterialProperties {
    /// Build from a property map, validated against [`HK_KEYS`]
    ///
    /// # Errors
    ///
    /// `ParameterError` listing every missing key, or naming the first
    /// non-positive value.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        check_map(map, &HK_KEYS, "Material")?;
        Ok(Self {
            molecular_diameter: map["molecular_diameter"],
            polarizability: map["polarizability"],
            magnetic_susceptibility: map["magnetic_susceptibility"],
            surface_density: map["surface_density"],
        })
    }

    /// Parse a JSON object of properties
    ///
    /// ```
    /// use adsorb_rs::physics::MaterialProperties;
    ///
    /// let json = r#"{
    ///     "molecular_diameter": 0.276,
    ///     "polarizability": 2.5e-3,
    ///     "magnetic_susceptibility": 1.3e-8,
    ///     "surface_density": 1.315e19
    /// }"#;
    /// let oxide = MaterialProperties::from_json(json).unwrap();
    /// assert_eq!(oxide.surface_density, 1.315e19);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let map: HashMap<String, f64> = serde_json::from_str(json).map_err(|e| {
            AdsorptionError::parameter(format!("Invalid material properties JSON: {e}"))
        })?;
        Self::from_map(&map)
    }

    /// Validate an already-built property set
    pub fn validate(&self) -> Result<()> {
        check_map(&self.to_map(), &HK_KEYS, "Material")
    }

    /// Flatten into a property map
    pub fn to_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("molecular_diameter".to_string(), self.molecular_diameter),
            ("polarizability".to_string(), self.polarizability),
            ("magnetic_susceptibility".to_string(), self.magnetic_susceptibility),
            ("surface_density".to_string(), self.surface_density),
        ])
    }
}

// =================================================================================================
// AdsorbateProperties
// =================================================================================================

/// Molecular and bulk-liquid properties of the adsorbate
///
/// Liquid density is the value at the isotherm temperature; it converts
/// adsorbed amount into adsorbed volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdsorbateProperties {
    /// Kinetic diameter **\[nm\]**
    pub molecular_diameter: f64,

    /// Polarizability **\[nm³\]**
    pub polarizability: f64,

    /// Magnetic susceptibility **\[nm³\]**
    pub magnetic_susceptibility: f64,

    /// Molecules per unit area of a monolayer **\[molecules/m²\]**
    pub surface_density: f64,

    /// Bulk liquid density at the isotherm temperature **\[g/cm³\]**
    pub liquid_density: f64,

    /// Molar mass **\[g/mol\]**
    #[serde(rename = "adsorbate_molar_mass")]
    pub molar_mass: f64,
}

impl AdsorbateProperties {
    /// Build from a property map, validated against [`HK_KEYS`] and
    /// [`ADSORBATE_KEYS`]
    ///
    /// # Errors
    ///
    /// `ParameterError` listing every missing key.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self> {
        let required: Vec<&str> = HK_KEYS.iter().chain(ADSORBATE_KEYS.iter()).copied().collect();
        check_map(map, &required, "Adsorbate")?;
        Ok(Self {
            molecular_diameter: map["molecular_diameter"],
            polarizability: map["polarizability"],
            magnetic_susceptibility: map["magnetic_susceptibility"],
            surface_density: map["surface_density"],
            liquid_density: map["liquid_density"],
            molar_mass: map["adsorbate_molar_mass"],
        })
    }

    /// Parse a JSON object of properties
    pub fn from_json(json: &str) -> Result<Self> {
        let map: HashMap<String, f64> = serde_json::from_str(json).map_err(|e| {
            AdsorptionError::parameter(format!("Invalid adsorbate properties JSON: {e}"))
        })?;
        Self::from_map(&map)
    }

    /// Validate an already-built property set
    pub fn validate(&self) -> Result<()> {
        let required: Vec<&str> = HK_KEYS.iter().chain(ADSORBATE_KEYS.iter()).copied().collect();
        check_map(&self.to_map(), &required, "Adsorbate")
    }

    /// Flatten into a property map
    pub fn to_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("molecular_diameter".to_string(), self.molecular_diameter),
            ("polarizability".to_string(), self.polarizability),
            ("magnetic_susceptibility".to_string(), self.magnetic_susceptibility),
            ("surface_density".to_string(), self.surface_density),
            ("liquid_density".to_string(), self.liquid_density),
            ("adsorbate_molar_mass".to_string(), self.molar_mass),
        ])
    }
}

// =================================================================================================
// Tests
// =================================================================================================
