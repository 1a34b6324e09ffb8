//! Adsorbate descriptions
//!
//! An [`Adsorbate`] is a named gas with a molar mass and a bag of scalar
//! properties. Bulk-liquid properties are tabulated at the normal boiling
//! point and are only reported below the critical temperature.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AdsorptionError, Result};

/// Property key for the critical temperature **\[K\]**
pub const CRITICAL_TEMPERATURE: &str = "critical_temperature";

/// Property key for the liquid density **\[g/cm³\]**
pub const LIQUID_DENSITY: &str = "liquid_density";

/// Property key for the enthalpy of liquefaction **\[kJ/mol\]**
pub const ENTHALPY_LIQUEFACTION: &str = "enthalpy_liquefaction";

/// A gas used as adsorbate
///
/// # Example
///
/// ```
/// use adsorb_rs::isotherm::Adsorbate;
///
/// let nitrogen = Adsorbate::find("N2").unwrap();
/// assert_eq!(nitrogen.name(), "nitrogen");
/// assert_eq!(nitrogen.get_prop("molecular_diameter").unwrap(), 0.3);
/// assert!(nitrogen.liquid_density(77.355).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adsorbate {
    name: String,

    #[serde(default)]
    aliases: Vec<String>,

    /// Molar mass **\[g/mol\]**
    molar_mass: f64,

    #[serde(default)]
    properties: HashMap<String, f64>,
}

impl Adsorbate {
    /// Create an adsorbate with no properties besides its molar mass
    pub fn new(name: impl Into<String>, molar_mass: f64) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            molar_mass,
            properties: HashMap::new(),
        }
    }

    /// Add an alternative name
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set a scalar property
    pub fn with_property(mut self, key: impl Into<String>, value: f64) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Parse an adsorbate from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AdsorptionError::parameter(format!("Invalid adsorbate JSON: {e}")))
    }

    /// Built-in adsorbates
    pub fn builtin() -> Vec<Adsorbate> {
        vec![
            Adsorbate::new("nitrogen", 28.0134)
                .with_alias("N2")
                .with_property("molecular_diameter", 0.3)
                .with_property("polarizability", 1.46e-3)
                .with_property("magnetic_susceptibility", 2.0e-8)
                .with_property("surface_density", 6.7e18)
                .with_property(LIQUID_DENSITY, 0.806)
                .with_property(ENTHALPY_LIQUEFACTION, 5.57)
                .with_property(CRITICAL_TEMPERATURE, 126.192),
            Adsorbate::new("argon", 39.948)
                .with_alias("Ar")
                .with_property("molecular_diameter", 0.3)
                .with_property("polarizability", 1.63e-3)
                .with_property("magnetic_susceptibility", 3.25e-8)
                .with_property("surface_density", 8.52e18)
                .with_property(LIQUID_DENSITY, 1.395)
                .with_property(ENTHALPY_LIQUEFACTION, 6.43)
                .with_property(CRITICAL_TEMPERATURE, 150.687),
        ]
    }

    /// Find a built-in adsorbate by name or alias (case-insensitive)
    ///
    /// # Errors
    ///
    /// `ParameterError` if nothing matches.
    pub fn find(name: &str) -> Result<Adsorbate> {
        Self::builtin()
            .into_iter()
            .find(|ads| ads.matches(name))
            .ok_or_else(|| {
                AdsorptionError::parameter(format!(
                    "Adsorbate {name} is not known. Either use a recognised adsorbate \
                     (i.e. nitrogen) or pass the adsorbate properties explicitly."
                ))
            })
    }

    /// True if `name` is this adsorbate's name or one of its aliases
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Molar mass **\[g/mol\]**
    pub fn molar_mass(&self) -> f64 {
        self.molar_mass
    }

    /// Read a scalar property
    ///
    /// # Errors
    ///
    /// `ParameterError` if the property is not defined.
    pub fn get_prop(&self, key: &str) -> Result<f64> {
        self.properties.get(key).copied().ok_or_else(|| {
            AdsorptionError::parameter(format!(
                "Adsorbate {} does not have a property named '{key}'",
                self.name
            ))
        })
    }

    /// Liquid density at `temperature` (K) **\[g/cm³\]**
    ///
    /// # Errors
    ///
    /// `CalculationError` if the adsorbate is supercritical or the density is
    /// not tabulated.
    pub fn liquid_density(&self, temperature: f64) -> Result<f64> {
        self.liquid_property(LIQUID_DENSITY, temperature)
    }

    /// Enthalpy of liquefaction at `temperature` (K) **\[kJ/mol\]**
    ///
    /// # Errors
    ///
    /// `CalculationError` if the adsorbate is supercritical or the enthalpy is
    /// not tabulated.
    pub fn enthalpy_liquefaction(&self, temperature: f64) -> Result<f64> {
        self.liquid_property(ENTHALPY_LIQUEFACTION, temperature)
    }

    fn liquid_property(&self, key: &str, temperature: f64) -> Result<f64> {
        if let Some(&critical) = self.properties.get(CRITICAL_TEMPERATURE)
            && temperature > critical
        {
            return Err(AdsorptionError::calculation(format!(
                "{} is supercritical at {temperature} K (critical temperature {critical} K), \
                 no {key} available",
                self.name
            )));
        }

        self.properties.get(key).copied().ok_or_else(|| {
            AdsorptionError::calculation(format!("No {key} tabulated for {}", self.name))
        })
    }
}
