//! In-memory isotherm
//!
//! Stores a raw `(pressure, loading)` sequence as measured, loading in
//! mmol per gram of material, and splits it into branches on demand.

use std::collections::HashMap;

use crate::error::{AdsorptionError, Result};
use crate::isotherm::{Adsorbate, Branch, IsothermData, LoadingBasis, LoadingUnit, PressureMode};

/// Isotherm defined by discrete measured points
///
/// The adsorption branch runs from the first point up to and including the
/// point of highest pressure; the desorption branch starts at that point and
/// runs to the end. An isotherm whose last point is its highest has no
/// desorption branch.
#[derive(Debug, Clone)]
pub struct PointIsotherm {
    pressure: Vec<f64>,
    /// Loading **\[mmol/g\]**
    loading: Vec<f64>,
    temperature: f64,
    pressure_mode: PressureMode,
    saturation_pressure: Option<f64>,
    adsorbate: Option<Adsorbate>,
    material: Option<String>,
    other: HashMap<String, Vec<f64>>,
}

impl PointIsotherm {
    /// Create from relative pressures and loadings in mmol/g
    ///
    /// # Errors
    ///
    /// `ParameterError` if the sequences are empty, differ in length, hold
    /// non-finite values, or if `temperature` is not positive.
    pub fn new(pressure: Vec<f64>, loading: Vec<f64>, temperature: f64) -> Result<Self> {
        if pressure.is_empty() {
            return Err(AdsorptionError::parameter("Isotherm has no data points"));
        }
        if pressure.len() != loading.len() {
            return Err(AdsorptionError::parameter(format!(
                "Pressure ({}) and loading ({}) must have the same length",
                pressure.len(),
                loading.len()
            )));
        }
        if pressure.iter().chain(loading.iter()).any(|v| !v.is_finite()) {
            return Err(AdsorptionError::parameter("Isotherm data must be finite"));
        }
        if !(temperature > 0.0) {
            return Err(AdsorptionError::parameter(format!(
                "Temperature must be > 0 K, got {temperature}"
            )));
        }

        Ok(Self {
            pressure,
            loading,
            temperature,
            pressure_mode: PressureMode::Relative,
            saturation_pressure: None,
            adsorbate: None,
            material: None,
            other: HashMap::new(),
        })
    }

    /// Declare how the stored pressures are expressed
    pub fn with_pressure_mode(mut self, mode: PressureMode) -> Self {
        self.pressure_mode = mode;
        self
    }

    /// Saturation pressure p0, needed to convert between pressure modes
    pub fn with_saturation_pressure(mut self, p0: f64) -> Self {
        self.saturation_pressure = Some(p0);
        self
    }

    pub fn with_adsorbate(mut self, adsorbate: Adsorbate) -> Self {
        self.adsorbate = Some(adsorbate);
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Attach another column, aligned with the raw points
    ///
    /// # Errors
    ///
    /// `ParameterError` on a length mismatch.
    pub fn with_other_data(mut self, key: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let key = key.into();
        if values.len() != self.pressure.len() {
            return Err(AdsorptionError::parameter(format!(
                "Column '{key}' has {} values, isotherm has {} points",
                values.len(),
                self.pressure.len()
            )));
        }
        self.other.insert(key, values);
        Ok(self)
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Number of raw points
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Index range of `branch` in the raw data, `None` if it does not exist
    fn branch_range(&self, branch: Branch) -> Option<std::ops::Range<usize>> {
        let split = self
            .pressure
            .iter()
            .enumerate()
            .fold(0, |best, (i, &p)| if p > self.pressure[best] { i } else { best });

        match branch {
            Branch::Adsorption => Some(0..split + 1),
            Branch::Desorption if split + 1 < self.pressure.len() => Some(split..self.pressure.len()),
            Branch::Desorption => None,
        }
    }

    fn require_branch(&self, branch: Branch) -> Result<std::ops::Range<usize>> {
        self.branch_range(branch).ok_or_else(|| {
            AdsorptionError::parameter(format!(
                "The isotherm does not have the required branch ('{branch}') for this calculation"
            ))
        })
    }

    fn saturation_pressure(&self) -> Result<f64> {
        self.saturation_pressure
            .filter(|p0| *p0 > 0.0)
            .ok_or_else(|| {
                AdsorptionError::parameter(
                    "Converting pressure mode needs a positive saturation pressure",
                )
            })
    }
}

impl IsothermData for PointIsotherm {
    fn loading(&self, branch: Branch, unit: LoadingUnit, basis: LoadingBasis) -> Result<Vec<f64>> {
        if unit.basis() != basis {
            return Err(AdsorptionError::parameter(format!(
                "Loading unit {unit:?} does not belong to basis {basis:?}"
            )));
        }

        let range = self.require_branch(branch)?;
        let factor = match unit {
            LoadingUnit::Mmol => 1.0,
            LoadingUnit::Mol => 1e-3,
            LoadingUnit::Mg | LoadingUnit::G => {
                let molar_mass = self.adsorbate.as_ref().map(|a| a.molar_mass()).ok_or_else(|| {
                    AdsorptionError::parameter("Mass basis loading needs a known adsorbate")
                })?;
                if unit == LoadingUnit::Mg { molar_mass } else { molar_mass * 1e-3 }
            }
        };

        Ok(self.loading[range].iter().map(|n| n * factor).collect())
    }

    fn pressure(&self, branch: Branch, mode: PressureMode) -> Result<Vec<f64>> {
        let range = self.require_branch(branch)?;
        let factor = match (self.pressure_mode, mode) {
            (PressureMode::Relative, PressureMode::Relative)
            | (PressureMode::Absolute, PressureMode::Absolute) => 1.0,
            (PressureMode::Relative, PressureMode::Absolute) => self.saturation_pressure()?,
            (PressureMode::Absolute, PressureMode::Relative) => 1.0 / self.saturation_pressure()?,
        };

        Ok(self.pressure[range].iter().map(|p| p * factor).collect())
    }

    fn other_data(&self, key: &str, branch: Branch) -> Option<Vec<f64>> {
        let range = self.branch_range(branch)?;
        self.other.get(key).map(|column| column[range].to_vec())
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn adsorbate(&self) -> Option<&Adsorbate> {
        self.adsorbate.as_ref()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
