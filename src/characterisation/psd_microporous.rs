//! Micropore size distribution from an isotherm
//!
//! [`psd_microporous`] validates its inputs, extracts one branch of the
//! isotherm, restricts it to a pressure window and runs one of the
//! Horvath-Kawazoe family models on it.
//!
//! | Model   | Potential        | Cheng-Yang term | Filtered output |
//! |---------|------------------|-----------------|-----------------|
//! | `HK`    | Horvath-Kawazoe  |                 | ✓               |
//! | `HK-CY` | Horvath-Kawazoe  | ✓               | ✓               |
//! | `RY`    | Rege-Yang        |                 |                 |
//! | `RY-CY` | Rege-Yang        | ✓               |                 |
//!
//! The models describe micropores only: the default window stops at a
//! relative pressure of 0.2.
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::characterisation::{psd_microporous, PsdSettings};
//! use adsorb_rs::isotherm::{Adsorbate, PointIsotherm};
//!
//! let pressure: Vec<f64> = (0..20).map(|i| 10f64.powf(-6.0 + 0.28 * i as f64)).collect();
//! let loading: Vec<f64> = pressure.iter().map(|p| 10.0 * 1e3 * p / (1.0 + 1e3 * p)).collect();
//! let isotherm = PointIsotherm::new(pressure, loading, 77.355)
//!     .unwrap()
//!     .with_adsorbate(Adsorbate::find("nitrogen").unwrap());
//!
//! let settings = PsdSettings::from_names("HK", "slit", "ads").unwrap();
//! let psd = psd_microporous(&isotherm, &settings).unwrap();
//!
//! assert_eq!(psd.pore_widths.len(), psd.pore_distribution.len());
//! ```

use log::debug;

use crate::characterisation::hk::{
    assemble_distribution, build_potential, solve_widths, HkParameters, PoreGeometry, PsdModel, PsdResult,
};
use crate::error::{AdsorptionError, Result};
use crate::isotherm::{Branch, IsothermData, LoadingBasis, LoadingUnit, PressureMode};
use crate::physics::registry::{get_hk_model, properties_of};
use crate::physics::{AdsorbateProperties, MaterialProperties};

/// Default upper bound of the pressure window
pub const DEFAULT_UPPER_PRESSURE: f64 = 0.2;

/// Minimum number of points left in the window
pub const MIN_POINTS: usize = 3;

// =================================================================================================
// Settings
// =================================================================================================

/// Source of the surface-atom properties
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialModel {
    /// A built-in model, see [`crate::physics::registry::HK_MODEL_NAMES`]
    Named(String),
    /// User-supplied properties
    Custom(MaterialProperties),
}

impl Default for MaterialModel {
    fn default() -> Self {
        MaterialModel::Named("Carbon(HK)".to_string())
    }
}

impl From<&str> for MaterialModel {
    fn from(name: &str) -> Self {
        MaterialModel::Named(name.to_string())
    }
}

impl From<MaterialProperties> for MaterialModel {
    fn from(properties: MaterialProperties) -> Self {
        MaterialModel::Custom(properties)
    }
}

impl MaterialModel {
    /// Resolve to a validated property set
    ///
    /// # Errors
    ///
    /// `ParameterError` for an unknown name or invalid custom properties.
    pub fn resolve(&self) -> Result<MaterialProperties> {
        match self {
            MaterialModel::Named(name) => get_hk_model(name),
            MaterialModel::Custom(properties) => {
                properties.validate()?;
                Ok(*properties)
            }
        }
    }
}

/// Settings of a micropore PSD calculation
///
/// Defaults: HK model, slit geometry, adsorption branch, `Carbon(HK)`
/// material, adsorbate properties from the isotherm, window `(None, 0.2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PsdSettings {
    pub model: PsdModel,
    pub geometry: PoreGeometry,
    pub branch: Branch,
    pub material: MaterialModel,
    /// Overrides the properties resolved from the isotherm's adsorbate
    pub adsorbate: Option<AdsorbateProperties>,
    /// Relative pressure window; `None` or zero leaves that side open
    pub p_limits: (Option<f64>, Option<f64>),
}

impl Default for PsdSettings {
    fn default() -> Self {
        Self {
            model: PsdModel::default(),
            geometry: PoreGeometry::default(),
            branch: Branch::default(),
            material: MaterialModel::default(),
            adsorbate: None,
            p_limits: (None, Some(DEFAULT_UPPER_PRESSURE)),
        }
    }
}

impl PsdSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the three selectors from their names
    ///
    /// # Errors
    ///
    /// `ParameterError` naming the unknown value and the accepted ones.
    pub fn from_names(model: &str, geometry: &str, branch: &str) -> Result<Self> {
        Ok(Self {
            model: model.parse()?,
            geometry: geometry.parse()?,
            branch: branch.parse()?,
            ..Self::default()
        })
    }

    pub fn with_model(mut self, model: PsdModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_geometry(mut self, geometry: PoreGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_material(mut self, material: impl Into<MaterialModel>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_adsorbate(mut self, adsorbate: AdsorbateProperties) -> Self {
        self.adsorbate = Some(adsorbate);
        self
    }

    pub fn with_p_limits(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.p_limits = (lower, upper);
        self
    }

    /// Check everything that can be checked without the isotherm
    pub fn validate(&self) -> Result<()> {
        self.material.resolve()?;
        if let Some(adsorbate) = &self.adsorbate {
            adsorbate.validate()?;
        }

        validate_p_limits(self.p_limits)
    }
}

/// Bounds must be finite and non-negative, the lower one below the upper one
pub(crate) fn validate_p_limits(limits: (Option<f64>, Option<f64>)) -> Result<()> {
    let (lower, upper) = limits;
    for bound in [lower, upper].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            return Err(AdsorptionError::parameter(format!(
                "Pressure limits must be finite and non-negative, got {bound}"
            )));
        }
    }
    if let (Some(lower), Some(upper)) = (lower, upper)
        && lower > 0.0
        && upper > 0.0
        && lower >= upper
    {
        return Err(AdsorptionError::parameter(format!(
            "Lower pressure limit {lower} must be below the upper limit {upper}"
        )));
    }

    Ok(())
}

// =================================================================================================
// Driver
// =================================================================================================

/// Index range of the points inside `limits`
///
/// Both ends use a left insertion search on the (ascending) pressures; a
/// bound that is absent or zero leaves its side open.
pub(crate) fn pressure_window(pressure: &[f64], limits: (Option<f64>, Option<f64>)) -> std::ops::Range<usize> {
    let insertion = |bound: f64| pressure.partition_point(|&p| p < bound);

    let start = match limits.0 {
        Some(lower) if lower != 0.0 => insertion(lower),
        _ => 0,
    };
    let end = match limits.1 {
        Some(upper) if upper != 0.0 => insertion(upper),
        _ => pressure.len(),
    };

    start..end.max(start)
}

/// Calculate the micropore size distribution of an isotherm
///
/// # Errors
///
/// - `ParameterError`: invalid settings, unknown material model, missing
///   branch, or an adsorbate without the required properties
/// - `CalculationError`: fewer than three points inside the pressure window
pub fn psd_microporous(isotherm: &dyn IsothermData, settings: &PsdSettings) -> Result<PsdResult> {
    settings.validate()?;

    let material = settings.material.resolve()?;
    let adsorbate = match settings.adsorbate {
        Some(properties) => properties,
        None => {
            let adsorbate = isotherm.adsorbate().ok_or_else(|| {
                AdsorptionError::parameter(
                    "The isotherm has no known adsorbate; pass the adsorbate properties explicitly",
                )
            })?;
            properties_of(adsorbate, isotherm.temperature())?
        }
    };

    let mut loading = isotherm.loading(settings.branch, LoadingUnit::Mmol, LoadingBasis::Molar)?;
    let mut pressure = isotherm.pressure(settings.branch, PressureMode::Relative)?;
    if loading.len() != pressure.len() {
        return Err(AdsorptionError::parameter(format!(
            "Isotherm branch has {} pressures but {} loadings",
            pressure.len(),
            loading.len()
        )));
    }

    if settings.branch == Branch::Desorption {
        loading.reverse();
        pressure.reverse();
    }

    let window = pressure_window(&pressure, settings.p_limits);
    let pressure = &pressure[window.clone()];
    let loading = &loading[window];

    if pressure.len() < MIN_POINTS {
        return Err(AdsorptionError::calculation(format!(
            "Only {} points inside the selected pressure range ({:?}), at least {MIN_POINTS} are needed",
            pressure.len(),
            settings.p_limits
        )));
    }

    let params = HkParameters::new(&adsorbate, &material, isotherm.temperature());
    let potential = build_potential(settings.model, settings.geometry, &params);
    debug!(
        "PSD with {} ({}) on {} points",
        settings.model,
        potential.name(),
        pressure.len()
    );

    let solved = solve_widths(pressure, loading, potential.as_ref(), settings.model.uses_cheng_yang());

    Ok(assemble_distribution(
        &solved,
        loading,
        settings.geometry,
        material.molecular_diameter,
        &adsorbate,
        !settings.model.is_rege_yang(),
    ))
}

// =================================================================================================
// Tests
// =================================================================================================
