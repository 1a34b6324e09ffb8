//! Pore size distribution from a DFT kernel
//!
//! A kernel is a set of ideal isotherms, one per pore width, computed
//! beforehand with DFT/NLDFT/QSDFT (computing kernels is out of scope). The
//! measured isotherm is fitted as a non-negative combination of the kernel
//! isotherms:
//!
//! $$\min_{X \ge 0} \sum_p \Big(n_p - \sum_w n_{p,w} X_w\Big)^2$$
//!
//! and the contributions X become the distribution `X_w / Δw`.
//!
//! # Kernel files
//!
//! CSV with a header row of pore widths and one row per relative pressure:
//!
//! ```text
//! Pressure, 0.5, 1.0, 2.0
//! 1e-6, 0.0099, 0.0001, 0.000001
//! ...
//! ```
//!
//! The kernel isotherms are interpolated linearly in pressure, with an
//! implicit zero row at p = 0.
//!
//! # Example
//!
//! ```rust
//! use adsorb_rs::characterisation::{psd_dft, DftKernel, DftSettings};
//! use adsorb_rs::isotherm::{Adsorbate, PointIsotherm};
//!
//! let kernel = DftKernel::from_csv("toy", "p,1.0,2.0\n0.1,1.0,0.2\n0.5,1.0,0.9\n0.9,1.0,1.0\n").unwrap();
//! let isotherm = PointIsotherm::new(vec![0.1, 0.3, 0.5, 0.9], vec![1.2, 1.55, 1.9, 2.0], 77.355)
//!     .unwrap()
//!     .with_adsorbate(Adsorbate::find("nitrogen").unwrap());
//!
//! let psd = psd_dft(&isotherm, &kernel, &DftSettings::new()).unwrap();
//! assert_eq!(psd.pore_widths, vec![1.0, 2.0]);
//! ```

use std::path::Path;

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::characterisation::hk::PsdResult;
use crate::characterisation::psd_microporous::{pressure_window, validate_p_limits, MIN_POINTS};
use crate::error::{AdsorptionError, Result};
use crate::isotherm::{Branch, IsothermData, LoadingBasis, LoadingUnit, PressureMode};
use crate::solver::Nnls;

// =================================================================================================
// Kernel
// =================================================================================================

/// Tabulated kernel of ideal isotherms
#[derive(Debug, Clone, PartialEq)]
pub struct DftKernel {
    name: String,
    /// Relative pressures, strictly increasing, starting at 0
    pressures: Vec<f64>,
    /// Pore widths **\[nm\]**, strictly increasing
    pore_widths: Vec<f64>,
    /// Loading per pore volume, one row per pressure and one column per width
    isotherms: DMatrix<f64>,
}

impl DftKernel {
    /// Build from a table of `pressures.len()` × `pore_widths.len()` loadings
    ///
    /// A zero row is added at p = 0 unless the table already starts there.
    ///
    /// # Errors
    ///
    /// `ParameterError` for a shape mismatch, non-finite values, negative or
    /// unsorted pressures, or non-positive or unsorted widths.
    pub fn new(
        name: impl Into<String>,
        pressures: Vec<f64>,
        pore_widths: Vec<f64>,
        isotherms: DMatrix<f64>,
    ) -> Result<Self> {
        let name = name.into();
        if pressures.is_empty() || pore_widths.is_empty() {
            return Err(AdsorptionError::parameter(format!("Kernel {name} is empty")));
        }
        if isotherms.shape() != (pressures.len(), pore_widths.len()) {
            return Err(AdsorptionError::parameter(format!(
                "Kernel {name} has {:?} loadings for {} pressures and {} widths",
                isotherms.shape(),
                pressures.len(),
                pore_widths.len()
            )));
        }
        if pressures.iter().chain(pore_widths.iter()).chain(isotherms.iter()).any(|v| !v.is_finite()) {
            return Err(AdsorptionError::parameter(format!("Kernel {name} holds non-finite values")));
        }
        if pressures[0] < 0.0 || pressures.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AdsorptionError::parameter(format!(
                "Kernel {name} pressures must be non-negative and strictly increasing"
            )));
        }
        if pore_widths[0] <= 0.0 || pore_widths.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AdsorptionError::parameter(format!(
                "Kernel {name} pore widths must be positive and strictly increasing"
            )));
        }

        let (pressures, isotherms) = if pressures[0] > 0.0 {
            let mut padded = vec![0.0];
            padded.extend(pressures);
            (padded, isotherms.insert_row(0, 0.0))
        } else {
            (pressures, isotherms)
        };

        Ok(Self { name, pressures, pore_widths, isotherms })
    }

    /// Parse a kernel table
    ///
    /// # Errors
    ///
    /// `ParameterError` naming the offending line for unparsable values or
    /// rows of the wrong length, then as in [`DftKernel::new`].
    pub fn from_csv(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let mut lines = text.lines().enumerate().filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| AdsorptionError::parameter(format!("Kernel {name} has no header")))?;
        let pore_widths = header
            .split(',')
            .skip(1)
            .map(|cell| parse_cell(&name, 1, cell))
            .collect::<Result<Vec<f64>>>()?;

        let mut pressures = Vec::new();
        let mut values = Vec::new();
        for (index, line) in lines {
            let row = line
                .split(',')
                .map(|cell| parse_cell(&name, index + 1, cell))
                .collect::<Result<Vec<f64>>>()?;
            if row.len() != pore_widths.len() + 1 {
                return Err(AdsorptionError::parameter(format!(
                    "Kernel {name} line {}: expected {} values, found {}",
                    index + 1,
                    pore_widths.len() + 1,
                    row.len()
                )));
            }
            pressures.push(row[0]);
            values.extend_from_slice(&row[1..]);
        }

        let isotherms = DMatrix::from_row_slice(pressures.len(), pore_widths.len(), &values);
        Self::new(name, pressures, pore_widths, isotherms)
    }

    /// Read a kernel file, named after its stem
    ///
    /// # Errors
    ///
    /// `ParameterError` if the file cannot be read, then as in
    /// [`DftKernel::from_csv`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            AdsorptionError::parameter(format!("Cannot read kernel {}: {err}", path.display()))
        })?;
        let name = path.file_stem().map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        Self::from_csv(name, &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pore widths **\[nm\]**
    pub fn pore_widths(&self) -> &[f64] {
        &self.pore_widths
    }

    /// Highest tabulated relative pressure
    pub fn max_pressure(&self) -> f64 {
        self.pressures[self.pressures.len() - 1]
    }

    /// Kernel loadings at `pressures`, one row per pressure
    ///
    /// # Errors
    ///
    /// `CalculationError` if a pressure lies outside the tabulated range.
    pub fn loadings_at(&self, pressures: &[f64]) -> Result<DMatrix<f64>> {
        let mut matrix = DMatrix::zeros(pressures.len(), self.pore_widths.len());
        for (row, &p) in pressures.iter().enumerate() {
            if !(0.0..=self.max_pressure()).contains(&p) {
                return Err(AdsorptionError::calculation(format!(
                    "Could not get kernel values at p = {p}: kernel {} covers 0 to {}",
                    self.name,
                    self.max_pressure()
                )));
            }
            let upper = self.pressures.partition_point(|&q| q < p).max(1);
            let (p0, p1) = (self.pressures[upper - 1], self.pressures[upper]);
            let t = (p - p0) / (p1 - p0);
            for col in 0..self.pore_widths.len() {
                let (n0, n1) = (self.isotherms[(upper - 1, col)], self.isotherms[(upper, col)]);
                matrix[(row, col)] = n0 + t * (n1 - n0);
            }
        }
        Ok(matrix)
    }
}

fn parse_cell(name: &str, line: usize, cell: &str) -> Result<f64> {
    cell.trim().parse().map_err(|_| {
        AdsorptionError::parameter(format!("Kernel {name} line {line}: cannot read {:?} as a number", cell.trim()))
    })
}

// =================================================================================================
// Settings
// =================================================================================================

/// Settings of a kernel fit
///
/// Defaults: adsorption branch, whole isotherm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DftSettings {
    pub branch: Branch,
    /// Relative pressure window; `None` or zero leaves that side open
    pub p_limits: (Option<f64>, Option<f64>),
}

impl DftSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_p_limits(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.p_limits = (lower, upper);
        self
    }
}

// =================================================================================================
// Driver
// =================================================================================================

/// Fit `kernel` to one branch of `isotherm`
///
/// Entry `i` of the result belongs to kernel pore `i`: the distribution is
/// `X_i / Δw_i` with `Δw_0 = w_0`, the cumulative series the running sum of
/// `X`. With a kernel in mmol per cm³ of pore, these are cm³/g/nm and cm³/g.
///
/// # Errors
///
/// - `ParameterError`: invalid window, unknown adsorbate, missing branch
/// - `CalculationError`: fewer than three points in the window, or points
///   outside the kernel's pressure range
pub fn psd_dft(isotherm: &dyn IsothermData, kernel: &DftKernel, settings: &DftSettings) -> Result<PsdResult> {
    validate_p_limits(settings.p_limits)?;
    if isotherm.adsorbate().is_none() {
        return Err(AdsorptionError::parameter("Isotherm adsorbate is not known, cannot calculate PSD"));
    }

    let mut loading = isotherm.loading(settings.branch, LoadingUnit::Mmol, LoadingBasis::Molar)?;
    let mut pressure = isotherm.pressure(settings.branch, PressureMode::Relative)?;
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

    let design = kernel.loadings_at(pressure)?;
    let fit = Nnls::new().solve(&design, &DVector::from_column_slice(loading))?;
    if !fit.converged {
        warn!("Kernel {} fit stopped after {} passes", kernel.name(), fit.iterations);
    }
    debug!(
        "Kernel {} fitted on {} points, residual {:.3e}",
        kernel.name(),
        pressure.len(),
        fit.residual_norm
    );

    let widths = kernel.pore_widths();
    let mut cumulative = 0.0;
    let mut result = PsdResult::default();
    for (i, &contribution) in fit.x.iter().enumerate() {
        let step = if i == 0 { widths[0] } else { widths[i] - widths[i - 1] };
        cumulative += contribution;
        result.pore_widths.push(widths[i]);
        result.pore_distribution.push(contribution / step);
        result.pore_volume_cumulative.push(cumulative);
    }
    Ok(result)
}

// =================================================================================================
// Tests
// =================================================================================================
