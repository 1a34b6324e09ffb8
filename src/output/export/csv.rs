//! CSV export of characterisation and IAST results
//!
//! Compatible with spreadsheets, pandas and most plotting tools.
//!
//! # Features
//!
//! - **Simple interface**: one function per result type
//! - **Metadata support**: optional `#` comment header with a timestamp
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: empty results, mismatched columns, NaN or Inf
//!
//! # Example
//!
//! ```rust,ignore
//! use adsorb_rs::output::export::{export_psd_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::from_calculation("Micropore PSD", "HK slit"));
//! export_psd_csv(&psd, "psd.csv", Some(&config))?;
//! ```
//!
//! **Output** (`psd.csv`):
//! ```csv
//! # Adsorption Data: Micropore PSD
//! # Generated: 2026-10-18T09:12:44+00:00
//! # Model: HK slit
//! #
//! Pore width (nm),dV/dw (cm3/g/nm),Cumulative pore volume (cm3/g)
//! 0.512000,0.143210,0.012000
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::characterisation::PsdResult;
use crate::iast::{SelectivityCurve, VleCurve};
use crate::output::export::Exporter;

// =============================================================================
// Errors
// =============================================================================

/// Failure of a CSV export
#[derive(Error, Debug)]
pub enum CsvError {
    /// The file could not be created or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The result cannot be written as a table
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Delimiter and decimal separator would make the file ambiguous
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use adsorb_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::european().precision(10);
/// assert_eq!(config.delimiter, ';');
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Enable the metadata header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    pub fn validate(&self) -> Result<(), CsvError> {
        if self.delimiter == self.decimal_separator {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        if self.delimiter == '\n' || self.delimiter == '#' {
            return Err(CsvError::InvalidConfig(format!("'{}' cannot be a delimiter", self.delimiter.escape_default())));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvMetadata {
    /// What was calculated (e.g. "Micropore PSD")
    pub calculation: Option<String>,

    /// Model used (e.g. "HK-CY cylinder")
    pub model: Option<String>,

    pub adsorbate: Option<String>,

    pub material: Option<String>,

    /// Isotherm temperature **\[K\]**
    pub temperature: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_calculation(calculation: &str, model: &str) -> Self {
        Self {
            calculation: Some(calculation.to_string()),
            model: Some(model.to_string()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> Result<(), CsvError> {
    match &metadata.calculation {
        Some(calculation) => writeln!(out, "# Adsorption Data: {calculation}")?,
        None => writeln!(out, "# Adsorption Data")?,
    }
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model {
        writeln!(out, "# Model: {model}")?;
    }
    if let Some(adsorbate) = &metadata.adsorbate {
        writeln!(out, "# Adsorbate: {adsorbate}")?;
    }
    if let Some(material) = &metadata.material {
        writeln!(out, "# Material: {material}")?;
    }
    if let Some(temperature) = metadata.temperature {
        writeln!(out, "# Temperature: {temperature} K")?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {key}: {value}")?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Validate and write a table of equal-length columns
fn write_table(
    path: &Path,
    headers: &[String],
    columns: &[&[f64]],
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    // ============================= Validation =============================

    let rows = columns.first().map_or(0, |c| c.len());
    if rows == 0 {
        return Err(CsvError::InvalidData("result has no rows".to_string()));
    }
    for (header, column) in headers.iter().zip(columns) {
        if column.len() != rows {
            return Err(CsvError::InvalidData(format!(
                "column '{header}' has {} rows, expected {rows}",
                column.len()
            )));
        }
        if column.iter().any(|v| !v.is_finite()) {
            return Err(CsvError::InvalidData(format!("NaN or Inf detected in column '{header}'")));
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    configuration.validate()?;

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(path)?);

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    let separator = configuration.delimiter.to_string();
    writeln!(out, "{}", headers.join(&separator))?;

    for row in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| format_number(c[row], configuration)).collect();
        writeln!(out, "{}", line.join(&separator))?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// CSV implementation of [`Exporter`]
///
/// The `export_*_csv` functions are shorthands for a one-off exporter.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn from_configuration(configuration: Option<&CsvConfig>) -> Self {
        Self::new(configuration.cloned().unwrap_or_default())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    /// Columns: pore width, differential volume, cumulative volume.
    fn export_psd(&self, psd: &PsdResult, path: &Path) -> Result<(), CsvError> {
        let headers = [
            "Pore width (nm)".to_string(),
            "dV/dw (cm3/g/nm)".to_string(),
            "Cumulative pore volume (cm3/g)".to_string(),
        ];
        write_table(
            path,
            &headers,
            &[psd.pore_widths.as_slice(), psd.pore_distribution.as_slice(), psd.pore_volume_cumulative.as_slice()],
            Some(&self.config),
        )
    }

    /// Columns: pressure, selectivity, then the loading of each component
    /// labelled with `component_names`.
    fn export_selectivity(
        &self,
        curve: &SelectivityCurve,
        component_names: [&str; 2],
        path: &Path,
    ) -> Result<(), CsvError> {
        let first: Vec<f64> = curve.loadings.iter().map(|n| n[0]).collect();
        let second: Vec<f64> = curve.loadings.iter().map(|n| n[1]).collect();

        let headers = [
            "Pressure".to_string(),
            format!("Selectivity {}/{}", component_names[0], component_names[1]),
            format!("Loading {}", component_names[0]),
            format!("Loading {}", component_names[1]),
        ];
        write_table(
            path,
            &headers,
            &[curve.pressure.as_slice(), curve.selectivity.as_slice(), first.as_slice(), second.as_slice()],
            Some(&self.config),
        )
    }

    /// Columns: gas fraction y, adsorbed fraction x, of the first component.
    fn export_vle(&self, curve: &VleCurve, path: &Path) -> Result<(), CsvError> {
        let headers = ["y (gas)".to_string(), "x (adsorbed)".to_string()];
        write_table(path, &headers, &[curve.y.as_slice(), curve.x.as_slice()], Some(&self.config))
    }
}

/// Export a pore-size distribution
///
/// # Errors
///
/// - empty distribution, NaN or Inf values
/// - file creation errors
pub fn export_psd_csv(
    psd: &PsdResult,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    CsvExporter::from_configuration(configuration).export_psd(psd, output_path.as_ref())
}

/// Export a selectivity sweep
pub fn export_selectivity_csv(
    curve: &SelectivityCurve,
    component_names: [&str; 2],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    CsvExporter::from_configuration(configuration).export_selectivity(curve, component_names, output_path.as_ref())
}

/// Export an x–y diagram
pub fn export_vle_csv(
    curve: &VleCurve,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    CsvExporter::from_configuration(configuration).export_vle(curve, output_path.as_ref())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn psd() -> PsdResult {
        PsdResult {
            pore_widths: vec![0.5, 0.75],
            pore_distribution: vec![0.25, 0.125],
            pore_volume_cumulative: vec![0.1, 0.2],
        }
    }

    #[test]
    fn test_psd_export_default() {
        let file = NamedTempFile::new().unwrap();
        export_psd_csv(&psd(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Pore width (nm),dV/dw (cm3/g/nm),Cumulative pore volume (cm3/g)");
        assert_eq!(lines[1], "0.500000,0.250000,0.100000");
        assert_eq!(lines[2], "0.750000,0.125000,0.200000");
    }

    #[test]
    fn test_european_format() {
        let file = NamedTempFile::new().unwrap();
        export_psd_csv(&psd(), file.path(), Some(&CsvConfig::european().precision(2))).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().nth(1), Some("0,50;0,25;0,10"));
    }

    #[test]
    fn test_metadata_header() {
        let mut metadata = CsvMetadata::from_calculation("Micropore PSD", "HK slit");
        metadata.temperature = Some(77.355);
        metadata.add_custom("Branch", "ads");

        let file = NamedTempFile::new().unwrap();
        export_psd_csv(&psd(), file.path(), Some(&CsvConfig::default().with_metadata(metadata))).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# Adsorption Data: Micropore PSD\n# Generated: "));
        assert!(content.contains("# Model: HK slit\n"));
        assert!(content.contains("# Temperature: 77.355 K\n"));
        assert!(content.contains("# Branch: ads\n#\nPore width"));
    }

    #[test]
    fn test_selectivity_export() {
        let curve = SelectivityCurve {
            mole_fractions: [0.5, 0.5],
            pressure: vec![1.0, 2.0],
            selectivity: vec![0.3, 0.3],
            loadings: vec![[0.5, 2.0], [0.8, 3.2]],
        };

        let file = NamedTempFile::new().unwrap();
        export_selectivity_csv(&curve, ["CH4", "C2H6"], file.path(), Some(&CsvConfig::default().precision(1))).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Pressure,Selectivity CH4/C2H6,Loading CH4,Loading C2H6");
        assert_eq!(lines[2], "2.0,0.3,0.8,3.2");
    }

    #[test]
    fn test_vle_export() {
        let curve = VleCurve {
            total_pressure: 1.0,
            x: vec![0.1, 0.6],
            y: vec![0.01, 0.5],
        };

        let file = NamedTempFile::new().unwrap();
        export_vle_csv(&curve, file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().next(), Some("y (gas),x (adsorbed)"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_invalid_data() {
        let file = NamedTempFile::new().unwrap();

        let empty = PsdResult::default();
        assert!(matches!(export_psd_csv(&empty, file.path(), None), Err(CsvError::InvalidData(_))));

        let mut infinite = psd();
        infinite.pore_distribution[0] = f64::INFINITY;
        assert!(matches!(export_psd_csv(&infinite, file.path(), None), Err(CsvError::InvalidData(_))));

        let mut ragged = psd();
        ragged.pore_volume_cumulative.pop();
        assert!(matches!(export_psd_csv(&ragged, file.path(), None), Err(CsvError::InvalidData(_))));
    }

    #[test]
    fn test_invalid_config() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().delimiter(',');

        assert!(config.validate().is_err());
        assert!(matches!(export_psd_csv(&psd(), file.path(), Some(&config)), Err(CsvError::InvalidConfig(_))));
    }

    /// Any exporter, driven through the trait only
    fn export_everything<E: Exporter>(exporter: &E, dir: &Path) -> Result<(), E::Error> {
        let curve = VleCurve {
            total_pressure: 1.0,
            x: vec![0.1, 0.6],
            y: vec![0.01, 0.5],
        };
        exporter.export_psd(&psd(), &dir.join("psd.csv"))?;
        exporter.export_vle(&curve, &dir.join("xy.csv"))
    }

    #[test]
    fn test_exporter_matches_shorthands() {
        let dir = tempfile::tempdir().unwrap();
        let config = CsvConfig::european().precision(3);
        export_everything(&CsvExporter::new(config.clone()), dir.path()).unwrap();

        let shorthand = dir.path().join("shorthand.csv");
        export_psd_csv(&psd(), &shorthand, Some(&config)).unwrap();

        let through_trait = fs::read_to_string(dir.path().join("psd.csv")).unwrap();
        assert_eq!(through_trait, fs::read_to_string(&shorthand).unwrap());
        assert!(through_trait.ends_with("0,750;0,125;0,200\n"));
        assert!(dir.path().join("xy.csv").exists());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("psd.csv");

        assert!(matches!(export_psd_csv(&psd(), &path, None), Err(CsvError::Io(_))));
    }
}
