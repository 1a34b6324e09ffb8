//! Export of results to files.
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format; each format lives in
//! its own sub-module. Adding a format means adding a file and an
//! implementation, without touching the existing ones. The free
//! `export_*_csv` functions build a [`CsvExporter`] and go through the trait.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use adsorb_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export_psd(&psd, Path::new("psd.csv"))?;
//! exporter.export_vle(&curve, Path::new("xy.csv"))?;
//! ```

use std::path::Path;

pub mod csv;

// Re-export the most commonly used types at the module level
pub use csv::{export_psd_csv, export_selectivity_csv, export_vle_csv, CsvConfig, CsvError, CsvExporter, CsvMetadata};

use crate::characterisation::PsdResult;
use crate::iast::{SelectivityCurve, VleCurve};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors, so the caller can react to the
/// exact failure without downcasting a boxed error.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Pore widths, distribution and cumulative volume
    fn export_psd(&self, psd: &PsdResult, path: &Path) -> Result<(), Self::Error>;

    /// Selectivity sweep, with the two component names as column labels
    fn export_selectivity(
        &self,
        curve: &SelectivityCurve,
        component_names: [&str; 2],
        path: &Path,
    ) -> Result<(), Self::Error>;

    /// x–y diagram
    fn export_vle(&self, curve: &VleCurve, path: &Path) -> Result<(), Self::Error>;
}
