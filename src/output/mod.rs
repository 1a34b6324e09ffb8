//! Output of calculation results
//!
//! ```text
//! output/
//! ├── mod.rs
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs
//! ```
//!
//! Plotting is left to external tools: the exported tables load directly
//! into pandas, spreadsheets or gnuplot.
//!
//! # CSV Export
//!
//! ```rust,ignore
//! use adsorb_rs::output::export::{export_psd_csv, CsvConfig};
//!
//! export_psd_csv(&psd, "psd.csv", None)?;
//! ```

pub mod export;

// Re-export commonly used items for convenience
pub use export::{
    export_psd_csv,
    export_selectivity_csv,
    export_vle_csv,
    CsvConfig,
    CsvError,
    CsvExporter,
    CsvMetadata,
    Exporter,
};
