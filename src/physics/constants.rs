//! Physical constants (CODATA 2018)

/// Electron mass **\[kg\]**
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;

/// Speed of light in vacuum **\[m/s\]**
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Avogadro constant **\[1/mol\]**
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Molar gas constant **\[J/(mol·K)\]**
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Conversion factor from nm³ to m³
pub const NM3_TO_M3: f64 = 1e-27;

/// Conversion factor from nm to m
pub const NM_TO_M: f64 = 1e-9;

/// Ratio N_A / (R·T) **\[1/J\]**
///
/// Converts a per-molecule energy into the reduced (dimensionless)
/// potential ln(p/p0) at temperature `temperature` (K).
pub fn n_over_rt(temperature: f64) -> f64 {
    AVOGADRO / GAS_CONSTANT / temperature
}
