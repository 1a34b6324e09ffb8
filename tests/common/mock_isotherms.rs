//! Synthetic isotherms with known shapes

use adsorb_rs::isotherm::{Adsorbate, PointIsotherm};

/// Boiling point of nitrogen **\[K\]**
pub const NITROGEN_TEMPERATURE: f64 = 77.355;

/// `count` relative pressures, log-spaced from `low` to `high`
pub fn log_pressures(low: f64, high: f64, count: usize) -> Vec<f64> {
    let (a, b) = (low.log10(), high.log10());
    (0..count)
        .map(|i| 10f64.powf(a + (b - a) * i as f64 / (count - 1) as f64))
        .collect()
}

/// Type I nitrogen isotherm on a microporous carbon
///
/// 30 points from 1e-6 to 0.3 p/p0, Langmuir-shaped with a capacity of
/// 10 mmol/g and K = 1000.
pub fn nitrogen_on_carbon() -> PointIsotherm {
    let pressure = log_pressures(1e-6, 0.3, 30);
    let loading = pressure.iter().map(|p| 10.0 * 1e3 * p / (1.0 + 1e3 * p)).collect();

    PointIsotherm::new(pressure, loading, NITROGEN_TEMPERATURE)
        .unwrap()
        .with_adsorbate(Adsorbate::find("nitrogen").unwrap())
        .with_material("Carbon")
}

/// Append a desorption branch that retraces the adsorption branch exactly
pub fn with_mirrored_desorption(pressure: &[f64], loading: &[f64]) -> PointIsotherm {
    let mut p = pressure.to_vec();
    let mut n = loading.to_vec();
    p.extend(pressure.iter().rev().skip(1));
    n.extend(loading.iter().rev().skip(1));

    PointIsotherm::new(p, n, NITROGEN_TEMPERATURE)
        .unwrap()
        .with_adsorbate(Adsorbate::find("nitrogen").unwrap())
}

/// Isotherm carrying an `"enthalpy"` column (kJ/mol)
pub fn calorimetry_isotherm(temperature: f64, enthalpy: impl Fn(f64) -> f64) -> PointIsotherm {
    let loading: Vec<f64> = (1..=20).map(|i| 0.25 * i as f64).collect();
    let pressure: Vec<f64> = (1..=20).map(|i| 0.01 * i as f64).collect();
    let max_loading = loading[loading.len() - 1];
    let column = loading.iter().map(|n| enthalpy(n / max_loading)).collect();

    PointIsotherm::new(pressure, loading, temperature)
        .unwrap()
        .with_adsorbate(Adsorbate::find("nitrogen").unwrap())
        .with_other_data("enthalpy", column)
        .unwrap()
}
