//! Binary-mixture sweeps
//!
//! - [`iast_binary_svp`]: selectivity of the first component over the
//!   second at fixed gas composition, across total pressures
//! - [`iast_binary_vle`]: adsorbed versus gas fraction of the first
//!   component at fixed total pressure (x–y diagram)

use serde::{Deserialize, Serialize};

use crate::error::{AdsorptionError, Result};
use crate::iast::{check_fractions, check_pressure, iast};
use crate::models::IsothermModel;

/// Number of gas fractions in an x–y diagram
pub const VLE_POINTS: usize = 30;

/// Gas fraction range of the x–y diagram
const VLE_RANGE: (f64, f64) = (0.01, 0.99);

/// Selectivity against total pressure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectivityCurve {
    /// Gas-phase mole fractions of the two components
    pub mole_fractions: [f64; 2],
    /// Total pressure of each point
    pub pressure: Vec<f64>,
    /// `(n₀/y₀)/(n₁/y₁)` at each pressure
    pub selectivity: Vec<f64>,
    /// Component loadings at each pressure
    pub loadings: Vec<[f64; 2]>,
}

/// x–y diagram of the first component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VleCurve {
    pub total_pressure: f64,
    /// Adsorbed-phase mole fraction
    pub x: Vec<f64>,
    /// Gas-phase mole fraction
    pub y: Vec<f64>,
}

fn check_pair(components: &[&dyn IsothermModel]) -> Result<()> {
    if components.len() != 2 {
        return Err(AdsorptionError::parameter(format!(
            "Binary IAST needs exactly two components, got {}",
            components.len()
        )));
    }
    Ok(())
}

/// `count` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Selectivity of a binary gas mixture over a range of total pressures
///
/// # Errors
///
/// - `ParameterError`: not exactly two components, fractions not summing to
///   one or with a zero entry, no pressures or a non-positive one
/// - `CalculationError`: IAST fails at one of the pressures
///
/// # Example
///
/// ```rust
/// use adsorb_rs::iast::iast_binary_svp;
/// use adsorb_rs::models::{IsothermModel, Langmuir};
///
/// let weak = Langmuir::new(4.0, 0.5).unwrap();
/// let strong = Langmuir::new(4.0, 2.0).unwrap();
/// let components: [&dyn IsothermModel; 2] = [&weak, &strong];
///
/// let curve = iast_binary_svp(&components, &[0.5, 0.5], &[0.1, 1.0, 10.0]).unwrap();
/// assert!(curve.selectivity.iter().all(|s| (s - 0.25).abs() < 1e-6));
/// ```
pub fn iast_binary_svp(
    components: &[&dyn IsothermModel],
    mole_fractions: &[f64],
    pressures: &[f64],
) -> Result<SelectivityCurve> {
    check_pair(components)?;
    let &[y0, y1] = mole_fractions else {
        return Err(AdsorptionError::parameter(format!(
            "Binary IAST needs two mole fractions, got {}",
            mole_fractions.len()
        )));
    };
    check_fractions(mole_fractions)?;
    if y0 == 0.0 || y1 == 0.0 {
        return Err(AdsorptionError::parameter("Selectivity is undefined for a pure gas"));
    }
    if pressures.is_empty() {
        return Err(AdsorptionError::parameter("No pressures to sweep"));
    }
    for &p in pressures {
        check_pressure(p, "Total pressure")?;
    }

    let mut curve = SelectivityCurve {
        mole_fractions: [y0, y1],
        ..SelectivityCurve::default()
    };

    for &total in pressures {
        let result = iast(components, &[y0 * total, y1 * total])?;
        let (n0, n1) = (result.loadings[0], result.loadings[1]);

        curve.pressure.push(total);
        curve.selectivity.push((n0 / y0) / (n1 / y1));
        curve.loadings.push([n0, n1]);
    }

    Ok(curve)
}

/// Adsorbed against gas composition of a binary mixture
///
/// The gas fraction of the first component runs over
/// [`VLE_POINTS`] values evenly spaced from 0.01 to 0.99.
///
/// # Errors
///
/// - `ParameterError`: not exactly two components, non-positive pressure
/// - `CalculationError`: IAST fails at one of the compositions
pub fn iast_binary_vle(components: &[&dyn IsothermModel], total_pressure: f64) -> Result<VleCurve> {
    check_pair(components)?;
    check_pressure(total_pressure, "Total pressure")?;

    let y = linspace(VLE_RANGE.0, VLE_RANGE.1, VLE_POINTS);
    let x = y
        .iter()
        .map(|y0| {
            iast(components, &[y0 * total_pressure, (1.0 - y0) * total_pressure])
                .map(|result| result.adsorbed_mole_fractions[0])
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(VleCurve { total_pressure, x, y })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Freundlich, Henry, Langmuir};
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        let values = linspace(0.01, 0.99, 30);
        assert_eq!(values.len(), 30);
        assert_eq!(values[0], 0.01);
        assert_relative_eq!(values[29], 0.99, epsilon = 1e-15);
        assert_relative_eq!(values[1] - values[0], 0.98 / 29.0, epsilon = 1e-15);
    }

    #[test]
    fn test_equal_capacity_selectivity() {
        let a = Langmuir::new(3.0, 0.8).unwrap();
        let b = Langmuir::new(3.0, 0.2).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];
        let pressures: Vec<f64> = (0..30).map(|i| 10f64.powf(-2.0 + 3.0 * i as f64 / 29.0)).collect();

        let curve = iast_binary_svp(&components, &[0.3, 0.7], &pressures).unwrap();

        assert_eq!(curve.selectivity.len(), 30);
        assert_eq!(curve.loadings.len(), 30);
        for s in &curve.selectivity {
            assert_relative_eq!(*s, 4.0, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_equal_capacity_xy_diagram() {
        let a = Langmuir::new(5.0, 2.0).unwrap();
        let b = Langmuir::new(5.0, 0.5).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let curve = iast_binary_vle(&components, 1.0).unwrap();

        assert_eq!(curve.x.len(), VLE_POINTS);
        for (x, y) in curve.x.iter().zip(curve.y.iter()) {
            let expected = 2.0 * y / (2.0 * y + 0.5 * (1.0 - y));
            assert_relative_eq!(*x, expected, max_relative = 1e-7);
            assert!(x > y);
        }
    }

    #[test]
    fn test_henry_xy_is_pressure_independent() {
        let a = Henry::new(1.0).unwrap();
        let b = Henry::new(3.0).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let low = iast_binary_vle(&components, 0.1).unwrap();
        let high = iast_binary_vle(&components, 10.0).unwrap();

        for (l, h) in low.x.iter().zip(high.x.iter()) {
            assert_relative_eq!(*l, *h, max_relative = 1e-8);
        }
    }

    #[test]
    fn test_parameter_errors() {
        let a = Langmuir::new(3.0, 0.8).unwrap();
        let b = Langmuir::new(3.0, 0.2).unwrap();
        let single: [&dyn IsothermModel; 1] = [&a];
        let pair: [&dyn IsothermModel; 2] = [&a, &b];

        assert!(iast_binary_svp(&single, &[0.1], &[1.0, 2.0]).unwrap_err().is_parameter());
        assert!(iast_binary_svp(&pair, &[0.1, 0.4], &[1.0, 2.0]).unwrap_err().is_parameter());
        assert!(iast_binary_svp(&pair, &[1.0, 0.0], &[1.0]).unwrap_err().is_parameter());
        assert!(iast_binary_svp(&pair, &[0.5, 0.5], &[]).unwrap_err().is_parameter());
        assert!(iast_binary_svp(&pair, &[0.5, 0.5], &[1.0, -1.0]).unwrap_err().is_parameter());

        assert!(iast_binary_vle(&single, 1.0).unwrap_err().is_parameter());
        assert!(iast_binary_vle(&pair, 0.0).unwrap_err().is_parameter());
    }

    #[test]
    fn test_freundlich_component_still_solves() {
        let a = Freundlich::new(1.0, 2.0).unwrap();
        let b = Langmuir::new(3.0, 0.2).unwrap();
        let components: [&dyn IsothermModel; 2] = [&a, &b];

        let curve = iast_binary_vle(&components, 1.0).unwrap();
        assert!(curve.x.iter().all(|x| (0.0..=1.0).contains(x)));
    }
}
