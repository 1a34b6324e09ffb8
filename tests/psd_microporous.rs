//! Integration tests: isotherm + HK family + distribution assembly
//!
//! These tests run the full micropore PSD pipeline on synthetic nitrogen
//! isotherms.

use adsorb_rs::characterisation::hk::{build_potential, HkParameters, BOUND_TOLERANCE, MAX_PORE_SIZE};
use adsorb_rs::characterisation::{psd_microporous, MaterialModel, PoreGeometry, PsdModel, PsdSettings};
use adsorb_rs::isotherm::{Branch, IsothermData, LoadingBasis, LoadingUnit, PointIsotherm, PressureMode};
use adsorb_rs::physics::{registry, MaterialProperties};
use adsorb_rs::solver::{parallel_threshold, set_parallel_threshold};

mod common;
use common::{
    assert_non_decreasing,
    assert_strictly_increasing,
    nitrogen_on_carbon,
    relative_error,
    with_mirrored_desorption,
};

/// Points of the mock isotherm below p/p0 = 0.2
const WINDOW_POINTS: usize = 29;

/// Carbon(HK) surface atom **\[nm\]**
const CARBON_ATOM_DIAMETER: f64 = 0.34;

// =================================================================================================
// Every model and geometry
// =================================================================================================

#[test]
fn test_every_combination_returns_aligned_series() {
    let isotherm = nitrogen_on_carbon();

    for model in PsdModel::ALL {
        for geometry in PoreGeometry::ALL {
            let settings = PsdSettings::new().with_model(model).with_geometry(geometry);
            let psd = psd_microporous(&isotherm, &settings).unwrap();

            let label = format!("{model} {geometry}");
            assert!(!psd.is_empty(), "{label}: empty result");
            assert!(psd.len() < WINDOW_POINTS, "{label}: {} points", psd.len());
            assert_eq!(psd.pore_widths.len(), psd.pore_distribution.len(), "{label}");
            assert_eq!(psd.pore_widths.len(), psd.pore_volume_cumulative.len(), "{label}");
        }
    }
}

#[test]
fn test_hk_widths_follow_pressure() {
    let isotherm = nitrogen_on_carbon();

    for geometry in PoreGeometry::ALL {
        let settings = PsdSettings::new().with_geometry(geometry);
        let psd = psd_microporous(&isotherm, &settings).unwrap();

        assert_strictly_increasing(&psd.pore_widths, geometry.name());
        assert_strictly_increasing(&psd.pore_volume_cumulative, geometry.name());
        assert!(psd.pore_distribution.iter().all(|d| *d > 1e-3 && *d < 1e3));
    }
}

#[test]
fn test_hk_slit_keeps_every_interval() {
    let psd = psd_microporous(&nitrogen_on_carbon(), &PsdSettings::new()).unwrap();

    assert_eq!(psd.len(), WINDOW_POINTS - 1);
    // micropores of a carbon: below 2.5 nm
    assert!(psd.pore_widths[0] > 0.3 && psd.pore_widths[psd.len() - 1] < 2.5);
}

#[test]
fn test_rege_yang_is_not_filtered() {
    let isotherm = nitrogen_on_carbon();

    for geometry in PoreGeometry::ALL {
        let settings = PsdSettings::new().with_model(PsdModel::RY).with_geometry(geometry);
        let psd = psd_microporous(&isotherm, &settings).unwrap();

        assert_eq!(psd.len(), WINDOW_POINTS - 1, "{geometry}");
        assert_strictly_increasing(&psd.pore_volume_cumulative, geometry.name());
    }
}

#[test]
fn test_rege_yang_widths_follow_pressure() {
    let isotherm = nitrogen_on_carbon();

    let slit = psd_microporous(&isotherm, &PsdSettings::from_names("RY", "slit", "ads").unwrap()).unwrap();
    assert_strictly_increasing(&slit.pore_widths, "RY slit");
    assert!(slit.pore_distribution.iter().all(|d| d.is_finite() && *d > 0.0));

    // layer by layer filling: widths plateau where a new layer starts
    let cylinder = psd_microporous(&isotherm, &PsdSettings::from_names("RY", "cylinder", "ads").unwrap()).unwrap();
    assert_non_decreasing(&cylinder.pore_widths, 1e-4, "RY cylinder");
    assert!(cylinder.pore_widths.iter().all(|w| *w < 2.0 * MAX_PORE_SIZE - 1.0));
}

#[test]
fn test_rege_yang_sphere_pins_at_search_limit() {
    let isotherm = nitrogen_on_carbon();
    let settings = PsdSettings::from_names("RY", "sphere", "ads").unwrap();
    let psd = psd_microporous(&isotherm, &settings).unwrap();

    // the sphere potential is still deep at a 50 nm radius, so the upper
    // part of the window cannot be matched and those widths sit on the cap
    let cap = PoreGeometry::Sphere.pore_width(MAX_PORE_SIZE, CARBON_ATOM_DIAMETER);
    let pinned = |w: f64| (w - cap).abs() < 2.0 * BOUND_TOLERANCE;

    assert_non_decreasing(&psd.pore_widths, 1e-4, "RY sphere");
    let first_pinned = psd.pore_widths.iter().position(|w| pinned(*w)).unwrap();
    assert!(first_pinned > 0 && first_pinned < psd.len() - 1, "{:?}", psd.pore_widths);
    assert!(psd.pore_widths[first_pinned..].iter().all(|w| pinned(*w)));

    // only the intervals between two pinned points lose their density
    for (w, d) in psd.pore_widths.iter().zip(&psd.pore_distribution) {
        if !pinned(*w) {
            assert!(d.is_finite() && *d > 0.0, "dV/dw = {d} at {w} nm");
        }
    }
}

#[test]
fn test_cumulative_volume_matches_liquid_volume() {
    let isotherm = nitrogen_on_carbon();
    let psd = psd_microporous(&isotherm, &PsdSettings::new()).unwrap();

    // last loading inside the window, as liquid nitrogen
    let loading = isotherm
        .loading(Branch::Adsorption, LoadingUnit::Mmol, LoadingBasis::Molar)
        .unwrap();
    let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
    let expected = loading[WINDOW_POINTS - 1] * nitrogen.molar_mass / nitrogen.liquid_density / 1000.0;

    let total = psd.total_pore_volume().unwrap();
    assert!(relative_error(total, expected) < 1e-12, "{total} vs {expected}");
}

// =================================================================================================
// Settings
// =================================================================================================

#[test]
fn test_invalid_names_are_parameter_errors() {
    for (model, geometry, branch) in [("XX", "slit", "ads"), ("HK", "cube", "ads"), ("HK", "slit", "both")] {
        let err = PsdSettings::from_names(model, geometry, branch).unwrap_err();
        assert!(err.is_parameter(), "{model} {geometry} {branch}");
    }

    let err = PsdSettings::from_names("XX", "slit", "ads").unwrap_err();
    assert!(err.to_string().contains("HK-CY"));
}

#[test]
fn test_narrow_window_is_calculation_error() {
    let settings = PsdSettings::new().with_p_limits(Some(1e-4), Some(2e-4));
    let err = psd_microporous(&nitrogen_on_carbon(), &settings).unwrap_err();
    assert!(err.is_calculation());
}

#[test]
fn test_window_limits_shrink_result() {
    let isotherm = nitrogen_on_carbon();
    let full = psd_microporous(&isotherm, &PsdSettings::new().with_p_limits(None, None)).unwrap();
    let lower = psd_microporous(&isotherm, &PsdSettings::new().with_p_limits(Some(1e-4), Some(0.2))).unwrap();

    // the interval above p/p0 = 0.2 adds almost no volume and may be filtered
    assert!(full.len() >= WINDOW_POINTS - 1);
    assert!(lower.len() < WINDOW_POINTS - 1);
    assert!(lower.pore_widths[0] > full.pore_widths[0]);
}

#[test]
fn test_custom_material() {
    let isotherm = nitrogen_on_carbon();
    let carbon = registry::get_hk_model("Carbon(HK)").unwrap();

    let named = psd_microporous(&isotherm, &PsdSettings::new()).unwrap();
    let custom = psd_microporous(&isotherm, &PsdSettings::new().with_material(carbon.clone())).unwrap();
    assert_eq!(named, custom);

    let bad = MaterialProperties { surface_density: -1.0, ..carbon };
    let err = psd_microporous(&isotherm, &PsdSettings::new().with_material(MaterialModel::Custom(bad))).unwrap_err();
    assert!(err.is_parameter());
}

#[test]
fn test_unknown_adsorbate_without_override() {
    let pressure = common::log_pressures(1e-6, 0.1, 10);
    let loading = pressure.iter().map(|p| 5.0 * p / (1e-3 + p)).collect();
    let isotherm = PointIsotherm::new(pressure, loading, 77.355).unwrap();

    let err = psd_microporous(&isotherm, &PsdSettings::new()).unwrap_err();
    assert!(err.is_parameter());

    let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
    let psd = psd_microporous(&isotherm, &PsdSettings::new().with_adsorbate(nitrogen)).unwrap();
    assert!(!psd.is_empty());
}

// =================================================================================================
// Branches
// =================================================================================================

#[test]
fn test_desorption_is_reversed() {
    let source = nitrogen_on_carbon();
    let pressure = source.pressure(Branch::Adsorption, PressureMode::Relative).unwrap();
    let loading = source
        .loading(Branch::Adsorption, LoadingUnit::Mmol, LoadingBasis::Molar)
        .unwrap();
    let isotherm = with_mirrored_desorption(&pressure, &loading);

    let adsorption = psd_microporous(&isotherm, &PsdSettings::new()).unwrap();
    let desorption = psd_microporous(&isotherm, &PsdSettings::new().with_branch(Branch::Desorption)).unwrap();

    assert_eq!(adsorption, desorption);
}

#[test]
fn test_missing_desorption_branch() {
    let settings = PsdSettings::new().with_branch(Branch::Desorption);
    let err = psd_microporous(&nitrogen_on_carbon(), &settings).unwrap_err();
    assert!(err.is_parameter());
}

// =================================================================================================
// Determinism
// =================================================================================================

#[test]
fn test_repeated_calls_are_identical() {
    let isotherm = nitrogen_on_carbon();
    let settings = PsdSettings::from_names("HK-CY", "sphere", "ads").unwrap();

    let first = psd_microporous(&isotherm, &settings).unwrap();
    let second = psd_microporous(&isotherm, &settings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_threshold_does_not_change_results() {
    let isotherm = nitrogen_on_carbon();
    let settings = PsdSettings::from_names("RY-CY", "cylinder", "ads").unwrap();
    let previous = parallel_threshold();

    set_parallel_threshold(usize::MAX);
    let sequential = psd_microporous(&isotherm, &settings);
    set_parallel_threshold(1);
    let parallel = psd_microporous(&isotherm, &settings);
    set_parallel_threshold(previous);

    assert_eq!(sequential.unwrap(), parallel.unwrap());
}

#[test]
fn test_potential_reproduces_filling_pressure() {
    let nitrogen = registry::adsorbate_properties("nitrogen", 77.355).unwrap();
    let carbon = registry::get_hk_model("Carbon(HK)").unwrap();
    let params = HkParameters::new(&nitrogen, &carbon, 77.355);
    let slit = build_potential(PsdModel::HK, PoreGeometry::Slit, &params);

    // a 0.9 nm (nuclei distance) slit fills near p/p0 = 7e-5
    let pressure = slit.potential(0.9).exp();
    let widths = adsorb_rs::characterisation::hk::solve_widths(&[pressure], &[1.0], slit.as_ref(), false);
    assert!((widths[0] - 0.9).abs() < 1e-3, "{}", widths[0]);
}
