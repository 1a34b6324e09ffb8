//! Named property sets
//!
//! Built-in material models for the Horvath-Kawazoe family and the
//! resolution of adsorbate properties from an [`Adsorbate`].
//!
//! | Model          | Surface atom            | d (nm) | α (nm³)  | κ (nm³)  | n (m⁻²)   |
//! |----------------|-------------------------|--------|----------|----------|-----------|
//! | `Carbon(HK)`   | graphitic carbon        | 0.34   | 1.02e-3  | 1.35e-7  | 3.845e19  |
//! | `OxideIon(SF)` | oxide ion (Saito-Foley) | 0.276  | 2.5e-3   | 1.3e-8   | 1.315e19  |
//! | `AlSiOxideIon` | aluminosilicate oxide   | 0.276  | 2.5e-3   | 1.3e-8   | 1.315e19  |
//! | `AlPhOxideIon` | aluminophosphate oxide  | 0.276  | 2.5e-3   | 1.3e-8   | 1.0e19    |

use crate::error::{AdsorptionError, Result};
use crate::isotherm::Adsorbate;
use crate::physics::data::{AdsorbateProperties, MaterialProperties};

/// Names accepted by [`get_hk_model`]
pub const HK_MODEL_NAMES: [&str; 4] = ["Carbon(HK)", "OxideIon(SF)", "AlSiOxideIon", "AlPhOxideIon"];

/// Look up a built-in material model by name
///
/// # Errors
///
/// `ParameterError` naming the unknown model and the available ones.
///
/// # Example
///
/// ```
/// use adsorb_rs::physics::registry::get_hk_model;
///
/// let carbon = get_hk_model("Carbon(HK)").unwrap();
/// assert_eq!(carbon.molecular_diameter, 0.34);
/// assert!(get_hk_model("Graphene").is_err());
/// ```
pub fn get_hk_model(name: &str) -> Result<MaterialProperties> {
    let properties = match name {
        "Carbon(HK)" => MaterialProperties {
            molecular_diameter: 0.34,
            polarizability: 1.02e-3,
            magnetic_susceptibility: 1.35e-7,
            surface_density: 3.845e19,
        },
        "OxideIon(SF)" | "AlSiOxideIon" => MaterialProperties {
            molecular_diameter: 0.276,
            polarizability: 2.5e-3,
            magnetic_susceptibility: 1.3e-8,
            surface_density: 1.315e19,
        },
        "AlPhOxideIon" => MaterialProperties {
            molecular_diameter: 0.276,
            polarizability: 2.5e-3,
            magnetic_susceptibility: 1.3e-8,
            surface_density: 1.0e19,
        },
        other => {
            return Err(AdsorptionError::parameter(format!(
                "Model {other} not an option for HK material properties. \
                 Available models are {HK_MODEL_NAMES:?}"
            )));
        }
    };

    properties.validate()?;
    Ok(properties)
}

/// Assemble the HK property set of an adsorbate at `temperature` (K)
///
/// # Errors
///
/// `ParameterError` if the adsorbate lacks one of the HK properties.
pub fn properties_of(adsorbate: &Adsorbate, temperature: f64) -> Result<AdsorbateProperties> {
    let lookup = |key: &str| {
        adsorbate.get_prop(key).map_err(|_| {
            AdsorptionError::parameter(format!(
                "Adsorbate {} has no '{key}' property, cannot calculate PSD. \
                 Pass the adsorbate properties explicitly.",
                adsorbate.name()
            ))
        })
    };

    let properties = AdsorbateProperties {
        molecular_diameter: lookup("molecular_diameter")?,
        polarizability: lookup("polarizability")?,
        magnetic_susceptibility: lookup("magnetic_susceptibility")?,
        surface_density: lookup("surface_density")?,
        liquid_density: adsorbate.liquid_density(temperature).map_err(|e| {
            AdsorptionError::parameter(format!("Adsorbate {}: {e}", adsorbate.name()))
        })?,
        molar_mass: adsorbate.molar_mass(),
    };

    properties.validate()?;
    Ok(properties)
}

/// HK property set of a built-in adsorbate, by name or alias
///
/// ```
/// use adsorb_rs::physics::registry::adsorbate_properties;
///
/// let argon = adsorbate_properties("Ar", 87.3).unwrap();
/// assert_eq!(argon.liquid_density, 1.395);
/// ```
pub fn adsorbate_properties(name: &str, temperature: f64) -> Result<AdsorbateProperties> {
    properties_of(&Adsorbate::find(name)?, temperature)
}
