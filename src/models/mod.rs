//! Model isotherms
//!
//! All models implement the [`IsothermModel`] trait. IAST calls the loading,
//! spreading pressure and their inverses; models are responsible for the
//! physics (the fitted function), the IAST solver for the mixing rule.
//!
//! # Available Models
//!
//! | Name          | Type                  | Parameters                       | IAST |
//! |---------------|-----------------------|----------------------------------|------|
//! | `Henry`       | [`Henry`]             | `K`                              | ✓    |
//! | `Langmuir`    | [`Langmuir`]          | `n_m`, `K`                       | ✓    |
//! | `DSLangmuir`  | [`MultiSiteLangmuir`] | `n_m1`, `K1`, `n_m2`, `K2`       | ✓    |
//! | `TSLangmuir`  | [`MultiSiteLangmuir`] | `n_m1`, `K1` … `n_m3`, `K3`      | ✓    |
//! | `Quadratic`   | [`Quadratic`]         | `n_m`, `Ka`, `Kb`                | ✓    |
//! | `BET`         | [`Bet`]               | `n_m`, `C`, `N`                  | ✓    |
//! | `GAB`         | [`Bet`]               | `n_m`, `K`, `C`                  | ✗    |
//! | `TemkinApprox`| [`TemkinApprox`]      | `n_m`, `K`, `theta`              | ✓    |
//! | `Virial`      | [`Virial`]            | `K`, `A`, `B`, `C`               | ✗    |
//! | `Toth`        | [`Toth`]              | `n_m`, `K`, `t`                  | ✓    |
//! | `JensenSeaton`| [`JensenSeaton`]      | `K`, `a`, `b`, `c`               | ✓    |
//! | `FH-VST`      | [`VacancySolution`]   | `n_m`, `K`, `a1v`                | ✗    |
//! | `W-VST`       | [`VacancySolution`]   | `n_m`, `K`, `L1v`, `Lv1`         | ✗    |
//! | `Freundlich`  | [`Freundlich`]        | `K`, `m`                         | ✗    |
//!
//! Names parse case-insensitively, with or without the hyphen (`fhvst`).
//!
//! # Building from a name
//!
//! ```rust
//! use std::collections::HashMap;
//! use adsorb_rs::models::{IsothermModel, ModelKind};
//!
//! let kind: ModelKind = "langmuir".parse().unwrap();
//! let params = HashMap::from([("n_m".to_string(), 5.0), ("K".to_string(), 0.2)]);
//! let model = kind.build(&params).unwrap();
//!
//! assert_eq!(model.name(), "Langmuir");
//! assert!(kind.is_iast_model());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{AdsorptionError, Result};

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod bet;
pub mod freundlich;
pub mod henry;
pub mod jensen_seaton;
pub mod langmuir_multi;
pub mod langmuir_single;
pub mod quadratic;
pub mod temkin;
pub mod toth;
pub mod traits;
pub mod virial;
pub mod vst;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use bet::Bet;
pub use freundlich::Freundlich;
pub use henry::Henry;
pub use jensen_seaton::JensenSeaton;
pub use langmuir_multi::{MultiSiteLangmuir, SiteParams};
pub use langmuir_single::Langmuir;
pub use quadratic::Quadratic;
pub use temkin::TemkinApprox;
pub use toth::Toth;
pub use traits::IsothermModel;
pub use virial::Virial;
pub use vst::{VacancyActivity, VacancySolution};

// =================================================================================================
// Model Registry
// =================================================================================================

/// Closed set of available model isotherms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Henry,
    Langmuir,
    DSLangmuir,
    TSLangmuir,
    Quadratic,
    Bet,
    Gab,
    TemkinApprox,
    Virial,
    Toth,
    JensenSeaton,
    FhVst,
    WVst,
    Freundlich,
}

impl ModelKind {
    /// Every model, in display order
    pub const ALL: [ModelKind; 14] = [
        ModelKind::Henry,
        ModelKind::Langmuir,
        ModelKind::DSLangmuir,
        ModelKind::TSLangmuir,
        ModelKind::Quadratic,
        ModelKind::Bet,
        ModelKind::Gab,
        ModelKind::TemkinApprox,
        ModelKind::Virial,
        ModelKind::Toth,
        ModelKind::JensenSeaton,
        ModelKind::FhVst,
        ModelKind::WVst,
        ModelKind::Freundlich,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Henry => "Henry",
            ModelKind::Langmuir => "Langmuir",
            ModelKind::DSLangmuir => "DSLangmuir",
            ModelKind::TSLangmuir => "TSLangmuir",
            ModelKind::Quadratic => "Quadratic",
            ModelKind::Bet => "BET",
            ModelKind::Gab => "GAB",
            ModelKind::TemkinApprox => "TemkinApprox",
            ModelKind::Virial => "Virial",
            ModelKind::Toth => "Toth",
            ModelKind::JensenSeaton => "JensenSeaton",
            ModelKind::FhVst => "FH-VST",
            ModelKind::WVst => "W-VST",
            ModelKind::Freundlich => "Freundlich",
        }
    }

    /// Parameter names expected by [`ModelKind::build`]
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::Henry => &["K"],
            ModelKind::Langmuir => &["n_m", "K"],
            ModelKind::DSLangmuir => &["n_m1", "K1", "n_m2", "K2"],
            ModelKind::TSLangmuir => &["n_m1", "K1", "n_m2", "K2", "n_m3", "K3"],
            ModelKind::Quadratic => &["n_m", "Ka", "Kb"],
            ModelKind::Bet => &["n_m", "C", "N"],
            ModelKind::Gab => &["n_m", "K", "C"],
            ModelKind::TemkinApprox => &["n_m", "K", "theta"],
            ModelKind::Virial => &["K", "A", "B", "C"],
            ModelKind::Toth => &["n_m", "K", "t"],
            ModelKind::JensenSeaton => &["K", "a", "b", "c"],
            ModelKind::FhVst => &["n_m", "K", "a1v"],
            ModelKind::WVst => &["n_m", "K", "L1v", "Lv1"],
            ModelKind::Freundlich => &["K", "m"],
        }
    }

    /// Whether the model is physically consistent for IAST
    pub fn is_iast_model(&self) -> bool {
        !matches!(
            self,
            ModelKind::Gab | ModelKind::Virial | ModelKind::FhVst | ModelKind::WVst | ModelKind::Freundlich
        )
    }

    /// Instantiate the model from a parameter map
    ///
    /// # Errors
    ///
    /// `ParameterError` naming every missing parameter, or forwarded from the
    /// model's own validation.
    pub fn build(&self, params: &HashMap<String, f64>) -> Result<Box<dyn IsothermModel>> {
        let missing: Vec<&str> = self
            .param_names()
            .iter()
            .copied()
            .filter(|name| !params.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(AdsorptionError::parameter(format!(
                "{} model is missing parameters: {missing:?}",
                self.name()
            )));
        }

        let p = |name: &str| params[name];
        let model: Box<dyn IsothermModel> = match self {
            ModelKind::Henry => Box::new(Henry::new(p("K"))?),
            ModelKind::Langmuir => Box::new(Langmuir::new(p("n_m"), p("K"))?),
            ModelKind::DSLangmuir => {
                Box::new(MultiSiteLangmuir::dual_site(p("n_m1"), p("K1"), p("n_m2"), p("K2"))?)
            }
            ModelKind::TSLangmuir => Box::new(MultiSiteLangmuir::triple_site(
                p("n_m1"),
                p("K1"),
                p("n_m2"),
                p("K2"),
                p("n_m3"),
                p("K3"),
            )?),
            ModelKind::Quadratic => Box::new(Quadratic::new(p("n_m"), p("Ka"), p("Kb"))?),
            ModelKind::Bet => Box::new(Bet::new(p("n_m"), p("C"), p("N"))?),
            ModelKind::Gab => Box::new(Bet::gab(p("n_m"), p("K"), p("C"))?),
            ModelKind::TemkinApprox => Box::new(TemkinApprox::new(p("n_m"), p("K"), p("theta"))?),
            ModelKind::Virial => Box::new(Virial::new(p("K"), p("A"), p("B"), p("C"))?),
            ModelKind::Toth => Box::new(Toth::new(p("n_m"), p("K"), p("t"))?),
            ModelKind::JensenSeaton => Box::new(JensenSeaton::new(p("K"), p("a"), p("b"), p("c"))?),
            ModelKind::FhVst => Box::new(VacancySolution::flory_huggins(p("n_m"), p("K"), p("a1v"))?),
            ModelKind::WVst => Box::new(VacancySolution::wilson(p("n_m"), p("K"), p("L1v"), p("Lv1"))?),
            ModelKind::Freundlich => Box::new(Freundlich::new(p("K"), p("m"))?),
        };
        Ok(model)
    }
}

impl FromStr for ModelKind {
    type Err = AdsorptionError;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name().replace('-', "").eq_ignore_ascii_case(&s.replace('-', "")))
            .ok_or_else(|| {
                let names: Vec<&str> = ModelKind::ALL.iter().map(|k| k.name()).collect();
                AdsorptionError::parameter(format!(
                    "Model {s} not an option. Viable models are {names:?}"
                ))
            })
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
