//! Laboratory definitions: table layout and the calculation of derived
//! columns from one row's inputs

use std::f64::consts::PI;

use common::Locale;
use serde::{Deserialize, Serialize};

use crate::{TableColumn, Values};

const GRAVITY: f64 = 9.81;

const fn input(id: &'static str, name: &'static str, name_uz: &'static str, unit: &'static str) -> TableColumn {
    TableColumn {
        id,
        name,
        name_uz,
        unit,
        is_input: true,
        decimals: 2,
    }
}

const fn derived(
    id: &'static str,
    name: &'static str,
    name_uz: &'static str,
    unit: &'static str,
    decimals: u32,
) -> TableColumn {
    TableColumn {
        id,
        name,
        name_uz,
        unit,
        is_input: false,
        decimals,
    }
}

const PENDULUM_COLUMNS: &[TableColumn] = &[
    input("length", "Length", "Ip uzunligi", "m"),
    input("time10", "Time of 10 swings", "10 tebranish vaqti", "s"),
    derived("period", "Period", "Davr", "s", 3),
    derived("gravity", "g", "g", "m/s²", 2),
];

const FREE_FALL_COLUMNS: &[TableColumn] = &[
    input("height", "Height", "Balandlik", "m"),
    input("time", "Fall time", "Tushish vaqti", "s"),
    derived("gravity", "g", "g", "m/s²", 2),
    derived("velocity", "Final velocity", "Oxirgi tezlik", "m/s", 2),
];

const HOOKE_COLUMNS: &[TableColumn] = &[
    input("mass", "Mass", "Massa", "kg"),
    input("extension", "Extension", "Cho'zilish", "m"),
    derived("force", "Force", "Kuch", "N", 2),
    derived("stiffness", "Stiffness k", "Bikrlik k", "N/m", 1),
];

const OHM_COLUMNS: &[TableColumn] = &[
    input("voltage", "Voltage", "Kuchlanish", "V"),
    input("current", "Current", "Tok kuchi", "A"),
    derived("resistance", "Resistance", "Qarshilik", "Ω", 2),
    derived("power", "Power", "Quvvat", "W", 2),
];

const REFRACTION_COLUMNS: &[TableColumn] = &[
    input("incidence", "Angle of incidence", "Tushish burchagi", "°"),
    input("refraction", "Angle of refraction", "Sinish burchagi", "°"),
    derived("index", "Refractive index", "Sindirish ko'rsatkichi", "", 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabKind {
    PendulumPeriod,
    FreeFall,
    HookesLaw,
    OhmsLaw,
    RefractionIndex,
}

impl LabKind {
    pub const ALL: [LabKind; 5] = [
        LabKind::PendulumPeriod,
        LabKind::FreeFall,
        LabKind::HookesLaw,
        LabKind::OhmsLaw,
        LabKind::RefractionIndex,
    ];

    /// Stable identifier used for persistence
    pub fn slug(self) -> &'static str {
        match self {
            LabKind::PendulumPeriod => "pendulum_period",
            LabKind::FreeFall => "free_fall",
            LabKind::HookesLaw => "hookes_law",
            LabKind::OhmsLaw => "ohms_law",
            LabKind::RefractionIndex => "refraction_index",
        }
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (LabKind::PendulumPeriod, Locale::En) => "Period of a pendulum",
            (LabKind::PendulumPeriod, Locale::Uz) => "Mayatnik tebranish davri",
            (LabKind::FreeFall, Locale::En) => "Free fall acceleration",
            (LabKind::FreeFall, Locale::Uz) => "Erkin tushish tezlanishi",
            (LabKind::HookesLaw, Locale::En) => "Hooke's law",
            (LabKind::HookesLaw, Locale::Uz) => "Guk qonuni",
            (LabKind::OhmsLaw, Locale::En) => "Ohm's law",
            (LabKind::OhmsLaw, Locale::Uz) => "Om qonuni",
            (LabKind::RefractionIndex, Locale::En) => "Refractive index of glass",
            (LabKind::RefractionIndex, Locale::Uz) => "Shishaning sindirish ko'rsatkichi",
        }
    }

    pub fn columns(self) -> &'static [TableColumn] {
        match self {
            LabKind::PendulumPeriod => PENDULUM_COLUMNS,
            LabKind::FreeFall => FREE_FALL_COLUMNS,
            LabKind::HookesLaw => HOOKE_COLUMNS,
            LabKind::OhmsLaw => OHM_COLUMNS,
            LabKind::RefractionIndex => REFRACTION_COLUMNS,
        }
    }

    pub fn column(self, id: &str) -> Option<&'static TableColumn> {
        self.columns().iter().find(|c| c.id == id)
    }

    pub fn inputs(self) -> impl Iterator<Item = &'static TableColumn> {
        self.columns().iter().filter(|c| c.is_input)
    }

    /// Derived values for one row. Expects every input to be present and
    /// finite; results are not rounded and may be non-finite.
    pub fn calculate(self, inputs: &Values) -> Values {
        let get = |id: &str| inputs.get(id).copied().unwrap_or(f64::NAN);
        let mut out = Values::new();

        match self {
            LabKind::PendulumPeriod => {
                let period = get("time10") / 10.0;
                out.insert("period", period);
                out.insert("gravity", 4.0 * PI * PI * get("length") / (period * period));
            }
            LabKind::FreeFall => {
                let (h, t) = (get("height"), get("time"));
                let g = 2.0 * h / (t * t);
                out.insert("gravity", g);
                out.insert("velocity", g * t);
            }
            LabKind::HookesLaw => {
                let force = get("mass") * GRAVITY;
                out.insert("force", force);
                out.insert("stiffness", force / get("extension"));
            }
            LabKind::OhmsLaw => {
                let (u, i) = (get("voltage"), get("current"));
                out.insert("resistance", u / i);
                out.insert("power", u * i);
            }
            LabKind::RefractionIndex => {
                let alpha = get("incidence").to_radians();
                let beta = get("refraction").to_radians();
                out.insert("index", alpha.sin() / beta.sin());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, f64)]) -> Values {
        pairs.iter().copied().collect()
    }

    #[test]
    fn every_lab_has_inputs_and_outputs() {
        for lab in LabKind::ALL {
            assert_eq!(lab.inputs().count(), 2);
            // calculate fills exactly the derived columns
            let outputs = lab.calculate(&Values::new());
            let mut derived: Vec<_> = lab.columns().iter().filter(|c| !c.is_input).map(|c| c.id).collect();
            derived.sort_unstable();
            assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), derived);
        }
    }

    #[test]
    fn pendulum_period_lab() {
        let out = LabKind::PendulumPeriod.calculate(&values(&[("length", 1.0), ("time10", 20.0)]));
        assert_eq!(out["period"], 2.0);
        assert!((out["gravity"] - 9.8696).abs() < 1e-3);
    }

    #[test]
    fn free_fall_lab() {
        let out = LabKind::FreeFall.calculate(&values(&[("height", 4.905), ("time", 1.0)]));
        assert!((out["gravity"] - 9.81).abs() < 1e-9);
        assert!((out["velocity"] - 9.81).abs() < 1e-9);
    }

    #[test]
    fn hooke_and_ohm_labs() {
        let out = LabKind::HookesLaw.calculate(&values(&[("mass", 0.2), ("extension", 0.05)]));
        assert!((out["force"] - 1.962).abs() < 1e-9);
        assert!((out["stiffness"] - 39.24).abs() < 1e-9);

        let out = LabKind::OhmsLaw.calculate(&values(&[("voltage", 12.0), ("current", 0.5)]));
        assert_eq!(out["resistance"], 24.0);
        assert_eq!(out["power"], 6.0);
    }

    #[test]
    fn refraction_lab() {
        let out = LabKind::RefractionIndex.calculate(&values(&[("incidence", 30.0), ("refraction", 19.47)]));
        assert!((out["index"] - 1.5).abs() < 1e-3);
    }

    #[test]
    fn slugs_match_serde_names() {
        for lab in LabKind::ALL {
            let json = serde_json::to_string(&lab).unwrap();
            assert_eq!(json, format!("\"{}\"", lab.slug()));
        }
    }
}
