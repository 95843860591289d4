//! The closed set of simulations the application offers

use common::{FormulaSheet, Locale, Simulation};
use glam::Vec2;
use laboratory::LabKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mechanics,
    Thermodynamics,
    Optics,
    Electricity,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Mechanics,
        Category::Thermodynamics,
        Category::Optics,
        Category::Electricity,
    ];

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::Mechanics, Locale::En) => "Mechanics",
            (Category::Mechanics, Locale::Uz) => "Mexanika",
            (Category::Thermodynamics, Locale::En) => "Thermodynamics",
            (Category::Thermodynamics, Locale::Uz) => "Termodinamika",
            (Category::Optics, Locale::En) => "Optics",
            (Category::Optics, Locale::Uz) => "Optika",
            (Category::Electricity, Locale::En) => "Electricity",
            (Category::Electricity, Locale::Uz) => "Elektr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationKind {
    Pendulum,
    FreeFall,
    Projectile,
    InclinedPlane,
    Collision,
    IdealGas,
    Refraction,
    ThinLens,
    Interference,
    ElectricField,
}

impl SimulationKind {
    pub const ALL: [SimulationKind; 10] = [
        SimulationKind::Pendulum,
        SimulationKind::FreeFall,
        SimulationKind::Projectile,
        SimulationKind::InclinedPlane,
        SimulationKind::Collision,
        SimulationKind::IdealGas,
        SimulationKind::Refraction,
        SimulationKind::ThinLens,
        SimulationKind::Interference,
        SimulationKind::ElectricField,
    ];

    /// Stable identifier, also used as the mount name
    pub fn slug(self) -> &'static str {
        match self {
            SimulationKind::Pendulum => "pendulum",
            SimulationKind::FreeFall => "free_fall",
            SimulationKind::Projectile => "projectile",
            SimulationKind::InclinedPlane => "inclined_plane",
            SimulationKind::Collision => "collision",
            SimulationKind::IdealGas => "ideal_gas",
            SimulationKind::Refraction => "refraction",
            SimulationKind::ThinLens => "thin_lens",
            SimulationKind::Interference => "interference",
            SimulationKind::ElectricField => "electric_field",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (SimulationKind::Pendulum, Locale::En) => "Simple pendulum",
            (SimulationKind::Pendulum, Locale::Uz) => "Matematik mayatnik",
            (SimulationKind::FreeFall, Locale::En) => "Free fall",
            (SimulationKind::FreeFall, Locale::Uz) => "Erkin tushish",
            (SimulationKind::Projectile, Locale::En) => "Projectile motion",
            (SimulationKind::Projectile, Locale::Uz) => "Gorizontga burchak ostida otilgan jism",
            (SimulationKind::InclinedPlane, Locale::En) => "Inclined plane",
            (SimulationKind::InclinedPlane, Locale::Uz) => "Qiya tekislik",
            (SimulationKind::Collision, Locale::En) => "Collisions",
            (SimulationKind::Collision, Locale::Uz) => "To'qnashuvlar",
            (SimulationKind::IdealGas, Locale::En) => "Ideal gas",
            (SimulationKind::IdealGas, Locale::Uz) => "Ideal gaz",
            (SimulationKind::Refraction, Locale::En) => "Refraction of light",
            (SimulationKind::Refraction, Locale::Uz) => "Yorug'likning sinishi",
            (SimulationKind::ThinLens, Locale::En) => "Thin lens",
            (SimulationKind::ThinLens, Locale::Uz) => "Yupqa linza",
            (SimulationKind::Interference, Locale::En) => "Double-slit interference",
            (SimulationKind::Interference, Locale::Uz) => "Ikki tirqishli interferensiya",
            (SimulationKind::ElectricField, Locale::En) => "Electric field lines",
            (SimulationKind::ElectricField, Locale::Uz) => "Elektr maydon kuch chiziqlari",
        }
    }

    pub fn category(self) -> Category {
        match self {
            SimulationKind::Pendulum
            | SimulationKind::FreeFall
            | SimulationKind::Projectile
            | SimulationKind::InclinedPlane
            | SimulationKind::Collision => Category::Mechanics,
            SimulationKind::IdealGas => Category::Thermodynamics,
            SimulationKind::Refraction | SimulationKind::ThinLens | SimulationKind::Interference => {
                Category::Optics
            }
            SimulationKind::ElectricField => Category::Electricity,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SimulationKind::Pendulum => "A bob on a light string swinging under gravity, without the small-angle approximation.",
            SimulationKind::FreeFall => "A body dropped from a height, optionally slowed by quadratic air resistance.",
            SimulationKind::Projectile => "A launched body tracing its trajectory until it lands, with optional drag.",
            SimulationKind::InclinedPlane => "A block on a slope: friction either holds it or it slides to the bottom.",
            SimulationKind::Collision => "Two balls on a track colliding with an adjustable coefficient of restitution.",
            SimulationKind::IdealGas => "Hard-sphere particles in a box whose speeds follow the temperature.",
            SimulationKind::Refraction => "A ray crossing the boundary between two media, including total internal reflection.",
            SimulationKind::ThinLens => "Principal rays through a converging lens and the image they form.",
            SimulationKind::Interference => "Waves from two slits and the fringe pattern they leave on a screen.",
            SimulationKind::ElectricField => "Field lines traced between two point charges.",
        }
    }

    pub fn formulas(self) -> FormulaSheet {
        match self {
            SimulationKind::Pendulum => mechanics::equations::PENDULUM,
            SimulationKind::FreeFall => mechanics::equations::FREE_FALL,
            SimulationKind::Projectile => mechanics::equations::PROJECTILE,
            SimulationKind::InclinedPlane => mechanics::equations::INCLINED_PLANE,
            SimulationKind::Collision => mechanics::equations::COLLISION,
            SimulationKind::IdealGas => thermo::equations::IDEAL_GAS,
            SimulationKind::Refraction => optics::equations::REFRACTION,
            SimulationKind::ThinLens => optics::equations::THIN_LENS,
            SimulationKind::Interference => optics::equations::INTERFERENCE,
            SimulationKind::ElectricField => fields::equations::ELECTRIC_FIELD,
        }
    }

    /// The laboratory worksheet that measures what this simulation shows
    pub fn lab(self) -> Option<LabKind> {
        match self {
            SimulationKind::Pendulum => Some(LabKind::PendulumPeriod),
            SimulationKind::FreeFall => Some(LabKind::FreeFall),
            SimulationKind::Refraction => Some(LabKind::RefractionIndex),
            _ => None,
        }
    }

    /// Build a fresh simulation with default parameters on a canvas of the
    /// given logical size
    pub fn instantiate(self, canvas: Vec2) -> Box<dyn Simulation> {
        match self {
            SimulationKind::Pendulum => Box::new(mechanics::pendulum::engine(canvas)),
            SimulationKind::FreeFall => Box::new(mechanics::free_fall::engine(canvas)),
            SimulationKind::Projectile => Box::new(mechanics::projectile::engine(canvas)),
            SimulationKind::InclinedPlane => Box::new(mechanics::inclined_plane::engine(canvas)),
            SimulationKind::Collision => Box::new(mechanics::collision::engine(canvas)),
            SimulationKind::IdealGas => Box::new(thermo::ideal_gas::engine(canvas)),
            SimulationKind::Refraction => Box::new(optics::refraction::engine(canvas)),
            SimulationKind::ThinLens => Box::new(optics::thin_lens::engine(canvas)),
            SimulationKind::Interference => Box::new(optics::interference::engine(canvas)),
            SimulationKind::ElectricField => Box::new(fields::electric_field::engine(canvas)),
        }
    }

    pub fn in_category(category: Category) -> impl Iterator<Item = SimulationKind> {
        Self::ALL.into_iter().filter(move |kind| kind.category() == category)
    }
}

/// Formula sheets matching a search query, in catalog order
pub fn search_formulas(query: &str) -> Vec<(SimulationKind, FormulaSheet)> {
    SimulationKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.formulas()))
        .filter(|(_, sheet)| sheet.matches(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_and_are_unique() {
        for kind in SimulationKind::ALL {
            assert_eq!(SimulationKind::from_slug(kind.slug()), Some(kind));
        }
        let mut slugs: Vec<_> = SimulationKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), SimulationKind::ALL.len());
        assert_eq!(SimulationKind::from_slug("orbit"), None);
    }

    #[test]
    fn every_category_is_populated() {
        let total: usize = Category::ALL
            .iter()
            .map(|&category| SimulationKind::in_category(category).count())
            .inspect(|&count| assert!(count > 0))
            .sum();
        assert_eq!(total, SimulationKind::ALL.len());
    }

    #[test]
    fn titles_are_localized() {
        for kind in SimulationKind::ALL {
            assert!(!kind.title(Locale::En).is_empty());
            assert!(!kind.title(Locale::Uz).is_empty());
            assert!(!kind.description().is_empty());
            assert!(!kind.formulas().equations.is_empty());
        }
        assert_eq!(SimulationKind::IdealGas.title(Locale::Uz), "Ideal gaz");
    }

    #[test]
    fn formula_search() {
        assert_eq!(search_formulas("").len(), SimulationKind::ALL.len());
        let snell = search_formulas("snell");
        assert!(snell.iter().any(|(kind, _)| *kind == SimulationKind::Refraction));
        assert!(search_formulas("no such formula").is_empty());
    }

    #[test]
    fn free_fall_describes_its_drag_model() {
        let description = SimulationKind::FreeFall.description();
        assert!(description.contains("quadratic"));
        assert!(!description.contains("linear"));
    }

    #[test]
    fn linked_labs() {
        assert_eq!(SimulationKind::Pendulum.lab(), Some(LabKind::PendulumPeriod));
        assert_eq!(SimulationKind::Collision.lab(), None);
    }
}
