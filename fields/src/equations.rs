//! Formula reference for electrostatics

use common::{Equation, FormulaSheet};

pub const ELECTRIC_FIELD: FormulaSheet = FormulaSheet {
    title: "Electric Field",
    equations: &[
        Equation {
            name: "Coulomb's Law",
            formula: "F = k·|q₁q₂| / r²",
            description: "Force between two point charges",
        },
        Equation {
            name: "Field of a Point Charge",
            formula: "E = k·q / r²",
            description: "Points away from positive charges",
        },
        Equation {
            name: "Superposition",
            formula: "E = Σ Eᵢ",
            description: "Fields of several charges add as vectors",
        },
        Equation {
            name: "Potential",
            formula: "φ = k·q / r",
            description: "Scalar, also adds over charges",
        },
    ],
    variables: &[
        ("k", "Coulomb constant, 8.99·10⁹ N·m²/C²"),
        ("q", "Charge"),
        ("r", "Distance from the charge"),
        ("E", "Electric field strength"),
        ("φ", "Electric potential"),
    ],
};
