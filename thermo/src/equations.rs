//! Formula reference for the thermodynamics simulations

use common::{Equation, FormulaSheet};

pub const IDEAL_GAS: FormulaSheet = FormulaSheet {
    title: "Ideal Gas",
    equations: &[
        Equation {
            name: "Equation of State",
            formula: "pV = NkT",
            description: "Ideal gas law",
        },
        Equation {
            name: "Mean Kinetic Energy",
            formula: "⟨E⟩ = (3/2)kT",
            description: "Per molecule, grows with temperature",
        },
        Equation {
            name: "RMS Speed",
            formula: "v_rms = √(3kT/m)",
            description: "Speed scales as √T",
        },
        Equation {
            name: "Elastic Contact",
            formula: "v₁' = v₁ - ((v₁ - v₂)·n)n",
            description: "Equal masses exchange normal velocity",
        },
    ],
    variables: &[
        ("p", "Pressure"),
        ("V", "Volume"),
        ("N", "Number of particles"),
        ("k", "Boltzmann constant"),
        ("T", "Absolute temperature"),
    ],
};
