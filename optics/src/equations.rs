//! Formula reference for the optics simulations

use common::{Equation, FormulaSheet};

// ============================================================================
// Refraction
// ============================================================================

pub const REFRACTION: FormulaSheet = FormulaSheet {
    title: "Refraction of Light",
    equations: &[
        Equation {
            name: "Snell's Law",
            formula: "n₁·sin θ₁ = n₂·sin θ₂",
            description: "Relates angles on both sides of the interface",
        },
        Equation {
            name: "Critical Angle",
            formula: "sin θc = n₂/n₁",
            description: "Exists only when n₁ > n₂",
        },
        Equation {
            name: "Total Internal Reflection",
            formula: "(n₁/n₂)·sin θ₁ > 1",
            description: "No refracted ray",
        },
        Equation {
            name: "Refractive Index",
            formula: "n = c/v",
            description: "Speed of light in vacuum over speed in the medium",
        },
    ],
    variables: &[
        ("n₁, n₂", "Refractive indices"),
        ("θ₁", "Angle of incidence"),
        ("θ₂", "Angle of refraction"),
        ("θc", "Critical angle"),
    ],
};

// ============================================================================
// Thin Lens
// ============================================================================

pub const THIN_LENS: FormulaSheet = FormulaSheet {
    title: "Thin Lens",
    equations: &[
        Equation {
            name: "Lens Equation",
            formula: "1/f = 1/d_o + 1/d_i",
            description: "Object and image distances",
        },
        Equation {
            name: "Magnification",
            formula: "Γ = -d_i/d_o = h_i/h_o",
            description: "Negative for an inverted image",
        },
        Equation {
            name: "Optical Power",
            formula: "D = 1/f",
            description: "In diopters when f is in meters",
        },
    ],
    variables: &[
        ("f", "Focal length"),
        ("d_o", "Object distance"),
        ("d_i", "Image distance"),
        ("h_o, h_i", "Object and image heights"),
    ],
};

// ============================================================================
// Interference
// ============================================================================

pub const INTERFERENCE: FormulaSheet = FormulaSheet {
    title: "Double-Slit Interference",
    equations: &[
        Equation {
            name: "Fringe Spacing",
            formula: "Δy = λL/d",
            description: "Distance between bright fringes",
        },
        Equation {
            name: "Bright Fringes",
            formula: "d·sin θ = mλ",
            description: "Constructive interference",
        },
        Equation {
            name: "Dark Fringes",
            formula: "d·sin θ = (m + ½)λ",
            description: "Destructive interference",
        },
        Equation {
            name: "Intensity",
            formula: "I = I₀·cos²(πdy/λL)·sinc²(πay/λL)",
            description: "Two-slit pattern under the single-slit envelope",
        },
    ],
    variables: &[
        ("λ", "Wavelength"),
        ("d", "Slit separation"),
        ("a", "Slit width"),
        ("L", "Distance to the screen"),
        ("m", "Fringe order"),
    ],
};
