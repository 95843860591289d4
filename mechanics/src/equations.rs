//! Formula reference for the mechanics simulations

use common::{Equation, FormulaSheet};

// ============================================================================
// Pendulum
// ============================================================================

pub const PENDULUM: FormulaSheet = FormulaSheet {
    title: "Simple Pendulum",
    equations: &[
        Equation {
            name: "Equation of Motion",
            formula: "θ'' = -(g/L)·sin θ",
            description: "Exact, not linearised",
        },
        Equation {
            name: "Period",
            formula: "T = 2π√(L/g)",
            description: "Small-angle approximation",
        },
        Equation {
            name: "Frequency",
            formula: "f = 1/T",
            description: "Oscillations per second",
        },
        Equation {
            name: "Tangential Speed",
            formula: "v = L·ω",
            description: "Speed of the bob along its arc",
        },
    ],
    variables: &[
        ("θ", "Angle from vertical"),
        ("ω", "Angular velocity"),
        ("L", "String length"),
        ("g", "Gravitational acceleration"),
        ("T", "Period"),
    ],
};

// ============================================================================
// Free Fall
// ============================================================================

pub const FREE_FALL: FormulaSheet = FormulaSheet {
    title: "Free Fall",
    equations: &[
        Equation {
            name: "Height",
            formula: "h = h₀ - gt²/2",
            description: "Without air resistance",
        },
        Equation {
            name: "Landing Velocity",
            formula: "v = √(2gh)",
            description: "Without air resistance",
        },
        Equation {
            name: "Air Resistance",
            formula: "F = k·v²",
            description: "Quadratic drag opposing motion",
        },
        Equation {
            name: "Terminal Velocity",
            formula: "v_t = √(mg/k)",
            description: "Drag balances weight",
        },
    ],
    variables: &[
        ("h", "Height above ground"),
        ("v", "Velocity"),
        ("g", "Gravitational acceleration"),
        ("k", "Drag coefficient"),
        ("m", "Mass"),
    ],
};

// ============================================================================
// Projectile
// ============================================================================

pub const PROJECTILE: FormulaSheet = FormulaSheet {
    title: "Projectile Motion",
    equations: &[
        Equation {
            name: "Horizontal Position",
            formula: "x = v₀·cos α · t",
            description: "Uniform motion without drag",
        },
        Equation {
            name: "Vertical Position",
            formula: "y = h₀ + v₀·sin α · t - gt²/2",
            description: "Uniformly accelerated motion",
        },
        Equation {
            name: "Range",
            formula: "R = v₀²·sin 2α / g",
            description: "Launch from ground level",
        },
        Equation {
            name: "Maximum Height",
            formula: "H = v₀²·sin²α / 2g",
            description: "Above the launch point",
        },
        Equation {
            name: "Drag",
            formula: "a = -k·|v|·v / m",
            description: "Quadratic air resistance",
        },
    ],
    variables: &[
        ("v₀", "Launch speed"),
        ("α", "Launch angle"),
        ("h₀", "Launch height"),
        ("R", "Range"),
        ("H", "Maximum height"),
    ],
};

// ============================================================================
// Inclined Plane
// ============================================================================

pub const INCLINED_PLANE: FormulaSheet = FormulaSheet {
    title: "Inclined Plane",
    equations: &[
        Equation {
            name: "Parallel Force",
            formula: "F∥ = mg·sin θ",
            description: "Pulls the block down the slope",
        },
        Equation {
            name: "Normal Force",
            formula: "N = mg·cos θ",
            description: "Perpendicular to the surface",
        },
        Equation {
            name: "Friction",
            formula: "F_f = μN",
            description: "Kinetic friction",
        },
        Equation {
            name: "Acceleration",
            formula: "a = g(sin θ - μ·cos θ)",
            description: "Block stays put when a ≤ 0",
        },
    ],
    variables: &[
        ("θ", "Incline angle"),
        ("μ", "Friction coefficient"),
        ("m", "Mass"),
        ("N", "Normal force"),
    ],
};

// ============================================================================
// Collision
// ============================================================================

pub const COLLISION: FormulaSheet = FormulaSheet {
    title: "1D Collision",
    equations: &[
        Equation {
            name: "Momentum Conservation",
            formula: "m₁v₁ + m₂v₂ = m₁v₁' + m₂v₂'",
            description: "Holds for every collision",
        },
        Equation {
            name: "Restitution",
            formula: "e = (v₂' - v₁') / (v₁ - v₂)",
            description: "e = 1 elastic, e = 0 perfectly inelastic",
        },
        Equation {
            name: "Velocity After",
            formula: "v₁' = (m₁v₁ + m₂v₂ - m₂e(v₁ - v₂)) / (m₁ + m₂)",
            description: "Ball 1",
        },
        Equation {
            name: "Kinetic Energy",
            formula: "E = m₁v₁²/2 + m₂v₂²/2",
            description: "Conserved only when e = 1",
        },
    ],
    variables: &[
        ("m₁, m₂", "Masses"),
        ("v₁, v₂", "Velocities before"),
        ("v₁', v₂'", "Velocities after"),
        ("e", "Coefficient of restitution"),
    ],
};
