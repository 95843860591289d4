//! Common building blocks for the physics lab simulations
//!
//! This crate provides the generic simulation engine, the fixed-size canvas
//! display list that renderers draw into, live simulation parameters,
//! display-refresh scheduling, configuration and the window/GPU setup shared
//! by the application.

pub mod canvas;
pub mod config;
pub mod driver;
pub mod engine;
pub mod format;
pub mod formulas;
pub mod graphics;
pub mod params;

pub use canvas::{palette, Align, Color, DrawCommand, Frame, Stroke, DEFAULT_CANVAS};
pub use config::{AppConfig, ConfigError, Locale};
pub use driver::{FrameHost, FrameSubscription, ListenerGuard, MountedSimulation};
pub use engine::{PhysicsModel, Readout, RunState, SceneRenderer, Simulation, SimulationEngine, StepTiming};
pub use formulas::{Equation, FormulaSheet};
pub use graphics::GraphicsContext;
pub use params::{InputOutcome, Parameter, ParameterSet, ParameterSpec};

/// Physical constants used in simulations
pub mod constants {
    /// Standard gravity in m/s²
    pub const STANDARD_GRAVITY: f32 = 9.81;

    /// Coulomb constant in N·m²/C²
    pub const K_COULOMB: f32 = 8.99e9;

    /// Reference temperature for gas speed scaling, in Kelvin
    pub const ROOM_TEMPERATURE: f32 = 300.0;
}
