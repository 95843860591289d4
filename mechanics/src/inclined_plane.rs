//! Block on an inclined plane with kinetic friction
//!
//! `a = g(sin θ − μ cos θ)` along the slope. When that is not positive the
//! block never starts moving. Otherwise it slides from the top until it has
//! covered the slope length.

use common::constants::STANDARD_GRAVITY;
use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

use crate::{crossing_fraction, FinalValues};

pub const DT: f32 = 0.02;

const MARGIN: f32 = 60.0;
const BLOCK_SIZE: f32 = 36.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "angle",
        label: "Incline angle",
        label_uz: "Qiyalik burchagi",
        min: 5.0,
        max: 60.0,
        step: 1.0,
        default: 30.0,
        unit: "°",
    },
    ParameterSpec {
        id: "friction",
        label: "Friction coefficient μ",
        label_uz: "Ishqalanish koeffitsienti μ",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.2,
        unit: "",
    },
    ParameterSpec {
        id: "mass",
        label: "Mass",
        label_uz: "Massa",
        min: 0.5,
        max: 10.0,
        step: 0.1,
        default: 2.0,
        unit: "kg",
    },
    ParameterSpec {
        id: "length",
        label: "Slope length",
        label_uz: "Qiyalik uzunligi",
        min: 1.0,
        max: 10.0,
        step: 0.5,
        default: 5.0,
        unit: "m",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclineState {
    /// Distance travelled down the slope in meters
    pub distance: f32,
    pub velocity: f32,
    pub time: f32,
    pub final_values: Option<FinalValues>,
}

/// Force breakdown for a block of mass `m` on the slope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclineForces {
    pub weight: f32,
    pub parallel: f32,
    pub normal: f32,
    pub friction: f32,
    pub acceleration: f32,
}

impl InclineForces {
    pub fn new(angle_deg: f32, friction: f32, mass: f32) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let weight = mass * STANDARD_GRAVITY;
        Self {
            weight,
            parallel: weight * sin,
            normal: weight * cos,
            friction: friction * weight * cos,
            acceleration: STANDARD_GRAVITY * (sin - friction * cos),
        }
    }

    fn from_params(params: &ParameterSet) -> Self {
        Self::new(params.value("angle"), params.value("friction"), params.value("mass"))
    }

    /// Static friction holds the block in place
    pub fn is_static(&self) -> bool {
        self.acceleration <= 0.0
    }
}

pub struct InclineModel;

impl PhysicsModel for InclineModel {
    type State = InclineState;

    fn timing(&self) -> StepTiming {
        StepTiming::Fixed(DT)
    }

    fn initial_state(&self, _params: &ParameterSet) -> InclineState {
        InclineState {
            distance: 0.0,
            velocity: 0.0,
            time: 0.0,
            final_values: None,
        }
    }

    fn step(&self, state: &InclineState, params: &ParameterSet, dt: f32) -> InclineState {
        let forces = InclineForces::from_params(params);
        if state.final_values.is_some() || forces.is_static() {
            return *state;
        }

        let length = params.value("length");
        let velocity = state.velocity + forces.acceleration * dt;
        let distance = state.distance + state.velocity * dt;

        if distance >= length {
            let f = crossing_fraction(state.distance, distance, length);
            let bottom = FinalValues {
                velocity: state.velocity + (velocity - state.velocity) * f,
                time: state.time + dt * f,
            };
            return InclineState {
                distance: length,
                velocity: bottom.velocity,
                time: bottom.time,
                final_values: Some(bottom),
            };
        }

        InclineState {
            distance,
            velocity,
            time: state.time + dt,
            final_values: None,
        }
    }

    fn is_terminal(&self, state: &InclineState) -> bool {
        state.final_values.is_some()
    }

    fn resets_on_new_parameters(&self) -> bool {
        true
    }

    fn readouts(&self, state: &InclineState, params: &ParameterSet) -> Vec<Readout> {
        let forces = InclineForces::from_params(params);
        let mut readouts = vec![
            Readout::new("Acceleration", format::quantity(forces.acceleration.max(0.0), 2, "m/s²")),
            Readout::new("Parallel force", format::quantity(forces.parallel, 2, "N")),
            Readout::new("Normal force", format::quantity(forces.normal, 2, "N")),
            Readout::new("Friction force", format::quantity(forces.friction, 2, "N")),
            Readout::new("Distance", format::quantity(state.distance, 2, "m")),
            Readout::new("Velocity", format::quantity(state.velocity, 2, "m/s")),
        ];
        if forces.is_static() {
            readouts.push(Readout::new("Status", "Static friction holds"));
        }
        if let Some(bottom) = state.final_values {
            readouts.push(Readout::new("Final velocity", format::quantity(bottom.velocity, 2, "m/s")));
            readouts.push(Readout::new("Time to bottom", format::quantity(bottom.time, 2, "s")));
        }
        readouts
    }
}

pub struct InclineRenderer;

impl InclineRenderer {
    /// Top and bottom corners of the slope surface on the canvas
    fn slope(frame: &Frame, angle_deg: f32) -> (Vec2, Vec2) {
        let bottom = Vec2::new(frame.width() - MARGIN, frame.height() - MARGIN);
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let max_run = frame.width() - 2.0 * MARGIN;
        let max_rise = frame.height() - 2.0 * MARGIN;
        let reach = (max_run / cos).min(max_rise / sin);
        (bottom - Vec2::new(cos, sin) * reach, bottom)
    }
}

impl SceneRenderer<InclineState> for InclineRenderer {
    fn draw(&self, state: &InclineState, params: &ParameterSet, frame: &mut Frame) {
        let angle = params.value("angle");
        let length = params.value("length");
        let forces = InclineForces::from_params(params);
        let (top, bottom) = Self::slope(frame, angle);

        frame.rect(
            Vec2::new(0.0, bottom.y),
            Vec2::new(frame.width(), MARGIN),
            palette::GROUND,
        );
        frame.polygon(
            vec![top, bottom, Vec2::new(top.x, bottom.y)],
            palette::GRID,
            Some(Stroke::new(2.0, palette::MUTED)),
        );

        // Block sits on the surface, rotated with the slope
        let along = (bottom - top).normalize_or_zero();
        let outward = Vec2::new(along.y, -along.x);
        let progress = (state.distance / length).clamp(0.0, 1.0);
        let base = top + (bottom - top) * progress;
        let half = along * BLOCK_SIZE * 0.5;
        let up = outward * BLOCK_SIZE;
        frame.polygon(
            vec![base - half, base + half, base + half + up, base - half + up],
            palette::WARM,
            Some(Stroke::new(1.5, palette::TEXT)),
        );

        // Force arrows from the block centre, scaled by the weight
        let centre = base + up * 0.5;
        let scale = 60.0 / forces.weight.max(1e-3);
        let arrow = Stroke::new(2.0, palette::ACCENT);
        frame.arrow(centre, centre + Vec2::new(0.0, forces.weight * scale), arrow);
        frame.arrow(centre, centre + outward * forces.normal * scale, Stroke::new(2.0, palette::VELOCITY));
        frame.arrow(centre, centre - along * forces.friction * scale, Stroke::new(2.0, palette::NEGATIVE));

        frame.text(
            Vec2::new(top.x + 50.0, bottom.y - 14.0),
            format!("θ = {angle:.0}°"),
            14.0,
            palette::TEXT,
            Align::Left,
        );

        frame.label(Vec2::new(20.0, 24.0), format::labeled("a", forces.acceleration.max(0.0), 2, "m/s²"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("s", state.distance, 2, "m"));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("v", state.velocity, 2, "m/s"));
        frame.label(Vec2::new(20.0, 84.0), format::labeled("t", state.time, 2, "s"));

        if forces.is_static() {
            frame.text(Vec2::new(20.0, 114.0), "Static friction holds", 16.0, palette::HIGHLIGHT, Align::Left);
        } else if let Some(bottom) = state.final_values {
            frame.text(Vec2::new(20.0, 114.0), "Reached the bottom", 16.0, palette::HIGHLIGHT, Align::Left);
            frame.label(Vec2::new(20.0, 136.0), format::labeled("v_final", bottom.velocity, 2, "m/s"));
        }
    }
}

pub type InclineEngine = SimulationEngine<InclineModel, InclineRenderer>;

pub fn engine(canvas: Vec2) -> InclineEngine {
    SimulationEngine::new(
        InclineModel,
        InclineRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}
