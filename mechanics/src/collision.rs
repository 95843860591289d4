//! One-dimensional collision of two balls
//!
//! Velocities after impact follow from momentum conservation and the
//! coefficient of restitution `e`:
//!
//! ```text
//! v1' = (m1·v1 + m2·v2 − m2·e·(v1 − v2)) / (m1 + m2)
//! v2' = (m1·v1 + m2·v2 + m1·e·(v1 − v2)) / (m1 + m2)
//! ```
//!
//! A contact flag guarantees one impulse per contact. When a ball leaves
//! the track the experiment restarts from the current parameters.

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

pub const DT: f32 = 1.0 / 60.0;
pub const PIXELS_PER_METER: f32 = 40.0;

const TRACK_MARGIN: f32 = 20.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "mass1",
        label: "Mass 1",
        label_uz: "1-massa",
        min: 1.0,
        max: 10.0,
        step: 0.5,
        default: 2.0,
        unit: "kg",
    },
    ParameterSpec {
        id: "mass2",
        label: "Mass 2",
        label_uz: "2-massa",
        min: 1.0,
        max: 10.0,
        step: 0.5,
        default: 2.0,
        unit: "kg",
    },
    ParameterSpec {
        id: "velocity1",
        label: "Velocity 1",
        label_uz: "1-tezlik",
        min: -10.0,
        max: 10.0,
        step: 0.5,
        default: 5.0,
        unit: "m/s",
    },
    ParameterSpec {
        id: "velocity2",
        label: "Velocity 2",
        label_uz: "2-tezlik",
        min: -10.0,
        max: 10.0,
        step: 0.5,
        default: 0.0,
        unit: "m/s",
    },
    ParameterSpec {
        id: "restitution",
        label: "Restitution e",
        label_uz: "Tiklanish koeffitsienti e",
        min: 0.0,
        max: 1.0,
        step: 0.05,
        default: 1.0,
        unit: "",
    },
];

/// Positions are canvas pixels along the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionState {
    pub x1: f32,
    pub x2: f32,
    /// m/s
    pub v1: f32,
    pub v2: f32,
    pub has_collided: bool,
    pub collisions: u32,
    pub time: f32,
}

impl CollisionState {
    pub fn momentum(&self, m1: f32, m2: f32) -> f32 {
        m1 * self.v1 + m2 * self.v2
    }

    pub fn kinetic_energy(&self, m1: f32, m2: f32) -> f32 {
        0.5 * m1 * self.v1 * self.v1 + 0.5 * m2 * self.v2 * self.v2
    }
}

/// Ball radius in pixels grows with mass
pub fn ball_radius(mass: f32) -> f32 {
    12.0 + 4.0 * mass
}

/// Post-impact velocities `(v1', v2')`
pub fn resolve_collision(m1: f32, v1: f32, m2: f32, v2: f32, restitution: f32) -> (f32, f32) {
    let total = m1 + m2;
    let momentum = m1 * v1 + m2 * v2;
    let approach = v1 - v2;
    (
        (momentum - m2 * restitution * approach) / total,
        (momentum + m1 * restitution * approach) / total,
    )
}

pub struct CollisionModel {
    /// Track length in pixels
    pub track_width: f32,
}

impl CollisionModel {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            track_width: canvas.x,
        }
    }

    fn out_of_bounds(&self, state: &CollisionState, r1: f32, r2: f32) -> bool {
        state.x1 + r1 < 0.0
            || state.x1 - r1 > self.track_width
            || state.x2 + r2 < 0.0
            || state.x2 - r2 > self.track_width
    }
}

impl PhysicsModel for CollisionModel {
    type State = CollisionState;

    fn timing(&self) -> StepTiming {
        StepTiming::Fixed(DT)
    }

    fn initial_state(&self, params: &ParameterSet) -> CollisionState {
        CollisionState {
            x1: self.track_width * 0.25,
            x2: self.track_width * 0.75,
            v1: params.value("velocity1"),
            v2: params.value("velocity2"),
            has_collided: false,
            collisions: 0,
            time: 0.0,
        }
    }

    fn step(&self, state: &CollisionState, params: &ParameterSet, dt: f32) -> CollisionState {
        let m1 = params.value("mass1");
        let m2 = params.value("mass2");
        let r1 = ball_radius(m1);
        let r2 = ball_radius(m2);

        let mut next = CollisionState {
            x1: state.x1 + state.v1 * PIXELS_PER_METER * dt,
            x2: state.x2 + state.v2 * PIXELS_PER_METER * dt,
            time: state.time + dt,
            ..*state
        };

        let touching = (next.x2 - next.x1).abs() <= r1 + r2;
        if touching && !next.has_collided {
            let (v1, v2) = resolve_collision(m1, next.v1, m2, next.v2, params.value("restitution"));
            next.v1 = v1;
            next.v2 = v2;
            next.has_collided = true;
            next.collisions += 1;
            log::debug!("Collision #{} at t = {:.2} s", next.collisions, next.time);
        } else if !touching {
            next.has_collided = false;
        }

        if self.out_of_bounds(&next, r1, r2) {
            return self.initial_state(params);
        }
        next
    }

    fn readouts(&self, state: &CollisionState, params: &ParameterSet) -> Vec<Readout> {
        let m1 = params.value("mass1");
        let m2 = params.value("mass2");
        vec![
            Readout::new("v1", format::quantity(state.v1, 2, "m/s")),
            Readout::new("v2", format::quantity(state.v2, 2, "m/s")),
            Readout::new("Momentum", format::quantity(state.momentum(m1, m2), 2, "kg·m/s")),
            Readout::new("Kinetic energy", format::quantity(state.kinetic_energy(m1, m2), 2, "J")),
            Readout::new("Collisions", state.collisions.to_string()),
        ]
    }
}

pub struct CollisionRenderer;

impl SceneRenderer<CollisionState> for CollisionRenderer {
    fn draw(&self, state: &CollisionState, params: &ParameterSet, frame: &mut Frame) {
        let m1 = params.value("mass1");
        let m2 = params.value("mass2");
        let track_y = frame.height() * 0.55;

        frame.line(
            Vec2::new(TRACK_MARGIN, track_y + ball_radius(10.0)),
            Vec2::new(frame.width() - TRACK_MARGIN, track_y + ball_radius(10.0)),
            Stroke::new(3.0, palette::GROUND),
        );

        for (x, v, m, color, name) in [
            (state.x1, state.v1, m1, palette::POSITIVE, "1"),
            (state.x2, state.v2, m2, palette::NEGATIVE, "2"),
        ] {
            let r = ball_radius(m);
            let centre = Vec2::new(x, track_y + ball_radius(10.0) - r);
            frame.circle(centre, r, Some(color), Some(Stroke::new(1.5, palette::TEXT)));
            frame.text(centre, name, 14.0, palette::TEXT, Align::Center);
            frame.arrow(
                centre - Vec2::new(0.0, r + 12.0),
                centre + Vec2::new(v * 10.0, -(r + 12.0)),
                Stroke::new(2.0, palette::VELOCITY),
            );
        }

        frame.label(Vec2::new(20.0, 24.0), format::labeled("v1", state.v1, 2, "m/s"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("v2", state.v2, 2, "m/s"));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("p", state.momentum(m1, m2), 2, "kg·m/s"));
        frame.label(Vec2::new(20.0, 84.0), format::labeled("E_k", state.kinetic_energy(m1, m2), 2, "J"));
        frame.text(
            Vec2::new(frame.width() - 20.0, 24.0),
            format!("Collisions: {}", state.collisions),
            14.0,
            palette::MUTED,
            Align::Right,
        );
    }
}

pub type CollisionEngine = SimulationEngine<CollisionModel, CollisionRenderer>;

pub fn engine(canvas: Vec2) -> CollisionEngine {
    SimulationEngine::new(
        CollisionModel::new(canvas),
        CollisionRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}
