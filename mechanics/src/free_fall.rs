//! Free fall with air resistance
//!
//! A ball dropped from rest under gravity and a quadratic drag force
//! `F = k·v²`. Explicit Euler at a fixed 0.02 s step. When the ball reaches
//! the ground the state freezes and the landing velocity and time are
//! captured in [`FinalValues`].

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

use crate::{crossing_fraction, FinalValues};

/// Fixed integration step in seconds
pub const DT: f32 = 0.02;

const GROUND_MARGIN: f32 = 40.0;
const TOP_MARGIN: f32 = 40.0;
const BALL_RADIUS: f32 = 12.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "height",
        label: "Height",
        label_uz: "Balandlik",
        min: 1.0,
        max: 100.0,
        step: 1.0,
        default: 20.0,
        unit: "m",
    },
    ParameterSpec {
        id: "gravity",
        label: "Gravity",
        label_uz: "Erkin tushish tezlanishi",
        min: 1.0,
        max: 25.0,
        step: 0.01,
        default: 9.81,
        unit: "m/s²",
    },
    ParameterSpec {
        id: "mass",
        label: "Mass",
        label_uz: "Massa",
        min: 0.1,
        max: 10.0,
        step: 0.1,
        default: 1.0,
        unit: "kg",
    },
    ParameterSpec {
        id: "air_resistance",
        label: "Air resistance k",
        label_uz: "Havo qarshiligi k",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.0,
        unit: "kg/m",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFallState {
    /// Altitude above the ground in meters
    pub height: f32,
    /// Downward speed in m/s
    pub velocity: f32,
    pub time: f32,
    /// Set once, on landing
    pub final_values: Option<FinalValues>,
}

/// Drag-free landing speed `√(2gh)`
pub fn ideal_landing_velocity(height: f32, gravity: f32) -> f32 {
    (2.0 * gravity * height).sqrt()
}

/// Drag-free fall time `√(2h/g)`
pub fn ideal_fall_time(height: f32, gravity: f32) -> f32 {
    (2.0 * height / gravity).sqrt()
}

/// Terminal speed `√(mg/k)`; infinite without drag
pub fn terminal_velocity(mass: f32, gravity: f32, drag: f32) -> f32 {
    (mass * gravity / drag).sqrt()
}

pub struct FreeFallModel;

impl PhysicsModel for FreeFallModel {
    type State = FreeFallState;

    fn timing(&self) -> StepTiming {
        StepTiming::Fixed(DT)
    }

    fn initial_state(&self, params: &ParameterSet) -> FreeFallState {
        FreeFallState {
            height: params.value("height"),
            velocity: 0.0,
            time: 0.0,
            final_values: None,
        }
    }

    fn step(&self, state: &FreeFallState, params: &ParameterSet, dt: f32) -> FreeFallState {
        if state.final_values.is_some() {
            return *state;
        }

        let gravity = params.value("gravity");
        let mass = params.value("mass");
        let k = params.value("air_resistance");

        let drag = k * state.velocity * state.velocity.abs() / mass;
        let acceleration = gravity - drag;

        let height = state.height - state.velocity * dt;
        let velocity = state.velocity + acceleration * dt;
        let time = state.time + dt;

        if height <= 0.0 {
            let f = crossing_fraction(state.height, height, 0.0);
            let landed = FinalValues {
                velocity: state.velocity + (velocity - state.velocity) * f,
                time: state.time + dt * f,
            };
            return FreeFallState {
                height: 0.0,
                velocity: landed.velocity,
                time: landed.time,
                final_values: Some(landed),
            };
        }

        FreeFallState {
            height,
            velocity,
            time,
            final_values: None,
        }
    }

    fn is_terminal(&self, state: &FreeFallState) -> bool {
        state.final_values.is_some()
    }

    fn resets_on_new_parameters(&self) -> bool {
        true
    }

    fn readouts(&self, state: &FreeFallState, params: &ParameterSet) -> Vec<Readout> {
        let gravity = params.value("gravity");
        let mut readouts = vec![
            Readout::new("Height", format::quantity(state.height, 2, "m")),
            Readout::new("Velocity", format::quantity(state.velocity, 2, "m/s")),
            Readout::new("Time", format::quantity(state.time, 2, "s")),
            Readout::new(
                "√(2gh)",
                format::quantity(ideal_landing_velocity(params.value("height"), gravity), 2, "m/s"),
            ),
        ];
        if let Some(landed) = state.final_values {
            readouts.push(Readout::new("Landing velocity", format::quantity(landed.velocity, 2, "m/s")));
            readouts.push(Readout::new("Fall time", format::quantity(landed.time, 2, "s")));
        }
        readouts
    }
}

pub struct FreeFallRenderer;

impl FreeFallRenderer {
    fn ground_y(frame: &Frame) -> f32 {
        frame.height() - GROUND_MARGIN
    }

    /// Pixels per meter so the drop height fills the canvas
    fn scale(frame: &Frame, drop_height: f32) -> f32 {
        (Self::ground_y(frame) - TOP_MARGIN) / drop_height
    }
}

impl SceneRenderer<FreeFallState> for FreeFallRenderer {
    fn draw(&self, state: &FreeFallState, params: &ParameterSet, frame: &mut Frame) {
        let drop_height = params.value("height");
        let ground_y = Self::ground_y(frame);
        let scale = Self::scale(frame, drop_height);
        let x = frame.width() * 0.4;

        frame.rect(
            Vec2::new(0.0, ground_y),
            Vec2::new(frame.width(), GROUND_MARGIN),
            palette::GROUND,
        );

        // Height ruler every 10% of the drop
        let ruler_x = x - 80.0;
        frame.line(
            Vec2::new(ruler_x, ground_y),
            Vec2::new(ruler_x, ground_y - drop_height * scale),
            Stroke::new(1.0, palette::MUTED),
        );
        for i in 0..=10 {
            let h = drop_height * i as f32 / 10.0;
            let y = ground_y - h * scale;
            frame.line(Vec2::new(ruler_x - 6.0, y), Vec2::new(ruler_x, y), Stroke::new(1.0, palette::MUTED));
            if i % 2 == 0 {
                frame.text(
                    Vec2::new(ruler_x - 10.0, y),
                    format::quantity(h, 0, "m"),
                    11.0,
                    palette::MUTED,
                    Align::Right,
                );
            }
        }

        let ball = Vec2::new(x, ground_y - state.height * scale - BALL_RADIUS);
        frame.fill_circle(ball, BALL_RADIUS, palette::ACCENT);
        frame.arrow(
            ball,
            ball + Vec2::new(0.0, state.velocity * 3.0),
            Stroke::new(2.0, palette::VELOCITY),
        );

        let info_x = frame.width() * 0.6;
        frame.label(Vec2::new(info_x, 40.0), format::labeled("h", state.height, 2, "m"));
        frame.label(Vec2::new(info_x, 60.0), format::labeled("v", state.velocity, 2, "m/s"));
        frame.label(Vec2::new(info_x, 80.0), format::labeled("t", state.time, 2, "s"));

        let k = params.value("air_resistance");
        let terminal = terminal_velocity(params.value("mass"), params.value("gravity"), k);
        frame.text(
            Vec2::new(info_x, 100.0),
            format::labeled("v_term", terminal, 2, "m/s"),
            13.0,
            palette::MUTED,
            Align::Left,
        );

        if let Some(landed) = state.final_values {
            frame.text(Vec2::new(info_x, 140.0), "Landed", 16.0, palette::HIGHLIGHT, Align::Left);
            frame.label(Vec2::new(info_x, 162.0), format::labeled("v_final", landed.velocity, 2, "m/s"));
            frame.label(Vec2::new(info_x, 182.0), format::labeled("t_final", landed.time, 2, "s"));
        }
    }
}

pub type FreeFallEngine = SimulationEngine<FreeFallModel, FreeFallRenderer>;

pub fn engine(canvas: Vec2) -> FreeFallEngine {
    SimulationEngine::new(
        FreeFallModel,
        FreeFallRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    fn run_to_landing(params: &ParameterSet) -> FreeFallState {
        let mut state = FreeFallModel.initial_state(params);
        for _ in 0..100_000 {
            if FreeFallModel.is_terminal(&state) {
                break;
            }
            state = FreeFallModel.step(&state, params, DT);
        }
        state
    }

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn drag_free_landing_matches_closed_form() {
        let params = ParameterSet::from_template(PARAMETERS);
        let landed = run_to_landing(&params).final_values.expect("ball should land");

        let g = 9.81;
        let h = 20.0;
        assert!((landed.velocity - ideal_landing_velocity(h, g)).abs() < g * DT * 1.5);
        assert!((landed.time - ideal_fall_time(h, g)).abs() < 2.0 * DT);
    }

    #[test]
    fn drag_slows_the_fall() {
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("air_resistance", 0.2);
        let landed = run_to_landing(&params).final_values.unwrap();

        assert!(landed.velocity < ideal_landing_velocity(20.0, 9.81));
        assert!(landed.velocity < terminal_velocity(1.0, 9.81, 0.2) + 0.01);
        assert!(landed.time > ideal_fall_time(20.0, 9.81));
    }

    #[test]
    fn landed_state_is_frozen() {
        let params = ParameterSet::from_template(PARAMETERS);
        let landed = run_to_landing(&params);
        let again = FreeFallModel.step(&landed, &params, DT);
        assert_eq!(landed, again);
        assert_eq!(landed.height, 0.0);
    }

    #[test]
    fn engine_stops_stepping_after_landing() {
        let mut engine = engine(DEFAULT_CANVAS);
        for i in 0..1000 {
            engine.tick(i as f64 * 0.016);
        }
        let frozen = *engine.state();
        let steps = engine.steps();
        engine.tick(100.0);
        assert_eq!(*engine.state(), frozen);
        assert_eq!(engine.steps(), steps);
        assert!(engine.frame().has_text("Landed"));
        assert!(engine.frame().has_text("v_final = "));
    }

    #[test]
    fn changing_a_parameter_restarts_the_drop() {
        let mut engine = engine(DEFAULT_CANVAS);
        for i in 0..50 {
            engine.tick(i as f64);
        }
        assert!(engine.state().time > 0.0);
        engine.set_parameter("height", 50.0);
        assert_eq!(engine.state().time, 0.0);
        assert_eq!(engine.state().height, 50.0);
    }

    #[test]
    fn no_drag_hides_terminal_velocity() {
        let engine = engine(DEFAULT_CANVAS);
        assert!(engine.frame().has_text("v_term = —"));
    }
}
