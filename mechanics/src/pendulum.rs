//! Simple pendulum
//!
//! Integrates the full nonlinear equation `θ'' = -(g/L)·sin θ` with
//! semi-implicit Euler. A multiplicative damping factor on the angular
//! velocity keeps discretisation error from pumping energy into the swing.
//! The textbook period `T = 2π√(L/g)` is shown as a nominal label only.

use std::f32::consts::TAU;

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

/// Applied to the angular velocity every tick
pub const DAMPING: f32 = 0.999;

const PIXELS_PER_METER: f32 = 120.0;
const BOB_RADIUS: f32 = 16.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "length",
        label: "Length",
        label_uz: "Ip uzunligi",
        min: 0.5,
        max: 3.0,
        step: 0.1,
        default: 1.5,
        unit: "m",
    },
    ParameterSpec {
        id: "gravity",
        label: "Gravity",
        label_uz: "Erkin tushish tezlanishi",
        min: 1.0,
        max: 20.0,
        step: 0.1,
        default: 9.81,
        unit: "m/s²",
    },
    ParameterSpec {
        id: "initial_angle",
        label: "Initial angle",
        label_uz: "Boshlang'ich burchak",
        min: 5.0,
        max: 80.0,
        step: 1.0,
        default: 30.0,
        unit: "°",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    /// Radians from the vertical
    pub angle: f32,
    pub angular_velocity: f32,
    pub time: f32,
}

/// Nominal small-angle period
pub fn nominal_period(length: f32, gravity: f32) -> f32 {
    TAU * (length / gravity).sqrt()
}

pub struct PendulumModel;

impl PhysicsModel for PendulumModel {
    type State = PendulumState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, params: &ParameterSet) -> PendulumState {
        PendulumState {
            angle: params.value("initial_angle").to_radians(),
            angular_velocity: 0.0,
            time: 0.0,
        }
    }

    fn step(&self, state: &PendulumState, params: &ParameterSet, dt: f32) -> PendulumState {
        let length = params.value("length");
        let gravity = params.value("gravity");

        let angular_acceleration = -(gravity / length) * state.angle.sin();
        // velocity first, then position with the new velocity
        let angular_velocity = (state.angular_velocity + angular_acceleration * dt) * DAMPING;
        let angle = state.angle + angular_velocity * dt;

        PendulumState {
            angle,
            angular_velocity,
            time: state.time + dt,
        }
    }

    fn readouts(&self, state: &PendulumState, params: &ParameterSet) -> Vec<Readout> {
        let period = nominal_period(params.value("length"), params.value("gravity"));
        vec![
            Readout::new("Angle", format::degrees(state.angle, 1)),
            Readout::new("Angular velocity", format::quantity(state.angular_velocity, 2, "rad/s")),
            Readout::new("Period (nominal)", format::quantity(period, 2, "s")),
            Readout::new("Time", format::quantity(state.time, 1, "s")),
        ]
    }
}

pub struct PendulumRenderer;

impl PendulumRenderer {
    fn pivot(frame: &Frame) -> Vec2 {
        Vec2::new(frame.width() * 0.5, 50.0)
    }

    /// Bob position on the canvas (y down)
    pub fn bob_position(frame: &Frame, angle: f32, length: f32) -> Vec2 {
        let reach = length * PIXELS_PER_METER;
        Self::pivot(frame) + Vec2::new(angle.sin(), angle.cos()) * reach
    }
}

impl SceneRenderer<PendulumState> for PendulumRenderer {
    fn draw(&self, state: &PendulumState, params: &ParameterSet, frame: &mut Frame) {
        let length = params.value("length");
        let gravity = params.value("gravity");
        let pivot = Self::pivot(frame);
        let bob = Self::bob_position(frame, state.angle, length);

        // Ceiling mount
        frame.rect(Vec2::new(pivot.x - 60.0, pivot.y - 8.0), Vec2::new(120.0, 8.0), palette::GROUND);

        // Vertical reference
        let reach = length * PIXELS_PER_METER;
        frame.line(
            pivot,
            pivot + Vec2::new(0.0, reach + BOB_RADIUS),
            Stroke::new(1.0, palette::GRID),
        );

        frame.line(pivot, bob, Stroke::new(2.0, palette::MUTED));
        frame.fill_circle(pivot, 4.0, palette::TEXT);
        frame.circle(
            bob,
            BOB_RADIUS,
            Some(palette::WARM),
            Some(Stroke::new(2.0, palette::TEXT)),
        );

        // Tangential velocity
        let tangent = Vec2::new(state.angle.cos(), -state.angle.sin());
        let speed = state.angular_velocity * length;
        frame.arrow(bob, bob + tangent * speed * 20.0, Stroke::new(2.0, palette::VELOCITY));

        let period = nominal_period(length, gravity);
        frame.label(Vec2::new(20.0, 24.0), format::labeled("T = 2π√(L/g)", period, 2, "s"));
        frame.label(Vec2::new(20.0, 44.0), format!("θ = {}", format::degrees(state.angle, 1)));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("L", length, 2, "m"));
        frame.text(
            Vec2::new(frame.width() - 20.0, 24.0),
            format::labeled("t", state.time, 1, "s"),
            14.0,
            palette::MUTED,
            Align::Right,
        );
    }
}

pub type PendulumEngine = SimulationEngine<PendulumModel, PendulumRenderer>;

pub fn engine(canvas: Vec2) -> PendulumEngine {
    SimulationEngine::new(
        PendulumModel,
        PendulumRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    const DT: f32 = 1.0 / 60.0;

    fn params_with_angle(degrees: f32) -> ParameterSet {
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("length", 1.0);
        params.set_value("initial_angle", degrees);
        params
    }

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn swings_back_toward_vertical() {
        let params = params_with_angle(20.0);
        let start = PendulumModel.initial_state(&params);
        let next = PendulumModel.step(&start, &params, DT);
        assert!(next.angular_velocity < 0.0);
        assert!(next.angle < start.angle);
    }

    #[test]
    fn peak_amplitude_never_grows() {
        let params = params_with_angle(10.0);
        let mut state = PendulumModel.initial_state(&params);
        let mut peaks = vec![state.angle.abs()];

        for _ in 0..6000 {
            let next = PendulumModel.step(&state, &params, DT);
            // turning point: angular velocity changes sign
            if state.angular_velocity * next.angular_velocity < 0.0 {
                peaks.push(state.angle.abs().max(next.angle.abs()));
            }
            state = next;
        }

        assert!(peaks.len() > 20, "expected many swings, got {}", peaks.len());
        for pair in peaks.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-6, "peak grew: {} -> {}", pair[0], pair[1]);
        }
        assert!(peaks.last().unwrap() < &peaks[0]);
    }

    #[test]
    fn large_angles_use_the_sine() {
        let params = params_with_angle(80.0);
        let start = PendulumModel.initial_state(&params);
        let next = PendulumModel.step(&start, &params, DT);
        let expected = -(9.81 / 1.0) * 80f32.to_radians().sin() * DT * DAMPING;
        assert!((next.angular_velocity - expected).abs() < 1e-5);
    }

    #[test]
    fn step_is_pure() {
        let params = params_with_angle(30.0);
        let state = PendulumModel.initial_state(&params);
        let a = PendulumModel.step(&state, &params, DT);
        let b = PendulumModel.step(&state, &params, DT);
        assert_eq!(a, b);
    }

    #[test]
    fn period_label_format() {
        let engine = engine(DEFAULT_CANVAS);
        // L = 1.5 m, g = 9.81 m/s²
        assert!(engine.frame().has_text("T = 2π√(L/g) = 2.46 s"));
        assert!(engine.frame().has_text("θ = 30.0°"));
        assert!(engine.frame().has_text("L = 1.50 m"));
    }

    #[test]
    fn bob_hangs_below_pivot() {
        let frame = Frame::new(DEFAULT_CANVAS);
        let bob = PendulumRenderer::bob_position(&frame, 0.0, 1.0);
        assert_eq!(bob, Vec2::new(400.0, 170.0));
    }
}
