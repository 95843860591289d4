//! Projectile motion with air resistance
//!
//! World coordinates are meters with y up. The renderer flips y and fits
//! the drag-free trajectory to the canvas.

use std::collections::VecDeque;

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

use crate::{crossing_fraction, drag_acceleration};

pub const DT: f32 = 0.02;

/// Trail points kept for drawing
pub const TRAIL_CAPACITY: usize = 2000;

const MARGIN: f32 = 50.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "speed",
        label: "Launch speed",
        label_uz: "Boshlang'ich tezlik",
        min: 5.0,
        max: 50.0,
        step: 1.0,
        default: 20.0,
        unit: "m/s",
    },
    ParameterSpec {
        id: "angle",
        label: "Launch angle",
        label_uz: "Otish burchagi",
        min: 0.0,
        max: 90.0,
        step: 1.0,
        default: 45.0,
        unit: "°",
    },
    ParameterSpec {
        id: "height",
        label: "Launch height",
        label_uz: "Boshlang'ich balandlik",
        min: 0.0,
        max: 50.0,
        step: 1.0,
        default: 0.0,
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
        id: "drag",
        label: "Air resistance k",
        label_uz: "Havo qarshiligi k",
        min: 0.0,
        max: 0.5,
        step: 0.005,
        default: 0.0,
        unit: "kg/m",
    },
];

/// Captured when the projectile returns to the ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSummary {
    pub range: f32,
    pub flight_time: f32,
    pub max_height: f32,
    pub impact_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub time: f32,
    pub max_height: f32,
    pub trail: VecDeque<Vec2>,
    pub summary: Option<FlightSummary>,
}

/// Closed-form drag-free flight from height `h`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealFlight {
    pub range: f32,
    pub flight_time: f32,
    pub max_height: f32,
}

impl IdealFlight {
    pub fn new(speed: f32, angle_deg: f32, height: f32, gravity: f32) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let vx = speed * cos;
        let vy = speed * sin;
        let flight_time = (vy + (vy * vy + 2.0 * gravity * height).sqrt()) / gravity;
        Self {
            range: vx * flight_time,
            flight_time,
            max_height: height + vy * vy / (2.0 * gravity),
        }
    }

    fn from_params(params: &ParameterSet) -> Self {
        Self::new(
            params.value("speed"),
            params.value("angle"),
            params.value("height"),
            params.value("gravity"),
        )
    }
}

pub struct ProjectileModel;

impl PhysicsModel for ProjectileModel {
    type State = ProjectileState;

    fn timing(&self) -> StepTiming {
        StepTiming::Fixed(DT)
    }

    fn initial_state(&self, params: &ParameterSet) -> ProjectileState {
        let (sin, cos) = params.value("angle").to_radians().sin_cos();
        let position = Vec2::new(0.0, params.value("height"));
        ProjectileState {
            position,
            velocity: Vec2::new(cos, sin) * params.value("speed"),
            time: 0.0,
            max_height: position.y,
            trail: VecDeque::from([position]),
            summary: None,
        }
    }

    fn step(&self, state: &ProjectileState, params: &ParameterSet, dt: f32) -> ProjectileState {
        if state.summary.is_some() {
            return state.clone();
        }

        let gravity = Vec2::new(0.0, -params.value("gravity"));
        let acceleration = gravity + drag_acceleration(state.velocity, params.value("drag"), params.value("mass"));

        let velocity = state.velocity + acceleration * dt;
        let mut position = state.position + state.velocity * dt;
        let mut time = state.time + dt;
        let mut summary = None;

        if position.y <= 0.0 && velocity.y < 0.0 {
            let f = crossing_fraction(state.position.y, position.y, 0.0);
            position = state.position.lerp(position, f);
            position.y = 0.0;
            time = state.time + dt * f;
            let impact = state.velocity.lerp(velocity, f);
            summary = Some(FlightSummary {
                range: position.x,
                flight_time: time,
                max_height: state.max_height,
                impact_speed: impact.length(),
            });
        }

        let mut trail = state.trail.clone();
        if trail.len() >= TRAIL_CAPACITY {
            trail.pop_front();
        }
        trail.push_back(position);

        ProjectileState {
            position,
            velocity,
            time,
            max_height: state.max_height.max(position.y),
            trail,
            summary,
        }
    }

    fn is_terminal(&self, state: &ProjectileState) -> bool {
        state.summary.is_some()
    }

    fn resets_on_new_parameters(&self) -> bool {
        true
    }

    fn readouts(&self, state: &ProjectileState, params: &ParameterSet) -> Vec<Readout> {
        let ideal = IdealFlight::from_params(params);
        let mut readouts = vec![
            Readout::new("x", format::quantity(state.position.x, 2, "m")),
            Readout::new("y", format::quantity(state.position.y, 2, "m")),
            Readout::new("Speed", format::quantity(state.velocity.length(), 2, "m/s")),
            Readout::new("Time", format::quantity(state.time, 2, "s")),
            Readout::new("Range (no drag)", format::quantity(ideal.range, 2, "m")),
        ];
        if let Some(summary) = state.summary {
            readouts.push(Readout::new("Range", format::quantity(summary.range, 2, "m")));
            readouts.push(Readout::new("Flight time", format::quantity(summary.flight_time, 2, "s")));
            readouts.push(Readout::new("Max height", format::quantity(summary.max_height, 2, "m")));
            readouts.push(Readout::new("Impact speed", format::quantity(summary.impact_speed, 2, "m/s")));
        }
        readouts
    }
}

pub struct ProjectileRenderer;

impl ProjectileRenderer {
    /// Pixels per meter fitting the drag-free flight into the canvas
    fn scale(frame: &Frame, ideal: &IdealFlight) -> f32 {
        let usable = frame.size() - Vec2::splat(2.0 * MARGIN);
        let span = Vec2::new(ideal.range.max(1.0), ideal.max_height.max(1.0));
        (usable / span).min_element()
    }

    fn to_screen(frame: &Frame, scale: f32, world: Vec2) -> Vec2 {
        Vec2::new(MARGIN + world.x * scale, frame.height() - MARGIN - world.y * scale)
    }
}

impl SceneRenderer<ProjectileState> for ProjectileRenderer {
    fn draw(&self, state: &ProjectileState, params: &ParameterSet, frame: &mut Frame) {
        let ideal = IdealFlight::from_params(params);
        let scale = Self::scale(frame, &ideal);
        let ground_y = frame.height() - MARGIN;

        frame.rect(
            Vec2::new(0.0, ground_y),
            Vec2::new(frame.width(), MARGIN),
            palette::GROUND,
        );

        // Launch tower
        let height = params.value("height");
        if height > 0.0 {
            let top = Self::to_screen(frame, scale, Vec2::new(0.0, height));
            frame.rect(Vec2::new(MARGIN - 10.0, top.y), Vec2::new(10.0, ground_y - top.y), palette::MUTED);
        }

        let screen = |p: Vec2| Self::to_screen(frame, scale, p);
        let trail: Vec<Vec2> = state.trail.iter().map(|p| screen(*p)).collect();
        let ball = screen(state.position);
        let peak_marker = screen(Vec2::new(0.0, state.max_height));

        frame.polyline(trail, Stroke::new(2.0, palette::with_alpha(palette::ACCENT, 0.7)));
        frame.fill_circle(ball, 8.0, palette::WARM);
        frame.arrow(ball, ball + Vec2::new(state.velocity.x, -state.velocity.y) * 2.0, Stroke::new(2.0, palette::VELOCITY));

        // Peak height guide
        frame.line(
            Vec2::new(MARGIN, peak_marker.y),
            Vec2::new(frame.width() - MARGIN, peak_marker.y),
            Stroke::new(1.0, palette::GRID),
        );

        frame.label(Vec2::new(20.0, 24.0), format::labeled("x", state.position.x, 2, "m"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("y", state.position.y, 2, "m"));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("|v|", state.velocity.length(), 2, "m/s"));
        frame.label(Vec2::new(20.0, 84.0), format::labeled("t", state.time, 2, "s"));

        frame.text(
            Vec2::new(frame.width() - 20.0, 24.0),
            format::labeled("R₀", ideal.range, 1, "m"),
            13.0,
            palette::MUTED,
            Align::Right,
        );

        if let Some(summary) = state.summary {
            let x = frame.width() - 20.0;
            frame.text(Vec2::new(x, 50.0), "Landed", 16.0, palette::HIGHLIGHT, Align::Right);
            frame.text(Vec2::new(x, 72.0), format::labeled("Range", summary.range, 2, "m"), 14.0, palette::TEXT, Align::Right);
            frame.text(Vec2::new(x, 92.0), format::labeled("h_max", summary.max_height, 2, "m"), 14.0, palette::TEXT, Align::Right);
            frame.text(Vec2::new(x, 112.0), format::labeled("t_flight", summary.flight_time, 2, "s"), 14.0, palette::TEXT, Align::Right);
        }
    }
}

pub type ProjectileEngine = SimulationEngine<ProjectileModel, ProjectileRenderer>;

pub fn engine(canvas: Vec2) -> ProjectileEngine {
    SimulationEngine::new(
        ProjectileModel,
        ProjectileRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    fn fly(params: &ParameterSet) -> ProjectileState {
        let mut state = ProjectileModel.initial_state(params);
        for _ in 0..50_000 {
            if ProjectileModel.is_terminal(&state) {
                break;
            }
            state = ProjectileModel.step(&state, params, DT);
        }
        state
    }

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn ideal_range_at_45_degrees() {
        let ideal = IdealFlight::new(20.0, 45.0, 0.0, 9.81);
        // v²/g
        assert!((ideal.range - 400.0 / 9.81).abs() < 1e-3);
        assert!((ideal.max_height - 400.0 / (4.0 * 9.81)).abs() < 1e-3);
    }

    #[test]
    fn drag_free_flight_lands_near_closed_form() {
        let params = ParameterSet::from_template(PARAMETERS);
        let summary = fly(&params).summary.expect("projectile should land");
        let ideal = IdealFlight::from_params(&params);

        assert!((summary.range - ideal.range).abs() < 0.5, "range {} vs {}", summary.range, ideal.range);
        assert!((summary.flight_time - ideal.flight_time).abs() < 2.0 * DT);
        assert!((summary.max_height - ideal.max_height).abs() < 0.3);
    }

    #[test]
    fn drag_shortens_the_range() {
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("drag", 0.05);
        let summary = fly(&params).summary.unwrap();
        assert!(summary.range < IdealFlight::from_params(&params).range - 1.0);
    }

    #[test]
    fn horizontal_launch_from_a_tower_lands() {
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("angle", 0.0);
        params.set_value("height", 20.0);
        let state = fly(&params);
        let summary = state.summary.unwrap();
        assert_eq!(state.position.y, 0.0);
        assert!((summary.max_height - 20.0).abs() < 1e-4);
        assert!(summary.range > 0.0);
    }

    #[test]
    fn trail_is_bounded() {
        let mut params = ParameterSet::from_template(PARAMETERS);
        params.set_value("speed", 50.0);
        params.set_value("angle", 90.0);
        params.set_value("gravity", 1.0);
        // ~100 s of flight at 0.02 s per step
        let state = fly(&params);
        assert_eq!(state.trail.len(), TRAIL_CAPACITY);
        assert_eq!(state.trail.back(), Some(&state.position));
    }

    #[test]
    fn landing_shows_the_summary() {
        let mut engine = engine(DEFAULT_CANVAS);
        for i in 0..1000 {
            engine.tick(i as f64);
        }
        assert!(Simulation::is_terminal(&engine));
        assert!(engine.frame().has_text("Landed"));
        assert!(engine.frame().has_text("Range = "));
        assert!(engine.readouts().iter().any(|r| r.label == "Impact speed"));
    }
}
