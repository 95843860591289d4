//! Electric field lines of two point charges
//!
//! Lines start on a small circle around the positive charges (the negative
//! ones when nothing is positive) and advance in fixed steps along the
//! field direction (against it when seeded on negative charges) until
//! the field is too weak, the line leaves the canvas, it reaches a charge,
//! or a step limit is hit.
//!
//! Tracing is comparatively expensive, so the state keeps the traced lines
//! together with the charge configuration they belong to and only retraces
//! when that changes.

use common::constants::K_COULOMB;
use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

pub const PIXELS_PER_METER: f32 = 100.0;
/// Tracer step in pixels
pub const STEP: f32 = 4.0;
pub const MAX_STEPS: usize = 600;
/// Lines stop where |E| drops below this, N/C
pub const MIN_FIELD: f32 = 50.0;
/// Lines end this close to a charge, in pixels
pub const CHARGE_RADIUS: f32 = 10.0;
const SEED_RADIUS: f32 = 14.0;
const LINES_PER_MICROCOULOMB: f32 = 4.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "charge1",
        label: "Charge q₁",
        label_uz: "Zaryad q₁",
        min: -5.0,
        max: 5.0,
        step: 1.0,
        default: 3.0,
        unit: "μC",
    },
    ParameterSpec {
        id: "charge2",
        label: "Charge q₂",
        label_uz: "Zaryad q₂",
        min: -5.0,
        max: 5.0,
        step: 1.0,
        default: -3.0,
        unit: "μC",
    },
    ParameterSpec {
        id: "separation",
        label: "Separation",
        label_uz: "Zaryadlar orasidagi masofa",
        min: 100.0,
        max: 500.0,
        step: 10.0,
        default: 260.0,
        unit: "px",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    pub position: Vec2,
    /// Microcoulombs
    pub charge: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    WeakField,
    OutOfBounds,
    ReachedCharge,
    MaxSteps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldLine {
    pub points: Vec<Vec2>,
    pub stop: StopReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub charges: Vec<PointCharge>,
    pub lines: Vec<FieldLine>,
    /// `(q₁, q₂, separation)` the lines were traced for
    pub traced_for: (f32, f32, f32),
}

/// Field at `point` (pixels) in N/C, with canvas y pointing down
pub fn field_at(charges: &[PointCharge], point: Vec2) -> Vec2 {
    charges.iter().fold(Vec2::ZERO, |total, source| {
        let offset = (point - source.position) / PIXELS_PER_METER;
        let distance_sq = offset.length_squared();
        if distance_sq <= f32::EPSILON {
            return total;
        }
        let magnitude = K_COULOMB * source.charge * 1e-6 / distance_sq;
        total + offset / distance_sq.sqrt() * magnitude
    })
}

/// Electric potential at `point` in volts
pub fn potential_at(charges: &[PointCharge], point: Vec2) -> f32 {
    charges
        .iter()
        .map(|source| {
            let distance = point.distance(source.position) / PIXELS_PER_METER;
            K_COULOMB * source.charge * 1e-6 / distance
        })
        .sum()
}

/// Follow the field from `start`; `direction` is `1.0` along E, `-1.0` against
pub fn trace_line(charges: &[PointCharge], start: Vec2, direction: f32, bounds: Vec2) -> FieldLine {
    let mut points = vec![start];
    let mut point = start;

    for _ in 0..MAX_STEPS {
        let field = field_at(charges, point);
        if field.length() < MIN_FIELD {
            return FieldLine {
                points,
                stop: StopReason::WeakField,
            };
        }

        point += field.normalize() * STEP * direction;
        points.push(point);

        if point.x < 0.0 || point.y < 0.0 || point.x > bounds.x || point.y > bounds.y {
            return FieldLine {
                points,
                stop: StopReason::OutOfBounds,
            };
        }
        if charges
            .iter()
            .any(|c| c.charge != 0.0 && c.position.distance(point) < CHARGE_RADIUS)
        {
            return FieldLine {
                points,
                stop: StopReason::ReachedCharge,
            };
        }
    }

    FieldLine {
        points,
        stop: StopReason::MaxSteps,
    }
}

/// Lines seeded evenly around the positive charges, or around the negative
/// ones when there is no positive charge. Lines from a positive charge end
/// on the negative ones, so seeding both would draw them twice.
pub fn trace_all(charges: &[PointCharge], bounds: Vec2) -> Vec<FieldLine> {
    let sign = if charges.iter().any(|c| c.charge > 0.0) { 1.0 } else { -1.0 };
    let mut lines = Vec::new();
    for (index, source) in charges.iter().enumerate() {
        if source.charge * sign <= 0.0 {
            continue;
        }
        let count = (source.charge.abs() * LINES_PER_MICROCOULOMB).round().max(1.0) as usize;
        // Offset the seeds of each charge so mirrored lines don't overlap
        let offset = index as f32 * 0.5;
        for i in 0..count {
            let angle = (i as f32 + offset) / count as f32 * std::f32::consts::TAU;
            let start = source.position + Vec2::new(angle.cos(), angle.sin()) * SEED_RADIUS;
            lines.push(trace_line(charges, start, sign, bounds));
        }
    }
    lines
}

pub struct FieldModel {
    pub bounds: Vec2,
}

impl FieldModel {
    pub fn new(canvas: Vec2) -> Self {
        Self { bounds: canvas }
    }

    fn configuration(params: &ParameterSet) -> (f32, f32, f32) {
        (
            params.value("charge1"),
            params.value("charge2"),
            params.value("separation"),
        )
    }

    fn charges(&self, (q1, q2, separation): (f32, f32, f32)) -> Vec<PointCharge> {
        let centre = self.bounds * 0.5;
        vec![
            PointCharge {
                position: centre - Vec2::new(separation * 0.5, 0.0),
                charge: q1,
            },
            PointCharge {
                position: centre + Vec2::new(separation * 0.5, 0.0),
                charge: q2,
            },
        ]
    }

    fn trace(&self, configuration: (f32, f32, f32)) -> FieldState {
        let charges = self.charges(configuration);
        let lines = trace_all(&charges, self.bounds);
        log::debug!("Traced {} field lines for q1 = {}, q2 = {}", lines.len(), configuration.0, configuration.1);
        FieldState {
            charges,
            lines,
            traced_for: configuration,
        }
    }
}

impl PhysicsModel for FieldModel {
    type State = FieldState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, params: &ParameterSet) -> FieldState {
        self.trace(Self::configuration(params))
    }

    fn step(&self, state: &FieldState, params: &ParameterSet, _dt: f32) -> FieldState {
        let configuration = Self::configuration(params);
        if configuration == state.traced_for {
            state.clone()
        } else {
            self.trace(configuration)
        }
    }

    fn pausable(&self) -> bool {
        false
    }

    fn readouts(&self, state: &FieldState, _params: &ParameterSet) -> Vec<Readout> {
        let midpoint = self.bounds * 0.5;
        let (q1, q2, separation) = state.traced_for;
        let force = K_COULOMB * q1 * q2 * 1e-12 / (separation / PIXELS_PER_METER).powi(2);
        vec![
            Readout::new("Field lines", state.lines.len().to_string()),
            Readout::new(
                "|E| at midpoint",
                format::quantity(field_at(&state.charges, midpoint).length(), 0, "N/C"),
            ),
            Readout::new(
                "φ at midpoint",
                format::quantity(potential_at(&state.charges, midpoint), 0, "V"),
            ),
            Readout::new("Coulomb force", format::quantity(force, 3, "N")),
        ]
    }
}

pub struct FieldRenderer;

impl SceneRenderer<FieldState> for FieldRenderer {
    fn draw(&self, state: &FieldState, _params: &ParameterSet, frame: &mut Frame) {
        let line_stroke = Stroke::new(1.5, palette::with_alpha(palette::ACCENT, 0.8));
        for line in &state.lines {
            frame.polyline(line.points.iter().copied(), line_stroke);

            // Direction marker halfway along
            if line.points.len() > 20 {
                let mid = line.points.len() / 2;
                let (a, b) = (line.points[mid - 1], line.points[mid + 1]);
                // Lines from negative charges were traced against E
                let field = field_at(&state.charges, line.points[mid]);
                let forward = if field.dot(b - a) >= 0.0 { b - a } else { a - b };
                frame.arrow(
                    line.points[mid] - forward * 1.5,
                    line.points[mid] + forward * 1.5,
                    Stroke::new(1.5, palette::ACCENT),
                );
            }
        }

        for charge in &state.charges {
            let color = if charge.charge > 0.0 {
                palette::POSITIVE
            } else if charge.charge < 0.0 {
                palette::NEGATIVE
            } else {
                palette::MUTED
            };
            frame.circle(charge.position, CHARGE_RADIUS + 4.0, Some(color), Some(Stroke::new(2.0, palette::TEXT)));
            let sign = if charge.charge > 0.0 {
                "+"
            } else if charge.charge < 0.0 {
                "−"
            } else {
                "0"
            };
            frame.text(charge.position, sign, 18.0, palette::TEXT, Align::Center);
            frame.text(
                charge.position + Vec2::new(0.0, 32.0),
                format::quantity(charge.charge, 0, "μC"),
                13.0,
                palette::TEXT,
                Align::Center,
            );
        }

        let (q1, q2, _) = state.traced_for;
        frame.label(Vec2::new(20.0, 24.0), format::labeled("q₁", q1, 0, "μC"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("q₂", q2, 0, "μC"));
        frame.text(
            Vec2::new(frame.width() - 20.0, 24.0),
            "E = k·q / r²",
            14.0,
            palette::MUTED,
            Align::Right,
        );
    }
}

pub type FieldEngine = SimulationEngine<FieldModel, FieldRenderer>;

pub fn engine(canvas: Vec2) -> FieldEngine {
    SimulationEngine::new(
        FieldModel::new(canvas),
        FieldRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}
