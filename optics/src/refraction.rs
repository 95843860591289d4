//! Refraction at a flat interface
//!
//! Snell's law `n₁ sin θ₁ = n₂ sin θ₂`. When `|n₁/n₂ · sin θ₁| > 1` no
//! refracted ray exists and the light is totally reflected. A critical
//! angle exists only when going from a denser into a rarer medium.

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

/// Seconds for a light pulse to travel the drawn path
const PULSE_PERIOD: f32 = 2.0;
const RAY_LENGTH: f32 = 220.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "n1",
        label: "Refractive index n₁",
        label_uz: "Sindirish ko'rsatkichi n₁",
        min: 1.0,
        max: 2.5,
        step: 0.01,
        default: 1.0,
        unit: "",
    },
    ParameterSpec {
        id: "n2",
        label: "Refractive index n₂",
        label_uz: "Sindirish ko'rsatkichi n₂",
        min: 1.0,
        max: 2.5,
        step: 0.01,
        default: 1.5,
        unit: "",
    },
    ParameterSpec {
        id: "angle",
        label: "Angle of incidence",
        label_uz: "Tushish burchagi",
        min: 0.0,
        max: 89.0,
        step: 0.5,
        default: 30.0,
        unit: "°",
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionResult {
    /// Radians from the normal; `None` under total internal reflection
    pub refracted_angle: Option<f32>,
    pub is_total_reflection: bool,
    /// Radians; only when `n₁ > n₂`
    pub critical_angle: Option<f32>,
}

/// Apply Snell's law for an incidence angle in radians
pub fn refract(incident: f32, n1: f32, n2: f32) -> RefractionResult {
    let sin_refracted = n1 / n2 * incident.sin();
    let critical_angle = (n1 > n2).then(|| (n2 / n1).asin());

    if sin_refracted.abs() > 1.0 {
        RefractionResult {
            refracted_angle: None,
            is_total_reflection: true,
            critical_angle,
        }
    } else {
        RefractionResult {
            refracted_angle: Some(sin_refracted.asin()),
            is_total_reflection: false,
            critical_angle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionState {
    pub time: f32,
}

pub struct RefractionModel;

impl RefractionModel {
    fn result(params: &ParameterSet) -> RefractionResult {
        refract(params.value("angle").to_radians(), params.value("n1"), params.value("n2"))
    }
}

impl PhysicsModel for RefractionModel {
    type State = RefractionState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, _params: &ParameterSet) -> RefractionState {
        RefractionState { time: 0.0 }
    }

    fn step(&self, state: &RefractionState, _params: &ParameterSet, dt: f32) -> RefractionState {
        RefractionState {
            time: (state.time + dt) % PULSE_PERIOD,
        }
    }

    fn readouts(&self, _state: &RefractionState, params: &ParameterSet) -> Vec<Readout> {
        let result = Self::result(params);
        vec![
            Readout::new("Incidence", format::degrees(params.value("angle").to_radians(), 1)),
            Readout::new(
                "Refraction",
                result
                    .refracted_angle
                    .map_or_else(|| format::PLACEHOLDER.to_string(), |a| format::degrees(a, 1)),
            ),
            Readout::new(
                "Critical angle",
                result
                    .critical_angle
                    .map_or_else(|| format::PLACEHOLDER.to_string(), |a| format::degrees(a, 1)),
            ),
            Readout::new(
                "Total internal reflection",
                if result.is_total_reflection { "yes" } else { "no" },
            ),
        ]
    }
}

pub struct RefractionRenderer;

impl RefractionRenderer {
    /// Point on the polyline `path` at `fraction` of its length
    fn along(path: &[Vec2], fraction: f32) -> Vec2 {
        let lengths: Vec<f32> = path.windows(2).map(|w| w[0].distance(w[1])).collect();
        let mut remaining = lengths.iter().sum::<f32>() * fraction.clamp(0.0, 1.0);
        for (segment, length) in path.windows(2).zip(&lengths) {
            if remaining <= *length && *length > 0.0 {
                return segment[0].lerp(segment[1], remaining / length);
            }
            remaining -= length;
        }
        path.last().copied().unwrap_or(Vec2::ZERO)
    }
}

impl SceneRenderer<RefractionState> for RefractionRenderer {
    fn draw(&self, state: &RefractionState, params: &ParameterSet, frame: &mut Frame) {
        let n1 = params.value("n1");
        let n2 = params.value("n2");
        let incident = params.value("angle").to_radians();
        let result = refract(incident, n1, n2);

        let hit = frame.size() * 0.5;
        // Denser medium drawn darker
        let shade = |n: f32| palette::with_alpha(palette::ACCENT, 0.05 + 0.12 * (n - 1.0));
        frame.rect(Vec2::ZERO, Vec2::new(frame.width(), hit.y), shade(n1));
        frame.rect(Vec2::new(0.0, hit.y), Vec2::new(frame.width(), hit.y), shade(n2));
        frame.line(Vec2::new(0.0, hit.y), Vec2::new(frame.width(), hit.y), Stroke::new(2.0, palette::MUTED));

        // Normal
        frame.line(
            hit - Vec2::new(0.0, RAY_LENGTH),
            hit + Vec2::new(0.0, RAY_LENGTH),
            Stroke::new(1.0, palette::GRID),
        );

        let source = hit + Vec2::new(-incident.sin(), -incident.cos()) * RAY_LENGTH;
        let reflected_end = hit + Vec2::new(incident.sin(), -incident.cos()) * RAY_LENGTH;
        frame.arrow(source, hit, Stroke::new(3.0, palette::HIGHLIGHT));

        let mut path = vec![source, hit];
        match result.refracted_angle {
            Some(refracted) => {
                let end = hit + Vec2::new(refracted.sin(), refracted.cos()) * RAY_LENGTH;
                frame.arrow(hit, end, Stroke::new(3.0, palette::HIGHLIGHT));
                // Partial reflection
                frame.arrow(
                    hit,
                    reflected_end,
                    Stroke::new(1.5, palette::with_alpha(palette::HIGHLIGHT, 0.35)),
                );
                path.push(end);
            }
            None => {
                frame.arrow(hit, reflected_end, Stroke::new(3.0, palette::HIGHLIGHT));
                path.push(reflected_end);
            }
        }

        let pulse = Self::along(&path, state.time / PULSE_PERIOD);
        frame.fill_circle(pulse, 5.0, palette::TEXT);

        frame.label(Vec2::new(20.0, 24.0), format::labeled("n₁", n1, 2, ""));
        frame.label(Vec2::new(20.0, frame.height() - 24.0), format::labeled("n₂", n2, 2, ""));
        frame.label(Vec2::new(20.0, 48.0), format!("θ₁ = {}", format::degrees(incident, 1)));

        let right = frame.width() - 20.0;
        match result.refracted_angle {
            Some(refracted) => frame.text(
                Vec2::new(right, 24.0),
                format!("θ₂ = {}", format::degrees(refracted, 1)),
                14.0,
                palette::TEXT,
                Align::Right,
            ),
            None => frame.text(
                Vec2::new(right, 24.0),
                "Total internal reflection",
                16.0,
                palette::WARM,
                Align::Right,
            ),
        }
        let critical = result
            .critical_angle
            .map_or_else(|| format::PLACEHOLDER.to_string(), |a| format::degrees(a, 1));
        frame.text(
            Vec2::new(right, 48.0),
            format!("θc = {critical}"),
            14.0,
            palette::MUTED,
            Align::Right,
        );
    }
}

pub type RefractionEngine = SimulationEngine<RefractionModel, RefractionRenderer>;

pub fn engine(canvas: Vec2) -> RefractionEngine {
    SimulationEngine::new(
        RefractionModel,
        RefractionRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}
