//! Young's double-slit experiment
//!
//! Two slits a distance `d` apart, each of width `a`, lit by light of
//! wavelength `λ`. On a screen at distance `L` the bright fringes are
//! `Δy = λL/d` apart and the intensity is
//!
//! ```text
//! I(y) = cos²(π·d·y / λL) · sinc²(π·a·y / λL)
//! ```
//!
//! Wavefronts spreading from the slits are animated for illustration only.

use std::f32::consts::PI;

use common::format;
use common::{
    palette, Align, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

use crate::wavelength_to_rgb;

/// Half-height of the screen window in meters
pub const SCREEN_HALF_HEIGHT: f32 = 0.012;

const BARRIER_X: f32 = 180.0;
const SCREEN_X: f32 = 560.0;
const PLOT_WIDTH: f32 = 160.0;
/// Animated wavefront spacing and speed, in pixels
const WAVE_SPACING: f32 = 24.0;
const WAVE_SPEED: f32 = 60.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "wavelength",
        label: "Wavelength λ",
        label_uz: "To'lqin uzunligi λ",
        min: 380.0,
        max: 750.0,
        step: 5.0,
        default: 550.0,
        unit: "nm",
    },
    ParameterSpec {
        id: "slit_distance",
        label: "Slit separation d",
        label_uz: "Tirqishlar orasidagi masofa d",
        min: 0.05,
        max: 1.0,
        step: 0.01,
        default: 0.25,
        unit: "mm",
    },
    ParameterSpec {
        id: "screen_distance",
        label: "Screen distance L",
        label_uz: "Ekrangacha masofa L",
        min: 0.5,
        max: 3.0,
        step: 0.1,
        default: 1.0,
        unit: "m",
    },
    ParameterSpec {
        id: "slit_width",
        label: "Slit width a",
        label_uz: "Tirqish kengligi a",
        min: 0.01,
        max: 0.2,
        step: 0.01,
        default: 0.04,
        unit: "mm",
    },
];

/// Experiment geometry in SI units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleSlit {
    pub wavelength: f32,
    pub slit_distance: f32,
    pub slit_width: f32,
    pub screen_distance: f32,
}

impl DoubleSlit {
    pub fn from_params(params: &ParameterSet) -> Self {
        Self {
            wavelength: params.value("wavelength") * 1e-9,
            slit_distance: params.value("slit_distance") * 1e-3,
            slit_width: params.value("slit_width") * 1e-3,
            screen_distance: params.value("screen_distance"),
        }
    }

    /// `Δy = λL/d`
    pub fn fringe_spacing(&self) -> f32 {
        self.wavelength * self.screen_distance / self.slit_distance
    }

    /// Relative intensity at height `y` (meters) on the screen, in `[0, 1]`
    pub fn intensity(&self, y: f32) -> f32 {
        let scale = PI * y / (self.wavelength * self.screen_distance);
        let interference = (scale * self.slit_distance).cos().powi(2);
        let beta = scale * self.slit_width;
        let envelope = if beta.abs() < 1e-6 {
            1.0
        } else {
            (beta.sin() / beta).powi(2)
        };
        interference * envelope
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceState {
    /// Drives the wavefront animation
    pub phase: f32,
}

pub struct InterferenceModel;

impl PhysicsModel for InterferenceModel {
    type State = InterferenceState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, _params: &ParameterSet) -> InterferenceState {
        InterferenceState { phase: 0.0 }
    }

    fn step(&self, state: &InterferenceState, _params: &ParameterSet, dt: f32) -> InterferenceState {
        InterferenceState {
            phase: (state.phase + WAVE_SPEED * dt) % WAVE_SPACING,
        }
    }

    fn readouts(&self, _state: &InterferenceState, params: &ParameterSet) -> Vec<Readout> {
        let slit = DoubleSlit::from_params(params);
        vec![
            Readout::new("Fringe spacing", format::quantity(slit.fringe_spacing() * 1e3, 2, "mm")),
            Readout::new("Wavelength", format::quantity(params.value("wavelength"), 0, "nm")),
            Readout::new(
                "Visible maxima",
                format!("{}", 2 * (SCREEN_HALF_HEIGHT / slit.fringe_spacing()).floor() as i32 + 1),
            ),
        ]
    }
}

pub struct InterferenceRenderer;

impl SceneRenderer<InterferenceState> for InterferenceRenderer {
    fn draw(&self, state: &InterferenceState, params: &ParameterSet, frame: &mut Frame) {
        let slit = DoubleSlit::from_params(params);
        let color = wavelength_to_rgb(params.value("wavelength"));
        let centre_y = frame.height() * 0.5;
        let half = frame.height() * 0.5 - 30.0;
        // Slits drawn further apart for larger d, not to scale
        let gap = 20.0 + 60.0 * params.value("slit_distance");
        let slits = [
            Vec2::new(BARRIER_X, centre_y - gap * 0.5),
            Vec2::new(BARRIER_X, centre_y + gap * 0.5),
        ];

        // Barrier with two openings
        let barrier = Stroke::new(4.0, palette::MUTED);
        frame.line(Vec2::new(BARRIER_X, 20.0), slits[0] - Vec2::new(0.0, 4.0), barrier);
        frame.line(slits[0] + Vec2::new(0.0, 4.0), slits[1] - Vec2::new(0.0, 4.0), barrier);
        frame.line(slits[1] + Vec2::new(0.0, 4.0), Vec2::new(BARRIER_X, frame.height() - 20.0), barrier);

        // Incoming plane waves
        let mut x = BARRIER_X - WAVE_SPACING + state.phase;
        while x > 20.0 {
            frame.line(
                Vec2::new(x, centre_y - 80.0),
                Vec2::new(x, centre_y + 80.0),
                Stroke::new(1.5, palette::with_alpha(color, 0.6)),
            );
            x -= WAVE_SPACING;
        }

        // Circular wavefronts behind each slit
        let reach = SCREEN_X - BARRIER_X;
        let mut radius = state.phase;
        while radius < reach {
            let alpha = 0.5 * (1.0 - radius / reach);
            for centre in slits {
                let arc = (0..=24).map(|i| {
                    let angle = -PI * 0.45 + PI * 0.9 * i as f32 / 24.0;
                    centre + Vec2::new(angle.cos(), angle.sin()) * radius
                });
                frame.polyline(arc, Stroke::new(1.0, palette::with_alpha(color, alpha)));
            }
            radius += WAVE_SPACING;
        }

        // Screen and intensity profile
        frame.line(
            Vec2::new(SCREEN_X, 20.0),
            Vec2::new(SCREEN_X, frame.height() - 20.0),
            Stroke::new(3.0, palette::TEXT),
        );
        let samples = 240;
        let profile = (0..=samples).map(|i| {
            let t = i as f32 / samples as f32 * 2.0 - 1.0;
            let y = t * SCREEN_HALF_HEIGHT;
            Vec2::new(SCREEN_X + 10.0 + slit.intensity(y) * PLOT_WIDTH, centre_y - t * half)
        });
        frame.polyline(profile, Stroke::new(2.0, color));

        // Fringe pattern strip on the screen
        let bands = 120;
        let band_height = 2.0 * half / bands as f32;
        for i in 0..bands {
            let t = (i as f32 + 0.5) / bands as f32 * 2.0 - 1.0;
            let brightness = slit.intensity(t * SCREEN_HALF_HEIGHT);
            frame.rect(
                Vec2::new(SCREEN_X - 14.0, centre_y - t * half - band_height * 0.5),
                Vec2::new(10.0, band_height),
                palette::with_alpha(color, brightness),
            );
        }

        frame.label(Vec2::new(20.0, 24.0), format::labeled("λ", params.value("wavelength"), 0, "nm"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("d", params.value("slit_distance"), 2, "mm"));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("L", slit.screen_distance, 2, "m"));
        frame.text(
            Vec2::new(frame.width() - 20.0, frame.height() - 20.0),
            format::labeled("Δy = λL/d", slit.fringe_spacing() * 1e3, 2, "mm"),
            14.0,
            palette::HIGHLIGHT,
            Align::Right,
        );
    }
}

pub type InterferenceEngine = SimulationEngine<InterferenceModel, InterferenceRenderer>;

pub fn engine(canvas: Vec2) -> InterferenceEngine {
    SimulationEngine::new(
        InterferenceModel,
        InterferenceRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    fn default_slit() -> DoubleSlit {
        DoubleSlit::from_params(&ParameterSet::from_template(PARAMETERS))
    }

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn fringe_spacing_formula() {
        // 550 nm · 1 m / 0.25 mm = 2.2 mm
        assert!((default_slit().fringe_spacing() - 2.2e-3).abs() < 1e-6);
    }

    #[test]
    fn central_maximum_and_first_minimum() {
        let slit = default_slit();
        assert!((slit.intensity(0.0) - 1.0).abs() < 1e-6);
        assert!(slit.intensity(slit.fringe_spacing() * 0.5) < 1e-3);
    }

    #[test]
    fn envelope_dims_outer_fringes() {
        let slit = default_slit();
        let first = slit.intensity(slit.fringe_spacing());
        let third = slit.intensity(3.0 * slit.fringe_spacing());
        assert!(first < 1.0);
        assert!(third < first);
    }

    #[test]
    fn spacing_label_is_drawn() {
        let engine = engine(DEFAULT_CANVAS);
        assert!(engine.frame().has_text("Δy = λL/d = 2.20 mm"));
        assert_eq!(engine.frame().skipped(), 0);
    }

    #[test]
    fn phase_wraps_at_wave_spacing() {
        let params = ParameterSet::from_template(PARAMETERS);
        let state = InterferenceModel.step(&InterferenceState { phase: WAVE_SPACING - 0.1 }, &params, 1.0 / 60.0);
        assert!(state.phase < WAVE_SPACING);
        assert!(state.phase >= 0.0);
    }
}
