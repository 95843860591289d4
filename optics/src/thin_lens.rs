//! Converging thin lens
//!
//! `1/f = 1/d_o + 1/d_i`. An object at the focal point images at infinity;
//! the infinite distance is passed through and the renderer leaves the
//! image out.

use common::format;
use common::{
    palette, Align, Color, Frame, ParameterSet, ParameterSpec, PhysicsModel, Readout, SceneRenderer,
    SimulationEngine, StepTiming, Stroke,
};
use glam::Vec2;

const PIXELS_PER_CM: f32 = 6.0;

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        id: "focal_length",
        label: "Focal length",
        label_uz: "Fokus masofasi",
        min: 5.0,
        max: 30.0,
        step: 1.0,
        default: 10.0,
        unit: "cm",
    },
    ParameterSpec {
        id: "object_distance",
        label: "Object distance",
        label_uz: "Buyum masofasi",
        min: 5.0,
        max: 50.0,
        step: 1.0,
        default: 25.0,
        unit: "cm",
    },
    ParameterSpec {
        id: "object_height",
        label: "Object height",
        label_uz: "Buyum balandligi",
        min: 1.0,
        max: 10.0,
        step: 0.5,
        default: 5.0,
        unit: "cm",
    },
];

/// Image of an object in front of the lens, lengths in cm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensImage {
    /// Positive behind the lens (real), negative in front (virtual)
    pub distance: f32,
    pub height: f32,
    pub magnification: f32,
}

impl LensImage {
    pub fn is_real(&self) -> bool {
        self.distance.is_finite() && self.distance > 0.0
    }

    pub fn at_infinity(&self) -> bool {
        !self.distance.is_finite()
    }
}

pub fn image(focal_length: f32, object_distance: f32, object_height: f32) -> LensImage {
    let distance = focal_length * object_distance / (object_distance - focal_length);
    let magnification = -distance / object_distance;
    LensImage {
        distance,
        height: magnification * object_height,
        magnification,
    }
}

/// The optical bench has no dynamics; the state only tracks elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensState {
    pub time: f32,
}

pub struct LensModel;

impl LensModel {
    fn image(params: &ParameterSet) -> LensImage {
        image(
            params.value("focal_length"),
            params.value("object_distance"),
            params.value("object_height"),
        )
    }
}

impl PhysicsModel for LensModel {
    type State = LensState;

    fn timing(&self) -> StepTiming {
        StepTiming::FrameDelta { max_dt: 1.0 / 30.0 }
    }

    fn initial_state(&self, _params: &ParameterSet) -> LensState {
        LensState { time: 0.0 }
    }

    fn step(&self, state: &LensState, _params: &ParameterSet, dt: f32) -> LensState {
        LensState { time: state.time + dt }
    }

    fn pausable(&self) -> bool {
        false
    }

    fn readouts(&self, _state: &LensState, params: &ParameterSet) -> Vec<Readout> {
        let image = Self::image(params);
        let kind = if image.at_infinity() {
            "at infinity"
        } else if image.is_real() {
            "real, inverted"
        } else {
            "virtual, upright"
        };
        vec![
            Readout::new("Image distance", format::quantity(image.distance, 1, "cm")),
            Readout::new("Image height", format::quantity(image.height, 1, "cm")),
            Readout::new("Magnification", format::quantity(image.magnification, 2, "×")),
            Readout::new("Image", kind),
        ]
    }
}

pub struct LensRenderer;

impl LensRenderer {
    fn draw_object(frame: &mut Frame, base: Vec2, height: f32, color: Color) {
        frame.arrow(base, base - Vec2::new(0.0, height), Stroke::new(3.0, color));
    }
}

impl SceneRenderer<LensState> for LensRenderer {
    fn draw(&self, _state: &LensState, params: &ParameterSet, frame: &mut Frame) {
        let f = params.value("focal_length");
        let d_o = params.value("object_distance");
        let h_o = params.value("object_height");
        let image = image(f, d_o, h_o);

        let lens = Vec2::new(frame.width() * 0.5, frame.height() * 0.5);
        let to_screen = |x_cm: f32, y_cm: f32| lens + Vec2::new(x_cm, -y_cm) * PIXELS_PER_CM;

        // Optical axis and lens
        frame.line(Vec2::new(0.0, lens.y), Vec2::new(frame.width(), lens.y), Stroke::new(1.0, palette::GRID));
        frame.arrow(lens, lens - Vec2::new(0.0, 160.0), Stroke::new(2.0, palette::ACCENT));
        frame.arrow(lens, lens + Vec2::new(0.0, 160.0), Stroke::new(2.0, palette::ACCENT));

        for side in [-1.0, 1.0] {
            let focus = to_screen(side * f, 0.0);
            frame.fill_circle(focus, 4.0, palette::WARM);
            frame.text(focus + Vec2::new(0.0, 18.0), "F", 13.0, palette::WARM, Align::Center);
            let double = to_screen(side * 2.0 * f, 0.0);
            frame.fill_circle(double, 3.0, palette::MUTED);
            frame.text(double + Vec2::new(0.0, 18.0), "2F", 12.0, palette::MUTED, Align::Center);
        }

        let object_base = to_screen(-d_o, 0.0);
        let object_tip = to_screen(-d_o, h_o);
        Self::draw_object(frame, object_base, h_o * PIXELS_PER_CM, palette::VELOCITY);

        // Principal rays: parallel then through F, and through the centre
        let ray = Stroke::new(1.5, palette::with_alpha(palette::HIGHLIGHT, 0.8));
        let at_lens = Vec2::new(lens.x, object_tip.y);
        frame.line(object_tip, at_lens, ray);
        let focus_back = to_screen(f, 0.0);
        let through_focus = (focus_back - at_lens).normalize_or_zero();
        frame.line(at_lens, at_lens + through_focus * frame.width(), ray);
        let through_centre = (lens - object_tip).normalize_or_zero();
        frame.line(object_tip, object_tip + through_centre * frame.width() * 1.5, ray);

        if !image.at_infinity() {
            let image_base = to_screen(image.distance, 0.0);
            let color = if image.is_real() {
                palette::POSITIVE
            } else {
                palette::with_alpha(palette::POSITIVE, 0.5)
            };
            Self::draw_object(frame, image_base, image.height * PIXELS_PER_CM, color);
            if !image.is_real() {
                // Virtual image: extend the refracted rays backwards
                let dashed = Stroke::new(1.0, palette::with_alpha(palette::HIGHLIGHT, 0.35));
                frame.line(at_lens, to_screen(image.distance, image.height), dashed);
                frame.line(lens, to_screen(image.distance, image.height), dashed);
            }
        } else {
            frame.text(
                Vec2::new(frame.width() - 20.0, 48.0),
                "Rays emerge parallel: image at infinity",
                14.0,
                palette::WARM,
                Align::Right,
            );
        }

        frame.label(Vec2::new(20.0, 24.0), format::labeled("f", f, 1, "cm"));
        frame.label(Vec2::new(20.0, 44.0), format::labeled("d_o", d_o, 1, "cm"));
        frame.label(Vec2::new(20.0, 64.0), format::labeled("d_i", image.distance, 1, "cm"));
        frame.label(Vec2::new(20.0, 84.0), format::labeled("Γ", image.magnification, 2, "×"));
    }
}

pub type LensEngine = SimulationEngine<LensModel, LensRenderer>;

pub fn engine(canvas: Vec2) -> LensEngine {
    SimulationEngine::new(
        LensModel,
        LensRenderer,
        ParameterSet::from_template(PARAMETERS),
        canvas,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Simulation, DEFAULT_CANVAS};

    #[test]
    fn template_is_valid() {
        assert!(PARAMETERS.iter().all(ParameterSpec::is_valid));
    }

    #[test]
    fn object_at_twice_focal_length_images_at_twice_focal_length() {
        let image = image(10.0, 20.0, 5.0);
        assert!((image.distance - 20.0).abs() < 1e-4);
        assert!((image.magnification + 1.0).abs() < 1e-4);
        assert!((image.height + 5.0).abs() < 1e-4);
        assert!(image.is_real());
    }

    #[test]
    fn object_inside_focal_length_gives_virtual_image() {
        let image = image(10.0, 5.0, 2.0);
        assert!((image.distance + 10.0).abs() < 1e-4);
        assert!((image.magnification - 2.0).abs() < 1e-4);
        assert!(!image.is_real());
    }

    #[test]
    fn object_at_focus_images_at_infinity() {
        let image = image(10.0, 10.0, 5.0);
        assert!(image.distance.is_infinite());
        assert!(image.at_infinity());
        assert!(!image.is_real());
    }

    #[test]
    fn infinite_image_is_suppressed() {
        let mut engine = engine(DEFAULT_CANVAS);
        engine.set_parameter("object_distance", 10.0);
        engine.tick(0.0);
        let frame = engine.frame();
        assert!(frame.has_text("d_i = —"));
        assert!(frame.has_text("image at infinity"));
        assert_eq!(frame.skipped(), 0);
        assert!(!engine.pausable());
    }

    #[test]
    fn default_bench_labels() {
        let engine = engine(DEFAULT_CANVAS);
        // 1/10 - 1/25 = 3/50
        assert!(engine.frame().has_text("d_i = 16.7 cm"));
        assert!(engine.frame().has_text("Γ = -0.67 ×"));
    }
}
