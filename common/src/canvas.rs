//! Fixed-size logical canvas and the display list renderers draw into
//!
//! Simulations draw on a fixed logical canvas (800×500 by default) in
//! canvas coordinates: origin top-left, y pointing down. The [`Frame`]
//! builder drops any primitive whose geometry is not finite, so physics
//! models can let `inf`/`NaN` propagate without the paint backend ever
//! seeing it.

use glam::Vec2;

/// Default logical canvas size in pixels
pub const DEFAULT_CANVAS: Vec2 = Vec2::new(800.0, 500.0);

/// RGBA color, components in `0.0..=1.0`
pub type Color = [f32; 4];

/// Colors shared by the simulation renderers
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = [0.04, 0.05, 0.09, 1.0];
    pub const GRID: Color = [0.15, 0.17, 0.24, 1.0];
    pub const GROUND: Color = [0.30, 0.26, 0.20, 1.0];
    pub const TEXT: Color = [0.92, 0.93, 0.96, 1.0];
    pub const MUTED: Color = [0.55, 0.58, 0.66, 1.0];
    pub const ACCENT: Color = [0.35, 0.70, 1.00, 1.0];
    pub const WARM: Color = [1.00, 0.55, 0.25, 1.0];
    pub const POSITIVE: Color = [0.95, 0.30, 0.30, 1.0];
    pub const NEGATIVE: Color = [0.30, 0.50, 0.95, 1.0];
    pub const HIGHLIGHT: Color = [1.00, 0.85, 0.30, 1.0];
    pub const VELOCITY: Color = [0.40, 0.90, 0.45, 1.0];

    /// Same color with a different alpha
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One immediate-mode drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        fill: Color,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Arrow {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Text {
        position: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: Align,
    },
}

/// Display list for one rendered frame
#[derive(Debug, Clone)]
pub struct Frame {
    size: Vec2,
    background: Color,
    commands: Vec<DrawCommand>,
    skipped: usize,
}

impl Frame {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            background: palette::BACKGROUND,
            commands: Vec::new(),
            skipped: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Start a new frame, dropping previously recorded commands
    pub fn clear(&mut self, background: Color) {
        self.background = background;
        self.commands.clear();
        self.skipped = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of primitives dropped because of non-finite geometry
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        if from.is_finite() && to.is_finite() {
            self.commands.push(DrawCommand::Line { from, to, stroke });
        } else {
            self.skipped += 1;
        }
    }

    /// Polyline through the finite points; broken into separate runs
    /// wherever a point is not finite.
    pub fn polyline<I>(&mut self, points: I, stroke: Stroke)
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut run: Vec<Vec2> = Vec::new();
        for point in points {
            if point.is_finite() {
                run.push(point);
            } else {
                self.skipped += 1;
                self.flush_run(&mut run, stroke);
            }
        }
        self.flush_run(&mut run, stroke);
    }

    fn flush_run(&mut self, run: &mut Vec<Vec2>, stroke: Stroke) {
        if run.len() >= 2 {
            self.commands.push(DrawCommand::Polyline {
                points: std::mem::take(run),
                stroke,
            });
        } else {
            run.clear();
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color) {
        self.circle(center, radius, Some(fill), None);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.circle(center, radius, None, Some(stroke));
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, fill: Option<Color>, stroke: Option<Stroke>) {
        if center.is_finite() && radius.is_finite() && radius >= 0.0 {
            self.commands.push(DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            });
        } else {
            self.skipped += 1;
        }
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, fill: Color) {
        if min.is_finite() && size.is_finite() {
            self.commands.push(DrawCommand::Rect { min, size, fill });
        } else {
            self.skipped += 1;
        }
    }

    /// Closed filled shape; skipped entirely if any vertex is not finite
    pub fn polygon(&mut self, points: Vec<Vec2>, fill: Color, stroke: Option<Stroke>) {
        if points.len() >= 3 && points.iter().all(|p| p.is_finite()) {
            self.commands.push(DrawCommand::Polygon { points, fill, stroke });
        } else {
            self.skipped += 1;
        }
    }

    /// Arrow from `from` to `to`; zero-length arrows are not drawn
    pub fn arrow(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        if !(from.is_finite() && to.is_finite()) {
            self.skipped += 1;
            return;
        }
        if from.distance_squared(to) > 1e-6 {
            self.commands.push(DrawCommand::Arrow { from, to, stroke });
        }
    }

    pub fn text(&mut self, position: Vec2, text: impl Into<String>, size: f32, color: Color, align: Align) {
        if position.is_finite() {
            self.commands.push(DrawCommand::Text {
                position,
                text: text.into(),
                size,
                color,
                align,
            });
        } else {
            self.skipped += 1;
        }
    }

    /// Left-aligned label in the default text color
    pub fn label(&mut self, position: Vec2, text: impl Into<String>) {
        self.text(position, text, 14.0, palette::TEXT, Align::Left);
    }

    /// All text recorded in this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STROKE: Stroke = Stroke::new(1.0, palette::TEXT);

    #[test]
    fn non_finite_geometry_is_skipped() {
        let mut frame = Frame::default();
        frame.line(Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0), STROKE);
        frame.fill_circle(Vec2::new(f32::NAN, 1.0), 4.0, palette::ACCENT);
        frame.fill_circle(Vec2::ONE, f32::INFINITY, palette::ACCENT);
        frame.text(Vec2::new(0.0, f32::NAN), "hidden", 12.0, palette::TEXT, Align::Left);

        assert!(frame.commands().is_empty());
        assert_eq!(frame.skipped(), 4);
    }

    #[test]
    fn polyline_splits_on_non_finite_points() {
        let mut frame = Frame::default();
        frame.polyline(
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(f32::NAN, 0.0),
                Vec2::new(2.0, 2.0),
                Vec2::new(3.0, 3.0),
                Vec2::new(4.0, 4.0),
            ],
            STROKE,
        );

        let runs: Vec<usize> = frame
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Polyline { points, .. } => points.len(),
                _ => 0,
            })
            .collect();
        assert_eq!(runs, vec![2, 3]);
        assert_eq!(frame.skipped(), 1);
    }

    #[test]
    fn clear_resets_commands() {
        let mut frame = Frame::default();
        frame.label(Vec2::new(10.0, 10.0), "T = 2.01 s");
        assert!(frame.has_text("2.01"));

        frame.clear(palette::BACKGROUND);
        assert_eq!(frame.commands().len(), 0);
        assert_eq!(frame.texts().count(), 0);
    }
}
