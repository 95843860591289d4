//! Paints a canvas [`Frame`] with egui
//!
//! The logical canvas keeps its aspect ratio: it is scaled to fit the
//! available rectangle and centered, leaving bars on the longer side.

use common::{Align, Color, DrawCommand, Frame, Stroke};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect};
use glam::Vec2;

/// Maps canvas coordinates into a screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f32,
    pub origin: Pos2,
    pub canvas: Vec2,
}

impl CanvasTransform {
    pub fn fit(canvas: Vec2, available: Rect) -> Self {
        let scale = (available.width() / canvas.x)
            .min(available.height() / canvas.y)
            .max(0.0);
        let used = egui::vec2(canvas.x * scale, canvas.y * scale);
        let origin = available.center() - used / 2.0;
        Self { scale, origin, canvas }
    }

    pub fn to_screen(&self, point: Vec2) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y) * self.scale
    }

    /// Screen rectangle covered by the canvas
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, egui::vec2(self.canvas.x, self.canvas.y) * self.scale)
    }
}

pub fn color32(color: Color) -> Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(channel(color[0]), channel(color[1]), channel(color[2]), channel(color[3]))
}

fn stroke(stroke: Stroke, scale: f32) -> egui::Stroke {
    egui::Stroke::new(stroke.width * scale, color32(stroke.color))
}

/// Paint `frame` into `available`, returning the transform used
pub fn paint_frame(painter: &Painter, frame: &Frame, available: Rect) -> CanvasTransform {
    let transform = CanvasTransform::fit(frame.size(), available);
    let scale = transform.scale;
    let to_screen = |p: Vec2| transform.to_screen(p);

    painter.rect_filled(transform.rect(), 0.0, color32(frame.background()));

    for command in frame.commands() {
        match command {
            DrawCommand::Line { from, to, stroke: s } => {
                painter.line_segment([to_screen(*from), to_screen(*to)], stroke(*s, scale));
            }
            DrawCommand::Polyline { points, stroke: s } => {
                let points: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                painter.add(egui::Shape::line(points, stroke(*s, scale)));
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke: s,
            } => {
                painter.circle(
                    to_screen(*center),
                    radius * scale,
                    fill.map_or(Color32::TRANSPARENT, color32),
                    s.map_or(egui::Stroke::NONE, |s| stroke(s, scale)),
                );
            }
            DrawCommand::Rect { min, size, fill } => {
                let rect = Rect::from_min_max(to_screen(*min), to_screen(*min + *size));
                painter.rect_filled(rect, 0.0, color32(*fill));
            }
            DrawCommand::Polygon { points, fill, stroke: s } => {
                let points: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                painter.add(egui::Shape::convex_polygon(
                    points,
                    color32(*fill),
                    s.map_or(egui::Stroke::NONE, |s| stroke(s, scale)),
                ));
            }
            DrawCommand::Arrow { from, to, stroke: s } => {
                let start = to_screen(*from);
                painter.arrow(start, to_screen(*to) - start, stroke(*s, scale));
            }
            DrawCommand::Text {
                position,
                text,
                size,
                color,
                align,
            } => {
                let anchor = match align {
                    Align::Left => Align2::LEFT_CENTER,
                    Align::Center => Align2::CENTER_CENTER,
                    Align::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    to_screen(*position),
                    anchor,
                    text,
                    FontId::proportional((size * scale).max(1.0)),
                    color32(*color),
                );
            }
        }
    }

    transform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_area_is_pillarboxed() {
        let available = Rect::from_min_size(Pos2::ZERO, egui::vec2(1600.0, 500.0));
        let transform = CanvasTransform::fit(Vec2::new(800.0, 500.0), available);
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.origin, Pos2::new(400.0, 0.0));
        assert_eq!(transform.to_screen(Vec2::new(800.0, 500.0)), Pos2::new(1200.0, 500.0));
    }

    #[test]
    fn tall_area_is_letterboxed() {
        let available = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(400.0, 1000.0));
        let transform = CanvasTransform::fit(Vec2::new(800.0, 500.0), available);
        assert_eq!(transform.scale, 0.5);
        // 250 px of canvas centered in 1000 px
        assert_eq!(transform.origin, Pos2::new(10.0, 395.0));
        assert_eq!(transform.rect().height(), 250.0);
    }

    #[test]
    fn colors_are_clamped() {
        assert_eq!(color32([1.0, 0.0, 0.0, 1.0]), Color32::from_rgb(255, 0, 0));
        assert_eq!(color32([2.0, -1.0, 0.5, 1.0]), Color32::from_rgb(255, 0, 128));
    }
}
