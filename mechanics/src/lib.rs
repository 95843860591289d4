//! Classical mechanics simulations
//!
//! - **Pendulum**: nonlinear simple pendulum with light damping
//! - **Free fall**: vertical drop with quadratic air resistance
//! - **Projectile**: 2D launch with quadratic air resistance
//! - **Inclined plane**: block sliding against kinetic friction
//! - **Collision**: 1-D collision with a coefficient of restitution

pub mod collision;
pub mod equations;
pub mod free_fall;
pub mod inclined_plane;
pub mod pendulum;
pub mod projectile;

use glam::Vec2;

/// Values captured at the moment a one-shot experiment ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalValues {
    pub velocity: f32,
    pub time: f32,
}

/// Acceleration from a quadratic drag force `F = k·v²` opposing motion
pub fn drag_acceleration(velocity: Vec2, drag_coefficient: f32, mass: f32) -> Vec2 {
    -velocity * velocity.length() * drag_coefficient / mass
}

/// Fraction of a step at which a linear segment from `before` to `after`
/// crosses `level`
pub(crate) fn crossing_fraction(before: f32, after: f32, level: f32) -> f32 {
    let span = before - after;
    if span.abs() <= f32::EPSILON {
        0.0
    } else {
        ((before - level) / span).clamp(0.0, 1.0)
    }
}
