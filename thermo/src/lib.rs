//! Thermodynamics simulations
//!
//! - **Ideal gas**: hard-disk particle ensemble in a box whose speeds follow
//!   the chosen temperature

pub mod equations;
pub mod ideal_gas;

use common::Color;

/// Map a normalised value in `[0, 1]` to a blue-to-red hue
pub fn heat_color(t: f32) -> Color {
    // hue 0.66 (blue) down to 0.0 (red)
    let hue = (1.0 - t.clamp(0.0, 1.0)) * 0.66;
    let (r, g, b) = hsv_to_rgb(hue, 0.85, 1.0);
    [r, g, b, 1.0]
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h * 6.0;
    let i = h.floor() as i32;
    let f = h - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_runs_cold_to_hot() {
        let cold = heat_color(0.0);
        let hot = heat_color(1.0);
        assert!(cold[2] > cold[0]);
        assert!(hot[0] > hot[2]);
        assert_eq!(heat_color(5.0), hot);
    }
}
