//! Optics simulations
//!
//! - **Refraction**: Snell's law with total internal reflection
//! - **Thin lens**: converging lens image formation
//! - **Interference**: Young's double slit

pub mod equations;
pub mod interference;
pub mod refraction;
pub mod thin_lens;

use common::Color;

/// Approximate display color of visible light, `wavelength` in nm
pub fn wavelength_to_rgb(wavelength: f32) -> Color {
    let (r, g, b) = match wavelength {
        w if (380.0..440.0).contains(&w) => (-(w - 440.0) / 60.0, 0.0, 1.0),
        w if (440.0..490.0).contains(&w) => (0.0, (w - 440.0) / 50.0, 1.0),
        w if (490.0..510.0).contains(&w) => (0.0, 1.0, -(w - 510.0) / 20.0),
        w if (510.0..580.0).contains(&w) => ((w - 510.0) / 70.0, 1.0, 0.0),
        w if (580.0..645.0).contains(&w) => (1.0, -(w - 645.0) / 65.0, 0.0),
        w if (645.0..=780.0).contains(&w) => (1.0, 0.0, 0.0),
        _ => (0.0, 0.0, 0.0),
    };

    // Dim toward the edges of the visible range
    let factor = if wavelength < 420.0 {
        0.3 + 0.7 * (wavelength - 380.0) / 40.0
    } else if wavelength > 700.0 {
        0.3 + 0.7 * (780.0 - wavelength) / 80.0
    } else {
        1.0
    };
    let factor = factor.clamp(0.0, 1.0);

    [r * factor, g * factor, b * factor, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_colors() {
        let red = wavelength_to_rgb(650.0);
        let green = wavelength_to_rgb(520.0);
        let blue = wavelength_to_rgb(460.0);
        assert!(red[0] > red[1] && red[0] > red[2]);
        assert!(green[1] > green[0] && green[1] > green[2]);
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
        assert_eq!(wavelength_to_rgb(900.0), [0.0, 0.0, 0.0, 1.0]);
    }
}
