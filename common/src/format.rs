//! Number formatting for on-canvas labels and readouts

/// Shown in place of values that are not finite or not set
pub const PLACEHOLDER: &str = "—";

/// `value unit` with fixed decimals, or the placeholder
pub fn quantity(value: f32, decimals: usize, unit: &str) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Avoid "-0.00"
    let value = if value.abs() < 0.5 * 10f32.powi(-(decimals as i32)) {
        0.0
    } else {
        value
    };
    if unit.is_empty() {
        format!("{value:.decimals$}")
    } else {
        format!("{value:.decimals$} {unit}")
    }
}

/// `name = value unit`, e.g. `T = 2.01 s`
pub fn labeled(name: &str, value: f32, decimals: usize, unit: &str) -> String {
    format!("{name} = {}", quantity(value, decimals, unit))
}

/// Angle given in radians, shown in degrees
pub fn degrees(radians: f32, decimals: usize) -> String {
    quantity(radians.to_degrees(), decimals, "°").replace(" °", "°")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_unit() {
        assert_eq!(labeled("T", 2.0064, 2, "s"), "T = 2.01 s");
        assert_eq!(quantity(3.0, 1, ""), "3.0");
    }

    #[test]
    fn non_finite_values_use_placeholder() {
        assert_eq!(quantity(f32::INFINITY, 2, "cm"), "—");
        assert_eq!(labeled("d_i", f32::NAN, 1, "cm"), "d_i = —");
    }

    #[test]
    fn negative_zero_is_hidden() {
        assert_eq!(quantity(-0.0001, 2, "m/s"), "0.00 m/s");
    }

    #[test]
    fn degrees_have_no_space() {
        assert_eq!(degrees(std::f32::consts::FRAC_PI_4, 1), "45.0°");
    }
}
