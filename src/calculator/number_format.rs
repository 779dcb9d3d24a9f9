/// magnitude under which a number prints as 0, and distance to an integer under which
/// it prints as that integer
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Formats a bare numeric result: `0` for tiny magnitudes, an integer when the value is
/// within tolerance of one, six decimals otherwise.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() < ZERO_TOLERANCE {
        return "0".to_string();
    }
    let rounded = value.round();
    if (value - rounded).abs() < ZERO_TOLERANCE {
        format!("{:.0}", rounded)
    } else {
        format!("{:.6}", value)
    }
}

/// Six decimals, used for limits. Negative zero prints without the sign.
pub fn format_fixed6(value: f64) -> String {
    let text = format!("{:.6}", value);
    if text == "-0.000000" {
        "0.000000".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(1e-12), "0");
        assert_eq!(format_number(-1e-11), "0");
        assert_eq!(format_number(2.99999999999), "3");
        assert_eq!(format_number(0.1 + 0.2), "0.300000");
        assert_eq!(format_number(std::f64::consts::PI), "3.141593");
        assert_eq!(format_number(-1.5), "-1.500000");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_fixed6() {
        assert_eq!(format_fixed6(0.0), "0.000000");
        assert_eq!(format_fixed6(-0.0), "0.000000");
        assert_eq!(format_fixed6(-1e-9), "0.000000");
        assert_eq!(format_fixed6(2.0), "2.000000");
        assert_eq!(format_fixed6(1.0 / 3.0), "0.333333");
    }
}
