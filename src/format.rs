//! Number rendering for calculator output.

/// Shortest text that reads back as `value`, switching to exponent notation
/// for very large or very small magnitudes (`1e+100`, `1e-7`).
pub fn number_to_string(value: f64) -> String {
  if value.is_nan() {
    return "NaN".to_string();
  }
  if value.is_infinite() {
    return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
  }
  if value == 0.0 {
    return "0".to_string();
  }
  let magnitude = value.abs();
  if (1e-6..1e21).contains(&magnitude) {
    return value.to_string();
  }
  let formatted = format!("{value:e}");
  match formatted.split_once('e') {
    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
      format!("{mantissa}e+{exponent}")
    }
    _ => formatted,
  }
}

/// Round to `precision` significant digits and drop trailing zeros.
pub fn format_number(value: f64, precision: usize) -> String {
  if !value.is_finite() || value == 0.0 {
    return number_to_string(value);
  }
  let precision = precision.clamp(1, 17);
  let rounded = format!("{:.*e}", precision - 1, value)
    .parse::<f64>()
    .unwrap_or(value);
  number_to_string(rounded)
}
