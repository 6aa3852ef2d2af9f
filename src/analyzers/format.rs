/// Formats a mean rental count for display.
///
/// | Value     | Shown as  |
/// |-----------|-----------|
/// | 150.0     | `150`     |
/// | 150.5     | `150.5`   |
/// | 4228.8286 | `4228.83` |
/// | 2.004     | `2`       |
///
/// A value that rounds to a whole number drops the decimal part.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", (value * 100.0).round() / 100.0)
    }
}

/// Formats a proportion (0.0–1.0) as a percentage with one decimal.
pub fn format_percent(proportion: f64) -> String {
    format!("{:.1}%", proportion * 100.0)
}

/// Formats an hour of day as `HH:00`.
pub fn format_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}
