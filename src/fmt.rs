//! Shared formatting utilities for the comparison table

/// Width of the separator lines around the table body
pub const SEPARATOR_WIDTH: usize = 80;

/// Horizontal rule printed between header, rows and totals
pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Format an improvement as a percentage with two decimals
///
/// # Examples
///
/// ```
/// use node_iter_compare::fmt::format_percent;
///
/// assert_eq!(format_percent(75.0), "75.00%");
/// assert_eq!(format_percent(-12.5), "-12.50%");
/// ```
pub fn format_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// Format a speedup multiplier, rendering infinity as `∞`
///
/// # Examples
///
/// ```
/// use node_iter_compare::fmt::format_multiplier;
///
/// assert_eq!(format_multiplier(4.0), "4.00x");
/// assert_eq!(format_multiplier(f64::INFINITY), "∞");
/// ```
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier == f64::INFINITY {
        "∞".to_string()
    } else {
        format!("{:.2}x", multiplier)
    }
}
