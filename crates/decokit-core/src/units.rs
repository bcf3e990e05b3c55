//! Unit conversion utilities
//!
//! Converts physical millimetres to canvas pixels and formats
//! physical sizes for display.

use crate::data::SizeMm;

/// Millimetres to canvas pixels at the given density
pub fn mm_to_px(value_mm: f64, px_per_mm: f64) -> f64 {
    value_mm * px_per_mm
}

/// Format a physical size for display, e.g. `"20 × 10 mm"`
pub fn format_size(size: &SizeMm) -> String {
    format!(
        "{} × {} mm",
        trim_decimal(size.width_mm),
        trim_decimal(size.height_mm)
    )
}

/// Format with at most one decimal place, dropping a trailing `.0`
fn trim_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
