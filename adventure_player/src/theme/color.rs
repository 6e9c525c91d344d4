//! Hex color parsing and legacy alpha normalization.

/// Normalize an alpha value stored on any of the historical scales.
///
/// - `[0, 1]` is a fraction and used as-is
/// - `(1, 100]` is a percentage
/// - above 100 is a byte intensity, clamped to 255
///
/// Negative values clamp to 0 and NaN means fully opaque.
pub fn normalize_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        return 1.0;
    }
    if alpha <= 1.0 {
        alpha.max(0.0)
    } else if alpha <= 100.0 {
        alpha / 100.0
    } else {
        alpha.min(255.0) / 255.0
    }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional) into RGB bytes.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16).ok();
    Some((byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Convert a hex color plus a legacy-scale alpha into an `rgba()` string.
///
/// Returns `None` when the color is not a 3- or 6-digit hex value.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Option<String> {
    let (r, g, b) = parse_hex(hex)?;
    let a = (normalize_alpha(alpha) * 1000.0).round() / 1000.0;
    Some(format!("rgba({r}, {g}, {b}, {a})"))
}
