//! Image dimension attributes.

use std::sync::OnceLock;

use regex::Regex;

/// Parses a `width`/`height` attribute value.
///
/// Accepts plain numbers, `px` values and percentages of `reference`.
/// Anything else, a missing value, or a percentage with no reference
/// yields `default`.
pub fn parse_image_dimension(value: Option<&str>, default: u32, reference: u32) -> u32 {
    static DIMENSION_REGEX: OnceLock<Regex> = OnceLock::new();
    let dimension_regex = DIMENSION_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(px|%)?\s*$").expect("Invalid dimension regex")
    });

    let Some(value) = value else {
        return default;
    };
    let Some(caps) = dimension_regex.captures(value) else {
        log::debug!("malformed dimension {value:?}, using {default}");
        return default;
    };
    let Ok(number) = caps[1].parse::<f64>() else {
        return default;
    };

    let resolved = match caps.get(2).map(|m| m.as_str()) {
        Some("%") if reference == 0 => return default,
        Some("%") => f64::from(reference) * number / 100.0,
        _ => number,
    };
    resolved.round().min(f64::from(u32::MAX)) as u32
}

/// Fits `width` x `height` into `max_width`, keeping the aspect ratio when
/// the height is known. A `max_width` of 0 means no constraint.
pub fn clamp_to_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if max_width == 0 || width <= max_width {
        return (width, height);
    }
    let scaled = u64::from(height) * u64::from(max_width) / u64::from(width);
    (max_width, scaled as u32)
}
