//! # Field Normalizers
//!
//! Pure, total functions mapping raw field input to a canonical, bounded
//! value. Every invalid input maps to a safe default; nothing here returns
//! an error. These are the only mutation path into [`FlyerState`], so
//! out-of-range values never reach the store, even transiently.
//!
//! [`FlyerState`]: crate::flyer::FlyerState

use std::fmt;

/// Default global image scale, also the fallback for unparseable scale input.
pub const DEFAULT_GLOBAL_SCALE: f64 = 0.93;

/// Clamp a scale factor to `[0.01, 1]`. Non-finite input yields the default
/// global scale.
pub fn clamp_scale(value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_GLOBAL_SCALE;
    }
    value.clamp(0.01, 1.0)
}

/// Parse raw text as a scale factor, then clamp.
pub fn parse_scale(raw: &str) -> f64 {
    clamp_scale(raw.trim().parse().unwrap_or(f64::NAN))
}

/// Clamp an image offset to `[-100, 100]`. Non-finite input yields 0.
pub fn clamp_offset(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(-100.0, 100.0)
}

/// Parse raw text as an offset, then clamp.
pub fn parse_offset(raw: &str) -> f64 {
    clamp_offset(raw.trim().parse().unwrap_or(f64::NAN))
}

/// Clamp a custom dimension percentage to `[1, 200]`. Non-finite input
/// yields 100.
pub fn clamp_dimension(value: f64) -> f64 {
    if !value.is_finite() {
        return 100.0;
    }
    value.clamp(1.0, 200.0)
}

/// Parse raw text as a custom dimension, then clamp.
pub fn parse_dimension(raw: &str) -> f64 {
    clamp_dimension(raw.trim().parse().unwrap_or(f64::NAN))
}

/// How an image is fitted into its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    #[default]
    Contain,
    Cover,
    Expand,
    Custom,
}

impl ImageMode {
    /// Normalize raw input to a mode. Unrecognized values fall back to
    /// `Contain`, which makes normalization idempotent by construction.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "cover" => ImageMode::Cover,
            "expand" => ImageMode::Expand,
            "custom" => ImageMode::Custom,
            _ => ImageMode::Contain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageMode::Contain => "contain",
            ImageMode::Cover => "cover",
            ImageMode::Expand => "expand",
            ImageMode::Custom => "custom",
        }
    }
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse runs of whitespace to a single space and trim the ends.
pub fn normalize_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace case-insensitive occurrences of `m`, optional whitespace, an
/// optional `^`, optional whitespace, and `2` with `m²` (area unit
/// normalization, e.g. "30m2" becomes "30m²" and "30 M^2" becomes "30 m²";
/// whitespace before the `m` is untouched).
pub fn format_superscript(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == 'm' || chars[i] == 'M' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && chars[j] == '^' {
                j += 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
            }
            if j < chars.len() && chars[j] == '2' {
                out.push_str("m²");
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Count whitespace-delimited tokens. Empty or all-whitespace input is 0.
pub fn count_words(value: &str) -> usize {
    value.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scale_bounds() {
        assert_eq!(clamp_scale(0.5), 0.5);
        assert_eq!(clamp_scale(2.0), 1.0);
        assert_eq!(clamp_scale(0.0), 0.01);
        assert_eq!(clamp_scale(-3.0), 0.01);
    }

    #[test]
    fn test_clamp_scale_non_finite_uses_default() {
        assert_eq!(clamp_scale(f64::NAN), DEFAULT_GLOBAL_SCALE);
        assert_eq!(clamp_scale(f64::INFINITY), DEFAULT_GLOBAL_SCALE);
        assert_eq!(clamp_scale(f64::NEG_INFINITY), DEFAULT_GLOBAL_SCALE);
        assert_eq!(parse_scale("not a number"), DEFAULT_GLOBAL_SCALE);
    }

    #[test]
    fn test_parse_scale_trims_input() {
        assert_eq!(parse_scale(" 0.25 "), 0.25);
    }

    #[test]
    fn test_clamp_offset_bounds() {
        assert_eq!(clamp_offset(50.0), 50.0);
        assert_eq!(clamp_offset(250.0), 100.0);
        assert_eq!(clamp_offset(-250.0), -100.0);
        assert_eq!(clamp_offset(f64::NAN), 0.0);
        assert_eq!(parse_offset("junk"), 0.0);
    }

    #[test]
    fn test_clamp_dimension_bounds() {
        assert_eq!(clamp_dimension(150.0), 150.0);
        assert_eq!(clamp_dimension(500.0), 200.0);
        assert_eq!(clamp_dimension(0.0), 1.0);
        assert_eq!(clamp_dimension(f64::NAN), 100.0);
        assert_eq!(parse_dimension(""), 100.0);
    }

    #[test]
    fn test_mode_normalization_is_idempotent() {
        for raw in ["contain", "COVER", "Expand", "custom", "stretch", ""] {
            let once = ImageMode::from_raw(raw);
            assert_eq!(ImageMode::from_raw(once.as_str()), once);
        }
        assert_eq!(ImageMode::from_raw("stretch"), ImageMode::Contain);
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  a   b  "), "a b");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\t x \n y "), "x y");
    }

    #[test]
    fn test_format_superscript() {
        assert_eq!(format_superscript("30m2"), "30m²");
        // Whitespace before the `m` is not part of the pattern and survives.
        assert_eq!(format_superscript("30 M^2"), "30 m²");
        assert_eq!(format_superscript("120 m ^ 2 construidos"), "120 m² construidos");
        assert_eq!(format_superscript("marzo"), "marzo");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("una casa grande"), 3);
    }
}
