// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Style resolution: raw caller hints -> validated rendering parameters.
//
// Nothing in here can fail. A color that does not parse, or a font size that
// is zero or negative, simply means "use the platform default" for that
// field. A dialog must never refuse to render because of a cosmetic typo.

use serde::{Deserialize, Serialize};

/// Raw style hints exactly as the caller sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogStyleOptions {
    /// Primary button color (`#RRGGBB` or `#RRGGBBAA`).
    pub button_color: Option<String>,
    pub cancel_button_color: Option<String>,
    pub title_color: Option<String>,
    pub message_color: Option<String>,
    pub background_color: Option<String>,
    pub title_font_size: Option<f64>,
    pub message_font_size: Option<f64>,
    pub button_font_size: Option<f64>,
    /// Gap between content and buttons. Fullscreen and sheet layouts only.
    pub content_button_spacing: Option<f64>,
}

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with optional leading `#` and
    /// surrounding whitespace. Anything else is `None`.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }
        let bytes = hex::decode(digits).ok()?;
        match bytes.as_slice() {
            [r, g, b] => Some(Self::opaque(*r, *g, *b)),
            [r, g, b, a] => Some(Self {
                r: *r,
                g: *g,
                b: *b,
                a: *a,
            }),
            _ => None,
        }
    }

    /// `#RRGGBBAA`, upper case.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b, self.a]))
    }

    /// Packed `0xAARRGGBB`, the layout `android.graphics.Color` uses.
    pub fn to_argb(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Normalised `(r, g, b, a)` in `0.0..=1.0`, the layout UIKit expects.
    pub fn components(&self) -> (f64, f64, f64, f64) {
        let unit = |c: u8| f64::from(c) / 255.0;
        (unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("not a hex color: {value}"))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Style after default-filling and malformed-input degradation.
///
/// `None` always means "platform default", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub button_color: Option<Rgba>,
    pub cancel_button_color: Option<Rgba>,
    pub title_color: Option<Rgba>,
    pub message_color: Option<Rgba>,
    pub background_color: Option<Rgba>,
    pub title_font_size: Option<f32>,
    pub message_font_size: Option<f32>,
    pub button_font_size: Option<f32>,
    pub content_button_spacing: Option<f32>,
}

impl ResolvedStyle {
    /// Whether any field deviates from the platform defaults.
    ///
    /// Presenters skip their custom-styling code paths when this is false.
    pub fn has_overrides(&self) -> bool {
        *self != Self::default()
    }
}

/// Resolve raw hints into rendering parameters.
pub fn resolve(raw: &DialogStyleOptions) -> ResolvedStyle {
    ResolvedStyle {
        button_color: color(&raw.button_color),
        cancel_button_color: color(&raw.cancel_button_color),
        title_color: color(&raw.title_color),
        message_color: color(&raw.message_color),
        background_color: color(&raw.background_color),
        title_font_size: font_size(raw.title_font_size),
        message_font_size: font_size(raw.message_font_size),
        button_font_size: font_size(raw.button_font_size),
        content_button_spacing: spacing(raw.content_button_spacing),
    }
}

/// Names of the raw fields that were supplied but degraded to the default.
pub fn degraded_fields(raw: &DialogStyleOptions, resolved: &ResolvedStyle) -> Vec<&'static str> {
    let colors = [
        ("buttonColor", &raw.button_color, resolved.button_color),
        ("cancelButtonColor", &raw.cancel_button_color, resolved.cancel_button_color),
        ("titleColor", &raw.title_color, resolved.title_color),
        ("messageColor", &raw.message_color, resolved.message_color),
        ("backgroundColor", &raw.background_color, resolved.background_color),
    ];
    let sizes = [
        ("titleFontSize", raw.title_font_size, resolved.title_font_size),
        ("messageFontSize", raw.message_font_size, resolved.message_font_size),
        ("buttonFontSize", raw.button_font_size, resolved.button_font_size),
        (
            "contentButtonSpacing",
            raw.content_button_spacing,
            resolved.content_button_spacing,
        ),
    ];

    let mut out = Vec::new();
    for (name, input, parsed) in colors {
        // Empty strings mean "no override" and are not worth reporting.
        if input.as_deref().is_some_and(|s| !s.trim().is_empty()) && parsed.is_none() {
            out.push(name);
        }
    }
    for (name, input, parsed) in sizes {
        if input.is_some() && parsed.is_none() {
            out.push(name);
        }
    }
    out
}

fn color(input: &Option<String>) -> Option<Rgba> {
    input.as_deref().and_then(Rgba::parse_hex)
}

// Filtered after narrowing: values past the f32 range become infinite.
fn font_size(input: Option<f64>) -> Option<f32> {
    input
        .map(|size| size as f32)
        .filter(|size| size.is_finite() && *size > 0.0)
}

fn spacing(input: Option<f64>) -> Option<f32> {
    input
        .map(|gap| gap as f32)
        .filter(|gap| gap.is_finite() && *gap >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digits_is_opaque() {
        assert_eq!(Rgba::parse_hex("#FF5722"), Some(Rgba::opaque(0xFF, 0x57, 0x22)));
        assert_eq!(Rgba::parse_hex("ff5722"), Some(Rgba::opaque(0xFF, 0x57, 0x22)));
    }

    #[test]
    fn eight_digits_carries_alpha_last() {
        let c = Rgba::parse_hex("#11223380").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x11, 0x22, 0x33, 0x80));
        assert_eq!(c.to_argb(), 0x8011_2233);
    }

    #[test]
    fn malformed_colors_are_none() {
        for bad in ["", "#", "not-a-color", "#FFF", "#GG0000", "#1234567", "#123456789"] {
            assert_eq!(Rgba::parse_hex(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn malformed_button_color_degrades_silently() {
        let raw = DialogStyleOptions {
            button_color: Some("not-a-color".into()),
            ..Default::default()
        };
        let resolved = resolve(&raw);
        assert_eq!(resolved.button_color, None);
        assert!(!resolved.has_overrides());
        assert_eq!(degraded_fields(&raw, &resolved), vec!["buttonColor"]);
    }

    #[test]
    fn non_positive_font_sizes_fall_back() {
        let raw = DialogStyleOptions {
            title_font_size: Some(0.0),
            message_font_size: Some(-4.0),
            button_font_size: Some(f64::NAN),
            ..Default::default()
        };
        let resolved = resolve(&raw);
        assert_eq!(resolved, ResolvedStyle::default());
        assert_eq!(degraded_fields(&raw, &resolved).len(), 3);
    }

    #[test]
    fn sizes_beyond_f32_range_fall_back() {
        let raw = DialogStyleOptions {
            title_font_size: Some(1e300),
            content_button_spacing: Some(f64::MAX),
            ..Default::default()
        };
        let resolved = resolve(&raw);
        assert_eq!(resolved.title_font_size, None);
        assert_eq!(resolved.content_button_spacing, None);
        assert_eq!(
            degraded_fields(&raw, &resolved),
            vec!["titleFontSize", "contentButtonSpacing"]
        );
    }

    #[test]
    fn valid_fields_count_as_overrides() {
        let raw = DialogStyleOptions {
            title_font_size: Some(20.0),
            content_button_spacing: Some(0.0),
            ..Default::default()
        };
        let resolved = resolve(&raw);
        assert_eq!(resolved.title_font_size, Some(20.0));
        assert_eq!(resolved.content_button_spacing, Some(0.0));
        assert!(resolved.has_overrides());
    }

    #[test]
    fn hex_output_is_normalised() {
        let c = Rgba::parse_hex("  #ab12cd ").unwrap();
        assert_eq!(c.to_hex(), "#AB12CDFF");
        let (r, _, _, a) = c.components();
        assert!((r - 171.0 / 255.0).abs() < f64::EPSILON);
        assert_eq!(a, 1.0);
    }
}
