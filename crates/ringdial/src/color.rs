use crate::error::InvalidConfiguration;
use derive_more::Display;
use palette::{Srgb, Srgba, WithAlpha};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

/// A CSS color as written by the user (`#d3d3d3`, `#abc`, `tomato`), kept verbatim for SVG
/// output alongside its parsed sRGB value.
#[derive(Debug, Clone, PartialEq, Display, DeserializeFromStr, SerializeDisplay)]
#[display("{text}")]
pub struct Color {
    text: String,
    rgb: Srgb<u8>,
}

impl Color {
    pub fn from_srgb(rgb: Srgb<u8>) -> Self {
        Self {
            text: format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
            rgb,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.rgb
    }

    pub fn to_srgba(&self, alpha: f64) -> Srgba<f64> {
        self.rgb.into_format::<f64>().with_alpha(alpha)
    }
}

impl FromStr for Color {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let rgb = if text.starts_with('#') {
            Srgb::<u8>::from_str(text).ok()
        } else {
            palette::named::from_str(&text.to_ascii_lowercase())
        };

        rgb.map(|rgb| Self {
            text: text.to_string(),
            rgb,
        })
        .ok_or_else(|| InvalidConfiguration::InvalidColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let cases = [
            ("#d3d3d3", (211, 211, 211)),
            ("#fff", (255, 255, 255)),
            ("tomato", (255, 99, 71)),
            ("RoyalBlue", (65, 105, 225)),
        ];
        for (text, (r, g, b)) in cases {
            let color: Color = text.parse().unwrap();
            assert_eq!(color.rgb(), Srgb::new(r, g, b), "parsing {text}");
            assert_eq!(color.to_string(), text);
        }
    }

    #[test]
    fn test_from_srgb_writes_hex() {
        let color = Color::from_srgb(Srgb::new(0xd3, 0xd3, 0x0a));
        assert_eq!(color.as_str(), "#d3d30a");
        assert_eq!(color, "#d3d30a".parse().unwrap());
    }

    #[test]
    fn test_invalid_color() {
        for text in ["#12", "not-a-color", ""] {
            assert!(matches!(
                text.parse::<Color>(),
                Err(InvalidConfiguration::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(color.rgb(), Srgb::new(255, 0, 0));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ff0000\"");
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
