use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// An RGB color with an alpha channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, alpha: 0.0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// The same color with its alpha replaced by `opacity`.
    pub fn opacity(self, opacity: f64) -> Self {
        Self { alpha: opacity.clamp(0.0, 1.0), ..self }
    }

    /// Linear blend between two colors, channels and alpha alike.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }

    /// Source-over composite of `self` onto an opaque `background`.
    pub fn over(self, background: Color) -> Color {
        let a = self.alpha.clamp(0.0, 1.0);
        let channel = |src: u8, dst: u8| (src as f64 * a + dst as f64 * (1.0 - a)).round() as u8;
        Color::new(channel(self.r, background.r), channel(self.g, background.g), channel(self.b, background.b))
    }

    fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::new(255, 59, 48),
            "orange" => Self::new(255, 149, 0),
            "yellow" => Self::new(255, 204, 0),
            "green" => Self::new(52, 199, 89),
            "blue" => Self::new(0, 122, 255),
            "purple" => Self::new(175, 82, 222),
            "pink" => Self::new(255, 45, 85),
            "gray" | "grey" => Self::new(142, 142, 147),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Some(color) = Self::from_name(&trimmed.to_lowercase()) {
            return Ok(color);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !matches!(hex.len(), 3 | 6) {
            return Err(ColorParseError::Unknown(input.to_string()));
        }
        // Digits only: `from_str_radix` would also take a sign.
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(input.to_string()));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => hex.to_string(),
        };
        let component = |index: usize| {
            u8::from_str_radix(&expanded[index..index + 2], 16)
                .map_err(|_| ColorParseError::InvalidHex(input.to_string()))
        };
        Ok(Color::new(component(0)?, component(2)?, component(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("unknown color '{0}', expected a name or #rrggbb")]
    Unknown(String),
}

/// Default foreground colors supplied by the host environment.
///
/// Indicators never query the environment themselves; the host resolves a
/// palette once and passes the colors in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Used by most indicators when no color is given.
    pub primary: Color,
    /// Text color, used by the pulse indicator.
    pub label: Color,
}

static DETECTED_PALETTE: OnceCell<Palette> = OnceCell::new();

impl Palette {
    pub const DARK: Palette = Palette { primary: Color::WHITE, label: Color::new(242, 242, 247) };
    pub const LIGHT: Palette = Palette { primary: Color::BLACK, label: Color::new(28, 28, 30) };

    /// The palette for the current terminal, detected on first use.
    pub fn detected() -> Palette {
        *DETECTED_PALETTE.get_or_init(|| {
            let palette = Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref());
            log::debug!("resolved default palette: {palette:?}");
            palette
        })
    }

    /// Picks a palette from a `COLORFGBG` value (`"fg;bg"`), assuming a dark
    /// background when the value is missing or unparsable.
    pub fn from_colorfgbg(value: Option<&str>) -> Palette {
        let background = value.and_then(|v| v.rsplit(';').next()).and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(7) | Some(9..=15) => Self::LIGHT,
            _ => Self::DARK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#ff8000", Color::new(255, 128, 0))]
    #[case("ff8000", Color::new(255, 128, 0))]
    #[case("#fc0", Color::new(255, 204, 0))]
    #[case("Yellow", Color::new(255, 204, 0))]
    #[case(" white ", Color::WHITE)]
    fn parse(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>(), Ok(expected));
    }

    #[rstest]
    #[case("#12345")]
    #[case("chartreuse")]
    #[case("#gg0000")]
    fn parse_failure(#[case] input: &str) {
        assert!(input.parse::<Color>().is_err());
    }

    #[rstest]
    #[case("#+f+f+f")]
    #[case("+ff")]
    #[case("#-1-1-1")]
    #[case("#ff ff0")]
    fn signs_and_spaces_are_not_hex_digits(#[case] input: &str) {
        assert_eq!(input.parse::<Color>(), Err(ColorParseError::InvalidHex(input.to_string())));
    }

    #[test]
    fn display_round_trips_through_hex() {
        let color = Color::new(1, 171, 255);
        assert_eq!(color.to_string(), "#01abff");
        assert_eq!(color.to_string().parse::<Color>(), Ok(color));
    }

    #[test]
    fn composite_over_background() {
        let red = Color::new(255, 0, 0).opacity(0.5);
        assert_eq!(red.over(Color::BLACK), Color::new(128, 0, 0));
        assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn lerp_blends_alpha() {
        let from = Color::WHITE.opacity(0.0);
        let mid = from.lerp(Color::WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (255, 255, 255));
        assert!((mid.alpha - 0.5).abs() < 1e-9);
    }

    #[rstest]
    #[case(None, Palette::DARK)]
    #[case(Some("15;0"), Palette::DARK)]
    #[case(Some("0;15"), Palette::LIGHT)]
    #[case(Some("0;default;7"), Palette::LIGHT)]
    #[case(Some("garbage"), Palette::DARK)]
    fn palette_from_colorfgbg(#[case] value: Option<&str>, #[case] expected: Palette) {
        assert_eq!(Palette::from_colorfgbg(value), expected);
    }
}
