//! Telescope display colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Named colors accepted in catalogs, using the matplotlib base and tableau values
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gold", (255, 215, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("brown", (165, 42, 42)),
    ("pink", (255, 192, 203)),
    ("olive", (128, 128, 0)),
    ("tab:blue", (31, 119, 180)),
    ("tab:orange", (255, 127, 14)),
    ("tab:green", (44, 160, 44)),
    ("tab:red", (214, 39, 40)),
    ("tab:purple", (148, 103, 189)),
    ("tab:brown", (140, 86, 75)),
    ("tab:pink", (227, 119, 194)),
    ("tab:gray", (127, 127, 127)),
    ("tab:olive", (188, 189, 34)),
    ("tab:cyan", (23, 190, 207)),
];

/// RGB color used for every glyph belonging to one telescope
///
/// Serialized as `#rrggbb`; named colors are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TelescopeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TelescopeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| {
            expanded
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(invalid)
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for TelescopeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }

        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, (r, g, b))| Self::new(r, g, b))
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for TelescopeColor {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TelescopeColor> for String {
    fn from(color: TelescopeColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for TelescopeColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            "#1f77b4".parse::<TelescopeColor>().unwrap(),
            TelescopeColor::new(31, 119, 180)
        );
        assert_eq!(
            "#f00".parse::<TelescopeColor>().unwrap(),
            TelescopeColor::new(255, 0, 0)
        );
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            "tab:blue".parse::<TelescopeColor>().unwrap(),
            "#1f77b4".parse::<TelescopeColor>().unwrap()
        );
        assert_eq!(
            "Orange".parse::<TelescopeColor>().unwrap(),
            TelescopeColor::new(255, 165, 0)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "chartreuse-ish".parse::<TelescopeColor>(),
            Err(ColorParseError::UnknownName("chartreuse-ish".to_string()))
        );
        assert!("#12345".parse::<TelescopeColor>().is_err());
        assert!("#gg0000".parse::<TelescopeColor>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        let color = TelescopeColor::new(44, 160, 44);
        assert_eq!(color.to_string(), "#2ca02c");

        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#2ca02c\"");
        let parsed: TelescopeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, color);
    }
}
