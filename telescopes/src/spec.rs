//! Telescope, instrument and survey records

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::band::BandRange;
use crate::color::TelescopeColor;

/// Line style used for every glyph belonging to one instrument
///
/// Accepts the matplotlib shorthands (`-`, `--`, `:`, `-.`) on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    #[serde(alias = "-")]
    Solid,
    #[serde(alias = "--")]
    Dashed,
    #[serde(alias = ":")]
    Dotted,
    #[serde(alias = "-.")]
    DashDot,
}

/// A filter band with its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBand {
    pub name: String,
    pub min_max: BandRange,
}

/// An imaging instrument and its filter bands, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub name: String,
    #[serde(default)]
    pub line_style: LineStyle,
    pub bands: Vec<NamedBand>,
}

impl InstrumentSpec {
    pub fn band(&self, name: &str) -> Option<&BandRange> {
        self.bands
            .iter()
            .find(|band| band.name == name)
            .map(|band| &band.min_max)
    }

    pub fn band_names(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(|band| band.name.as_str())
    }
}

/// Pixel scale of one instrument as used by a survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyInstrument {
    pub name: String,
    /// Pixel scale in arcseconds per pixel
    pub pix_scale: f64,
}

/// An observing program with sample imaging per instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySpec {
    pub name: String,
    pub instruments: Vec<SurveyInstrument>,
}

impl SurveySpec {
    pub fn instrument(&self, name: &str) -> Option<&SurveyInstrument> {
        self.instruments.iter().find(|inst| inst.name == name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FieldOfViewError {
    #[error("Field of view extents must be positive and finite, got {0}x{1}")]
    InvalidExtent(f64, f64),
}

/// Rectangular field of view
///
/// Serialized as a two element `[x, y]` array in arcminutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct FieldOfView {
    x_arcmin: f64,
    y_arcmin: f64,
}

impl FieldOfView {
    pub fn new(x_arcmin: f64, y_arcmin: f64) -> Result<Self, FieldOfViewError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(x_arcmin) || !valid(y_arcmin) {
            return Err(FieldOfViewError::InvalidExtent(x_arcmin, y_arcmin));
        }
        Ok(Self { x_arcmin, y_arcmin })
    }

    pub fn x_arcmin(&self) -> f64 {
        self.x_arcmin
    }

    pub fn y_arcmin(&self) -> f64 {
        self.y_arcmin
    }

    /// Largest side of the field in arcminutes
    pub fn max_extent(&self) -> f64 {
        self.x_arcmin.max(self.y_arcmin)
    }
}

impl TryFrom<[f64; 2]> for FieldOfView {
    type Error = FieldOfViewError;

    fn try_from(extent: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(extent[0], extent[1])
    }
}

impl From<FieldOfView> for [f64; 2] {
    fn from(fov: FieldOfView) -> Self {
        [fov.x_arcmin, fov.y_arcmin]
    }
}

/// Static description of one telescope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeSpec {
    pub name: String,
    pub color: TelescopeColor,
    /// Primary mirror diameter in meters
    pub mirror: f64,
    pub fov: FieldOfView,
    pub instruments: Vec<InstrumentSpec>,
    #[serde(default)]
    pub surveys: Vec<SurveySpec>,
}

impl TelescopeSpec {
    pub fn instrument(&self, name: &str) -> Option<&InstrumentSpec> {
        self.instruments.iter().find(|inst| inst.name == name)
    }

    pub fn survey(&self, name: &str) -> Option<&SurveySpec> {
        self.surveys.iter().find(|survey| survey.name == name)
    }

    pub fn instrument_names(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|inst| inst.name.as_str())
    }
}
