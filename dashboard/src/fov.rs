//! Field of view comparison, in arcminutes, against the full Moon.

use std::f64::consts::TAU;

use telescopes::{TelescopeCatalog, TelescopeColor};

use crate::SceneError;

/// Apparent diameter of the full Moon
pub const MOON_DIAMETER_ARCMIN: f64 = 31.0;

/// Half-extent used when every field fits inside it
const NARROW_HALF_EXTENT: f64 = 30.0;

/// Half-extent for survey cameras with degree-scale fields
const WIDE_HALF_EXTENT: f64 = 120.0;

/// Opacity of field fills
pub const FIELD_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRect {
    pub telescope: String,
    pub x_arcmin: f64,
    pub y_arcmin: f64,
    pub color: TelescopeColor,
}

impl FieldRect {
    /// Lower-left and upper-right corners, centered on the origin
    pub fn corners(&self) -> [(f64, f64); 2] {
        let (hx, hy) = (self.x_arcmin / 2.0, self.y_arcmin / 2.0);
        [(-hx, -hy), (hx, hy)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FovScene {
    pub fields: Vec<FieldRect>,
    /// Both axes span `-half_extent_arcmin..half_extent_arcmin`
    pub half_extent_arcmin: f64,
}

impl FovScene {
    /// Polygon approximating the Moon disc at the origin
    pub fn moon_outline(&self) -> Vec<(f64, f64)> {
        let r = MOON_DIAMETER_ARCMIN / 2.0;
        (0..=180)
            .map(|i| {
                let theta = TAU * i as f64 / 180.0;
                (r * theta.cos(), r * theta.sin())
            })
            .collect()
    }

    /// Opposite corners of the square window the fields are drawn in
    pub fn window_frame(&self) -> [(f64, f64); 2] {
        let h = self.half_extent_arcmin;
        [(-h, -h), (h, h)]
    }
}

/// Build the field of view comparison for the given telescopes, in order
///
/// The axes cover +/-30 arcmin unless a field is wider than that window, in
/// which case they widen to +/-120 arcmin. An empty selection still shows the
/// Moon reference.
pub fn fov_scene(catalog: &TelescopeCatalog, telescopes: &[String]) -> Result<FovScene, SceneError> {
    let fields = telescopes
        .iter()
        .map(|name| {
            let telescope = catalog.telescope(name)?;
            Ok(FieldRect {
                telescope: telescope.name.clone(),
                x_arcmin: telescope.fov.x_arcmin(),
                y_arcmin: telescope.fov.y_arcmin(),
                color: telescope.color,
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let widest = fields
        .iter()
        .map(|f| f.x_arcmin.max(f.y_arcmin))
        .fold(0.0, f64::max);

    let half_extent_arcmin = if widest > 2.0 * NARROW_HALF_EXTENT {
        WIDE_HALF_EXTENT
    } else {
        NARROW_HALF_EXTENT
    };

    Ok(FovScene {
        fields,
        half_extent_arcmin,
    })
}
