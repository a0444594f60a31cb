//! Primary mirror size comparison.
//!
//! Mirrors are drawn as concentric outlines centered on the origin, in meters.
//! A mirror whose diameter already appeared earlier in the selection is dashed
//! so both outlines stay visible.

use std::f64::consts::TAU;

use telescopes::{LineStyle, TelescopeCatalog, TelescopeColor};

use crate::SceneError;

/// Height of the human scale reference in meters
pub const HUMAN_HEIGHT_M: f64 = 1.8;

/// Opacity of mirror outlines
pub const MIRROR_ALPHA: f64 = 0.8;

/// Segments used to approximate each outline
const OUTLINE_SEGMENTS: usize = 360;

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorOutline {
    pub telescope: String,
    pub diameter_m: f64,
    pub color: TelescopeColor,
    pub style: LineStyle,
}

impl MirrorOutline {
    pub fn radius_m(&self) -> f64 {
        self.diameter_m / 2.0
    }

    /// Closed polyline around the origin
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let r = self.radius_m();
        (0..=OUTLINE_SEGMENTS)
            .map(|i| {
                let theta = TAU * i as f64 / OUTLINE_SEGMENTS as f64;
                (r * theta.cos(), r * theta.sin())
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorScene {
    pub mirrors: Vec<MirrorOutline>,
    /// Both axes span `-half_extent_m..half_extent_m`
    pub half_extent_m: f64,
}

/// Build the mirror comparison for the given telescopes, in order
///
/// # Errors
///
/// [`SceneError::EmptySelection`] if no telescope is given, since there is no
/// largest mirror to scale the axes to, or a lookup error for unknown names.
pub fn mirror_scene(
    catalog: &TelescopeCatalog,
    telescopes: &[String],
) -> Result<MirrorScene, SceneError> {
    let mut mirrors: Vec<MirrorOutline> = Vec::with_capacity(telescopes.len());

    for name in telescopes {
        let telescope = catalog.telescope(name)?;
        let repeated = mirrors.iter().any(|m| m.diameter_m == telescope.mirror);

        mirrors.push(MirrorOutline {
            telescope: telescope.name.clone(),
            diameter_m: telescope.mirror,
            color: telescope.color,
            style: if repeated {
                LineStyle::Dashed
            } else {
                LineStyle::Solid
            },
        });
    }

    let largest = mirrors
        .iter()
        .map(|m| m.diameter_m)
        .fold(f64::NEG_INFINITY, f64::max);
    if !largest.is_finite() {
        return Err(SceneError::EmptySelection);
    }

    Ok(MirrorScene {
        mirrors,
        half_extent_m: (largest + 1.0) / 2.0,
    })
}
