//! Telescope instrument comparison dashboard.
//!
//! Builds the pages of the comparison dashboard from a [`TelescopeCatalog`]:
//!
//! - [`layout`]: band coverage of the selected instruments, stacked in rows
//! - [`mirrors`]: primary mirror sizes next to a human
//! - [`fov`]: fields of view against the full Moon
//! - [`imagery`]: sample field images and galaxy cutouts per survey
//!
//! Each page is first computed as a plain scene value and then drawn by
//! [`render`], so the geometry can be inspected and tested without a backend.
//!
//! [`TelescopeCatalog`]: telescopes::TelescopeCatalog

use telescopes::LookupError;
use thiserror::Error;

pub mod fov;
pub mod imagery;
pub mod layout;
pub mod mirrors;
pub mod render;
pub mod selection;
pub mod shared_args;

pub use fov::{fov_scene, FovScene};
pub use layout::{layout, BandLayout, Glyph};
pub use mirrors::{mirror_scene, MirrorScene};
pub use render::{render_to_file, RenderChart, RenderError};
pub use selection::{Selection, SelectionEntry, SurveyEntry, SurveySelection};

/// Errors raised while building the mirror and field of view scenes
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("No telescopes selected")]
    EmptySelection,
}
