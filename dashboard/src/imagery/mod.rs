//! Sample imaging shown next to the instrument comparisons.
//!
//! Field images come from FITS files and galaxy cutouts from NumPy `.npy`
//! files, both named after the telescope, instrument and survey. A missing or
//! unreadable file is never fatal: a placeholder cross is shown instead and a
//! notice is returned for the user.

use std::path::PathBuf;

use thiserror::Error;

pub mod colormap;
pub mod fits;
pub mod npy;
pub mod panels;
pub mod placeholder;
pub mod zscale;

pub use colormap::bone;
pub use panels::{field_gallery, galaxy_gallery, SampleGallery, SamplePanel};
pub use placeholder::placeholder_cross;
pub use zscale::ZScaleInterval;

/// Errors raised while reading one sample image
///
/// These are recovered by the gallery builders and never reach the caller.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Sample file not found: {}", .0.display())]
    MissingDataFile(PathBuf),

    #[error("I/O error reading {path}: {detail}", path = .0.display(), detail = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("FITS error reading {path}: {detail}", path = .0.display(), detail = .1)]
    Fits(PathBuf, String),

    #[error("NPY error reading {path}: {detail}", path = .0.display(), detail = .1)]
    Npy(PathBuf, String),

    #[error("No 2D image found in {}", .0.display())]
    NoImage(PathBuf),
}
