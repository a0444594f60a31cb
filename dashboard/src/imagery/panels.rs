//! Galleries of survey sample images.
//!
//! A gallery holds one panel per selected telescope/survey/instrument in
//! selection order, plus the notices collected for samples that could not be
//! loaded. Panels are arranged two to a row by the renderer.

use std::path::{Path, PathBuf};

use log::{info, warn};
use ndarray::{s, Array2};
use telescopes::{LookupError, TelescopeCatalog};

use super::fits::read_first_image;
use super::npy::read_cutout;
use super::placeholder::{placeholder_cross, PLACEHOLDER_SIZE};
use super::zscale::ZScaleInterval;
use crate::selection::{PanelKey, SurveySelection};

/// Cutout width in pixels at the reference pixel scale
const GALAXY_REFERENCE_PIXELS: f64 = 237.0;
/// Pixel scale in arcsec/pixel the reference width was measured at
const GALAXY_REFERENCE_SCALE: f64 = 0.03;

/// One titled image in a gallery
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePanel {
    pub title: String,
    pub image: Array2<f64>,
    /// Display value mapped to the bottom of the colormap
    pub vmin: f64,
    /// Display value mapped to the top of the colormap
    pub vmax: f64,
    /// True when the sample was missing and `image` is the placeholder cross
    pub placeholder: bool,
}

/// Panels ready to be drawn plus the notices for missing samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleGallery {
    pub panels: Vec<SamplePanel>,
    pub notices: Vec<String>,
}

impl SampleGallery {
    pub const COLUMNS: usize = 2;

    /// Rows needed to lay the panels out two to a row
    pub fn grid_rows(&self) -> usize {
        self.panels.len().div_ceil(Self::COLUMNS)
    }

    /// Grid cell `(row, column)` of the panel at `index`
    pub fn cell(index: usize) -> (usize, usize) {
        (index / Self::COLUMNS, index % Self::COLUMNS)
    }

    /// Whether the last grid row has an unused cell
    pub fn has_empty_cell(&self) -> bool {
        self.panels.len() % Self::COLUMNS != 0
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Field panel title, `"JWST, CEERS NIRCam"`
pub fn panel_title(key: &PanelKey) -> String {
    format!("{}, {} {}", key.telescope, key.survey, key.instrument)
}

/// Galaxy panel title, `"JWST, CEERS, NIRCam"`
pub fn galaxy_title(key: &PanelKey) -> String {
    format!("{}, {}, {}", key.telescope, key.survey, key.instrument)
}

fn missing_notice(key: &PanelKey) -> String {
    format!(
        "Sorry, {} {} {} is not implemented yet!",
        key.telescope, key.survey, key.instrument
    )
}

/// `<data>/<telescope>_<instrument>_<survey>.fits`
pub fn field_path(data_dir: &Path, key: &PanelKey) -> PathBuf {
    data_dir.join(format!(
        "{}_{}_{}.fits",
        key.telescope, key.instrument, key.survey
    ))
}

/// `<data>/gal_<telescope>_<instrument>_<survey>.npy`
pub fn galaxy_path(data_dir: &Path, key: &PanelKey) -> PathBuf {
    data_dir.join(format!(
        "gal_{}_{}_{}.npy",
        key.telescope, key.instrument, key.survey
    ))
}

/// Display size in pixels of a galaxy cutout taken at `pix_scale` arcsec/pixel
pub fn galaxy_display_size(pix_scale: f64) -> f64 {
    GALAXY_REFERENCE_PIXELS * GALAXY_REFERENCE_SCALE / pix_scale
}

/// Surround `image` with `pad` rows and columns of zeros on every side
pub fn pad_image(image: &Array2<f64>, pad: usize) -> Array2<f64> {
    if pad == 0 {
        return image.clone();
    }

    let (rows, cols) = image.dim();
    let mut padded = Array2::zeros((rows + 2 * pad, cols + 2 * pad));
    padded
        .slice_mut(s![pad..pad + rows, pad..pad + cols])
        .assign(image);
    padded
}

fn min_max(image: &Array2<f64>) -> Option<(f64, f64)> {
    image
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn placeholder_panel(title: String) -> SamplePanel {
    SamplePanel {
        title,
        image: placeholder_cross(PLACEHOLDER_SIZE),
        vmin: 0.0,
        vmax: 1.0,
        placeholder: true,
    }
}

/// Build the field image gallery
///
/// Loaded images share a single display range spanning their zscale limits.
/// Missing samples become placeholders with a notice.
pub fn field_gallery(selection: &SurveySelection, data_dir: &Path) -> SampleGallery {
    let zscale = ZScaleInterval::default();
    let mut gallery = SampleGallery::default();
    let mut shared: Option<(f64, f64)> = None;

    for key in selection.panels() {
        let path = field_path(data_dir, key);
        match read_first_image(&path) {
            Ok(image) => {
                if let Some((lo, hi)) = zscale.get_limits(&image) {
                    shared = Some(match shared {
                        None => (lo, hi),
                        Some((vmin, vmax)) => (vmin.min(lo), vmax.max(hi)),
                    });
                }
                info!("Loaded field image {}", path.display());
                gallery.panels.push(SamplePanel {
                    title: panel_title(key),
                    image,
                    vmin: 0.0,
                    vmax: 1.0,
                    placeholder: false,
                });
            }
            Err(e) => {
                warn!("{e}");
                gallery.notices.push(missing_notice(key));
                gallery.panels.push(placeholder_panel(panel_title(key)));
            }
        }
    }

    let (vmin, vmax) = shared.unwrap_or((0.0, 1.0));
    for panel in &mut gallery.panels {
        panel.vmin = vmin;
        panel.vmax = vmax;
    }

    gallery
}

/// Build the galaxy cutout gallery
///
/// With `same_size` set, every panel, placeholders included, is padded toward
/// the largest display size of the loaded cutouts so galaxies appear at a
/// common angular scale. Each loaded panel is scaled to its own pixel range.
pub fn galaxy_gallery(
    catalog: &TelescopeCatalog,
    selection: &SurveySelection,
    data_dir: &Path,
    same_size: bool,
) -> Result<SampleGallery, LookupError> {
    let mut gallery = SampleGallery::default();
    let mut loaded: Vec<Option<Array2<f64>>> = Vec::with_capacity(selection.len());
    let mut sizes = Vec::new();

    for key in selection.panels() {
        let pix_scale = catalog.pixel_scale(&key.telescope, &key.survey, &key.instrument)?;
        let path = galaxy_path(data_dir, key);
        match read_cutout(&path) {
            Ok(image) => {
                info!("Loaded galaxy cutout {}", path.display());
                sizes.push(galaxy_display_size(pix_scale));
                loaded.push(Some(image));
            }
            Err(e) => {
                warn!("{e}");
                gallery.notices.push(missing_notice(key));
                loaded.push(None);
            }
        }
    }

    let max_size = sizes.iter().copied().fold(None, |acc: Option<f64>, s| {
        Some(acc.map_or(s, |m| m.max(s)))
    });

    for (key, image) in selection.panels().iter().zip(loaded) {
        let mut panel = match image {
            Some(image) => SamplePanel {
                title: galaxy_title(key),
                image,
                vmin: 0.0,
                vmax: 1.0,
                placeholder: false,
            },
            None => placeholder_panel(galaxy_title(key)),
        };

        if let (true, Some(max_size)) = (same_size, max_size) {
            let pad = ((max_size - panel.image.nrows() as f64) / 2.0).floor().max(0.0) as usize;
            panel.image = pad_image(&panel.image, pad);
        }

        if !panel.placeholder {
            (panel.vmin, panel.vmax) = min_max(&panel.image).unwrap_or((0.0, 1.0));
        }
        gallery.panels.push(panel);
    }

    Ok(gallery)
}
