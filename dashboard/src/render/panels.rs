//! Sample image pages: titled panels two to a row.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{RenderChart, RenderError, FONT};
use crate::imagery::colormap::{bone, normalize};
use crate::imagery::{SampleGallery, SamplePanel};

const CANVAS_WIDTH: u32 = 1000;
const ROW_HEIGHT: u32 = 500;
const TITLE_FONT_SIZE: u32 = 20;

pub struct GalleryChart<'a> {
    gallery: &'a SampleGallery,
}

impl<'a> GalleryChart<'a> {
    pub fn new(gallery: &'a SampleGallery) -> Self {
        Self { gallery }
    }
}

/// Scale and offset that fit an image into a cell, preserving aspect ratio
fn fit_image(image: (usize, usize), cell: (u32, u32)) -> Option<(f64, (u32, u32))> {
    let (rows, cols) = image;
    let (width, height) = cell;
    if rows == 0 || cols == 0 || width == 0 || height == 0 {
        return None;
    }

    let scale = (width as f64 / cols as f64).min(height as f64 / rows as f64);
    let drawn_w = (cols as f64 * scale).floor() as u32;
    let drawn_h = (rows as f64 * scale).floor() as u32;
    Some((scale, ((width - drawn_w) / 2, (height - drawn_h) / 2)))
}

/// Draw one panel with nearest-neighbour sampling, row 0 at the top
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &SamplePanel,
) -> Result<(), RenderError> {
    let inner = area.titled(&panel.title, (FONT, TITLE_FONT_SIZE))?;
    let (rows, cols) = panel.image.dim();

    let Some((scale, (x0, y0))) = fit_image((rows, cols), inner.dim_in_pixel()) else {
        return Ok(());
    };

    let drawn_w = (cols as f64 * scale).floor() as u32;
    let drawn_h = (rows as f64 * scale).floor() as u32;

    for py in 0..drawn_h {
        let row = ((py as f64 / scale) as usize).min(rows - 1);
        for px in 0..drawn_w {
            let col = ((px as f64 / scale) as usize).min(cols - 1);
            let t = normalize(panel.image[[row, col]], panel.vmin, panel.vmax);
            let (r, g, b) = bone(t);
            inner.draw_pixel(((x0 + px) as i32, (y0 + py) as i32), &RGBColor(r, g, b))?;
        }
    }

    Ok(())
}

impl RenderChart for GalleryChart<'_> {
    fn canvas_size(&self) -> (u32, u32) {
        let rows = self.gallery.grid_rows().max(1) as u32;
        (CANVAS_WIDTH, rows * ROW_HEIGHT)
    }

    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        root.fill(&WHITE)?;

        let rows = self.gallery.grid_rows().max(1);
        let cells = root.split_evenly((rows, SampleGallery::COLUMNS));

        for (panel, cell) in self.gallery.panels.iter().zip(&cells) {
            draw_panel(cell, panel)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_square_into_wide_cell() {
        let (scale, offset) = fit_image((100, 100), (500, 400)).unwrap();
        assert_eq!(scale, 4.0);
        assert_eq!(offset, (50, 0));
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(fit_image((0, 10), (100, 100)).is_none());
        assert!(fit_image((10, 10), (0, 100)).is_none());
    }

    #[test]
    fn test_canvas_grows_with_rows() {
        let mut gallery = SampleGallery::default();
        assert_eq!(GalleryChart::new(&gallery).canvas_size(), (1000, 500));

        let panel = SamplePanel {
            title: "HST, COSMOS ACS".into(),
            image: ndarray::Array2::zeros((2, 2)),
            vmin: 0.0,
            vmax: 1.0,
            placeholder: false,
        };
        for _ in 0..3 {
            gallery.panels.push(panel.clone());
        }
        assert_eq!(GalleryChart::new(&gallery).canvas_size(), (1000, 1000));
    }
}
