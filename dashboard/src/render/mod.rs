//! Drawing the dashboard pages with plotters.
//!
//! Every page is a scene value built elsewhere in the crate; this module only
//! maps scenes onto a plotters drawing area. The output format follows the file
//! extension so each page can be written as PNG or SVG.

use std::path::Path;

use log::info;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use telescopes::{LineStyle, TelescopeColor};
use thiserror::Error;

pub mod bands;
pub mod fov;
pub mod mirrors;
pub mod panels;

pub use bands::BandsChart;
pub use fov::FovChart;
pub use mirrors::MirrorsChart;
pub use panels::GalleryChart;

/// Font family used for every caption, label and legend
pub(crate) const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing error: {0}")]
    Drawing(String),

    #[error("Unsupported output format {0:?}; expected .png or .svg")]
    UnsupportedFormat(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(e.to_string())
    }
}

/// Image format written by [`render_to_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Pick the format from the file extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A page that can be drawn onto any plotters backend
pub trait RenderChart {
    /// Canvas size in pixels `(width, height)`
    fn canvas_size(&self) -> (u32, u32);

    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError>;
}

/// Draw `chart` and write it to `path`
pub fn render_to_file<C: RenderChart>(chart: &C, path: &Path) -> Result<(), RenderError> {
    let size = chart.canvas_size();

    match OutputFormat::from_path(path)? {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            chart.draw_on(&root)?;
            root.present()?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            chart.draw_on(&root)?;
            root.present()?;
        }
    }

    info!("Saved {}x{} chart to {}", size.0, size.1, path.display());
    Ok(())
}

/// Chart context with floating point axes, as used by every page
pub(crate) type FloatChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub(crate) fn rgb(color: TelescopeColor) -> RGBColor {
    let (r, g, b) = color.to_tuple();
    RGBColor(r, g, b)
}

/// Dash and gap lengths in pixels, or `None` for a continuous line
pub(crate) fn dash_pattern(style: LineStyle) -> Option<(u32, u32)> {
    match style {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some((10, 6)),
        LineStyle::Dotted => Some((2, 4)),
        LineStyle::DashDot => Some((8, 4)),
    }
}

/// Draw a polyline with the given stroke and dash style
pub(crate) fn draw_styled_line<DB: DrawingBackend>(
    chart: &mut FloatChart<'_, DB>,
    points: Vec<(f64, f64)>,
    stroke: ShapeStyle,
    style: LineStyle,
) -> Result<(), RenderError> {
    match dash_pattern(style) {
        None => {
            chart.draw_series(LineSeries::new(points, stroke))?;
        }
        Some((size, spacing)) => {
            chart.draw_series(DashedLineSeries::new(points, size, spacing, stroke))?;
        }
    }
    Ok(())
}

/// Length of a legend swatch in pixels
const SWATCH_LENGTH: i32 = 30;
/// Height of one legend row in pixels
const LEGEND_ROW_HEIGHT: i32 = 24;
/// Space around the legend block and between swatch and label
const LEGEND_PADDING: i32 = 8;
/// Most legend entries placed side by side before wrapping
const MAX_LEGEND_COLUMNS: usize = 6;
const LEGEND_FONT_SIZE: u32 = 15;

/// One legend entry: a line swatch drawn in the series' color and dash style
#[derive(Debug, Clone)]
pub(crate) struct LegendItem {
    pub label: String,
    pub color: RGBColor,
    pub style: LineStyle,
}

/// Columns used for `count` entries: one per entry, wrapping past the maximum
pub(crate) fn legend_columns(count: usize) -> usize {
    count.clamp(1, MAX_LEGEND_COLUMNS)
}

/// Pixel height of the strip holding `count` legend entries
pub(crate) fn legend_height(count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    let rows = count.div_ceil(legend_columns(count)) as i32;
    (rows * LEGEND_ROW_HEIGHT + 2 * LEGEND_PADDING) as u32
}

/// Top-left corner of each legend entry inside a strip `width` pixels wide
pub(crate) fn legend_slots(count: usize, width: u32) -> Vec<(i32, i32)> {
    let columns = legend_columns(count);
    let column_width = width as i32 / columns as i32;
    (0..count)
        .map(|i| {
            (
                (i % columns) as i32 * column_width + LEGEND_PADDING,
                (i / columns) as i32 * LEGEND_ROW_HEIGHT + LEGEND_PADDING,
            )
        })
        .collect()
}

/// Pieces of a horizontal swatch starting at `start`, following the dash pattern of `style`
pub(crate) fn swatch_segments(start: (i32, i32), length: i32, style: LineStyle) -> Vec<[(i32, i32); 2]> {
    let (x0, y) = start;
    match dash_pattern(style) {
        None => vec![[(x0, y), (x0 + length, y)]],
        Some((dash, gap)) => {
            let (dash, period) = (dash as i32, (dash + gap) as usize);
            (0..length)
                .step_by(period)
                .map(|offset| [(x0 + offset, y), (x0 + (offset + dash).min(length), y)])
                .collect()
        }
    }
}

/// Draw legend entries in rows across `area`, which must be [`legend_height`] tall
pub(crate) fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    stroke_width: u32,
) -> Result<(), RenderError> {
    let (width, _) = area.dim_in_pixel();
    let label_style = TextStyle::from((FONT, LEGEND_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (item, (x, y)) in items.iter().zip(legend_slots(items.len(), width)) {
        let line_y = y + LEGEND_ROW_HEIGHT / 2;
        for [a, b] in swatch_segments((x, line_y), SWATCH_LENGTH, item.style) {
            area.draw(&PathElement::new(vec![a, b], item.color.stroke_width(stroke_width)))?;
        }
        area.draw(&Text::new(
            item.label.clone(),
            (x + SWATCH_LENGTH + LEGEND_PADDING, line_y),
            label_style.clone(),
        ))?;
    }
    Ok(())
}
