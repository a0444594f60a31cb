//! Band coverage page: one notch per band, rows grouped by telescope.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

use super::{
    draw_legend, draw_styled_line, legend_height, rgb, LegendItem, RenderChart, RenderError, FONT,
};
use crate::layout::{BandLabel, BandLayout, BandNotch, Glyph, NOTCH_ALPHA};

const CANVAS: (u32, u32) = (1500, 1000);
const LABEL_FONT_SIZE: u32 = 10;
const STROKE_WIDTH: u32 = 2;

pub struct BandsChart<'a> {
    layout: &'a BandLayout,
}

impl<'a> BandsChart<'a> {
    pub fn new(layout: &'a BandLayout) -> Self {
        Self { layout }
    }
}

/// Plotters rotates text clockwise, counter-clockwise angles are mapped onto that
fn font_rotation(degrees: f64) -> FontTransform {
    match (degrees.rem_euclid(360.0) / 90.0).round() as u32 % 4 {
        1 => FontTransform::Rotate270,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate90,
        _ => FontTransform::None,
    }
}

/// One legend entry per instrument, in the instrument's line style
fn legend_items(layout: &BandLayout) -> Vec<LegendItem> {
    layout
        .legends()
        .map(|legend| LegendItem {
            label: legend.label.clone(),
            color: rgb(legend.color),
            style: legend.style,
        })
        .collect()
}

/// Rising edge, flat top and falling edge as one polyline
fn notch_outline(notch: &BandNotch) -> Vec<(f64, f64)> {
    vec![
        notch.left_edge[0],
        notch.left_edge[1],
        notch.right_edge[0],
        notch.right_edge[1],
    ]
}

impl RenderChart for BandsChart<'_> {
    fn canvas_size(&self) -> (u32, u32) {
        CANVAS
    }

    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        root.fill(&WHITE)?;

        let items = legend_items(self.layout);
        let (_, height) = root.dim_in_pixel();
        let (plot_area, legend_area) = root.split_vertically(height - legend_height(items.len()));

        let (x_min, x_max) = self.layout.x_range();
        let (y_min, y_max) = self.layout.y_range();

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(20)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .y_labels(0)
            .x_desc("Wavelength (nm)")
            .axis_desc_style((FONT, 20))
            .draw()?;

        for glyph in self.layout.glyphs() {
            match glyph {
                // Collected into the legend strip below the plot
                Glyph::InstrumentLabelSegment(_) => {}
                Glyph::BandTriangle(notch) => {
                    let stroke = rgb(notch.color).mix(NOTCH_ALPHA).stroke_width(STROKE_WIDTH);
                    draw_styled_line(&mut chart, notch_outline(notch), stroke, notch.style)?;
                }
                Glyph::BandLabel(BandLabel {
                    x,
                    y,
                    text,
                    color,
                    rotation_deg,
                }) => {
                    let style = (FONT, LABEL_FONT_SIZE)
                        .into_font()
                        .transform(font_rotation(*rotation_deg))
                        .color(&rgb(*color));
                    chart.draw_series(std::iter::once(Text::new(text.clone(), (*x, *y), style)))?;
                }
            }
        }

        draw_legend(&legend_area, &items, STROKE_WIDTH)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout, Baseline};
    use crate::render::{legend_slots, swatch_segments};
    use crate::Selection;
    use telescopes::{LineStyle, TelescopeCatalog, TelescopeColor};

    #[test]
    fn test_font_rotation() {
        assert!(matches!(font_rotation(90.0), FontTransform::Rotate270));
        assert!(matches!(font_rotation(0.0), FontTransform::None));
        assert!(matches!(font_rotation(-90.0), FontTransform::Rotate90));
        assert!(matches!(font_rotation(180.0), FontTransform::Rotate180));
    }

    #[test]
    fn test_notch_outline_order() {
        let notch = BandNotch {
            left_edge: [(490.0, -1.0), (510.0, 8.9)],
            right_edge: [(590.0, 8.9), (610.0, -1.0)],
            baseline: Baseline {
                y: 8.9,
                x_start: 510.0,
                x_end: 590.0,
            },
            color: TelescopeColor::new(0, 0, 0),
            style: LineStyle::Solid,
        };

        let outline = notch_outline(&notch);
        assert_eq!(outline.len(), 4);
        assert_eq!(outline[0], (490.0, -1.0));
        assert_eq!(outline[3], (610.0, -1.0));
    }

    #[test]
    fn test_canvas_size() {
        let layout = BandLayout::default();
        assert_eq!(BandsChart::new(&layout).canvas_size(), (1500, 1000));
    }

    #[test]
    fn test_legend_keeps_instrument_line_style() {
        let catalog = TelescopeCatalog::builtin();
        let selection = Selection::new()
            .with_band("Euclid", "VIS", "VIS")
            .with_band("Euclid", "NISP", "Y");
        let items = legend_items(&layout(catalog, &selection).unwrap());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Euclid VIS");
        assert_eq!(items[0].style, LineStyle::Solid);
        assert_eq!(items[1].label, "Euclid NISP");
        assert_eq!(items[1].style, LineStyle::Dashed);

        // The dashed instrument gets a broken swatch, the solid one a single stroke
        assert_eq!(swatch_segments((0, 0), 30, items[0].style).len(), 1);
        assert!(swatch_segments((0, 0), 30, items[1].style).len() > 1);
    }

    #[test]
    fn test_legend_sits_below_plot_in_one_row() {
        let catalog = TelescopeCatalog::builtin();
        let selection = Selection::new()
            .with_band("Euclid", "VIS", "VIS")
            .with_band("JWST", "NIRCam", "F200W")
            .with_band("HST", "WFC3", "F160W");
        let items = legend_items(&layout(catalog, &selection).unwrap());
        assert_eq!(items.len(), 3);

        let strip = legend_height(items.len());
        assert!(strip > 0 && strip < CANVAS.1 / 10);

        // One column per instrument: every entry shares the first row
        let slots = legend_slots(items.len(), CANVAS.0);
        assert!(slots.iter().all(|&(_, y)| y == slots[0].1));
        assert!(slots.windows(2).all(|pair| pair[1].0 > pair[0].0));
    }
}
