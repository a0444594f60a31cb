//! Primary mirror page: mirror outlines with a human for scale.

use plotters::coord::Shift;
use plotters::prelude::*;
use telescopes::LineStyle;

use super::{
    draw_legend, draw_styled_line, legend_height, rgb, LegendItem, RenderChart, RenderError, FONT,
};
use crate::mirrors::{MirrorScene, HUMAN_HEIGHT_M, MIRROR_ALPHA};

const CANVAS: (u32, u32) = (1000, 1000);
const STROKE_WIDTH: u32 = 3;

pub struct MirrorsChart<'a> {
    scene: &'a MirrorScene,
}

impl<'a> MirrorsChart<'a> {
    pub fn new(scene: &'a MirrorScene) -> Self {
        Self { scene }
    }
}

/// Standing figure centered on the origin
fn human_marker() -> Vec<(f64, f64)> {
    let half = HUMAN_HEIGHT_M / 2.0;
    vec![(0.0, -half), (0.0, half)]
}

/// Mirror entries in selection order, dashed repeats included, then the human
fn legend_items(scene: &MirrorScene) -> Vec<LegendItem> {
    scene
        .mirrors
        .iter()
        .map(|mirror| LegendItem {
            label: format!("{} ({} m)", mirror.telescope, mirror.diameter_m),
            color: rgb(mirror.color),
            style: mirror.style,
        })
        .chain(std::iter::once(LegendItem {
            label: format!("Human ({HUMAN_HEIGHT_M} m)"),
            color: BLACK,
            style: LineStyle::Solid,
        }))
        .collect()
}

impl RenderChart for MirrorsChart<'_> {
    fn canvas_size(&self) -> (u32, u32) {
        CANVAS
    }

    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        root.fill(&WHITE)?;

        let items = legend_items(self.scene);
        let (_, height) = root.dim_in_pixel();
        let (plot_area, legend_area) = root.split_vertically(height - legend_height(items.len()));

        let h = self.scene.half_extent_m;
        let mut chart = ChartBuilder::on(&plot_area)
            .caption("Primary Mirror Size", (FONT, 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-h..h, -h..h)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Meters")
            .y_desc("Meters")
            .draw()?;

        for mirror in &self.scene.mirrors {
            let stroke = rgb(mirror.color).mix(MIRROR_ALPHA).stroke_width(STROKE_WIDTH);
            draw_styled_line(&mut chart, mirror.outline(), stroke, mirror.style)?;
        }

        chart.draw_series(LineSeries::new(human_marker(), BLACK.stroke_width(6)))?;

        draw_legend(&legend_area, &items, STROKE_WIDTH)?;

        Ok(())
    }
}
