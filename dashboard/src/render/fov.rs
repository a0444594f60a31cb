//! Field of view page: translucent field rectangles over the full Moon.

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{rgb, RenderChart, RenderError, FONT};
use crate::fov::{FovScene, FIELD_ALPHA};

const CANVAS: (u32, u32) = (800, 800);

/// Fill and outline of the Moon reference disc
const MOON_FILL: RGBColor = RGBColor(60, 60, 60);
const MOON_EDGE: RGBColor = RED;
/// Edge of the black square behind the fields
const FRAME_EDGE: RGBColor = RED;

pub struct FovChart<'a> {
    scene: &'a FovScene,
}

impl<'a> FovChart<'a> {
    pub fn new(scene: &'a FovScene) -> Self {
        Self { scene }
    }
}

impl RenderChart for FovChart<'_> {
    fn canvas_size(&self) -> (u32, u32) {
        CANVAS
    }

    fn draw_on<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        root.fill(&BLACK)?;

        let h = self.scene.half_extent_arcmin;
        let mut chart = ChartBuilder::on(root)
            .caption("Field Of View", (FONT, 28).into_font().color(&WHITE))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-h..h, -h..h)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .axis_style(WHITE)
            .label_style((FONT, 14).into_font().color(&WHITE))
            .axis_desc_style((FONT, 16).into_font().color(&WHITE))
            .x_desc("arcmin")
            .y_desc("arcmin")
            .draw()?;

        let frame = self.scene.window_frame();
        chart.draw_series(std::iter::once(Rectangle::new(frame, BLACK.filled())))?;
        chart.draw_series(std::iter::once(Rectangle::new(frame, FRAME_EDGE.stroke_width(2))))?;

        let moon = self.scene.moon_outline();
        chart.draw_series(std::iter::once(Polygon::new(moon.clone(), MOON_FILL.filled())))?;
        chart
            .draw_series(LineSeries::new(moon, MOON_EDGE.stroke_width(2)))?
            .label("Moon")
            .legend(|(x, y)| Circle::new((x + 10, y), 6, MOON_EDGE.filled()));

        for field in &self.scene.fields {
            let color = rgb(field.color);
            let [lower, upper] = field.corners();
            chart.draw_series(std::iter::once(Rectangle::new(
                [lower, upper],
                color.mix(FIELD_ALPHA).filled(),
            )))?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [lower, upper],
                    WHITE.stroke_width(1),
                )))?
                .label(field.telescope.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(BLACK.mix(0.7))
            .border_style(WHITE)
            .label_font((FONT, 16).into_font().color(&WHITE))
            .draw()?;

        Ok(())
    }
}
