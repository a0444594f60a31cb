//! Band layout: turns a selection into drawable filter notches.
//!
//! Every selected band becomes a notch, two converging edges joined by a flat
//! top, drawn at its wavelength range, plus a rotated label. Rows are stacked
//! downward from `y = 10`:
//!
//! ```text
//! baseline = 10 - j - k/10
//! ```
//!
//! where `j` counts telescopes (starting at 1) and `k` counts bands across the
//! whole chart (also starting at 1). Because `k` never resets, consecutive
//! bands always sit strictly lower than the previous one, whichever telescope
//! or instrument owns them. Rows for different telescopes stay apart as long
//! as fewer than ten bands precede the next telescope, and the fixed `[-1, 10]`
//! y-axis clips anything whose baseline drops below `-1` (`j + k/10 > 11`).
//!
//! Notch heights are illustrative, not filter transmissions.

use log::debug;
use telescopes::{BandRange, LineStyle, LookupError, TelescopeCatalog, TelescopeColor};

use crate::selection::Selection;

/// Top of the row stack
pub const ROW_TOP: f64 = 10.0;

/// Fixed vertical axis range of the band chart
pub const Y_RANGE: (f64, f64) = (-1.0, ROW_TOP);

/// Each band drops its baseline by `1 / BAND_ROW_DIVISOR`
const BAND_ROW_DIVISOR: f64 = 10.0;

/// Label offsets are scaled by `1 / LABEL_DIVISOR`
const LABEL_DIVISOR: f64 = 30.0;

/// Edge inset is `(max - min) / STEEPNESS_DIVISOR`
const STEEPNESS_DIVISOR: f64 = 15.0;

/// Band labels read bottom to top
pub const LABEL_ROTATION_DEG: f64 = 90.0;

/// Opacity of every notch line
pub const NOTCH_ALPHA: f64 = 0.7;

/// Fraction of the data span added on each side of the wavelength axis
const X_MARGIN: f64 = 0.05;

/// Legend-only entry for one instrument; it has no extent on the wavelength axis
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentLegend {
    /// `"<telescope> <instrument>"`
    pub label: String,
    pub row: f64,
    pub color: TelescopeColor,
    pub style: LineStyle,
}

/// Flat top of a notch: `y` from `x_start` to `x_end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
}

/// Stylized filter response of one band
#[derive(Debug, Clone, PartialEq)]
pub struct BandNotch {
    /// Rising edge from the axis up to the baseline
    pub left_edge: [(f64, f64); 2],
    /// Falling edge from the baseline back down to the axis
    pub right_edge: [(f64, f64); 2],
    pub baseline: Baseline,
    pub color: TelescopeColor,
    pub style: LineStyle,
}

impl BandNotch {
    /// Horizontal extent covered by both edges
    pub fn x_span(&self) -> (f64, f64) {
        (self.left_edge[0].0, self.right_edge[1].0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: TelescopeColor,
    pub rotation_deg: f64,
}

/// A drawable primitive, in the order it must be drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    InstrumentLabelSegment(InstrumentLegend),
    BandTriangle(BandNotch),
    BandLabel(BandLabel),
}

/// Position of the layout cursor: telescope row `j` and running band index `k`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSlot {
    pub telescope_row: usize,
    pub band_index: usize,
}

impl RowSlot {
    fn next_telescope(self) -> Self {
        Self {
            telescope_row: self.telescope_row + 1,
            ..self
        }
    }

    fn next_band(self) -> Self {
        Self {
            band_index: self.band_index + 1,
            ..self
        }
    }

    /// Row of the telescope's legend entries, `10 - j`
    pub fn legend_row(&self) -> f64 {
        ROW_TOP - self.telescope_row as f64
    }

    /// Baseline of the current band, `10 - j - k/10`
    pub fn baseline_y(&self) -> f64 {
        self.legend_row() - self.band_index as f64 / BAND_ROW_DIVISOR
    }

    /// Label height of the current band, `baseline + (10 - j)/30 - k/30`
    pub fn label_y(&self) -> f64 {
        self.baseline_y() + self.legend_row() / LABEL_DIVISOR
            - self.band_index as f64 / LABEL_DIVISOR
    }
}

/// Output of [`layout`]: glyphs in draw order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandLayout {
    glyphs: Vec<Glyph>,
}

impl BandLayout {
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn notches(&self) -> impl Iterator<Item = &BandNotch> {
        self.glyphs.iter().filter_map(|glyph| match glyph {
            Glyph::BandTriangle(notch) => Some(notch),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &BandLabel> {
        self.glyphs.iter().filter_map(|glyph| match glyph {
            Glyph::BandLabel(label) => Some(label),
            _ => None,
        })
    }

    pub fn legends(&self) -> impl Iterator<Item = &InstrumentLegend> {
        self.glyphs.iter().filter_map(|glyph| match glyph {
            Glyph::InstrumentLabelSegment(legend) => Some(legend),
            _ => None,
        })
    }

    /// Wavelength axis range: the notch extent padded by 5% on each side,
    /// or `[0, 1]` when there is nothing to show
    pub fn x_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .notches()
            .map(BandNotch::x_span)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
                (lo.min(a), hi.max(b))
            });

        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }

        let margin = (hi - lo) * X_MARGIN;
        (lo - margin, hi + margin)
    }

    /// Vertical axis range, fixed regardless of content
    pub fn y_range(&self) -> (f64, f64) {
        Y_RANGE
    }
}

/// Notch and label for one band at the given slot
fn band_glyphs(
    name: &str,
    range: &BandRange,
    slot: RowSlot,
    color: TelescopeColor,
    style: LineStyle,
) -> (BandNotch, BandLabel) {
    let (min, max) = (range.min_nm(), range.max_nm());
    let steep = range.width_nm() / STEEPNESS_DIVISOR;
    let y = slot.baseline_y();

    let notch = BandNotch {
        left_edge: [(min - steep, 0.0), (min + steep, y)],
        right_edge: [(max - steep, y), (max + steep, 0.0)],
        baseline: Baseline {
            y,
            x_start: min + steep,
            x_end: max - steep,
        },
        color,
        style,
    };

    let label = BandLabel {
        x: range.center_nm(),
        y: slot.label_y(),
        text: name.to_string(),
        color,
        rotation_deg: LABEL_ROTATION_DEG,
    };

    (notch, label)
}

/// Lay out every selected band of one telescope, continuing from `slot`
fn layout_telescope(
    catalog: &TelescopeCatalog,
    selection: &Selection,
    telescope_name: &str,
    slot: RowSlot,
    glyphs: Vec<Glyph>,
) -> Result<(RowSlot, Vec<Glyph>), LookupError> {
    let telescope = catalog.telescope(telescope_name)?;
    let color = telescope.color;

    selection
        .instruments(telescope_name)
        .iter()
        .try_fold((slot, glyphs), |(slot, mut glyphs), inst_name| {
            let instrument = catalog.instrument(telescope_name, inst_name)?;
            let style = instrument.line_style;

            glyphs.push(Glyph::InstrumentLabelSegment(InstrumentLegend {
                label: format!("{telescope_name} {inst_name}"),
                row: slot.legend_row(),
                color,
                style,
            }));

            selection
                .bands(telescope_name, inst_name)
                .iter()
                .try_fold((slot, glyphs), |(slot, mut glyphs), band_name| {
                    let slot = slot.next_band();
                    let range = catalog.band(telescope_name, inst_name, band_name)?;
                    let (notch, label) = band_glyphs(band_name, range, slot, color, style);

                    debug!(
                        "{telescope_name} {inst_name} {band_name}: j={} k={} baseline={:.2}",
                        slot.telescope_row,
                        slot.band_index,
                        notch.baseline.y
                    );

                    glyphs.push(Glyph::BandTriangle(notch));
                    glyphs.push(Glyph::BandLabel(label));
                    Ok::<_, LookupError>((slot, glyphs))
                })
        })
}

/// Assign rows to every selected band and emit the glyphs to draw
///
/// Telescopes are visited in selection order, then their instruments, then
/// their bands; the emitted order is the draw order. The result depends only
/// on the inputs, so repeated calls give identical layouts.
///
/// # Errors
///
/// Returns [`LookupError`] if the selection names a telescope, instrument or
/// band missing from the catalog. Selections produced by
/// [`Selection::from_entries`] are already validated.
pub fn layout(catalog: &TelescopeCatalog, selection: &Selection) -> Result<BandLayout, LookupError> {
    let (_, glyphs) = selection.telescopes().iter().try_fold(
        (RowSlot::default(), Vec::new()),
        |(slot, glyphs), telescope_name| {
            layout_telescope(catalog, selection, telescope_name, slot.next_telescope(), glyphs)
        },
    )?;

    Ok(BandLayout { glyphs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use telescopes::{InstrumentSpec, NamedBand, TelescopeSpec};

    fn telescope(name: &str, color: TelescopeColor, instruments: Vec<InstrumentSpec>) -> TelescopeSpec {
        TelescopeSpec {
            name: name.to_string(),
            color,
            mirror: 1.0,
            fov: telescopes::FieldOfView::new(10.0, 10.0).unwrap(),
            instruments,
            surveys: Vec::new(),
        }
    }

    fn instrument(name: &str, style: LineStyle, bands: &[(&str, f64, f64)]) -> InstrumentSpec {
        InstrumentSpec {
            name: name.to_string(),
            line_style: style,
            bands: bands
                .iter()
                .map(|&(band, min, max)| NamedBand {
                    name: band.to_string(),
                    min_max: BandRange::new(min, max).unwrap(),
                })
                .collect(),
        }
    }

    fn test_catalog() -> TelescopeCatalog {
        TelescopeCatalog::new(vec![
            telescope(
                "Alpha",
                TelescopeColor::new(255, 0, 0),
                vec![
                    instrument("Cam", LineStyle::Solid, &[("A1", 500.0, 600.0), ("A2", 600.0, 750.0)]),
                    instrument("Spec", LineStyle::Dashed, &[("S1", 1000.0, 1300.0)]),
                ],
            ),
            telescope(
                "Beta",
                TelescopeColor::new(0, 0, 255),
                vec![instrument("Imager", LineStyle::Dotted, &[("B1", 300.0, 450.0)])],
            ),
        ])
        .unwrap()
    }

    fn full_selection() -> Selection {
        Selection::new()
            .with_band("Alpha", "Cam", "A1")
            .with_band("Alpha", "Cam", "A2")
            .with_band("Alpha", "Spec", "S1")
            .with_band("Beta", "Imager", "B1")
    }

    #[test]
    fn test_glyph_counts_match_selection() {
        let selection = full_selection();
        let result = layout(&test_catalog(), &selection).unwrap();

        assert_eq!(result.notches().count(), selection.band_count());
        assert_eq!(result.labels().count(), selection.band_count());
        assert_eq!(result.legends().count(), selection.instrument_count());
        assert_eq!(result.glyphs().len(), 4 * 2 + 3);
    }

    #[test]
    fn test_notch_geometry() {
        let selection = Selection::new().with_band("Alpha", "Cam", "A1");
        let result = layout(&test_catalog(), &selection).unwrap();
        let notch = result.notches().next().unwrap();

        let steep = 100.0 / 15.0;
        assert_relative_eq!(notch.left_edge[0].0, 500.0 - steep, epsilon = 1e-9);
        assert_relative_eq!(notch.left_edge[1].0, 500.0 + steep, epsilon = 1e-9);
        assert_relative_eq!(notch.right_edge[0].0, 600.0 - steep, epsilon = 1e-9);
        assert_relative_eq!(notch.right_edge[1].0, 600.0 + steep, epsilon = 1e-9);
        assert_relative_eq!(notch.left_edge[0].0, 493.3333, epsilon = 1e-3);
        assert_relative_eq!(notch.right_edge[1].0, 606.6667, epsilon = 1e-3);

        assert_eq!(notch.left_edge[0].1, 0.0);
        assert_eq!(notch.right_edge[1].1, 0.0);
        assert_relative_eq!(notch.left_edge[1].1, 8.9, epsilon = 1e-9);
        assert_relative_eq!(notch.right_edge[0].1, 8.9, epsilon = 1e-9);
        assert_relative_eq!(notch.baseline.y, 8.9, epsilon = 1e-9);
        assert_relative_eq!(notch.baseline.x_start, 500.0 + steep, epsilon = 1e-9);
        assert_relative_eq!(notch.baseline.x_end, 600.0 - steep, epsilon = 1e-9);
    }

    #[test]
    fn test_label_position() {
        let selection = full_selection();
        let result = layout(&test_catalog(), &selection).unwrap();
        let labels: Vec<_> = result.labels().collect();

        // j = 1, k = 1
        assert_eq!(labels[0].text, "A1");
        assert_relative_eq!(labels[0].x, 550.0, epsilon = 1e-9);
        assert_relative_eq!(labels[0].y, 8.9 + 9.0 / 30.0 - 1.0 / 30.0, epsilon = 1e-9);
        assert_eq!(labels[0].rotation_deg, 90.0);
        assert_eq!(labels[0].color, TelescopeColor::new(255, 0, 0));

        // j = 2, k = 4
        assert_eq!(labels[3].text, "B1");
        assert_relative_eq!(labels[3].y, 10.0 - 2.0 - 0.4 + 8.0 / 30.0 - 4.0 / 30.0, epsilon = 1e-9);
        assert_eq!(labels[3].color, TelescopeColor::new(0, 0, 255));
    }

    #[test]
    fn test_band_counter_is_shared_across_telescopes() {
        let result = layout(&test_catalog(), &full_selection()).unwrap();
        let baselines: Vec<f64> = result.notches().map(|n| n.baseline.y).collect();

        assert_relative_eq!(baselines[0], 8.9, epsilon = 1e-9);
        assert_relative_eq!(baselines[1], 8.8, epsilon = 1e-9);
        assert_relative_eq!(baselines[2], 8.7, epsilon = 1e-9);
        assert_relative_eq!(baselines[3], 7.6, epsilon = 1e-9);

        for pair in baselines.windows(2) {
            assert!(pair[1] < pair[0], "baselines must strictly decrease: {pair:?}");
        }
    }

    #[test]
    fn test_emission_order_and_legend_rows() {
        let result = layout(&test_catalog(), &full_selection()).unwrap();
        let kinds: Vec<&str> = result
            .glyphs()
            .iter()
            .map(|g| match g {
                Glyph::InstrumentLabelSegment(_) => "legend",
                Glyph::BandTriangle(_) => "notch",
                Glyph::BandLabel(_) => "label",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "legend", "notch", "label", "notch", "label", "legend", "notch", "label", "legend",
                "notch", "label"
            ]
        );

        let legends: Vec<_> = result.legends().collect();
        assert_eq!(legends[0].label, "Alpha Cam");
        assert_eq!(legends[0].row, 9.0);
        assert_eq!(legends[1].style, LineStyle::Dashed);
        assert_eq!(legends[1].row, 9.0);
        assert_eq!(legends[2].label, "Beta Imager");
        assert_eq!(legends[2].row, 8.0);
        assert_eq!(legends[2].style, LineStyle::Dotted);
    }

    #[test]
    fn test_layout_is_repeatable() {
        let catalog = test_catalog();
        let selection = full_selection();
        assert_eq!(
            layout(&catalog, &selection).unwrap(),
            layout(&catalog, &selection).unwrap()
        );
    }

    #[test]
    fn test_empty_selection_gives_empty_layout() {
        let result = layout(&test_catalog(), &Selection::new()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.x_range(), (0.0, 1.0));
        assert_eq!(result.y_range(), (-1.0, 10.0));
    }

    #[test]
    fn test_telescope_without_instruments_still_takes_a_row() {
        let selection = Selection::new()
            .with_telescope("Beta")
            .with_band("Alpha", "Cam", "A1");
        let result = layout(&test_catalog(), &selection).unwrap();

        assert_eq!(result.legends().count(), 1);
        assert_relative_eq!(result.notches().next().unwrap().baseline.y, 10.0 - 2.0 - 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_keys_are_lookup_errors() {
        let catalog = test_catalog();

        let selection = Selection::new().with_band("Gamma", "Cam", "A1");
        assert_eq!(
            layout(&catalog, &selection),
            Err(LookupError::Telescope("Gamma".to_string()))
        );

        let selection = Selection::new().with_band("Alpha", "Cam", "S1");
        assert!(matches!(
            layout(&catalog, &selection),
            Err(LookupError::Band { .. })
        ));
    }

    #[test]
    fn test_x_range_pads_notch_extent() {
        let selection = Selection::new()
            .with_band("Alpha", "Cam", "A1")
            .with_band("Beta", "Imager", "B1");
        let result = layout(&test_catalog(), &selection).unwrap();

        let lo = 300.0 - 150.0 / 15.0;
        let hi = 600.0 + 100.0 / 15.0;
        let margin = (hi - lo) * 0.05;
        let (x0, x1) = result.x_range();
        assert_relative_eq!(x0, lo - margin, epsilon = 1e-9);
        assert_relative_eq!(x1, hi + margin, epsilon = 1e-9);
    }

    #[test]
    fn test_capacity_limit_reaches_clip_bound() {
        let slot = RowSlot {
            telescope_row: 1,
            band_index: 90,
        };
        assert_relative_eq!(slot.baseline_y(), 0.0, epsilon = 1e-12);

        let clipped = RowSlot {
            telescope_row: 2,
            band_index: 90,
        };
        assert_relative_eq!(clipped.baseline_y(), Y_RANGE.0, epsilon = 1e-12);
    }
}
