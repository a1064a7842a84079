//! Drawing of the two-panel figure
//!
//! The canvas is laid out like a 4x2 grid with row heights 3:1:1:1. The distribution
//! panel spans the top two rows of the left column, the ranking panel the top row of
//! the right column. The remaining cells stay blank.
//!
//! Everything is drawn against a generic [`DrawingBackend`], so the same code feeds
//! both the bitmap and the SVG output.

use super::{PlotError, Result};
use crate::analysis::{CountHistogram, TopSources};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::ops::Range;

const FONT: &str = "sans-serif";
const CAPTION_FONT_SIZE: u32 = 40;
const AXIS_DESC_FONT_SIZE: u32 = 28;
const TICK_FONT_SIZE: u32 = 22;
const SOURCE_LABEL_FONT_SIZE: u32 = 18;
const ANNOTATION_FONT_SIZE: u32 = 20;

const MARKER_SIZE: i32 = 7;

/// Matplotlib's "skyblue"
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Log axes are padded by this factor on both ends so no point sits on the frame.
const LOG_AXIS_PADDING: f64 = 1.5;

/// Source names longer than this are shortened on the ranking axis.
const MAX_SOURCE_LABEL_CHARS: usize = 40;

const CLASSES_AXIS_DESC: &str = "# of cell classes (log10)";
const SOURCES_AXIS_DESC: &str = "# of sources that yielded each a # of cell classes (log10)";
const DISTRIBUTION_TITLE: &str = "A. Distribution of cell classes per source";

/// Fills `root` and draws both panels onto it.
///
/// # Arguments
/// * `root` - Whole figure canvas
/// * `histogram` - Frequency of each count value, for the distribution panel
/// * `top` - Leading sources, for the ranking panel
/// * `top_n` - Ranking size the caption announces
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    histogram: &CountHistogram,
    top: TopSources<'_>,
    top_n: usize,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (width, height) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally(width / 2);
    let (distribution_area, _) = left.split_vertically(height * 4 / 6);
    let (ranking_area, _) = right.split_vertically(height * 3 / 6);

    draw_distribution_panel(&distribution_area, histogram)?;
    draw_ranking_panel(&ranking_area, top, top_n)?;

    Ok(())
}

/// Panel A: log-log scatter of (number of sources) against (cell classes per source).
fn draw_distribution_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    histogram: &CountHistogram,
) -> Result<()> {
    let x_range = log_axis_range(histogram.points().map(|(sources, _)| sources));
    let y_range = log_axis_range(histogram.points().map(|(_, count)| count));

    let mut chart = ChartBuilder::on(area)
        .caption(DISTRIBUTION_TITLE, (FONT, CAPTION_FONT_SIZE))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(100)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(SOURCES_AXIS_DESC)
        .y_desc(CLASSES_AXIS_DESC)
        .axis_desc_style((FONT, AXIS_DESC_FONT_SIZE))
        .label_style((FONT, TICK_FONT_SIZE))
        .x_label_formatter(&|x| format_log_tick(*x))
        .y_label_formatter(&|y| format_log_tick(*y))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            histogram
                .points()
                .map(|point| Circle::new(point, MARKER_SIZE, SKY_BLUE.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Panel B: log-scale scatter of rank against count, one tick per source name.
fn draw_ranking_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    top: TopSources<'_>,
    top_n: usize,
) -> Result<()> {
    let labels = top.labels();
    // An empty ranking still needs one slot for a valid axis.
    let ranks = if top.is_empty() { 1 } else { top.len() };
    let y_range = log_axis_range(top.counts().iter().map(|&count| count as f64));

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("B. Top {top_n} sources for cell classes on Wikidata"),
            (FONT, CAPTION_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(320)
        .y_label_area_size(100)
        .build_cartesian_2d((0..ranks as i32).into_segmented(), y_range.log_scale())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ranks + 1)
        .label_style((FONT, TICK_FONT_SIZE))
        .x_label_style(
            (FONT, SOURCE_LABEL_FONT_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&|rank| source_tick_label(labels, rank))
        .y_desc(CLASSES_AXIS_DESC)
        .axis_desc_style((FONT, AXIS_DESC_FONT_SIZE))
        .y_label_formatter(&|y| format_log_tick(*y))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let markers = ranking_points(top.counts())
        .into_iter()
        .map(|(coord, count)| {
            EmptyElement::at(coord)
                + Circle::new((0, 0), MARKER_SIZE, RED.filled())
                + Text::new(
                    count.to_string(),
                    (10, -10),
                    (FONT, ANNOTATION_FONT_SIZE).into_font(),
                )
        });

    chart
        .draw_series(markers)
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Places each ranked count at the center of its segment, keeping the literal count
/// for the annotation.
pub(crate) fn ranking_points(counts: &[u64]) -> Vec<((SegmentValue<i32>, f64), u64)> {
    counts
        .iter()
        .enumerate()
        .map(|(rank, &count)| ((SegmentValue::CenterOf(rank as i32), count as f64), count))
        .collect()
}

/// Computes a valid logarithmic axis range covering `values`.
///
/// Values are clamped to at least 1.0 to avoid log(0) domain errors, and the range is
/// padded so it is never empty, even for a single value or no values at all.
pub(crate) fn log_axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    if !min.is_finite() || !max.is_finite() {
        return 1.0..10.0;
    }

    (min.max(1.0) / LOG_AXIS_PADDING)..(max.max(1.0) * LOG_AXIS_PADDING)
}

/// Formats a log axis tick without fractional noise for values of 1 and up.
pub(crate) fn format_log_tick(value: f64) -> String {
    if value >= 1.0 {
        format!("{:.0}", value.round())
    } else {
        format!("{:.1}", value)
    }
}

/// Resolves the ranking axis tick at `rank` to its (possibly shortened) source name.
pub(crate) fn source_tick_label(labels: &[String], rank: &SegmentValue<i32>) -> String {
    let SegmentValue::CenterOf(rank) = rank else {
        return String::new();
    };

    usize::try_from(*rank)
        .ok()
        .and_then(|rank| labels.get(rank))
        .map(|label| shorten_label(label))
        .unwrap_or_default()
}

fn shorten_label(label: &str) -> String {
    if label.chars().count() <= MAX_SOURCE_LABEL_CHARS {
        return label.to_string();
    }

    let mut shortened: String = label.chars().take(MAX_SOURCE_LABEL_CHARS - 1).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn log_axis_range_pads_around_values() {
        let range = log_axis_range([2.0, 300.0, 45.0].into_iter());
        assert!((range.start - 2.0 / LOG_AXIS_PADDING).abs() < 1e-12);
        assert!((range.end - 300.0 * LOG_AXIS_PADDING).abs() < 1e-12);
    }

    #[rstest]
    #[case::no_values(vec![])]
    #[case::single_value(vec![7.0])]
    #[case::all_equal(vec![3.0, 3.0, 3.0])]
    #[case::zero(vec![0.0])]
    fn log_axis_range_is_always_valid(#[case] values: Vec<f64>) {
        let range = log_axis_range(values.into_iter());
        assert!(range.start > 0.0);
        assert!(range.start < range.end);
    }

    #[rstest]
    #[case::no_sources(0)]
    #[case::fewer_than_ten(3)]
    #[case::exactly_ten(10)]
    fn ranking_has_one_point_per_source(#[case] len: usize) {
        let counts: Vec<u64> = (0..len as u64).rev().map(|i| i * 7 + 1).collect();
        let points = ranking_points(&counts);

        assert_eq!(points.len(), len);
        for (rank, ((segment, y), count)) in points.into_iter().enumerate() {
            assert!(matches!(segment, SegmentValue::CenterOf(r) if r == rank as i32));
            assert_eq!(count, counts[rank]);
            assert_eq!(y, count as f64);
        }
    }

    #[test]
    fn ranking_keeps_literal_counts_for_annotations() {
        let counts = [9_007_199_254_740_993, 5, 3];
        let points = ranking_points(&counts);

        let annotations: Vec<String> = points.iter().map(|(_, count)| count.to_string()).collect();
        assert_eq!(annotations, ["9007199254740993", "5", "3"]);
    }

    #[test]
    fn format_log_tick_rounds_whole_values() {
        assert_eq!(format_log_tick(1.0), "1");
        assert_eq!(format_log_tick(99.6), "100");
        assert_eq!(format_log_tick(1000.0), "1000");
        assert_eq!(format_log_tick(0.66), "0.7");
    }

    #[test]
    fn source_tick_label_maps_segment_centers_to_names() {
        let labels = vec!["Cell Ontology".to_string(), "Human Cell Atlas".to_string()];

        assert_eq!(
            source_tick_label(&labels, &SegmentValue::CenterOf(0)),
            "Cell Ontology"
        );
        assert_eq!(
            source_tick_label(&labels, &SegmentValue::CenterOf(1)),
            "Human Cell Atlas"
        );
        assert_eq!(source_tick_label(&labels, &SegmentValue::CenterOf(2)), "");
        assert_eq!(source_tick_label(&labels, &SegmentValue::CenterOf(-1)), "");
        assert_eq!(source_tick_label(&labels, &SegmentValue::Exact(0)), "");
        assert_eq!(source_tick_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn long_source_names_are_shortened() {
        let long = "A".repeat(MAX_SOURCE_LABEL_CHARS + 10);
        let shortened = shorten_label(&long);

        assert_eq!(shortened.chars().count(), MAX_SOURCE_LABEL_CHARS);
        assert!(shortened.ends_with('…'));
        assert_eq!(shorten_label("Cell Ontology"), "Cell Ontology");
    }
}
