//! Rendering of the sources figure
//!
//! The figure is drawn with the [`plotters`] crate, once into a bitmap and once into an
//! SVG document; the SVG is then converted to PDF. All three files share the stem
//! [`FIGURE_STEM`] and are written to the chosen output directory.
//!
//! # Headless Compatibility
//! The bitmap and SVG backends need no display. Text is rasterised with the system
//! fonts, so a font such as DejaVu Sans must be installed (the `ttf` feature).

pub mod figure;
pub mod pdf;

use crate::analysis::{CountHistogram, SourceSeries};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name (without extension) shared by every rendered format
pub const FIGURE_STEM: &str = "sources_for_cell_classes_on_wikidata";

/// Figure size in pixels (20x15 inches at 100 dpi)
pub const FIGURE_SIZE: (u32, u32) = (2000, 1500);

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to convert figure to PDF: {0}")]
    PdfConversion(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Rendered file is empty: {}", .0.display())]
    EmptyOutput(PathBuf),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Formats the figure is saved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image
    Png,
    /// Vector document, converted from the SVG rendering
    Pdf,
    /// Vector image
    Svg,
}

impl OutputFormat {
    /// Every format, in the order files are written.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Pdf, OutputFormat::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Svg => "svg",
        }
    }

    /// Path of the figure in this format inside `output_dir`.
    pub fn output_path(self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.{}", FIGURE_STEM, self.extension()))
    }
}

/// Renders the figure for `series` and saves it as PNG, PDF and SVG.
///
/// The ranking panel shows the first `top_n` entries of `series` as given; the series is
/// not sorted here. Fewer entries than `top_n` simply yield fewer points, and an empty
/// series yields empty panels.
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths of the written files, in [`OutputFormat::ALL`] order
/// * `Err(PlotError)` - If drawing, conversion or writing failed, or a file came out empty
pub fn render_figure(
    series: &SourceSeries,
    top_n: usize,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let histogram = CountHistogram::from_counts(series.counts());
    let top = series.top(top_n);

    fs::create_dir_all(output_dir)?;

    let [png_path, pdf_path, svg_path] =
        OutputFormat::ALL.map(|format| format.output_path(output_dir));
    {
        let root = BitMapBackend::new(&png_path, FIGURE_SIZE).into_drawing_area();
        figure::draw_figure(&root, &histogram, top, top_n)?;
        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, FIGURE_SIZE).into_drawing_area();
        figure::draw_figure(&root, &histogram, top, top_n)?;
        root.present()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    fs::write(&pdf_path, pdf::svg_to_pdf(&svg)?)?;
    fs::write(&svg_path, &svg)?;

    let written = vec![png_path, pdf_path, svg_path];
    for path in &written {
        if fs::metadata(path)?.len() == 0 {
            return Err(PlotError::EmptyOutput(path.clone()));
        }
    }

    Ok(written)
}
