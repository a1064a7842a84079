use super::{PlotError, Result};
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

/// Converts an SVG document into a single-page PDF of the same size.
///
/// Text in the SVG is laid out with the system fonts.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::PdfConversion(e.to_string()))?;

    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| PlotError::PdfConversion(format!("{:?}", e)))
}
