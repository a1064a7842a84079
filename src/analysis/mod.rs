//! Reshaping query rows into the data the figure is drawn from
//!
//! - [`SourceSeries`]: aligned source labels and per-source counts
//! - [`TopSources`]: the leading entries of a series, for the ranking panel
//! - [`CountHistogram`]: how many sources cite each distinct number of cell classes

pub mod histogram;
pub mod series;

pub use histogram::CountHistogram;
pub use series::{SourceSeries, TopSources};

/// Number of sources shown in the ranking panel by default
pub const DEFAULT_TOP_SOURCES: usize = 10;
