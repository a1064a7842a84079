//! Console summary tables
//!
//! - [`format_top_sources_table`]: the ranking shown in the figure's second panel
//! - [`format_histogram_table`]: how many sources cite each number of cell classes
//!
//! Tables are rendered with the [`tabled`] crate.

use crate::analysis::{CountHistogram, TopSources};
use tabled::{Table, Tabled};

const NO_DATA: &str = "No data available";

/// One ranked source
#[derive(Debug, Clone, Tabled)]
pub struct SourceEntry {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Cell classes")]
    pub classes: u64,
}

/// One distinct count value with how many sources share it
#[derive(Debug, Clone, Tabled)]
pub struct FrequencyEntry {
    /// Number of cell classes citing a source
    #[tabled(rename = "Cell classes")]
    pub classes: u64,
    /// Number of sources cited by exactly that many classes
    #[tabled(rename = "Sources")]
    pub sources: usize,
    /// Share of all sources, formatted with two decimals
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

impl FrequencyEntry {
    /// Creates a new entry with formatted percentage
    pub fn new(classes: u64, sources: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (sources as f64 / total as f64) * 100.0)
        };

        Self {
            classes,
            sources,
            percentage,
        }
    }
}

/// Formats the ranked sources, rank 1 first.
pub fn format_top_sources_table(top: TopSources<'_>, title: Option<&str>) -> String {
    let entries: Vec<SourceEntry> = top
        .iter()
        .enumerate()
        .map(|(index, (source, classes))| SourceEntry {
            rank: index + 1,
            source: source.to_string(),
            classes,
        })
        .collect();

    format_table(&entries, title)
}

/// Formats the histogram with the most cited count values first.
pub fn format_histogram_table(histogram: &CountHistogram, title: Option<&str>) -> String {
    if histogram.is_empty() {
        return NO_DATA.to_string();
    }

    let total = histogram.total_sources();
    let mut entries: Vec<FrequencyEntry> = histogram
        .iter()
        .map(|(classes, sources)| FrequencyEntry::new(classes, sources, total))
        .collect();
    entries.reverse();

    format_table(&entries, title)
}

fn format_table<T: Tabled>(entries: &[T], title: Option<&str>) -> String {
    if entries.is_empty() {
        return NO_DATA.to_string();
    }

    let table = Table::new(entries).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.chars().count()), table)
    } else {
        table
    }
}
