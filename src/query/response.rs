//! Parsing of SPARQL 1.1 JSON query results
//!
//! The endpoint answers with a document of the shape
//! `{"head": {"vars": [...]}, "results": {"bindings": [{"var": {"type": ..., "value": ...}}]}}`.
//! Every binding becomes one [`SourceRow`], in the order the endpoint returned them.

use super::{QueryError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One distinct source cited on cell class statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Entity URI of the cited source
    pub reference: String,
    /// Human-readable label of the source
    pub label: String,
    /// Number of distinct cell classes citing this source
    pub count: u64,
    /// URI of one cell class citing this source
    pub sample_item: Option<String>,
    /// English label of [`SourceRow::sample_item`]
    pub sample_label: Option<String>,
}

/// Raw SPARQL JSON results document. `head.vars` is not needed to read the bindings.
#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: Bindings,
}

#[derive(Debug, Deserialize)]
struct Bindings {
    bindings: Vec<HashMap<String, Term>>,
}

/// A single RDF term bound to a query variable
#[derive(Debug, Deserialize)]
struct Term {
    value: String,
}

/// Parses a SPARQL JSON results document into rows.
///
/// # Returns
/// * `Ok(Vec<SourceRow>)` - One row per binding, endpoint order preserved
/// * `Err(QueryError)` - If the JSON is malformed, a required binding is absent,
///   or a count is not an unsigned integer
pub fn parse_response(body: &str) -> Result<Vec<SourceRow>> {
    let results: SparqlResults = serde_json::from_str(body)?;

    results
        .results
        .bindings
        .into_iter()
        .enumerate()
        .map(|(row, mut binding)| -> Result<SourceRow> {
            let mut required = |field: &'static str| {
                binding
                    .remove(field)
                    .map(|term| term.value)
                    .ok_or(QueryError::MissingField { row, field })
            };

            let reference = required("reference")?;
            let label = required("referenceLabel")?;
            let raw_count = required("count")?;
            let count = raw_count
                .trim()
                .parse::<u64>()
                .map_err(|_| QueryError::InvalidCount {
                    row,
                    value: raw_count.clone(),
                })?;

            Ok(SourceRow {
                reference,
                label,
                count,
                sample_item: binding.remove("sample_item").map(|term| term.value),
                sample_label: binding.remove("sample_label").map(|term| term.value),
            })
        })
        .collect()
}

/// Loads a previously saved response (see `--save-response`) from disk.
pub fn load_response(path: &Path) -> Result<Vec<SourceRow>> {
    let body = std::fs::read_to_string(path)?;
    parse_response(&body)
}
