//! Querying the Wikidata SPARQL endpoint
//!
//! This module provides:
//! - The fixed query counting which sources back cell class statements
//! - [`SparqlClient`] for issuing the query over HTTP
//! - Parsing of SPARQL JSON results into [`SourceRow`] values

pub mod client;
pub mod response;

pub use client::SparqlClient;
pub use response::{load_response, parse_response, SourceRow};

use reqwest::StatusCode;
use thiserror::Error;

/// Public SPARQL endpoint of Wikidata.
pub const WIKIDATA_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Counts, for every source cited as "stated in" (P248) on an "instance of" (P31)
/// statement, how many distinct subclasses of cell (Q7868) rely on it.
///
/// Rows come back ordered by descending count.
pub const CELL_SOURCES_QUERY: &str = r#"
SELECT DISTINCT ?reference ?referenceLabel (COUNT(DISTINCT ?item) AS ?count)
       (SAMPLE(?item) AS ?sample_item) (SAMPLE(?itemLabel) AS ?sample_label)
WHERE
{
    ?item wdt:P279* wd:Q7868 .
    ?item rdfs:label ?itemLabel .
    FILTER(LANG(?itemLabel) = "en")
    ?item p:P31 ?statement .
    ?statement prov:wasDerivedFrom ?provenance .
    ?provenance pr:P248 ?reference .
    SERVICE wikibase:label { bd:serviceParam wikibase:language "[AUTO_LANGUAGE],en" }
}
GROUP BY ?reference ?referenceLabel
ORDER BY DESC(?count)
"#;

/// Errors that can occur while querying the endpoint or reading its results
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint responded with HTTP status {0}")]
    Status(StatusCode),

    #[error("Failed to parse SPARQL JSON results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read saved response: {0}")]
    Io(#[from] std::io::Error),

    #[error("Result row {row} is missing the '{field}' binding")]
    MissingField { row: usize, field: &'static str },

    #[error("Result row {row} has a non-integer count: '{value}'")]
    InvalidCount { row: usize, value: String },
}

type Result<T> = core::result::Result<T, QueryError>;
