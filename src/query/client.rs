use super::{QueryError, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// Wikidata rejects requests without an identifying user agent.
const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (https://www.wikidata.org/wiki/Wikidata:Data_access)"
);

/// Media type of the SPARQL 1.1 JSON results format
const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Thin client issuing a single SPARQL query against one endpoint.
pub struct SparqlClient {
    client: Client,
    endpoint: String,
}

impl SparqlClient {
    /// Creates a client for `endpoint`.
    ///
    /// # Arguments
    /// * `endpoint` - URL of the SPARQL endpoint
    /// * `timeout` - Total request timeout; `None` waits for as long as the endpoint takes
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    /// URL the client sends its query to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs `query` and returns the raw JSON body of the response.
    ///
    /// No retries are made; any transport error or non-success status is returned as is.
    pub async fn run(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("format", "json")])
            .header(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QueryError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}
