//! Company directory client.
//!
//! Issues one filtered organization search against an Apollo-compatible API
//! and normalizes each hit into a [`CompanyRecord`]. There is no pagination
//! and no retry: a failed call fails the whole lookup.

mod response;

use std::time::Duration;

use leadgen_shared::{ApolloConfig, CompanyRecord, LeadGenError, Result, SearchParams};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument};

use response::SearchResponse;

/// Path of the organization search endpoint, relative to the API origin.
const SEARCH_PATH: &str = "/api/v1/organizations/search";

/// Characters of the response body echoed at debug level.
const LOG_BODY_CHARS: usize = 500;

/// JSON body of a search request. Optional filters are omitted when empty.
#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    q_organization_keyword_tags: &'a [String],
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "is_empty")]
    organization_num_employees_ranges: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    organization_locations: &'a [String],
}

fn is_empty(values: &&[String]) -> bool {
    values.is_empty()
}

/// Client for the organization search service.
pub struct DirectoryClient {
    http: Client,
    api_key: Option<String>,
    search_url: String,
}

impl DirectoryClient {
    /// Build a client. A missing key is only reported when [`search`](Self::search) is called.
    pub fn new(config: &ApolloConfig, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LeadGenError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            search_url: format!("{}{SEARCH_PATH}", config.base_url.trim_end_matches('/')),
        })
    }

    /// Run one search and return the normalized hits, in provider order.
    #[instrument(skip_all, fields(keywords = ?params.keywords, limit = params.limit))]
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<CompanyRecord>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LeadGenError::config("directory API key missing. Set APOLLO_API_KEY (or the configured variable).")
        })?;

        let payload = SearchPayload {
            q_organization_keyword_tags: &params.keywords,
            page: 1,
            per_page: params.limit,
            organization_num_employees_ranges: &params.size_ranges,
            organization_locations: &params.locations,
        };

        info!(
            keywords = ?params.keywords,
            sizes = ?params.size_ranges,
            locations = ?params.locations,
            limit = params.limit,
            "searching company directory"
        );

        let response = self
            .http
            .post(&self.search_url)
            .header("X-Api-Key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| LeadGenError::Transport(format!("{}: {e}", self.search_url)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LeadGenError::Transport(format!("failed to read directory response: {e}")))?;

        debug!(
            status = status.as_u16(),
            body = %body.chars().take(LOG_BODY_CHARS).collect::<String>(),
            "directory response"
        );

        if !status.is_success() {
            return Err(LeadGenError::service("directory", status.as_u16(), &body));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| LeadGenError::parse(format!("directory response is not JSON: {e}")))?;

        let fallback_industry = params.keywords.join(", ");
        let companies: Vec<CompanyRecord> = parsed
            .into_organizations()
            .into_iter()
            .map(|org| org.into_record(&fallback_industry))
            .collect();

        info!(count = companies.len(), "directory search complete");
        Ok(companies)
    }
}
