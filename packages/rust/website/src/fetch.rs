//! Polite single-page HTTP fetching.

use std::time::Duration;

use leadgen_shared::{LeadGenError, Result, ScrapeConfig};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Fetches company pages with a fixed pause after each success.
pub(crate) struct PageFetcher {
    client: Client,
    politeness_delay: Duration,
}

impl PageFetcher {
    pub(crate) fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LeadGenError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            politeness_delay: Duration::from_millis(config.politeness_delay_ms),
        })
    }

    /// GET `url` and return the body. Non-2xx responses are errors.
    pub(crate) async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| LeadGenError::Transport(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadGenError::service(url.as_str(), status.as_u16(), ""));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LeadGenError::Transport(format!("{url}: failed to read body: {e}")))?;

        debug!(%url, bytes = body.len(), "page fetched");

        if !self.politeness_delay.is_zero() {
            tokio::time::sleep(self.politeness_delay).await;
        }

        Ok(body)
    }
}

/// Parse a company-supplied website, adding `http://` when the scheme is missing.
pub(crate) fn normalize_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LeadGenError::validation("empty website URL"));
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| LeadGenError::validation(format!("invalid website URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LeadGenError::validation(format!(
            "unsupported URL scheme '{other}' in '{raw}'"
        ))),
    }
}
