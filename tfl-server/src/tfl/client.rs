//! TfL Unified API HTTP client.

use std::sync::Arc;

use super::cache_control;
use super::config::TflConfig;
use super::error::TflError;
use super::types::{FetchedLines, LineSet};

/// Longest body excerpt kept in error values.
const MAX_BODY_EXCERPT: usize = 500;

/// TfL API client.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    config: Arc<TflConfig>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Full URL of the line listing, without credentials.
    pub fn lines_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.lines_path()
        )
    }

    /// Fetch the lines for all configured modes.
    ///
    /// Never consults a cache; the returned `max_age` tells the caller how
    /// long the response may be reused.
    pub async fn fetch_lines(&self) -> Result<FetchedLines, TflError> {
        let url = self.lines_url();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, url = %url, "TfL line request failed");
            return Err(TflError::RemoteFetchFailed {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        let max_age = cache_control::max_age(response.headers());
        let body = response.text().await?;

        let lines = LineSet::parse(&body).map_err(|e| TflError::MalformedResponse {
            message: e.to_string(),
            body: Some(excerpt(&body)),
        })?;

        tracing::debug!(count = lines.len(), ?max_age, "fetched TfL lines");

        Ok(FetchedLines { lines, max_age })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(MAX_BODY_EXCERPT).collect()
}
