//! Configuration for the TfL API client.

use super::error::TflError;

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk/";

/// Modes queried when none are configured explicitly.
const DEFAULT_MODES: &[&str] = &["dlr", "overground", "tflrail", "tube"];

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the TfL client.
///
/// Immutable once handed to a [`TflClient`](super::TflClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TflConfig {
    /// Application id sent as the `app_id` query parameter
    pub app_id: String,
    /// Application key sent as the `app_key` query parameter
    pub app_key: String,
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Transport modes whose lines are requested
    pub supported_modes: Vec<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a new config with the given credentials and default modes.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            supported_modes: DEFAULT_MODES.iter().map(|m| m.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the transport modes to query.
    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build a config from the process environment.
    ///
    /// Reads `TFL_APP_ID`, `TFL_APP_KEY`, `TFL_BASE_URL`,
    /// `TFL_SUPPORTED_MODES` (comma-separated) and `TFL_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, TflError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Missing credentials are logged and left empty: requests will then be
    /// rejected by the upstream rather than at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TflError> {
        let app_id = lookup("TFL_APP_ID").unwrap_or_else(|| {
            tracing::warn!("TFL_APP_ID not set; TfL requests will be rejected");
            String::new()
        });
        let app_key = lookup("TFL_APP_KEY").unwrap_or_else(|| {
            tracing::warn!("TFL_APP_KEY not set; TfL requests will be rejected");
            String::new()
        });

        let mut config = Self::new(app_id, app_key);

        if let Some(url) = lookup("TFL_BASE_URL") {
            config = config.with_base_url(url);
        }

        if let Some(modes) = lookup("TFL_SUPPORTED_MODES") {
            config = config.with_modes(parse_modes(&modes));
        }

        if let Some(raw) = lookup("TFL_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| {
                TflError::InvalidConfig(format!("TFL_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config = config.with_timeout(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could never produce a valid request.
    pub fn validate(&self) -> Result<(), TflError> {
        if self.supported_modes.is_empty() {
            return Err(TflError::InvalidConfig(
                "at least one transport mode is required".to_string(),
            ));
        }

        if let Some(mode) = self
            .supported_modes
            .iter()
            .find(|m| m.is_empty() || m.contains([',', '/', '?', '#']))
        {
            return Err(TflError::InvalidConfig(format!("invalid mode: {mode:?}")));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TflError::InvalidConfig(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Path of the line listing relative to the base URL.
    pub(crate) fn lines_path(&self) -> String {
        format!("Line/Mode/{}", self.supported_modes.join(","))
    }
}

/// Split a comma-separated mode list, dropping blanks.
fn parse_modes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
