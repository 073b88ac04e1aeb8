//! Abstraction over where line listings come from.

use std::future::Future;

use super::client::TflClient;
use super::error::TflError;
use super::types::FetchedLines;

/// Trait for fetching the current line listing.
///
/// This abstraction allows the cached provider to be tested with mock data.
/// Implementations are cloned per request, so they should be cheap handles.
pub trait LineSource: Clone + Send + Sync {
    /// Fetch the full listing, bypassing any cache.
    fn fetch_lines(&self) -> impl Future<Output = Result<FetchedLines, TflError>> + Send;
}

impl LineSource for TflClient {
    fn fetch_lines(&self) -> impl Future<Output = Result<FetchedLines, TflError>> + Send {
        TflClient::fetch_lines(self)
    }
}
