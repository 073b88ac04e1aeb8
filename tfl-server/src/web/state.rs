//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedLineProvider;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached TfL line provider
    pub lines: Arc<CachedLineProvider>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(lines: Arc<CachedLineProvider>) -> Self {
        Self { lines }
    }
}
