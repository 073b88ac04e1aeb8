//! TfL Unified API client.
//!
//! Fetches the lines operated for a configured set of transport modes.
//! Key characteristics of the endpoint:
//! - Credentials travel as `app_id` / `app_key` query parameters
//! - The body is a JSON array of line records, kept verbatim
//! - Freshness is advertised with `Cache-Control: max-age=<seconds>`,
//!   which may be absent

pub mod cache_control;
mod client;
mod config;
mod error;
mod source;
mod types;

pub use client::TflClient;
pub use config::TflConfig;
pub use error::TflError;
pub use source::LineSource;
pub use types::{FetchedLines, LineSet};
