//! TfL line server.
//!
//! Fetches the lines for the configured transport modes from the TfL API,
//! caches them for as long as TfL says they stay fresh, and serves them
//! over HTTP.

pub mod cache;
pub mod tfl;
pub mod web;

#[cfg(test)]
mod test_support;
