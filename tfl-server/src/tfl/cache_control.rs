//! `Cache-Control` header parsing.
//!
//! Only the `max-age` directive matters here: it decides whether a line
//! listing is cached and for how long.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, HeaderMap};

/// Largest delta-seconds value honoured; larger values are clamped (RFC 9111 §1.2.2).
const MAX_DELTA_SECONDS: u64 = 1 << 31;

/// Extract the `max-age` directive from all `Cache-Control` headers.
///
/// Returns `None` when no header carries a usable `max-age`.
pub fn max_age(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(parse_max_age)
}

/// Parse `max-age` from a single `Cache-Control` header value.
///
/// Directive names are case-insensitive and a quoted value is accepted.
/// Invalid values are skipped so a later valid directive can still match.
pub fn parse_max_age(value: &str) -> Option<Duration> {
    value.split(',').find_map(|directive| {
        let (name, arg) = directive.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("max-age") {
            return None;
        }

        let arg = arg.trim();
        let arg = arg
            .strip_prefix('"')
            .and_then(|a| a.strip_suffix('"'))
            .unwrap_or(arg);

        parse_delta_seconds(arg).map(Duration::from_secs)
    })
}

/// Parse a non-negative integer, clamping overflow to [`MAX_DELTA_SECONDS`].
fn parse_delta_seconds(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match s.parse::<u64>() {
        Ok(n) => Some(n.min(MAX_DELTA_SECONDS)),
        Err(_) => Some(MAX_DELTA_SECONDS),
    }
}
