//! Line data returned by the TfL API.

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// The lines returned by the TfL API, kept verbatim.
///
/// Each record is opaque: the only validation performed is that the body is
/// a JSON array. Cloning shares the underlying records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LineSet(Arc<Vec<Value>>);

impl LineSet {
    /// Parse a response body, requiring a top-level JSON array.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<Value> = serde_json::from_str(body)?;
        Ok(Self(Arc::new(records)))
    }

    /// Whether two sets share the same allocation (i.e. one is a cached copy of the other).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Value>> for LineSet {
    fn from(records: Vec<Value>) -> Self {
        Self(Arc::new(records))
    }
}

impl Deref for LineSet {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

/// A single successful response from the line listing endpoint.
#[derive(Debug, Clone)]
pub struct FetchedLines {
    /// Parsed lines
    pub lines: LineSet,
    /// Freshness lifetime from the `Cache-Control` header, if any
    pub max_age: Option<Duration>,
}
