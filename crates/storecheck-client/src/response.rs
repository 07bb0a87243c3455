// crates/storecheck-client/src/response.rs
// ============================================================================
// Module: API Response Handle
// Description: Structured view over one completed HTTP exchange.
// Purpose: Expose status, raw body, JSON-path reads, and elapsed time.
// Dependencies: jsonpath_lib, serde_json
// ============================================================================

//! ## Overview
//! A response handle is a plain snapshot: numeric status, the raw body
//! string, and the time the exchange took. Structured reads parse the body
//! on demand; a JSON-path accessor covers nested fields the way consuming
//! assertions address them (`$.user.id`, `$.data.email`, ...).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde_json::Value;

use crate::client::ClientError;

// ============================================================================
// SECTION: API Response
// ============================================================================

/// Snapshot of one completed HTTP exchange.
///
/// # Invariants
/// - `status` is the wire status; 4xx/5xx are ordinary values here.
/// - `body` is the raw body regardless of content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Numeric HTTP status code.
    status: u16,
    /// Raw response body.
    body: String,
    /// Wall-clock time from send to body completion.
    elapsed: Duration,
}

impl ApiResponse {
    /// Creates a response snapshot.
    #[must_use]
    pub const fn new(status: u16, body: String, elapsed: Duration) -> Self {
        Self {
            status,
            body,
            elapsed,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the elapsed exchange time.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JsonParse`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| ClientError::JsonParse(err.to_string()))
    }

    /// Evaluates a JSON-path expression against the body.
    ///
    /// Returns the first match, or `None` when the path selects nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::JsonParse`] when the body is not valid JSON
    /// and [`ClientError::JsonPath`] when the expression is invalid.
    pub fn json_path(&self, path: &str) -> Result<Option<Value>, ClientError> {
        let parsed = self.json()?;
        let selected = jsonpath_lib::select(&parsed, path)
            .map_err(|err| ClientError::JsonPath(err.to_string()))?;
        Ok(selected.first().map(|&value| value.clone()))
    }
}
