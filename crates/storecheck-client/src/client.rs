// crates/storecheck-client/src/client.rs
// ============================================================================
// Module: Authenticated HTTP Client
// Description: Stateless request builder over the four REST verbs.
// Purpose: Compose optionally-authenticated JSON calls and time them.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The client composes GET/POST/PUT/DELETE calls against full endpoint
//! URLs, optionally attaching a bearer token and query parameters. Status
//! codes are never interpreted here: a 4xx or 5xx response is returned
//! normally so callers can assert on it, and only transport-level failures
//! (connect, timeout, body read) fail the call itself. The client performs
//! no retries, no caching, and follows no redirects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::response::ApiResponse;

// ============================================================================
// SECTION: Client Errors
// ============================================================================

/// HTTP client errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Backend 4xx/5xx responses are never represented here.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    Build(String),
    /// The endpoint URL failed to parse or uses an unsupported scheme.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
    /// Transport-level failure (connect, timeout, protocol).
    #[error("http transport failure: {0}")]
    Transport(String),
    /// The response body could not be read.
    #[error("http body read failed: {0}")]
    BodyRead(String),
    /// The response body is not valid JSON.
    #[error("response body is not json: {0}")]
    JsonParse(String),
    /// The JSON-path expression failed to evaluate.
    #[error("json path evaluation failed: {0}")]
    JsonPath(String),
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the API client.
///
/// # Invariants
/// - `timeout_ms` applies to the full request lifecycle.
/// - Redirects are never followed regardless of configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: "storecheck/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Request Specification
// ============================================================================

/// Per-call request options.
///
/// # Invariants
/// - `bearer` present attaches `Authorization: Bearer <token>`; absent sends
///   the request unauthenticated.
/// - `body`, when present, is sent as a JSON payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpec<'a> {
    /// Optional bearer token.
    pub bearer: Option<&'a str>,
    /// Optional JSON request body.
    pub body: Option<&'a Value>,
    /// Optional query parameters.
    pub query: Option<&'a [(String, String)]>,
}

impl<'a> RequestSpec<'a> {
    /// Returns a spec carrying only a bearer token.
    #[must_use]
    pub const fn bearer(token: &'a str) -> Self {
        Self {
            bearer: Some(token),
            body: None,
            query: None,
        }
    }

    /// Returns a spec carrying only a JSON body.
    #[must_use]
    pub const fn body(body: &'a Value) -> Self {
        Self {
            bearer: None,
            body: Some(body),
            query: None,
        }
    }

    /// Returns a spec carrying a bearer token and a JSON body.
    #[must_use]
    pub const fn bearer_body(token: &'a str, body: &'a Value) -> Self {
        Self {
            bearer: Some(token),
            body: Some(body),
            query: None,
        }
    }
}

// ============================================================================
// SECTION: API Client
// ============================================================================

/// Stateless HTTP client over the four REST verbs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be created.
    pub fn new(config: &ApiClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport-level failure only.
    pub fn get(&self, url: &str, spec: &RequestSpec<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::GET, url, spec)
    }

    /// Issues a POST request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport-level failure only.
    pub fn post(&self, url: &str, spec: &RequestSpec<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::POST, url, spec)
    }

    /// Issues a PUT request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport-level failure only.
    pub fn put(&self, url: &str, spec: &RequestSpec<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::PUT, url, spec)
    }

    /// Issues a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport-level failure only.
    pub fn delete(&self, url: &str, spec: &RequestSpec<'_>) -> Result<ApiResponse, ClientError> {
        self.execute(Method::DELETE, url, spec)
    }

    /// Builds, sends, and times one request.
    fn execute(
        &self,
        method: Method,
        url: &str,
        spec: &RequestSpec<'_>,
    ) -> Result<ApiResponse, ClientError> {
        let url = Url::parse(url).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(ClientError::InvalidUrl(format!("unsupported scheme {scheme}"))),
        }
        let mut request = self.client.request(method, url);
        if let Some(query) = spec.query {
            request = request.query(query);
        }
        if let Some(token) = spec.bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = spec.body {
            request = request.json(body);
        }
        let started = Instant::now();
        let response = request.send().map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|err| ClientError::BodyRead(err.to_string()))?;
        Ok(ApiResponse::new(status, body, started.elapsed()))
    }
}
