// crates/storecheck-client/src/lib.rs
// ============================================================================
// Module: Storecheck Client Library
// Description: Blocking authenticated HTTP client for suite calls.
// Purpose: Expose the request builder and response handle used by the suite.
// Dependencies: jsonpath_lib, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! This crate ships the stateless HTTP client the suite issues its calls
//! through: four REST verbs, optional bearer authentication, optional query
//! parameters, and a structured response handle with status, raw body,
//! JSON-path reads, and elapsed time. Non-2xx statuses are data, not errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod response;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiClient;
pub use client::ApiClientConfig;
pub use client::ClientError;
pub use client::RequestSpec;
pub use response::ApiResponse;
