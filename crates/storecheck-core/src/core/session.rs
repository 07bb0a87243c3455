// crates/storecheck-core/src/core/session.rs
// ============================================================================
// Module: Session Context
// Description: Explicit per-suite context handed to test units.
// Purpose: Replace ambient global state with a passed-around handle.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A session context names everything a test unit needs to reach shared
//! fixture state: the backend base URL and the paths of the two persistent
//! documents. The suite controller owns the context and hands it to each
//! test unit, so "later tests read what earlier tests wrote" flows through
//! an explicit handle instead of process-wide statics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Session Context
// ============================================================================

/// Shared per-suite context for store and backend access.
///
/// # Invariants
/// - `base_url` has no trailing slash; endpoints are joined with `/`.
/// - Document paths are distinct files; both may be absent before suite start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Backend base URL, e.g. `http://127.0.0.1:5000/api`.
    base_url: String,
    /// Path of the credentials document (role-keyed tokens).
    credentials_path: PathBuf,
    /// Path of the identifiers document (entity ids).
    identifiers_path: PathBuf,
}

impl SessionContext {
    /// Creates a session context, trimming any trailing slash off the base URL.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        credentials_path: impl Into<PathBuf>,
        identifiers_path: impl Into<PathBuf>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            credentials_path: credentials_path.into(),
            identifiers_path: identifiers_path.into(),
        }
    }

    /// Returns the backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a resource path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, resource: &str) -> String {
        let resource = resource.trim_start_matches('/');
        format!("{}/{resource}", self.base_url)
    }

    /// Returns the credentials document path.
    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Returns the identifiers document path.
    #[must_use]
    pub fn identifiers_path(&self) -> &Path {
        &self.identifiers_path
    }
}
