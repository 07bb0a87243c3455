// crates/storecheck-core/src/interfaces/mod.rs
// ============================================================================
// Module: Storecheck Interfaces
// Description: Backend-agnostic interfaces for state, auth, reporting, and observation.
// Purpose: Define the contract surfaces used by the Storecheck suite runtime.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the suite runtime integrates with its collaborators
//! without embedding backend-specific details: a persistent key/value state
//! store, a suite-start authenticator, an external report generator, and a
//! lifecycle observer. Implementations must fail closed on invalid data; the
//! single sanctioned degraded path is report generation, whose failure is an
//! outcome rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::SessionContext;
use crate::core::SuitePhase;
use crate::core::keys::Role;

// ============================================================================
// SECTION: State Store
// ============================================================================

/// State store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Absence of a document or key is never an error; see [`StateStore::get`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("state store io error: {0}")]
    Io(String),
    /// Existing document is not a parsable JSON object.
    #[error("state document corrupt: {0}")]
    Corrupt(String),
    /// Document could not be serialized back to JSON.
    #[error("state store serialization error: {0}")]
    Serialize(String),
    /// Stored value has an unexpected shape for a typed accessor.
    #[error("state store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("state store error: {0}")]
    Store(String),
}

/// Persistent key/value store over per-document files.
///
/// Every operation is an independent load-modify-store round trip against
/// the document at `document`; no handle stays open between calls. A save
/// rewrites the full document, so concurrent writers against the same path
/// lose updates (last full write wins); sequential execution of
/// state-sharing callers is a precondition owned by the caller.
pub trait StateStore {
    /// Upserts `key → value` into the document at `document`.
    ///
    /// An absent or empty document starts from an empty mapping; an existing
    /// document that fails to parse is a [`StoreError::Corrupt`] failure
    /// rather than being silently replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the document cannot be read, parsed, or
    /// written back.
    fn save(&self, key: &str, value: &Value, document: &Path) -> Result<(), StoreError>;

    /// Returns the value stored under `key` in the document at `document`.
    ///
    /// An absent file, an empty file, an unparsable document, and a missing
    /// key all yield `Ok(None)`; only genuine I/O failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the document exists but cannot be read.
    fn get(&self, key: &str, document: &Path) -> Result<Option<Value>, StoreError>;

    /// Upserts a string value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the underlying save fails.
    fn save_string(&self, key: &str, value: &str, document: &Path) -> Result<(), StoreError> {
        self.save(key, &Value::String(value.to_string()), document)
    }

    /// Upserts an integer value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the underlying save fails.
    fn save_i64(&self, key: &str, value: i64, document: &Path) -> Result<(), StoreError> {
        self.save(key, &Value::Number(value.into()), document)
    }

    /// Returns the string stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored value is not a string,
    /// or the underlying get error.
    fn get_string(&self, key: &str, document: &Path) -> Result<Option<String>, StoreError> {
        match self.get(key, document)? {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(StoreError::Invalid(format!("key {key} does not hold a string"))),
        }
    }

    /// Returns the integer stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored value is not an
    /// integer, or the underlying get error.
    fn get_i64(&self, key: &str, document: &Path) -> Result<Option<i64>, StoreError> {
        match self.get(key, document)? {
            None => Ok(None),
            Some(Value::Number(value)) => value.as_i64().map(Some).ok_or_else(|| {
                StoreError::Invalid(format!("key {key} does not hold an integer"))
            }),
            Some(_) => Err(StoreError::Invalid(format!("key {key} does not hold an integer"))),
        }
    }

    /// Returns the boolean stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored value is not a
    /// boolean, or the underlying get error.
    fn get_bool(&self, key: &str, document: &Path) -> Result<Option<bool>, StoreError> {
        match self.get(key, document)? {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(value)),
            Some(_) => Err(StoreError::Invalid(format!("key {key} does not hold a boolean"))),
        }
    }

    /// Returns the list of strings stored under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the stored value is not an array
    /// of strings, or the underlying get error.
    fn get_string_list(&self, key: &str, document: &Path) -> Result<Option<Vec<String>>, StoreError> {
        match self.get(key, document)? {
            None => Ok(None),
            Some(Value::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(value) => values.push(value),
                        _ => {
                            return Err(StoreError::Invalid(format!(
                                "key {key} does not hold a list of strings"
                            )));
                        }
                    }
                }
                Ok(Some(values))
            }
            Some(_) => {
                Err(StoreError::Invalid(format!("key {key} does not hold a list of strings")))
            }
        }
    }
}

// ============================================================================
// SECTION: Authenticator
// ============================================================================

/// Authentication errors surfaced during suite start or token refresh.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Non-2xx backend responses map to status-carrying variants, never panics.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login endpoint returned a non-200 status.
    #[error("{role} login failed with status {status}")]
    LoginFailed {
        /// Role whose login was attempted.
        role: Role,
        /// HTTP status returned by the backend.
        status: u16,
    },
    /// Registration endpoint returned a non-201 status.
    #[error("registration failed with status {status}")]
    RegistrationFailed {
        /// HTTP status returned by the backend.
        status: u16,
    },
    /// Refresh endpoint returned a non-200 status; stored tokens are untouched.
    #[error("token refresh failed with status {status}")]
    RefreshFailed {
        /// HTTP status returned by the backend.
        status: u16,
    },
    /// No refresh token is present in the credentials document.
    #[error("no refresh token stored")]
    MissingRefreshToken,
    /// Transport-level HTTP failure.
    #[error("auth transport failure: {0}")]
    Transport(String),
    /// Backend response body did not match the expected shape.
    #[error("malformed auth response: {0}")]
    Malformed(String),
    /// Credentials document access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Suite-start authentication populating the credentials document.
pub trait Authenticator {
    /// Logs in the pre-provisioned administrator and persists its tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the login call fails or tokens cannot be
    /// persisted; the caller treats this as fatal for the suite.
    fn login_admin(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError>;

    /// Registers a fresh throwaway user, logs it in, and persists its token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when registration or login fails; nothing is
    /// persisted unless both calls succeeded.
    fn login_fresh_user(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError>;
}

// ============================================================================
// SECTION: Report Runner
// ============================================================================

/// Report generation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - A tool that ran and exited non-zero is an outcome, not an error.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report tool could not be spawned.
    #[error("report tool spawn failed: {0}")]
    Spawn(String),
    /// I/O failure while preparing or awaiting the report tool.
    #[error("report io error: {0}")]
    Io(String),
}

/// Outcome of one report-generation run.
///
/// # Invariants
/// - Variants are stable for serialization into observer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// The tool exited successfully.
    Generated,
    /// The tool ran but exited non-zero; the suite outcome is unaffected.
    Failed {
        /// Exit code when the tool reported one.
        code: Option<i32>,
    },
}

/// External report-generation collaborator.
///
/// The concrete implementation shells out to the report tool; tests swap in
/// a fake so the lifecycle can be exercised without spawning processes.
pub trait ReportRunner {
    /// Generates a report from the results directory.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the tool cannot be invoked at all.
    fn generate(&self, results_dir: &Path) -> Result<ReportOutcome, ReportError>;
}

// ============================================================================
// SECTION: Suite Observer
// ============================================================================

/// Lifecycle event emitted by the suite controller.
///
/// # Invariants
/// - Variants are stable for serialization into observer records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SuiteEvent {
    /// The controller advanced to a new phase.
    PhaseChanged {
        /// Phase before the transition.
        from: SuitePhase,
        /// Phase after the transition.
        to: SuitePhase,
    },
    /// A test unit started.
    TestStarted {
        /// Qualified test name.
        name: String,
    },
    /// A test unit passed.
    TestPassed {
        /// Qualified test name.
        name: String,
    },
    /// A test unit failed.
    TestFailed {
        /// Qualified test name.
        name: String,
    },
    /// A test unit was skipped.
    TestSkipped {
        /// Qualified test name.
        name: String,
    },
    /// Suite-start authentication failed; the suite aborts.
    AuthFailed {
        /// Stable description of the failure.
        reason: String,
    },
    /// Report generation finished with the given outcome.
    ReportCompleted {
        /// Outcome reported by the report runner.
        outcome: ReportOutcome,
    },
    /// The report tool could not be invoked at all.
    ReportFailed {
        /// Stable description of the failure.
        reason: String,
    },
}

/// Pure-observability sink for suite lifecycle events.
///
/// Observers must not mutate suite state; delivery is best-effort and an
/// observer failure never fails the suite.
pub trait SuiteObserver {
    /// Records a lifecycle event.
    fn on_event(&self, event: &SuiteEvent);
}
