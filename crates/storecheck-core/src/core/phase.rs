// crates/storecheck-core/src/core/phase.rs
// ============================================================================
// Module: Suite Phase
// Description: Suite lifecycle phases and legal transitions.
// Purpose: Capture the process-wide suite state machine as data.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! One suite run moves through a fixed phase sequence: `NotStarted →
//! Cleaning → Authenticating → Ready → Reporting → Finished`. Authentication
//! failure short-circuits from `Authenticating` directly to `Finished`; a
//! suite that never reached `Ready` must not run any test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Suite Phase
// ============================================================================

/// Lifecycle phase of one suite run.
///
/// # Invariants
/// - Variants are stable for serialization and observer records.
/// - Phases only advance; there is no transition back toward `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitePhase {
    /// Suite has not started.
    NotStarted,
    /// Prior persisted artifacts are being removed.
    Cleaning,
    /// Suite-start authentication is populating the credentials document.
    Authenticating,
    /// Credentials exist; test units may execute.
    Ready,
    /// External report generation is running.
    Reporting,
    /// Suite is over, successfully or not.
    Finished,
}

impl SuitePhase {
    /// Returns whether a transition from `self` to `next` is legal.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Cleaning)
                | (Self::Cleaning, Self::Authenticating)
                | (Self::Authenticating, Self::Ready | Self::Finished)
                | (Self::Ready, Self::Reporting)
                | (Self::Reporting, Self::Finished)
        )
    }

    /// Returns the stable lowercase label for this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Cleaning => "cleaning",
            Self::Authenticating => "authenticating",
            Self::Ready => "ready",
            Self::Reporting => "reporting",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SuitePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
