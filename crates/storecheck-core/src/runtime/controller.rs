// crates/storecheck-core/src/runtime/controller.rs
// ============================================================================
// Module: Suite Lifecycle Controller
// Description: Process-wide suite start/finish orchestration.
// Purpose: Clean prior artifacts, authenticate, and trigger report generation.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The controller owns the suite lifecycle: it clears previously persisted
//! artifacts, populates the credentials document through the authenticator,
//! and hands test units an explicit session context. When authentication
//! fails the suite aborts before any test observes `Ready`. After the run it
//! invokes the external report generator; report failure is degraded, never
//! fatal. Per-test hooks are pure observability and mutate nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::SessionContext;
use crate::core::SuitePhase;
use crate::interfaces::AuthError;
use crate::interfaces::Authenticator;
use crate::interfaces::ReportOutcome;
use crate::interfaces::ReportRunner;
use crate::interfaces::StateStore;
use crate::interfaces::StoreError;
use crate::interfaces::SuiteEvent;
use crate::interfaces::SuiteObserver;
use crate::runtime::environment::write_environment_manifest;
use crate::runtime::observer::NullObserver;

// ============================================================================
// SECTION: Lifecycle Errors
// ============================================================================

/// Suite lifecycle errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Report-tool failure is not represented here; it is an outcome.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A lifecycle call was made out of order.
    #[error("invalid suite transition from {from} to {to}")]
    InvalidTransition {
        /// Phase the controller was in.
        from: SuitePhase,
        /// Phase the call attempted to reach.
        to: SuitePhase,
    },
    /// A per-test hook was invoked outside the ready phase.
    #[error("test hooks require the ready phase, suite is {phase}")]
    NotReady {
        /// Phase the controller was in.
        phase: SuitePhase,
    },
    /// Suite-start authentication failed; no test may run.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Credentials or identifiers document access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Prior artifacts could not be removed.
    #[error("cleaning previous artifacts failed: {0}")]
    Clean(String),
    /// The environment manifest could not be written.
    #[error("environment manifest write failed: {0}")]
    Environment(String),
}

// ============================================================================
// SECTION: Suite Run Configuration
// ============================================================================

/// Configuration for one suite run.
///
/// # Invariants
/// - `results_dir` is owned by the suite and deleted wholesale at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteRunConfig {
    /// Directory collecting raw results for the report tool.
    pub results_dir: PathBuf,
    /// Environment manifest entries rendered by the report tool.
    pub environment: Vec<(String, String)>,
}

// ============================================================================
// SECTION: Suite Controller
// ============================================================================

/// Suite lifecycle controller generic over its collaborator seams.
pub struct SuiteController<S, A, R> {
    /// Suite run configuration.
    config: SuiteRunConfig,
    /// Session context handed to test units.
    session: SessionContext,
    /// State store implementation.
    store: S,
    /// Suite-start authenticator implementation.
    auth: A,
    /// Report runner implementation.
    report: R,
    /// Lifecycle observer.
    observer: Box<dyn SuiteObserver>,
    /// Current lifecycle phase.
    phase: SuitePhase,
}

impl<S, A, R> SuiteController<S, A, R>
where
    S: StateStore,
    A: Authenticator,
    R: ReportRunner,
{
    /// Creates a controller with a discarding observer.
    pub fn new(
        config: SuiteRunConfig,
        session: SessionContext,
        store: S,
        auth: A,
        report: R,
    ) -> Self {
        Self::with_observer(config, session, store, auth, report, Box::new(NullObserver))
    }

    /// Creates a controller with an explicit observer.
    pub fn with_observer(
        config: SuiteRunConfig,
        session: SessionContext,
        store: S,
        auth: A,
        report: R,
        observer: Box<dyn SuiteObserver>,
    ) -> Self {
        Self {
            config,
            session,
            store,
            auth,
            report,
            observer,
            phase: SuitePhase::NotStarted,
        }
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SuitePhase {
        self.phase
    }

    /// Returns the session context handed to test units.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Returns the state store shared with test units.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Runs the suite-start sequence: clean, authenticate, become ready.
    ///
    /// Any authentication failure aborts the suite: the phase moves straight
    /// to `Finished` and the error propagates, so no test observes `Ready`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when called out of order, when cleaning or
    /// the environment manifest fails, or when authentication fails.
    pub fn on_start(&mut self) -> Result<(), LifecycleError> {
        self.advance(SuitePhase::Cleaning)?;
        self.clean_previous_artifacts()?;
        write_environment_manifest(&self.config.results_dir, &self.config.environment)
            .map_err(|err| LifecycleError::Environment(err.to_string()))?;

        self.advance(SuitePhase::Authenticating)?;
        if let Err(err) = self.authenticate() {
            self.observer.on_event(&SuiteEvent::AuthFailed {
                reason: err.to_string(),
            });
            self.advance(SuitePhase::Finished)?;
            return Err(LifecycleError::Auth(err));
        }
        self.advance(SuitePhase::Ready)
    }

    /// Runs the suite-finish sequence: generate the report, finish.
    ///
    /// Report failure (a non-zero exit or a tool that could not be spawned)
    /// is recorded through the observer and folded into the returned outcome;
    /// it never fails the suite.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] when the suite is not
    /// in the ready phase.
    pub fn on_finish(&mut self) -> Result<ReportOutcome, LifecycleError> {
        self.advance(SuitePhase::Reporting)?;
        let outcome = match self.report.generate(&self.config.results_dir) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.observer.on_event(&SuiteEvent::ReportFailed {
                    reason: err.to_string(),
                });
                ReportOutcome::Failed {
                    code: None,
                }
            }
        };
        self.observer.on_event(&SuiteEvent::ReportCompleted {
            outcome,
        });
        self.advance(SuitePhase::Finished)?;
        Ok(outcome)
    }

    /// Records that a test unit started.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotReady`] outside the ready phase.
    pub fn on_test_start(&self, name: &str) -> Result<(), LifecycleError> {
        self.observe_test(SuiteEvent::TestStarted {
            name: name.to_string(),
        })
    }

    /// Records that a test unit passed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotReady`] outside the ready phase.
    pub fn on_test_passed(&self, name: &str) -> Result<(), LifecycleError> {
        self.observe_test(SuiteEvent::TestPassed {
            name: name.to_string(),
        })
    }

    /// Records that a test unit failed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotReady`] outside the ready phase.
    pub fn on_test_failed(&self, name: &str) -> Result<(), LifecycleError> {
        self.observe_test(SuiteEvent::TestFailed {
            name: name.to_string(),
        })
    }

    /// Records that a test unit was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::NotReady`] outside the ready phase.
    pub fn on_test_skipped(&self, name: &str) -> Result<(), LifecycleError> {
        self.observe_test(SuiteEvent::TestSkipped {
            name: name.to_string(),
        })
    }

    /// Emits a per-test event after checking the phase.
    fn observe_test(&self, event: SuiteEvent) -> Result<(), LifecycleError> {
        if self.phase != SuitePhase::Ready {
            return Err(LifecycleError::NotReady {
                phase: self.phase,
            });
        }
        self.observer.on_event(&event);
        Ok(())
    }

    /// Advances the phase, emitting a transition event.
    fn advance(&mut self, to: SuitePhase) -> Result<(), LifecycleError> {
        if !self.phase.can_advance_to(to) {
            return Err(LifecycleError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.observer.on_event(&SuiteEvent::PhaseChanged {
            from: self.phase,
            to,
        });
        self.phase = to;
        Ok(())
    }

    /// Removes the previous results directory and both state documents.
    ///
    /// Absence of any of them is not an error; the next run starts fresh
    /// either way.
    fn clean_previous_artifacts(&self) -> Result<(), LifecycleError> {
        remove_dir_if_present(&self.config.results_dir)
            .map_err(|err| LifecycleError::Clean(err.to_string()))?;
        remove_file_if_present(self.session.credentials_path())
            .map_err(|err| LifecycleError::Clean(err.to_string()))?;
        remove_file_if_present(self.session.identifiers_path())
            .map_err(|err| LifecycleError::Clean(err.to_string()))
    }

    /// Populates the credentials document for both roles.
    fn authenticate(&self) -> Result<(), AuthError> {
        self.auth.login_admin(&self.session, &self.store)?;
        self.auth.login_fresh_user(&self.session, &self.store)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Removes a directory tree, treating absence as success.
fn remove_dir_if_present(path: &Path) -> Result<(), io::Error> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Removes a file, treating absence as success.
fn remove_file_if_present(path: &Path) -> Result<(), io::Error> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
