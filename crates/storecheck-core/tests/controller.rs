// crates/storecheck-core/tests/controller.rs
// ============================================================================
// Module: Suite Controller Tests
// Description: Verifies lifecycle ordering, fatality, and report containment.
// ============================================================================
//! ## Overview
//! Exercises the suite lifecycle against fake collaborators: the start
//! sequence cleans and authenticates before anything observes `Ready`,
//! authentication failure is fatal before any test runs, and report
//! failure is degraded rather than fatal.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use storecheck_core::AuthError;
use storecheck_core::Authenticator;
use storecheck_core::InMemoryStateStore;
use storecheck_core::KEY_REFRESH_TOKEN;
use storecheck_core::LifecycleError;
use storecheck_core::ReportError;
use storecheck_core::ReportOutcome;
use storecheck_core::ReportRunner;
use storecheck_core::Role;
use storecheck_core::SessionContext;
use storecheck_core::StateStore;
use storecheck_core::SuiteController;
use storecheck_core::SuiteEvent;
use storecheck_core::SuiteObserver;
use storecheck_core::SuitePhase;
use storecheck_core::SuiteRunConfig;
use storecheck_core::runtime::ENVIRONMENT_FILE_NAME;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fakes
// ============================================================================

/// Authenticator fake writing fixed tokens or failing on demand.
struct FakeAuth {
    /// Fail the administrator login with a 401.
    fail_admin: bool,
    /// Fail the fresh-user login with a 401.
    fail_user: bool,
}

impl Authenticator for FakeAuth {
    fn login_admin(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError> {
        if self.fail_admin {
            return Err(AuthError::LoginFailed {
                role: Role::Admin,
                status: 401,
            });
        }
        store.save_string(Role::Admin.token_key(), "tok_admin", session.credentials_path())?;
        store.save_string(KEY_REFRESH_TOKEN, "tok_refresh", session.credentials_path())?;
        Ok(())
    }

    fn login_fresh_user(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError> {
        if self.fail_user {
            return Err(AuthError::LoginFailed {
                role: Role::User,
                status: 401,
            });
        }
        store.save_string(Role::User.token_key(), "tok_user", session.credentials_path())?;
        Ok(())
    }
}

/// Report runner fake with a scripted result.
enum FakeReport {
    /// Tool runs and exits zero.
    Succeed,
    /// Tool runs and exits with the given code.
    ExitCode(i32),
    /// Tool cannot be spawned at all.
    SpawnError,
}

impl ReportRunner for FakeReport {
    fn generate(&self, _results_dir: &Path) -> Result<ReportOutcome, ReportError> {
        match self {
            Self::Succeed => Ok(ReportOutcome::Generated),
            Self::ExitCode(code) => Ok(ReportOutcome::Failed {
                code: Some(*code),
            }),
            Self::SpawnError => Err(ReportError::Spawn("no such tool".to_string())),
        }
    }
}

/// Observer fake collecting every event.
#[derive(Clone, Default)]
struct RecordingObserver {
    /// Collected events in delivery order.
    events: Arc<Mutex<Vec<SuiteEvent>>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<SuiteEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SuiteObserver for RecordingObserver {
    fn on_event(&self, event: &SuiteEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Builds a controller over a temp directory with the given fakes.
fn controller_in(
    dir: &TempDir,
    auth: FakeAuth,
    report: FakeReport,
    observer: RecordingObserver,
) -> SuiteController<InMemoryStateStore, FakeAuth, FakeReport> {
    let session = SessionContext::new(
        "http://127.0.0.1:5000/api",
        dir.path().join("token.json"),
        dir.path().join("ids.json"),
    );
    let config = SuiteRunConfig {
        results_dir: dir.path().join("allure-results"),
        environment: vec![("base_url".to_string(), "http://127.0.0.1:5000/api".to_string())],
    };
    SuiteController::with_observer(
        config,
        session,
        InMemoryStateStore::new(),
        auth,
        report,
        Box::new(observer),
    )
}

// ============================================================================
// SECTION: Start Sequence
// ============================================================================

#[test]
fn start_reaches_ready_and_populates_credentials() {
    let dir = TempDir::new().unwrap();
    let observer = RecordingObserver::default();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        observer.clone(),
    );

    controller.on_start().unwrap();
    assert_eq!(controller.phase(), SuitePhase::Ready);

    let creds = controller.session().credentials_path().to_path_buf();
    let store = controller.store();
    assert_eq!(store.get_string("admin", &creds).unwrap(), Some("tok_admin".to_string()));
    assert_eq!(store.get_string("user", &creds).unwrap(), Some("tok_user".to_string()));
    assert_eq!(
        store.get_string("refresh_token", &creds).unwrap(),
        Some("tok_refresh".to_string())
    );

    let phases: Vec<(SuitePhase, SuitePhase)> = observer
        .events()
        .iter()
        .filter_map(|event| match event {
            SuiteEvent::PhaseChanged {
                from,
                to,
            } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        [
            (SuitePhase::NotStarted, SuitePhase::Cleaning),
            (SuitePhase::Cleaning, SuitePhase::Authenticating),
            (SuitePhase::Authenticating, SuitePhase::Ready),
        ]
    );
}

#[test]
fn start_removes_previous_artifacts() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("allure-results");
    fs::create_dir_all(&results).unwrap();
    fs::write(results.join("stale.json"), "{}").unwrap();
    fs::write(dir.path().join("token.json"), r#"{"admin": "stale"}"#).unwrap();

    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        RecordingObserver::default(),
    );
    controller.on_start().unwrap();

    assert!(!results.join("stale.json").exists());
    assert!(results.join(ENVIRONMENT_FILE_NAME).exists());
    let manifest = fs::read_to_string(results.join(ENVIRONMENT_FILE_NAME)).unwrap();
    assert_eq!(manifest, "base_url=http://127.0.0.1:5000/api\n");
    assert!(!dir.path().join("token.json").exists());
}

#[test]
fn start_twice_is_an_invalid_transition() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        RecordingObserver::default(),
    );
    controller.on_start().unwrap();
    assert!(matches!(
        controller.on_start(),
        Err(LifecycleError::InvalidTransition {
            from: SuitePhase::Ready,
            to: SuitePhase::Cleaning,
        })
    ));
}

// ============================================================================
// SECTION: Authentication Fatality
// ============================================================================

#[test]
fn admin_login_failure_aborts_before_ready() {
    let dir = TempDir::new().unwrap();
    let observer = RecordingObserver::default();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: true,
            fail_user: false,
        },
        FakeReport::Succeed,
        observer.clone(),
    );

    let err = controller.on_start().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Auth(AuthError::LoginFailed {
            role: Role::Admin,
            status: 401,
        })
    ));
    assert_eq!(controller.phase(), SuitePhase::Finished);

    let creds = controller.session().credentials_path().to_path_buf();
    assert!(controller.store().get("admin", &creds).unwrap().is_none());
    assert!(
        observer
            .events()
            .iter()
            .any(|event| matches!(event, SuiteEvent::AuthFailed { .. }))
    );
}

#[test]
fn fresh_user_failure_aborts_before_ready() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: true,
        },
        FakeReport::Succeed,
        RecordingObserver::default(),
    );

    let err = controller.on_start().unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::Auth(AuthError::LoginFailed {
            role: Role::User,
            status: 401,
        })
    ));
    assert_eq!(controller.phase(), SuitePhase::Finished);
    let creds = controller.session().credentials_path().to_path_buf();
    assert!(controller.store().get("user", &creds).unwrap().is_none());
}

#[test]
fn aborted_suite_rejects_finish_and_hooks() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: true,
            fail_user: false,
        },
        FakeReport::Succeed,
        RecordingObserver::default(),
    );
    let _ = controller.on_start();

    assert!(matches!(controller.on_finish(), Err(LifecycleError::InvalidTransition { .. })));
    assert!(matches!(
        controller.on_test_start("products::create"),
        Err(LifecycleError::NotReady {
            phase: SuitePhase::Finished,
        })
    ));
}

// ============================================================================
// SECTION: Finish Sequence
// ============================================================================

#[test]
fn finish_generates_report_and_finishes() {
    let dir = TempDir::new().unwrap();
    let observer = RecordingObserver::default();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        observer.clone(),
    );
    controller.on_start().unwrap();
    let outcome = controller.on_finish().unwrap();
    assert_eq!(outcome, ReportOutcome::Generated);
    assert_eq!(controller.phase(), SuitePhase::Finished);
    assert!(observer.events().iter().any(|event| matches!(
        event,
        SuiteEvent::ReportCompleted {
            outcome: ReportOutcome::Generated,
        }
    )));
}

#[test]
fn nonzero_report_exit_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::ExitCode(3),
        RecordingObserver::default(),
    );
    controller.on_start().unwrap();
    let outcome = controller.on_finish().unwrap();
    assert_eq!(
        outcome,
        ReportOutcome::Failed {
            code: Some(3),
        }
    );
    assert_eq!(controller.phase(), SuitePhase::Finished);
}

#[test]
fn report_spawn_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let observer = RecordingObserver::default();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::SpawnError,
        observer.clone(),
    );
    controller.on_start().unwrap();
    let outcome = controller.on_finish().unwrap();
    assert_eq!(
        outcome,
        ReportOutcome::Failed {
            code: None,
        }
    );
    assert!(
        observer
            .events()
            .iter()
            .any(|event| matches!(event, SuiteEvent::ReportFailed { .. }))
    );
}

// ============================================================================
// SECTION: Per-Test Hooks
// ============================================================================

#[test]
fn hooks_record_outcomes_while_ready() {
    let dir = TempDir::new().unwrap();
    let observer = RecordingObserver::default();
    let mut controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        observer.clone(),
    );
    controller.on_start().unwrap();
    controller.on_test_start("products::create").unwrap();
    controller.on_test_passed("products::create").unwrap();
    controller.on_test_failed("products::delete").unwrap();
    controller.on_test_skipped("products::update").unwrap();

    let events = observer.events();
    assert!(events.contains(&SuiteEvent::TestStarted {
        name: "products::create".to_string(),
    }));
    assert!(events.contains(&SuiteEvent::TestPassed {
        name: "products::create".to_string(),
    }));
    assert!(events.contains(&SuiteEvent::TestFailed {
        name: "products::delete".to_string(),
    }));
    assert!(events.contains(&SuiteEvent::TestSkipped {
        name: "products::update".to_string(),
    }));
}

#[test]
fn hooks_before_start_are_rejected() {
    let dir = TempDir::new().unwrap();
    let controller = controller_in(
        &dir,
        FakeAuth {
            fail_admin: false,
            fail_user: false,
        },
        FakeReport::Succeed,
        RecordingObserver::default(),
    );
    assert!(matches!(
        controller.on_test_start("products::create"),
        Err(LifecycleError::NotReady {
            phase: SuitePhase::NotStarted,
        })
    ));
}
