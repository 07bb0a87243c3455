// crates/storecheck-core/src/runtime/mod.rs
// ============================================================================
// Module: Storecheck Runtime
// Description: Suite controller, step schedule, observers, and helpers.
// Purpose: Drive the suite lifecycle against the interface seams.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the suite lifecycle controller, the explicit
//! step schedule, reference observers, and the in-memory store used by
//! tests. All lifecycle surfaces call into the same controller logic to
//! preserve the phase invariants.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod controller;
pub mod environment;
pub mod observer;
pub mod schedule;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use controller::LifecycleError;
pub use controller::SuiteController;
pub use controller::SuiteRunConfig;
pub use environment::ENVIRONMENT_FILE_NAME;
pub use environment::write_environment_manifest;
pub use observer::JsonLineObserver;
pub use observer::NullObserver;
pub use schedule::ScheduleError;
pub use schedule::StepGraph;
pub use schedule::StepOutcome;
pub use schedule::StepResult;
pub use schedule::StepStatus;
pub use store::InMemoryStateStore;
