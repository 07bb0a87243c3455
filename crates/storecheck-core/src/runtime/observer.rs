// crates/storecheck-core/src/runtime/observer.rs
// ============================================================================
// Module: Storecheck Suite Observers
// Description: Reference observers for suite lifecycle events.
// Purpose: Record lifecycle events as JSON lines or discard them.
// Dependencies: crate::interfaces, serde_json, std
// ============================================================================

//! ## Overview
//! `JsonLineObserver` writes one JSON record per lifecycle event to an
//! arbitrary writer. Delivery is best-effort: a write failure is dropped
//! rather than failing the suite, because observers are pure observability.
//! `NullObserver` discards everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use crate::interfaces::SuiteEvent;
use crate::interfaces::SuiteObserver;

// ============================================================================
// SECTION: JSON-Line Observer
// ============================================================================

/// Observer writing one JSON record per event.
pub struct JsonLineObserver<W: Write + Send> {
    /// Output writer for event records.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLineObserver<W> {
    /// Creates an observer over the given writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the observer and returns the inner writer, or `None` when
    /// the writer mutex was poisoned.
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

impl<W: Write + Send> SuiteObserver for JsonLineObserver<W> {
    fn on_event(&self, event: &SuiteEvent) {
        let Ok(mut guard) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *guard, event).is_ok() {
            let _ = guard.write_all(b"\n");
        }
    }
}

// ============================================================================
// SECTION: Null Observer
// ============================================================================

/// Observer discarding every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SuiteObserver for NullObserver {
    fn on_event(&self, _event: &SuiteEvent) {}
}
