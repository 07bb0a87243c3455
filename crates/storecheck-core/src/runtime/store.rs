// crates/storecheck-core/src/runtime/store.rs
// ============================================================================
// Module: Storecheck In-Memory Store
// Description: Simple in-memory state store for tests and examples.
// Purpose: Provide a deterministic store implementation without touching disk.
// Dependencies: crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`StateStore`]
//! for tests and local demos. Documents are keyed by their would-be path.
//! It is not intended for production use and has no persistence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use serde_json::Value;

use crate::core::StateDocument;
use crate::interfaces::StateStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory state store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStateStore {
    /// Document map protected by a mutex, keyed by document path.
    documents: Arc<Mutex<BTreeMap<PathBuf, StateDocument>>>,
}

impl InMemoryStateStore {
    /// Creates a new in-memory state store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Returns a snapshot of the document at `document`, empty when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the store mutex is poisoned.
    pub fn snapshot(&self, document: &Path) -> Result<StateDocument, StoreError> {
        let guard = self
            .documents
            .lock()
            .map_err(|_| StoreError::Store("state store mutex poisoned".to_string()))?;
        Ok(guard.get(document).cloned().unwrap_or_default())
    }

    /// Removes the document at `document`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the store mutex is poisoned.
    pub fn remove_document(&self, document: &Path) -> Result<(), StoreError> {
        self.documents
            .lock()
            .map_err(|_| StoreError::Store("state store mutex poisoned".to_string()))?
            .remove(document);
        Ok(())
    }
}

impl StateStore for InMemoryStateStore {
    fn save(&self, key: &str, value: &Value, document: &Path) -> Result<(), StoreError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|_| StoreError::Store("state store mutex poisoned".to_string()))?;
        guard.entry(document.to_path_buf()).or_default().set(key, value.clone());
        drop(guard);
        Ok(())
    }

    fn get(&self, key: &str, document: &Path) -> Result<Option<Value>, StoreError> {
        let guard = self
            .documents
            .lock()
            .map_err(|_| StoreError::Store("state store mutex poisoned".to_string()))?;
        Ok(guard.get(document).and_then(|doc| doc.value(key).cloned()))
    }
}
