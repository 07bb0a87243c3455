// crates/storecheck-store-json/src/store.rs
// ============================================================================
// Module: JSON File State Store
// Description: File-backed StateStore keeping one JSON object per document.
// Purpose: Persist fixture state across independently-executed test units.
// Dependencies: storecheck-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! This module implements [`StateStore`] over plain JSON files. Every call
//! is an independent load-modify-store round trip: the document is read in
//! full, mutated in memory, and written back in full, so the last full write
//! wins and no handle stays open between calls. Writes go through a
//! temporary file in the target directory and a rename, so an interrupted
//! process never leaves a half-written document behind.
//!
//! An absent or empty file reads as an empty mapping. A document that exists
//! but fails to parse reads as absent for `get`, but fails a `save` loudly:
//! silently replacing prior state could mask a real bug in the suite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use storecheck_core::StateDocument;
use storecheck_core::StateStore;
use storecheck_core::StoreError;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: JSON Store
// ============================================================================

/// File-backed JSON state store.
///
/// # Invariants
/// - Each document path holds exactly one JSON object.
/// - Saves rewrite the whole document; key-level atomicity does not exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStateStore;

impl JsonStateStore {
    /// Creates a JSON state store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StateStore for JsonStateStore {
    fn save(&self, key: &str, value: &Value, document: &Path) -> Result<(), StoreError> {
        let mut doc = load_document(document)?;
        doc.set(key, value.clone());
        write_document(document, &doc)
    }

    fn get(&self, key: &str, document: &Path) -> Result<Option<Value>, StoreError> {
        match load_document(document) {
            Ok(doc) => Ok(doc.value(key).cloned()),
            Err(StoreError::Corrupt(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the document at `path`, treating absence and emptiness as empty.
fn load_document(path: &Path) -> Result<StateDocument, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StateDocument::new()),
        Err(err) => return Err(StoreError::Io(err.to_string())),
    };
    if content.trim().is_empty() {
        return Ok(StateDocument::new());
    }
    serde_json::from_str(&content).map_err(|err| StoreError::Corrupt(err.to_string()))
}

/// Writes the document to `path` atomically via a sibling temp file.
fn write_document(path: &Path, doc: &StateDocument) -> Result<(), StoreError> {
    let serialized =
        serde_json::to_string_pretty(doc).map_err(|err| StoreError::Serialize(err.to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|err| StoreError::Io(err.to_string()))?;
    let mut temp = NamedTempFile::new_in(dir).map_err(|err| StoreError::Io(err.to_string()))?;
    temp.write_all(serialized.as_bytes()).map_err(|err| StoreError::Io(err.to_string()))?;
    temp.persist(path).map_err(|err| StoreError::Io(err.to_string()))?;
    Ok(())
}
