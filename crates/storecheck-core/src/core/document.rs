// crates/storecheck-core/src/core/document.rs
// ============================================================================
// Module: State Document
// Description: Schema-free key/value mapping persisted as one JSON object.
// Purpose: Provide the in-memory form of the credentials and identifiers documents.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A state document is a single JSON object mapping string keys to arbitrary
//! JSON values. Two logical documents exist per suite: credentials (tokens)
//! and identifiers (entity ids discovered during execution). Documents are
//! schema-free; no type is enforced across keys, and a document that does not
//! exist on disk is equivalent to an empty mapping.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: State Document
// ============================================================================

/// One persistent key/value document.
///
/// # Invariants
/// - Keys are unique within a document; setting an existing key replaces it.
/// - Values are heterogeneous JSON; no cross-key schema exists.
/// - Insertion order is not significant; lookups are by key only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDocument {
    /// Key/value entries backing the document.
    entries: BTreeMap<String, Value>,
}

impl StateDocument {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets `key` to `value`, replacing any existing entry (upsert).
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Returns the value stored under `key`, if present.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns whether the document holds an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for StateDocument {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
