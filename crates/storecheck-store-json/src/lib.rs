// crates/storecheck-store-json/src/lib.rs
// ============================================================================
// Module: Storecheck JSON Store Library
// Description: File-backed JSON implementation of the core state store.
// Purpose: Expose the JSON document store used by real suite runs.
// Dependencies: storecheck-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! This crate ships the production [`StateStore`](storecheck_core::StateStore)
//! implementation: one JSON object per document file, full
//! load-modify-store round trips, and atomic temp-file-plus-rename writes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::JsonStateStore;
