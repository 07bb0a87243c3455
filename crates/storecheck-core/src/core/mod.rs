// crates/storecheck-core/src/core/mod.rs
// ============================================================================
// Module: Storecheck Core Types
// Description: Canonical document, key, and session structures.
// Purpose: Provide stable, serializable types shared by every Storecheck seam.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the persistent state documents, the role-keyed
//! credential names, and the per-suite session context. These types are the
//! canonical source of truth for the store, authentication, and lifecycle
//! surfaces built on top of them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod document;
pub mod keys;
pub mod phase;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use document::StateDocument;
pub use keys::KEY_ADMIN_TOKEN;
pub use keys::KEY_REFRESH_TOKEN;
pub use keys::KEY_USER_EMAIL;
pub use keys::KEY_USER_PASSWORD;
pub use keys::KEY_USER_TOKEN;
pub use keys::Role;
pub use phase::SuitePhase;
pub use session::SessionContext;
