// crates/storecheck-auth/src/lib.rs
// ============================================================================
// Module: Storecheck Auth Library
// Description: Token lifecycle flows over the core authenticator seam.
// Purpose: Expose the token manager and fresh-identity synthesis.
// Dependencies: storecheck-core, storecheck-client, rand, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the concrete [`Authenticator`](storecheck_core::Authenticator)
//! used by real suite runs: administrator login, the fresh-user
//! register-then-login flow, and the deliberate refresh exchange, all
//! persisting through the core state-store seam.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identity;
pub mod manager;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identity::FreshIdentity;
pub use manager::TokenManager;
pub use manager::TokenManagerConfig;
