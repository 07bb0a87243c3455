// crates/storecheck-core/src/core/keys.rs
// ============================================================================
// Module: Credential Roles and Well-Known Keys
// Description: Role-keyed credential names for the credentials document.
// Purpose: Provide stable key strings shared by the token manager and tests.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The credentials document is keyed by role. This module fixes the key
//! strings so the token manager, the suite controller, and consuming tests
//! agree on them. Identifier-document keys remain free-form by contract and
//! are intentionally not enumerated here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Well-Known Keys
// ============================================================================

/// Credentials-document key holding the administrator access token.
pub const KEY_ADMIN_TOKEN: &str = "admin";
/// Credentials-document key holding the standard-user access token.
pub const KEY_USER_TOKEN: &str = "user";
/// Credentials-document key holding the administrator refresh token.
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";
/// Credentials-document key holding the synthesized fresh-user email.
pub const KEY_USER_EMAIL: &str = "user_email";
/// Credentials-document key holding the synthesized fresh-user password.
pub const KEY_USER_PASSWORD: &str = "user_password";

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Authenticated role whose bearer token is held in the credentials document.
///
/// # Invariants
/// - Variants are stable for serialization and key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Pre-provisioned administrator identity.
    Admin,
    /// Throwaway standard-user identity registered fresh each suite run.
    User,
}

impl Role {
    /// Returns the credentials-document key holding this role's access token.
    #[must_use]
    pub const fn token_key(self) -> &'static str {
        match self {
            Self::Admin => KEY_ADMIN_TOKEN,
            Self::User => KEY_USER_TOKEN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::User => f.write_str("user"),
        }
    }
}
