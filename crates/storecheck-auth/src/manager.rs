// crates/storecheck-auth/src/manager.rs
// ============================================================================
// Module: Token Lifecycle Manager
// Description: Acquisition, persistence, and refresh of role-keyed bearer tokens.
// Purpose: Populate the credentials document at suite start and serve refresh tests.
// Dependencies: storecheck-core, storecheck-client, serde_json
// ============================================================================

//! ## Overview
//! The token manager drives the three credential flows against the backend:
//! administrator login with a fixed pre-provisioned identity, the fresh-user
//! register-then-login flow, and the deliberate refresh exchange. Tokens are
//! persisted through the [`StateStore`] seam under role-named keys. Nothing
//! here retries: every non-expected status surfaces as an [`AuthError`] and
//! leaves previously stored tokens untouched.
//!
//! Refresh is test-driven only. No expiry metadata is stored, so there is no
//! basis for an automatic refresh policy; a test invokes the exchange
//! because it wants to exercise it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use storecheck_client::ApiClient;
use storecheck_client::RequestSpec;
use storecheck_core::AuthError;
use storecheck_core::Authenticator;
use storecheck_core::KEY_REFRESH_TOKEN;
use storecheck_core::KEY_USER_EMAIL;
use storecheck_core::KEY_USER_PASSWORD;
use storecheck_core::Role;
use storecheck_core::SessionContext;
use storecheck_core::StateStore;

use crate::identity::FreshIdentity;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the token manager.
///
/// # Invariants
/// - The administrator identity is pre-provisioned on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenManagerConfig {
    /// Administrator account email.
    pub admin_email: String,
    /// Administrator account password.
    pub admin_password: String,
}

// ============================================================================
// SECTION: Token Manager
// ============================================================================

/// Token lifecycle manager over the authenticated HTTP client.
#[derive(Debug, Clone)]
pub struct TokenManager {
    /// HTTP client used for auth calls.
    client: ApiClient,
    /// Manager configuration.
    config: TokenManagerConfig,
}

impl TokenManager {
    /// Creates a token manager.
    #[must_use]
    pub const fn new(client: ApiClient, config: TokenManagerConfig) -> Self {
        Self {
            client,
            config,
        }
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// On success the access token stored under `role` is replaced and the
    /// new token returned. On any failure no stored token changes: a missing
    /// stored refresh token short-circuits before any request is issued, and
    /// a non-200 response maps to [`AuthError::RefreshFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] as described above.
    pub fn refresh(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
        role: Role,
    ) -> Result<String, AuthError> {
        let refresh_token = store
            .get_string(KEY_REFRESH_TOKEN, session.credentials_path())?
            .ok_or(AuthError::MissingRefreshToken)?;
        let body = json!({
            "refresh_token": refresh_token,
        });
        let response = self
            .client
            .post(&session.endpoint("refresh"), &RequestSpec::body(&body))
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        if response.status() != 200 {
            return Err(AuthError::RefreshFailed {
                status: response.status(),
            });
        }
        let parsed =
            response.json().map_err(|err| AuthError::Malformed(err.to_string()))?;
        let token = string_field(&parsed, "token")?;
        store.save_string(role.token_key(), &token, session.credentials_path())?;
        Ok(token)
    }
}

impl Authenticator for TokenManager {
    fn login_admin(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError> {
        let body = json!({
            "email": self.config.admin_email,
            "password": self.config.admin_password,
        });
        let response = self
            .client
            .post(&session.endpoint("login"), &RequestSpec::body(&body))
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        if response.status() != 200 {
            return Err(AuthError::LoginFailed {
                role: Role::Admin,
                status: response.status(),
            });
        }
        let parsed =
            response.json().map_err(|err| AuthError::Malformed(err.to_string()))?;
        let token = string_field(&parsed, "token")?;
        let refresh_token = string_field(&parsed, "refresh_token")?;
        store.save_string(Role::Admin.token_key(), &token, session.credentials_path())?;
        store.save_string(KEY_REFRESH_TOKEN, &refresh_token, session.credentials_path())?;
        Ok(())
    }

    fn login_fresh_user(
        &self,
        session: &SessionContext,
        store: &dyn StateStore,
    ) -> Result<(), AuthError> {
        let identity = FreshIdentity::random();
        let register = self
            .client
            .post(&session.endpoint("register"), &RequestSpec::body(&identity.register_body()))
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        if register.status() != 201 {
            return Err(AuthError::RegistrationFailed {
                status: register.status(),
            });
        }
        let login = self
            .client
            .post(&session.endpoint("login"), &RequestSpec::body(&identity.login_body()))
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        if login.status() != 200 {
            return Err(AuthError::LoginFailed {
                role: Role::User,
                status: login.status(),
            });
        }
        let parsed = login.json().map_err(|err| AuthError::Malformed(err.to_string()))?;
        let token = string_field(&parsed, "token")?;
        store.save_string(Role::User.token_key(), &token, session.credentials_path())?;
        store.save_string(KEY_USER_EMAIL, &identity.email, session.credentials_path())?;
        store.save_string(KEY_USER_PASSWORD, &identity.password, session.credentials_path())?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts a required string field from an auth response body.
fn string_field(value: &Value, name: &str) -> Result<String, AuthError> {
    value
        .get(name)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| AuthError::Malformed(format!("missing string field {name}")))
}
