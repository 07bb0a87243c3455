// system-tests/tests/common/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Local mock backend speaking the storefront auth contract.
// Purpose: Let end-to-end suites run without a real backend deployment.
// Dependencies: serde_json, tiny_http
// ============================================================================

//! ## Overview
//! The mock backend implements `/login`, `/register`, and `/refresh` with
//! the response shapes the real storefront API produces, plus one
//! authenticated resource route used by full-run scenarios. Tokens are
//! deterministic so suites can assert exact stored values.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use serde_json::Value;
use serde_json::json;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

/// Administrator identity the mock backend accepts.
pub const ADMIN_EMAIL: &str = "admin@test.com";
/// Administrator password the mock backend accepts.
pub const ADMIN_PASSWORD: &str = "admin123";
/// Access token issued to the administrator.
pub const ADMIN_TOKEN: &str = "admin_tok_1";
/// Refresh token issued to the administrator.
pub const ADMIN_REFRESH_TOKEN: &str = "refresh_tok_1";
/// Access token issued after a successful refresh.
pub const REFRESHED_ADMIN_TOKEN: &str = "admin_tok_2";
/// Access token issued to the fresh user.
pub const USER_TOKEN: &str = "user_tok_1";

/// Running mock backend handle.
pub struct MockBackend {
    /// Base URL of the backend, including the `/api` prefix.
    pub base_url: String,
    /// Emails accepted by `/register` so far.
    pub registered: Arc<Mutex<HashSet<String>>>,
}

/// Starts the mock backend on a loopback port.
pub fn spawn_backend() -> MockBackend {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let registered = Arc::new(Mutex::new(HashSet::new()));
    let thread_registered = Arc::clone(&registered);
    thread::spawn(move || {
        for request in server.incoming_requests() {
            handle_request(request, &thread_registered);
        }
    });
    MockBackend {
        base_url: format!("http://127.0.0.1:{}/api", addr.port()),
        registered,
    }
}

/// Routes one request through the storefront contract.
fn handle_request(mut request: Request, registered: &Arc<Mutex<HashSet<String>>>) {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let url = request.url().to_string();
    let bearer = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("authorization"))
        .map(|header| header.value.as_str().to_string());
    let (status, response) = match url.as_str() {
        "/api/register" => register_response(&parsed, registered),
        "/api/login" => login_response(&parsed, registered),
        "/api/refresh" => refresh_response(&parsed),
        "/api/products" => products_response(bearer.as_deref()),
        _ => (404, json!({"success": false, "error": "not found"})),
    };
    let _ = request.respond(Response::from_string(response.to_string()).with_status_code(status));
}

/// Handles `/register`.
fn register_response(body: &Value, registered: &Arc<Mutex<HashSet<String>>>) -> (u16, Value) {
    let Some(email) = body.get("email").and_then(Value::as_str) else {
        return (400, json!({"success": false, "error": "email is required"}));
    };
    let mut guard = registered.lock().unwrap();
    if guard.contains(email) {
        return (409, json!({"success": false, "error": "email already exists"}));
    }
    guard.insert(email.to_string());
    (
        201,
        json!({
            "success": true,
            "message": "User registered successfully",
            "data": {
                "id": 2,
                "email": email,
                "name": body.get("name").cloned().unwrap_or(Value::Null),
                "is_admin": false,
                "created_at": "2026-01-05T09:30:00Z",
            },
        }),
    )
}

/// Handles `/login`.
fn login_response(body: &Value, registered: &Arc<Mutex<HashSet<String>>>) -> (u16, Value) {
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();
    if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
        return (
            200,
            json!({
                "success": true,
                "message": "Login successful",
                "token": ADMIN_TOKEN,
                "refresh_token": ADMIN_REFRESH_TOKEN,
                "user": {"id": 1, "email": email, "name": "Admin", "is_admin": true},
            }),
        );
    }
    if registered.lock().unwrap().contains(email) && password == "Test@123" {
        return (
            200,
            json!({
                "success": true,
                "message": "Login successful",
                "token": USER_TOKEN,
                "refresh_token": "refresh_user_1",
                "user": {"id": 2, "email": email, "name": "Test User", "is_admin": false},
            }),
        );
    }
    (401, json!({"success": false, "error": "invalid credentials"}))
}

/// Handles `/refresh`.
fn refresh_response(body: &Value) -> (u16, Value) {
    match body.get("refresh_token").and_then(Value::as_str) {
        None => (400, json!({"success": false, "error": "refresh_token is required"})),
        Some(ADMIN_REFRESH_TOKEN) => (
            200,
            json!({
                "success": true,
                "message": "Token refreshed successfully",
                "token": REFRESHED_ADMIN_TOKEN,
            }),
        ),
        Some(_) => (401, json!({"success": false, "error": "invalid or expired token"})),
    }
}

/// Handles the authenticated `/products` resource route.
fn products_response(bearer: Option<&str>) -> (u16, Value) {
    match bearer {
        Some(value) if value.starts_with("Bearer ") => (
            200,
            json!({
                "success": true,
                "data": [{"id": 42, "name": "new product1", "category": "Electronics"}],
            }),
        ),
        _ => (401, json!({"success": false, "error": "missing token"})),
    }
}
