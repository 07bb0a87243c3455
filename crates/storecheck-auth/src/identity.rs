// crates/storecheck-auth/src/identity.rs
// ============================================================================
// Module: Fresh Identity Synthesis
// Description: Collision-free throwaway user identities for one suite run.
// Purpose: Give per-user tests a clean account whose state cannot leak across runs.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Tests that mutate per-user resources (cart, wishlist, notifications) need
//! an account nobody has touched before. A fresh identity randomizes the
//! email local part and the phone digits while keeping the fixed password
//! policy and the synthetic profile fields the registration endpoint
//! validates. The identity lives for one suite run and is never reused.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed password satisfying the backend password policy.
const FRESH_USER_PASSWORD: &str = "Test@123";
/// Display name used for every fresh account.
const FRESH_USER_NAME: &str = "Test User";
/// Street names for the synthetic address field.
const STREETS: [&str; 6] =
    ["Maple Street", "Oak Avenue", "Cedar Lane", "Elm Road", "Pine Court", "Birch Way"];
/// City names for the synthetic address field.
const CITIES: [&str; 5] = ["Springfield", "Riverton", "Lakeside", "Fairview", "Hillcrest"];

// ============================================================================
// SECTION: Fresh Identity
// ============================================================================

/// One synthesized throwaway user identity.
///
/// # Invariants
/// - `email` has a randomized local part; collisions across runs are
///   statistically negligible.
/// - `password` follows the fixed backend policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshIdentity {
    /// Randomized account email.
    pub email: String,
    /// Fixed-policy account password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Synthetic phone number accepted by registration validation.
    pub phone: String,
    /// Synthetic postal address accepted by registration validation.
    pub address: String,
}

impl FreshIdentity {
    /// Synthesizes an identity from the given randomness source.
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let local: String = (0..8)
            .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect();
        let digits: String =
            (0..8).map(|_| char::from_digit(rng.gen_range(0..10), 10).unwrap_or('0')).collect();
        let street = STREETS[rng.gen_range(0..STREETS.len())];
        let city = CITIES[rng.gen_range(0..CITIES.len())];
        let number = rng.gen_range(1..999_u32);
        Self {
            email: format!("test_{local}@gmail.com"),
            password: FRESH_USER_PASSWORD.to_string(),
            name: FRESH_USER_NAME.to_string(),
            phone: format!("+010{digits}"),
            address: format!("{number} {street}, {city}"),
        }
    }

    /// Synthesizes an identity from thread-local randomness.
    #[must_use]
    pub fn random() -> Self {
        Self::synthesize(&mut rand::thread_rng())
    }

    /// Returns the registration request body for this identity.
    #[must_use]
    pub fn register_body(&self) -> Value {
        json!({
            "email": self.email,
            "password": self.password,
            "name": self.name,
            "phone": self.phone,
            "address": self.address,
            "is_admin": false,
        })
    }

    /// Returns the login request body for this identity.
    #[must_use]
    pub fn login_body(&self) -> Value {
        json!({
            "email": self.email,
            "password": self.password,
        })
    }
}
