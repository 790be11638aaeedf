//! Authentication and credential handling tests
//!
//! Covers credential validation, password hashing, and JWT round trips.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use shared::validation::{validate_email, validate_password, validate_phone};

// ============================================================================
// Helper Types (mirroring the token claims)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    exp: i64,
    iat: i64,
}

const TEST_SECRET: &[u8] = b"test-signing-secret";

fn make_token(sub: &str, name: &str, expires_in: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        name: name.to_string(),
        exp: now + expires_in,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap()
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}@[a-z]{3,8}\\.(com|org|net|io)"
}

fn password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%]{8,20}"
}

fn short_password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{0,7}"
}

fn phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[2-9][0-9]{9}",
        "1[2-9][0-9]{9}",
        "\\([0-9]{3}\\) [0-9]{3}-[0-9]{4}",
    ]
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Well-formed email addresses pass validation
    #[test]
    fn prop_valid_emails_accepted(email in email_strategy()) {
        prop_assert!(validate_email(&email).is_ok());
    }

    /// Passwords of eight or more characters pass validation
    #[test]
    fn prop_valid_passwords_accepted(password in password_strategy()) {
        prop_assert!(validate_password(&password).is_ok());
    }

    /// Short passwords never pass
    #[test]
    fn prop_short_passwords_rejected(password in short_password_strategy()) {
        prop_assert!(validate_password(&password).is_err());
    }

    /// Ten-digit numbers pass in any common formatting
    #[test]
    fn prop_valid_phones_accepted(phone in phone_strategy()) {
        prop_assert!(validate_phone(&phone).is_ok());
    }

    /// JWT claims survive an encode/decode round trip
    #[test]
    fn prop_jwt_round_trip(name in "[A-Za-z ]{1,30}") {
        let user_id = Uuid::new_v4();
        let token = make_token(&user_id.to_string(), &name, 3600);

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET),
            &Validation::default(),
        )
        .unwrap();

        prop_assert_eq!(data.claims.sub, user_id.to_string());
        prop_assert_eq!(data.claims.name, name);
    }
}

// ============================================================================
// Unit Tests: Token Validation
// ============================================================================

mod token_tests {
    use super::*;

    #[test]
    fn test_expired_token_rejected() {
        let token = make_token(&Uuid::new_v4().to_string(), "Pat Lee", -3600);
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET),
            &Validation::default(),
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = make_token(&Uuid::new_v4().to_string(), "Pat Lee", 3600);
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"another-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = decode::<Claims>(
            "not.a.token",
            &DecodingKey::from_secret(TEST_SECRET),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_tokens_unique() {
        let tokens: HashSet<Uuid> = (0..100).map(|_| Uuid::new_v4()).collect();
        assert_eq!(tokens.len(), 100);
    }
}

// ============================================================================
// Unit Tests: Password Hashing
// ============================================================================

mod password_tests {
    #[test]
    fn test_bcrypt_round_trip() {
        // Low cost keeps the test fast; production uses DEFAULT_COST
        let hash = bcrypt::hash("correct horse battery", 4).unwrap();
        assert!(bcrypt::verify("correct horse battery", &hash).unwrap());
        assert!(!bcrypt::verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_bcrypt_hash_is_not_plaintext() {
        let hash = bcrypt::hash("hunter2hunter2", 4).unwrap();
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, "hunter2hunter2");
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = bcrypt::hash("hunter2hunter2", 4).unwrap();
        let second = bcrypt::hash("hunter2hunter2", 4).unwrap();
        assert_ne!(first, second);
    }
}

// ============================================================================
// Unit Tests: Credential Validation Edges
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_email_rejects_malformed() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_phone_accepts_country_code() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("15551234567").is_ok());
    }

    #[test]
    fn test_phone_rejects_wrong_lengths() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("123456789012").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_password_boundary() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }
}
