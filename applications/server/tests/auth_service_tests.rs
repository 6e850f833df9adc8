/// Credential service tests
/// Tests token issuance, verification, expiry and signature checks
use chrono::{Duration, Utc};
use jap_core::UserId;
use jap_server::services::auth::{AuthError, AuthService};
use proptest::prelude::*;

fn create_test_auth_service() -> AuthService {
    AuthService::new("test-secret-key-for-testing", 24)
}

/// Test token verification returns the embedded user id
#[test]
fn test_token_generation_and_validation() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let token = auth_service.issue(&user_id).unwrap();
    assert!(!token.is_empty(), "Token should not be empty");

    let decoded = auth_service.verify(Some(&token)).unwrap();
    assert_eq!(decoded, user_id, "Decoded user ID should match original");
}

/// Test missing token is distinguished from a bad one
#[test]
fn test_missing_token() {
    let auth_service = create_test_auth_service();

    assert!(matches!(auth_service.verify(None), Err(AuthError::MissingToken)));
    assert!(matches!(auth_service.verify(Some("")), Err(AuthError::MissingToken)));
}

/// Test token validation with invalid signature
#[test]
fn test_token_validation_invalid_signature() {
    let auth_service = create_test_auth_service();
    let other_auth = AuthService::new("different-secret", 24);

    let token = other_auth.issue(&UserId::generate()).unwrap();

    let result = auth_service.verify(Some(&token));
    assert!(
        matches!(result, Err(AuthError::InvalidOrExpired)),
        "Token with wrong signature should fail validation"
    );
}

/// Test token validation with malformed token
#[test]
fn test_token_validation_malformed() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify(Some("not.a.valid.jwt.token"));
    assert!(matches!(result, Err(AuthError::InvalidOrExpired)));
}

/// Test a token minted more than 24 hours ago is rejected
#[test]
fn test_expired_token_rejected() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let issued_at = Utc::now() - Duration::hours(25);
    let token = auth_service.issue_at(&user_id, issued_at).unwrap();

    let result = auth_service.verify(Some(&token));
    assert!(
        matches!(result, Err(AuthError::InvalidOrExpired)),
        "Expired token should fail validation"
    );
}

/// Test a token close to, but inside, its window is still accepted
#[test]
fn test_token_valid_until_expiry() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let issued_at = Utc::now() - Duration::hours(23);
    let token = auth_service.issue_at(&user_id, issued_at).unwrap();

    assert_eq!(auth_service.verify(Some(&token)).unwrap(), user_id);
}

/// Test that instances sharing a secret accept each other's tokens
#[test]
fn test_tokens_verify_across_instances() {
    let issuer = AuthService::new("shared-secret", 24);
    let verifier = AuthService::new("shared-secret", 24);
    let user_id = UserId::generate();

    let token = issuer.issue(&user_id).unwrap();
    assert_eq!(verifier.verify(Some(&token)).unwrap(), user_id);
}

proptest! {
    #[test]
    fn prop_token_round_trip(raw_id in "[A-Za-z0-9-]{1,64}") {
        let auth_service = create_test_auth_service();
        let user_id = UserId::new(raw_id);

        let token = auth_service.issue(&user_id).unwrap();
        prop_assert_eq!(auth_service.verify(Some(&token)).unwrap(), user_id);
    }
}
