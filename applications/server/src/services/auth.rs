/// Credential service - signed, time-limited bearer tokens
use chrono::{DateTime, Duration, Utc};
use jap_core::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token verification and issuance failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidOrExpired,

    #[error("Failed to sign token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Stateless issuer/verifier: any instance sharing the secret can verify
/// tokens minted by any other.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub iat: i64,    // Issued at
    pub exp: i64,    // Expiration time
}

impl AuthService {
    pub fn new(secret: &str, expiration_hours: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiration: Duration::hours(i64::from(expiration_hours)),
        }
    }

    /// Issue a token for `user_id`, valid from now
    pub fn issue(&self, user_id: &UserId) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if minted at `issued_at`
    pub fn issue_at(&self, user_id: &UserId, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.token_expiration).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Encoding)
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify_claims(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidOrExpired
            })?
            .claims;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidOrExpired);
        }

        Ok(claims)
    }

    /// Verify a token and return the user it was issued to
    pub fn verify(&self, token: Option<&str>) -> Result<UserId, AuthError> {
        self.verify_claims(token).map(|claims| UserId::new(claims.sub))
    }
}

/// Extract the token from an `Authorization: <scheme> <token>` header value
///
/// The scheme itself is not checked; a present but unverifiable token is
/// rejected later as invalid rather than missing.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let auth = AuthService::new("secret", 24);
        let user_id = UserId::new("user-123");

        let token = auth.issue(&user_id).unwrap();
        assert_eq!(auth.verify(Some(&token)).unwrap(), user_id);
    }

    #[test]
    fn test_token_expires_after_configured_window() {
        let auth = AuthService::new("secret", 24);
        let user_id = UserId::new("user-123");

        let token = auth.issue(&user_id).unwrap();
        let claims = auth.verify_claims(Some(&token)).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Basic abc")), Some("abc"));
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("abc.def")), None);
        assert_eq!(bearer_token(None), None);
    }
}
