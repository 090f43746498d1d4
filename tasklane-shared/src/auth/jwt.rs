/// Token issue and validation
///
/// This module provides the signed identity tokens used for request
/// authentication. Tokens are HMAC-signed (HS256 by default) and carry a
/// fixed, typed claim set: subject email, numeric user id, and expiration.
///
/// There is no refresh mechanism and no revocation list. Expiry is the only
/// termination mechanism: a token is valid iff its signature verifies under
/// the server secret and `exp` is still in the future.
///
/// # Example
///
/// ```
/// use tasklane_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
/// use jsonwebtoken::Algorithm;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new("user@example.com".to_string(), 42, Duration::minutes(30));
/// let token = create_token(&claims, "secret-key", Algorithm::HS256)?;
///
/// let validated = validate_token(&token, "secret-key", Algorithm::HS256)?;
/// assert_eq!(validated.user_id, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// The configured algorithm is not an HMAC variant
    #[error("Unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),
}

/// Token claims
///
/// Exactly the three claims the wire format defines; anything else in a
/// presented token is ignored, and a token missing any of these fails
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email address
    pub sub: String,

    /// Numeric user id. This is the canonical identity claim for
    /// authorization decisions; `sub` is informational.
    pub user_id: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring `ttl` from now.
    pub fn new(email: String, user_id: i64, ttl: Duration) -> Self {
        let expiration = Utc::now() + ttl;

        Self {
            sub: email,
            user_id,
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Rejects non-HMAC algorithms. The token format is fixed to a single
/// shared-secret symmetric scheme.
fn ensure_hmac(algorithm: Algorithm) -> Result<(), JwtError> {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(()),
        other => Err(JwtError::UnsupportedAlgorithm(other)),
    }
}

/// Signs the claims into a `header.payload.signature` token string.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails, or
/// `JwtError::UnsupportedAlgorithm` for non-HMAC algorithms.
pub fn create_token(
    claims: &Claims,
    secret: &str,
    algorithm: Algorithm,
) -> Result<String, JwtError> {
    ensure_hmac(algorithm)?;

    let header = Header::new(algorithm);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims.
///
/// Verifies that the signature matches the secret, the token parses as the
/// typed claim set, and `exp` has not passed. No leeway is granted on
/// expiration.
///
/// # Errors
///
/// - `JwtError::Expired` if `exp` is in the past
/// - `JwtError::ValidationError` for bad signatures, malformed tokens, or
///   missing claims
pub fn validate_token(token: &str, secret: &str, algorithm: Algorithm) -> Result<Claims, JwtError> {
    ensure_hmac(algorithm)?;

    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("user@example.com".to_string(), 7, Duration::minutes(30));

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.user_id, 7);
        assert!(!claims.is_expired());

        let remaining = claims.exp - Utc::now().timestamp();
        assert!(remaining > 29 * 60);
        assert!(remaining <= 30 * 60);
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::minutes(30));
        let token = create_token(&claims, SECRET, Algorithm::HS256).expect("Should create token");

        // Three dot-separated segments
        assert_eq!(token.split('.').count(), 3);

        let validated =
            validate_token(&token, SECRET, Algorithm::HS256).expect("Should validate token");
        assert_eq!(validated.sub, "a@x.com");
        assert_eq!(validated.user_id, 1);
        assert_eq!(validated.exp, claims.exp);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::minutes(30));
        let token = create_token(&claims, "secret1-secret1-secret1-secret1!", Algorithm::HS256)
            .expect("Should create token");

        let result = validate_token(&token, "wrong-secret-wrong-secret-wrong!", Algorithm::HS256);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        // Expired an hour ago
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET, Algorithm::HS256).expect("Should create token");
        let result = validate_token(&token, SECRET, Algorithm::HS256);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_malformed_token() {
        assert!(validate_token("not-a-token", SECRET, Algorithm::HS256).is_err());
        assert!(validate_token("a.b.c", SECRET, Algorithm::HS256).is_err());
        assert!(validate_token("", SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn test_validate_tampered_token() {
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::minutes(30));
        let token = create_token(&claims, SECRET, Algorithm::HS256).expect("Should create token");

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert!(validate_token(&tampered, SECRET, Algorithm::HS256).is_err());
    }

    #[test]
    fn test_hmac_family_algorithms() {
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::minutes(30));

        for algorithm in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let token = create_token(&claims, SECRET, algorithm).expect("Should create token");
            let validated = validate_token(&token, SECRET, algorithm).expect("Should validate");
            assert_eq!(validated.user_id, 1);
        }
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let claims = Claims::new("a@x.com".to_string(), 1, Duration::minutes(30));

        let result = create_token(&claims, SECRET, Algorithm::RS256);
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_default_ttl_constant() {
        assert_eq!(DEFAULT_TOKEN_TTL_MINUTES, 30);
    }
}
