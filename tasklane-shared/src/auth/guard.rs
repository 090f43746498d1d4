/// Request authorization guard
///
/// Every task route goes through the same two checks:
///
/// 1. [`authenticate`]: extract the `Authorization: Bearer <token>` header
///    and validate the token. Missing header, wrong scheme, and invalid or
///    expired tokens all reject as unauthenticated.
/// 2. [`require_owner`]: compare the token's embedded numeric user id
///    against the user id in the request path. A mismatch rejects as
///    forbidden.
///
/// The verified [`Principal`] carries the acting user id for the rest of
/// the request. The numeric `user_id` claim is the identity used for the
/// ownership decision; the email subject rides along for logging.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use chrono::Duration;
/// use jsonwebtoken::Algorithm;
/// use tasklane_shared::auth::{guard, jwt};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = jwt::Claims::new("user@example.com".to_string(), 42, Duration::minutes(30));
/// let token = jwt::create_token(&claims, "secret-key", Algorithm::HS256)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::AUTHORIZATION,
///     HeaderValue::from_str(&format!("Bearer {}", token))?,
/// );
///
/// let principal = guard::authenticate(&headers, "secret-key", Algorithm::HS256)?;
/// guard::require_owner(&principal, 42)?;
/// assert!(guard::require_owner(&principal, 43).is_err());
/// # Ok(())
/// # }
/// ```

use axum::http::{header, HeaderMap};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use super::jwt::{self, JwtError};

/// The authenticated caller, resolved from a verified token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Verified user id (the `user_id` claim)
    pub user_id: i64,

    /// Subject email (the `sub` claim)
    pub email: String,
}

/// Error type for guard rejections
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// No usable `Authorization: Bearer <token>` header
    #[error("Not authenticated")]
    MissingCredentials,

    /// Token failed validation (bad signature, malformed, or expired)
    #[error("Could not validate credentials: {0}")]
    InvalidToken(String),

    /// Token is valid but belongs to a different user than the path
    #[error("Not authorized to access this user's resources")]
    WrongOwner {
        /// User id embedded in the token
        token_user_id: i64,
        /// User id segment of the request path
        path_user_id: i64,
    },
}

/// Extracts the bearer token from the request headers.
///
/// A missing header, a value that is not valid ASCII, or a scheme other
/// than `Bearer` all reject with `GuardError::MissingCredentials`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, GuardError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GuardError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(GuardError::MissingCredentials)
}

/// Resolves the caller's identity from the request headers.
///
/// # Errors
///
/// - `GuardError::MissingCredentials` if no bearer token is present
/// - `GuardError::InvalidToken` if the token fails validation (signature,
///   shape, or expiry)
pub fn authenticate(
    headers: &HeaderMap,
    secret: &str,
    algorithm: Algorithm,
) -> Result<Principal, GuardError> {
    let token = bearer_token(headers)?;

    let claims = jwt::validate_token(token, secret, algorithm).map_err(|e| match e {
        JwtError::Expired => GuardError::InvalidToken("Token has expired".to_string()),
        other => GuardError::InvalidToken(other.to_string()),
    })?;

    Ok(Principal {
        user_id: claims.user_id,
        email: claims.sub,
    })
}

/// Rejects the request unless the principal owns the path's user segment.
///
/// This is the single ownership check shared by every task handler.
pub fn require_owner(principal: &Principal, path_user_id: i64) -> Result<(), GuardError> {
    if principal.user_id != path_user_id {
        tracing::debug!(
            token_user_id = principal.user_id,
            path_user_id,
            "Rejecting cross-user access"
        );
        return Err(GuardError::WrongOwner {
            token_user_id: principal.user_id,
            path_user_id,
        });
    }

    Ok(())
}
