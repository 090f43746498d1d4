/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/register` - Register a new user, returns an access token
/// - `POST /api/login` - Verify credentials, returns an access token
///
/// Both respond with the same token envelope, so a client can treat
/// registration as an implicit first login.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasklane_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Token response returned by both register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Issues an access token for the given user.
fn issue_token(state: &AppState, user: &User) -> Result<TokenResponse, ApiError> {
    let claims = jwt::Claims::new(user.email.clone(), user.id, state.config.token_ttl());
    let access_token = jwt::create_token(&claims, state.jwt_secret(), state.jwt_algorithm())?;

    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "name": "John Doe",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    // Duplicate check; the unique constraint on email backstops races
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    Ok(Json(issue_token(&state, &user)?))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (reported
///   identically)
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Incorrect email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthenticated(
            "Incorrect email or password".to_string(),
        ));
    }

    Ok(Json(issue_token(&state, &user)?))
}
