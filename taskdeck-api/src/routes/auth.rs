/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/signup` - Register a new user
/// - `POST /v1/auth/signin` - Authenticate and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials payload, shared by signup and signin
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Username
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, max = 128, message = "Password must be 1 to 128 characters"))]
    pub password: String,
}

/// Signin response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Signed access token carrying the username
    pub access_token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/signup
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username already exists
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<StatusCode> {
    req.validate().map_err(ApiError::from)?;

    state.auth.sign_up(&req.username, &req.password).await?;

    Ok(StatusCode::CREATED)
}

/// Authenticate and issue a token
///
/// Unknown username and wrong password produce the identical 401; neither
/// response reveals whether the account exists.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/signin
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret1"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<SignInResponse>> {
    req.validate().map_err(ApiError::from)?;

    let access_token = state.auth.sign_in(&req.username, &req.password).await?;

    Ok(Json(SignInResponse { access_token }))
}
