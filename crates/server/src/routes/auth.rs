//! Signup and login route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use bookshelf_core::Email;

use crate::error::{AppError, Result};
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signup response body.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub code: &'static str,
    pub message: &'static str,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
///
/// `encryptedId` carries the access token; `username` echoes the account
/// email. Both names are part of the wire contract.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub code: &'static str,
    pub message: &'static str,
    pub success: bool,
    #[serde(rename = "encryptedId")]
    pub encrypted_id: String,
    pub username: String,
}

/// Register a new user.
///
/// POST /auth/user/signup
///
/// # Errors
///
/// Returns 400 `BAD_REQUEST` if the email does not parse, or 409
/// `CONFLICT` if the email is already registered.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let email = Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth = AuthService::new(
        state.store(),
        state.tokens(),
        state.config().hash_time_cost,
    );
    auth.signup(req.name, email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            code: "CREATED",
            message: "User created successfully",
        }),
    ))
}

/// Log a user in and return an access token.
///
/// POST /auth/user/login
///
/// Every successful login also appends an issued-credential record to the
/// client log.
///
/// # Errors
///
/// Returns 404 `NOT_FOUND` for an unknown email, or 400 `BAD_REQUEST` on
/// password mismatch.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let auth = AuthService::new(
        state.store(),
        state.tokens(),
        state.config().hash_time_cost,
    );
    let (user, token) = auth.login(&email, &req.password).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            code: "OK",
            message: "Logged in successfully",
            success: true,
            encrypted_id: token,
            username: user.email.into_inner(),
        }),
    ))
}
