//! Authorization gate for protected routes.
//!
//! Provides an extractor that requires a valid bearer credential before
//! the route handler runs.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use bookshelf_core::User;

use crate::error::AppError;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires a valid access token.
///
/// Reads the raw `Authorization` header value (the whole value is the
/// token; no scheme prefix), verifies it against the signing secret, and
/// resolves the embedded email to a user record. On success the full user
/// is attached for the handler to consume.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Auth(AuthError::InvalidToken))?;

        let auth = AuthService::new(
            state.store(),
            state.tokens(),
            state.config().hash_time_cost,
        );

        // Store failures stay 500s; everything else is a uniform 401.
        let user = auth.resolve_token(token).await.map_err(|e| match e {
            AuthError::Store(inner) => AppError::Store(inner),
            other => {
                tracing::debug!(error = %other, "Rejected access token");
                AppError::Auth(AuthError::InvalidToken)
            }
        })?;

        Ok(Self(user))
    }
}
