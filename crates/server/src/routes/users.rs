//! User listing route handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use bookshelf_core::User;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for a successful user listing.
///
/// `data` contains the stored records verbatim, password hashes included.
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub code: &'static str,
    pub message: &'static str,
    pub data: Vec<User>,
}

/// List all registered users.
///
/// GET /auth/user/get-users
///
/// # Errors
///
/// Returns 404 `DATA_NOT_FOUND` if the users file does not exist yet or
/// holds no records.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.store().users();

    if !users.exists().await {
        return Err(AppError::DataNotFound(
            "User file not found. Add a user first".to_string(),
        ));
    }

    let data = users.read_all().await?;
    if data.is_empty() {
        return Err(AppError::DataNotFound("No users found".to_string()));
    }

    Ok((
        StatusCode::OK,
        Json(ListUsersResponse {
            code: "OK",
            message: "Users fetched successfully",
            data,
        }),
    ))
}
