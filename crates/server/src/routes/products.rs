//! Product route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookshelf_core::Product;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Add-product request body.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub genre: String,
}

/// Add-product response body.
///
/// The `addedBY` casing is part of the wire contract.
#[derive(Debug, Serialize)]
pub struct AddProductResponse {
    pub code: &'static str,
    pub message: &'static str,
    #[serde(rename = "addedBY")]
    pub added_by: String,
}

/// Add a product attributed to the authenticated user.
///
/// POST /api/user/add-product
///
/// The authorization gate runs first; the product is attributed to the
/// verified account email, not to anything in the request body.
///
/// # Errors
///
/// Returns 401 `UNAUTHORIZED` if the credential is missing or invalid.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddProductRequest>,
) -> Result<impl IntoResponse> {
    let product = Product {
        added_by: user.email.clone(),
        title: req.title,
        author: req.author,
        price: req.price,
        genre: req.genre,
    };
    state.store().products().append(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddProductResponse {
            code: "CREATED",
            message: "Product added successfully",
            added_by: user.email.into_inner(),
        }),
    ))
}
