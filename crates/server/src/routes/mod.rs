//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Accounts (no credential required)
//! GET  /auth/user/get-users     - List all registered users
//! POST /auth/user/signup        - Register a new user
//! POST /auth/user/login         - Log in, receive an access token
//!
//! # Protected API (Authorization header required)
//! POST /api/user/add-product    - Add a product attributed to the caller
//! ```

pub mod auth;
pub mod products;
pub mod users;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Create the account routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user/get-users", get(users::list))
        .route("/user/signup", post(auth::signup))
        .route("/user/login", post(auth::login))
}

/// Create the protected API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/user/add-product", post(products::add))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
}
