//! Bookshelf server library.
//!
//! This crate provides the server functionality as a library, allowing the
//! full router to be exercised in tests without binding a socket.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - File-backed record store (three JSON-array collections)
//! - HMAC-signed bearer credentials bound to account emails
//! - Argon2id password hashing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}
