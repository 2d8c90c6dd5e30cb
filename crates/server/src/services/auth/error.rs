//! Authentication error types.

use thiserror::Error;

use crate::services::token::TokenError;
use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user record matches the presented email.
    #[error("user not found")]
    UserNotFound,

    /// The presented password does not match the stored hash.
    #[error("password mismatch")]
    PasswordMismatch,

    /// A user with this email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Missing, malformed, or unresolvable access token.
    #[error("invalid access token")]
    InvalidToken,

    /// Password hashing or hash parsing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token issuance failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
