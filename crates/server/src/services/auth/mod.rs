//! Authentication service.
//!
//! Signup, login, and bearer-credential resolution against the record
//! store. Passwords are hashed with Argon2id; each hash carries its own
//! random salt and the configured time cost.

mod error;

pub use error::AuthError;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use bookshelf_core::{CredentialRecord, Email, User};

use crate::services::token::TokenService;
use crate::store::Store;

/// Authentication service.
pub struct AuthService<'a> {
    store: &'a Store,
    tokens: &'a TokenService,
    hash_time_cost: u32,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store, tokens: &'a TokenService, hash_time_cost: u32) -> Self {
        Self {
            store,
            tokens,
            hash_time_cost,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is taken,
    /// `AuthError::PasswordHash` if hashing fails, or `AuthError::Store`
    /// if the users file cannot be read or written.
    pub async fn signup(
        &self,
        name: String,
        email: Email,
        password: &str,
    ) -> Result<User, AuthError> {
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password, self.hash_time_cost)?;
        let user = User {
            name,
            email,
            password_hash,
        };
        self.store.users().append(user.clone()).await?;

        Ok(user)
    }

    /// Log a user in, issue a credential, and append it to the client log.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user matches the email, or
    /// `AuthError::PasswordMismatch` if the password is wrong.
    pub async fn login(&self, email: &Email, password: &str) -> Result<(User, String), AuthError> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &user.password_hash)?;

        let token = self.tokens.issue(&user.email)?;
        self.store
            .clients()
            .append(CredentialRecord {
                email: user.email.clone(),
                token: token.clone(),
            })
            .await?;

        Ok((user, token))
    }

    /// Resolve a presented bearer token to the user record it binds.
    ///
    /// A bad signature, malformed token, and an email no longer present in
    /// the users collection all come back as `AuthError::InvalidToken`;
    /// only store failures are surfaced separately.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` or `AuthError::Store`.
    pub async fn resolve_token(&self, token: &str) -> Result<User, AuthError> {
        let email = self
            .tokens
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;

        self.store
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with Argon2id and a fresh random salt.
fn hash_password(password: &str, time_cost: u32) -> Result<String, AuthError> {
    let params = Params::new(
        Params::DEFAULT_M_COST,
        time_cost,
        Params::DEFAULT_P_COST,
        None,
    )
    .map_err(|_| AuthError::PasswordHash)?;
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// The hash string carries its own parameters, so verification does not
/// depend on the configured time cost.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| match e {
            argon2::password_hash::Error::Password => AuthError::PasswordMismatch,
            _ => AuthError::PasswordHash,
        })
}
