//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET_KEY` - Token signing secret. Startup fails if it is
//!   missing or blank; signing must never fall back to an empty key.
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `DATA_DIR` - Directory holding the JSON store files (default: `.`)
//! - `HASH_TIME_COST` - Argon2 time cost for password hashing
//!   (default: the argon2 crate default)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// File name of the users collection inside the data directory.
pub const USERS_FILE: &str = "users.json";
/// File name of the issued-credential log inside the data directory.
pub const CLIENTS_FILE: &str = "client.json";
/// File name of the products collection inside the data directory.
pub const PRODUCTS_FILE: &str = "products.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the three JSON store files
    pub data_dir: PathBuf,
    /// Token signing secret
    pub jwt_secret: SecretString,
    /// Argon2 time cost used when hashing signup passwords
    pub hash_time_cost: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if `JWT_SECRET_KEY` is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("DATA_DIR", "."));
        let jwt_secret = get_required_secret("JWT_SECRET_KEY")?;
        let hash_time_cost = match std::env::var("HASH_TIME_COST") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvVar("HASH_TIME_COST".to_string(), e.to_string())
            })?,
            Err(_) => argon2::Params::DEFAULT_T_COST,
        };
        if hash_time_cost == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "HASH_TIME_COST".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            data_dir,
            jwt_secret,
            hash_time_cost,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the users collection file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    /// Path of the issued-credential log file.
    #[must_use]
    pub fn clients_path(&self) -> PathBuf {
        self.data_dir.join(CLIENTS_FILE)
    }

    /// Path of the products collection file.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(PRODUCTS_FILE)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load a required secret and reject blank values.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret(&value, key)?;
    Ok(SecretString::from(value))
}

/// Validate that a secret is not empty or whitespace.
fn validate_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be blank".to_string(),
        ));
    }
    Ok(())
}
