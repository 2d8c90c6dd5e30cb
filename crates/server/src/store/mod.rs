//! File-backed record store.
//!
//! # Layout
//!
//! Three independent collections, each one JSON-array file inside the
//! configured data directory:
//!
//! - `users.json` - registered accounts
//! - `client.json` - issued-credential log (write-only)
//! - `products.json` - product records
//!
//! There is no indexing and no caching: every read deserializes the whole
//! file and every append rewrites it. Lookups are linear scans. That is the
//! intended storage model for this service; the store only hardens it with
//! per-collection write serialization and atomic file replacement.

mod collection;

pub use collection::{JsonCollection, StoreError};

use bookshelf_core::{CredentialRecord, Email, Product, User};

use crate::config::Config;

/// Handle to the three persisted collections.
pub struct Store {
    users: JsonCollection<User>,
    clients: JsonCollection<CredentialRecord>,
    products: JsonCollection<Product>,
}

impl Store {
    /// Create a store rooted at the configured data directory.
    ///
    /// Backing files are created lazily on first mutation, so this never
    /// touches the filesystem.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            users: JsonCollection::new(config.users_path()),
            clients: JsonCollection::new(config.clients_path()),
            products: JsonCollection::new(config.products_path()),
        }
    }

    /// The users collection.
    #[must_use]
    pub fn users(&self) -> &JsonCollection<User> {
        &self.users
    }

    /// The issued-credential log.
    #[must_use]
    pub fn clients(&self) -> &JsonCollection<CredentialRecord> {
        &self.clients
    }

    /// The products collection.
    #[must_use]
    pub fn products(&self) -> &JsonCollection<Product> {
        &self.products
    }

    /// Find a user by exact, case-sensitive email match.
    ///
    /// Linear scan; the first match wins.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the users file cannot be read or parsed.
    pub async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let users = self.users.read_all().await?;
        Ok(users.into_iter().find(|u| &u.email == email))
    }
}
