//! Core types for Bookshelf.

pub mod email;
pub mod record;

pub use email::{Email, EmailError};
pub use record::{CredentialRecord, Product, User};
