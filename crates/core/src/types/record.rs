//! Persisted record shapes.
//!
//! Each collection on disk is a flat JSON array of one of these types, in
//! insertion order. Records have no stable identifier of their own; the
//! file position is the only ordering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::email::Email;

/// A registered user.
///
/// Created on signup and never mutated or deleted afterwards. The stored
/// `passwordHash` is an Argon2 PHC string, never the plaintext password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
}

/// One issued credential, appended on every successful login.
///
/// The collection is a write-only audit log: records are never read back
/// by the service, never superseded, and never removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRecord {
    pub email: Email,
    pub token: String,
}

/// A product record, attributed to the account that created it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub added_by: Email,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub genre: String,
}
