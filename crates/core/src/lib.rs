//! Bookshelf Core - Shared types library.
//!
//! This crate provides the domain types shared by the Bookshelf server and
//! its tests: the [`Email`] newtype and the three persisted record shapes
//! (users, issued credentials, products).
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage access.
//! The on-disk JSON representation of each record is fixed here via serde
//! attributes, so the server and the store cannot drift apart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
