//! SQLite-backed named response stores.
//!
//! This module provides persistent request→response stores using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Multiple named stores in one database, created lazily
//! - Request keys hashed from method and canonical URL
//! - Transactional batch writes for all-or-nothing bulk adds
//! - Automatic schema migrations

pub mod connection;
pub mod entries;
pub mod hash;
pub mod migrations;
pub mod stores;

pub use crate::Error;

pub use connection::CacheDb;
pub use entries::CachedEntry;
pub use stores::CacheHandle;
