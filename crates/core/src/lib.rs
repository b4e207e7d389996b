//! Core types and shared functionality for precache.
//!
//! This crate provides:
//! - Named response stores with SQLite backend
//! - Request/response model and the fixed asset manifest
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod manifest;
pub mod request;

pub use cache::{CacheDb, CacheHandle, CachedEntry};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use manifest::{CACHE_NAME, MANIFEST};
pub use request::{Request, Response, UrlError, canonicalize, resolve};
