//! Client code for precache.
//!
//! This crate provides the HTTP fetch client, the [`Network`] seam it
//! implements, and the lifecycle [`Worker`] that installs the manifest
//! and answers intercepted requests.

pub mod fetch;
pub mod network;
pub mod worker;

pub use fetch::{FetchClient, FetchConfig};
pub use network::Network;
pub use worker::{FetchOutcome, InstallReport, Source, Worker};
