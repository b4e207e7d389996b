//! The live-network seam.

use precache_core::{Error, Request, Response};

/// Something that can perform a live request.
///
/// Implementations return `Ok` for any response the server produced,
/// including 4xx/5xx; `Err` means no response was obtained at all.
#[async_trait::async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, Error>;
}
