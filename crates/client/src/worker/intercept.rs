//! Fetch handler: cache first, then network.

use precache_core::{Error, Request, Response};
use serde::{Deserialize, Serialize};

use super::Worker;

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Network,
}

/// A response supplied for an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub response: Response,
    pub source: Source,
}

impl Worker {
    /// Answer an intercepted request.
    ///
    /// A stored entry in any store is returned as-is. Otherwise exactly one
    /// live fetch is made and its result returned without being stored.
    /// When both miss, the network error is returned; there is no fallback
    /// content.
    pub async fn handle_fetch(&self, request: &Request) -> Result<FetchOutcome, Error> {
        if let Some(response) = self.db.match_request(request).await? {
            tracing::debug!("cache hit for {}", request);
            return Ok(FetchOutcome { response, source: Source::Cache });
        }

        tracing::debug!("cache miss for {}", request);
        let response = self.network.fetch(request).await?;
        Ok(FetchOutcome { response, source: Source::Network })
    }
}
