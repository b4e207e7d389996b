//! Install handler: pre-cache the manifest.

use std::collections::HashSet;

use futures_util::future::try_join_all;
use precache_core::{CACHE_NAME, CacheHandle, Error, MANIFEST, Request};
use serde::Serialize;

use super::Worker;

/// Outcome of a completed install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub cache_name: String,
    pub stored: usize,
}

impl Worker {
    /// Open the current store and add every manifest path to it.
    ///
    /// Returns only once the whole batch is stored. If any manifest request
    /// fails, nothing from this install is written and the error is returned.
    pub async fn install(&self) -> Result<InstallReport, Error> {
        let cache = self.db.open_cache(CACHE_NAME).await?;
        tracing::info!(cache = cache.name(), "Opened cache");

        let requests = self.manifest_requests()?;
        let stored = self.add_all(&cache, requests).await?;

        Ok(InstallReport { cache_name: cache.name().to_string(), stored })
    }

    /// Install unless the current store already holds entries.
    ///
    /// Runs when the store is missing, or exists but is empty because an
    /// earlier install failed. Returns `None` when the store was left alone.
    pub async fn install_if_needed(&self) -> Result<Option<InstallReport>, Error> {
        if self.db.has_cache(CACHE_NAME).await? && !self.db.open_cache(CACHE_NAME).await?.keys().await?.is_empty() {
            tracing::debug!(cache = CACHE_NAME, "store already populated, skipping install");
            return Ok(None);
        }
        self.install().await.map(Some)
    }

    /// GET requests for the manifest, resolved against the origin.
    pub fn manifest_requests(&self) -> Result<Vec<Request>, Error> {
        MANIFEST.iter().map(|path| self.request("GET", path)).collect()
    }

    /// Fetch every request and store all responses in one batch.
    ///
    /// Fetches run concurrently. A transport failure on any of them, or a
    /// non-2xx status when `reject_non_ok` is set, aborts the batch before
    /// anything is written. There is no retry.
    pub async fn add_all(&self, cache: &CacheHandle, requests: Vec<Request>) -> Result<usize, Error> {
        let mut seen = HashSet::new();
        if let Some(dup) = requests.iter().find(|r| !seen.insert(r.key())) {
            return Err(Error::InvalidInput(format!("duplicate request in batch: {dup}")));
        }

        let fetches = requests.into_iter().map(|request| async move {
            let response = self
                .network
                .fetch(&request)
                .await
                .map_err(|e| Error::install_failed(request.url.as_str(), e))?;

            if self.reject_non_ok && !response.is_ok() {
                return Err(Error::install_failed(
                    request.url.as_str(),
                    Error::HttpError(format!("status {}", response.status)),
                ));
            }

            Ok((request, response))
        });

        let pairs = try_join_all(fetches).await?;
        let count = pairs.len();
        cache.put_all(pairs).await?;

        tracing::debug!(cache = cache.name(), count, "stored batch");
        Ok(count)
    }
}
