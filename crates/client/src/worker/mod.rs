//! Lifecycle worker: install, activate and fetch handlers.
//!
//! The worker owns no ambient state. It is handed a store database, a
//! [`Network`] and an origin, and every handler is an independent async
//! entry point. Handlers may interleave freely; a fetch running during an
//! install sees the store either before or after the install commits.

mod install;
mod intercept;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use precache_core::{CACHE_NAME, CacheDb, Error, Request, resolve};
use url::Url;

use crate::network::Network;

pub use install::InstallReport;
pub use intercept::{FetchOutcome, Source};

/// Cache-first worker over a named store.
#[derive(Clone)]
pub struct Worker {
    db: CacheDb,
    network: Arc<dyn Network>,
    origin: Url,
    reject_non_ok: bool,
}

impl Worker {
    /// Create a worker. Manifest paths resolve against `origin`.
    pub fn new(db: CacheDb, network: Arc<dyn Network>, origin: Url) -> Self {
        Self { db, network, origin, reject_non_ok: false }
    }

    /// Fail installs on non-2xx manifest responses instead of storing them.
    pub fn reject_non_ok(mut self, reject: bool) -> Self {
        self.reject_non_ok = reject;
        self
    }

    pub fn db(&self) -> &CacheDb {
        &self.db
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Build a request from a method and a path or absolute URL.
    pub fn request(&self, method: &str, url: &str) -> Result<Request, Error> {
        let url = resolve(&self.origin, url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Request::new(method, url)
    }

    /// Delete every store except the current one.
    ///
    /// Returns the names that were removed, oldest first.
    pub async fn activate(&self) -> Result<Vec<String>, Error> {
        let mut deleted = Vec::new();
        for name in self.db.cache_names().await? {
            if name == CACHE_NAME {
                continue;
            }
            if self.db.delete_cache(&name).await? {
                tracing::info!(cache = %name, "deleted stale cache");
                deleted.push(name);
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedNetwork;
    use super::*;

    #[tokio::test]
    async fn test_request_resolves_against_origin() {
        let (worker, _) = ScriptedNetwork::worker().await;
        let req = worker.request("get", "/js/script.js").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.url.as_str(), "http://localhost:8080/js/script.js");
    }

    #[tokio::test]
    async fn test_request_invalid_url() {
        let (worker, _) = ScriptedNetwork::worker().await;
        assert!(matches!(worker.request("GET", "   "), Err(Error::InvalidUrl(_))));
        assert!(matches!(worker.request("GET", "data:text/plain,hi"), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_activate_deletes_only_stale_caches() {
        let (worker, _) = ScriptedNetwork::worker().await;
        let db = worker.db();
        db.open_cache("debug-dungeon-tcg-cache-v0").await.unwrap();
        db.open_cache(CACHE_NAME).await.unwrap();
        db.open_cache("unrelated").await.unwrap();

        let deleted = worker.activate().await.unwrap();

        assert_eq!(deleted, vec!["debug-dungeon-tcg-cache-v0".to_string(), "unrelated".to_string()]);
        assert_eq!(db.cache_names().await.unwrap(), vec![CACHE_NAME.to_string()]);
    }

    #[tokio::test]
    async fn test_activate_without_current_cache() {
        let (worker, _) = ScriptedNetwork::worker().await;
        worker.db().open_cache("old").await.unwrap();

        let deleted = worker.activate().await.unwrap();

        assert_eq!(deleted, vec!["old".to_string()]);
        assert!(worker.db().cache_names().await.unwrap().is_empty());
    }
}
