//! cache_keys tool implementation.
//!
//! Lists the entries of a named store without their bodies.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use precache_core::{CACHE_NAME, CacheDb, CachedEntry, Error};

use crate::tools::json_result;

/// Parameters for the cache_keys tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheKeysParams {
    /// Store to list (default: the current store).
    #[serde(default)]
    pub cache_name: Option<String>,
}

/// Output from the cache_keys tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheKeysOutput {
    pub cache_name: String,
    pub entries: Vec<CachedEntry>,
}

/// Implementation of the cache_keys tool.
///
/// Does not create the store if it is missing.
pub async fn keys_impl(db: &CacheDb, params: CacheKeysParams) -> Result<CallToolResult, McpError> {
    let name = params.cache_name.unwrap_or_else(|| CACHE_NAME.to_string());

    if !db.has_cache(&name).await? {
        return Err(Error::CacheNotFound(name).into());
    }

    let entries = db.open_cache(&name).await?.keys().await?;
    json_result(&CacheKeysOutput { cache_name: name, entries })
}
