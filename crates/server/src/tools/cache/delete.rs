//! cache_delete tool implementation.
//!
//! Deletes a named store and all its entries.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use precache_core::{CacheDb, Error};

use crate::tools::json_result;

/// Parameters for the cache_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheDeleteParams {
    /// Name of the store to delete.
    pub cache_name: String,
}

/// Output from the cache_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheDeleteOutput {
    /// False if no store had that name.
    pub deleted: bool,
}

/// Implementation of the cache_delete tool.
pub async fn delete_impl(db: &CacheDb, params: CacheDeleteParams) -> Result<CallToolResult, McpError> {
    if params.cache_name.is_empty() {
        return Err(Error::InvalidInput("cache_name cannot be empty".to_string()).into());
    }

    let deleted = db.delete_cache(&params.cache_name).await?;
    json_result(&CacheDeleteOutput { deleted })
}
