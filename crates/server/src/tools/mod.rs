//! MCP tool implementations.
//!
//! Each tool dispatches one lifecycle event or store operation to the
//! [`Worker`](precache_client::Worker) and returns its result as JSON text.

pub mod cache;
pub mod sw_activate;
pub mod sw_fetch;
pub mod sw_install;

#[cfg(test)]
pub(crate) mod testing;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use precache_core::Error;

/// Serialize a tool output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
