//! sw_activate tool implementation.
//!
//! Removes every store other than the current one.

use precache_client::Worker;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Output from the sw_activate tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwActivateOutput {
    /// Names of the stores that were deleted.
    pub deleted: Vec<String>,
}

/// Implementation of the sw_activate tool.
pub async fn activate_impl(worker: &Worker) -> Result<CallToolResult, McpError> {
    let deleted = worker.activate().await?;
    json_result(&SwActivateOutput { deleted })
}
