//! sw_install tool implementation.
//!
//! Dispatches the install lifecycle event and waits for it to finish.

use precache_client::{InstallReport, Worker};
use rmcp::{ErrorData as McpError, model::CallToolResult};

use super::json_result;

/// Implementation of the sw_install tool.
pub async fn install_impl(worker: &Worker) -> Result<CallToolResult, McpError> {
    let report: InstallReport = worker.install().await?;
    json_result(&report)
}
