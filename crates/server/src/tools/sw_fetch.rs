//! sw_fetch tool implementation.
//!
//! Dispatches one intercepted request: stored response if present,
//! otherwise a live fetch that is not stored.

use precache_client::{Source, Worker};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use precache_core::Error;

use super::json_result;

/// Input parameters for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchParams {
    /// Path (resolved against the origin) or absolute http(s) URL.
    pub url: String,

    /// HTTP method (default: GET).
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "GET".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HeaderPair {
    pub name: String,
    pub value: String,
}

/// Output structure for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchOutput {
    /// Whether the response came from the store or the network.
    pub source: Source,
    /// The canonical request URL.
    pub request_url: String,
    /// URL the response was served from.
    pub url: String,
    pub status: u16,
    pub headers: Vec<HeaderPair>,
    /// Body as text, or None when it is not valid UTF-8.
    pub body: Option<String>,
    pub body_len: usize,
}

/// Implementation of the sw_fetch tool.
pub async fn fetch_impl(worker: &Worker, params: SwFetchParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let request = worker.request(&params.method, &params.url)?;
    let outcome = worker.handle_fetch(&request).await?;
    let response = outcome.response;

    let output = SwFetchOutput {
        source: outcome.source,
        request_url: request.url.to_string(),
        url: response.url,
        status: response.status,
        headers: response
            .headers
            .into_iter()
            .map(|(name, value)| HeaderPair { name, value })
            .collect(),
        body_len: response.body.len(),
        body: String::from_utf8(response.body).ok(),
    };

    json_result(&output)
}
