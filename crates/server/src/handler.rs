//! MCP server handler implementation.
//!
//! The server plays the host: each tool call dispatches one lifecycle
//! event or store operation to the shared worker.
use crate::tools::{
    cache::{CacheDeleteParams, CacheKeysParams, delete_impl, keys_impl},
    sw_activate::activate_impl,
    sw_fetch::{SwFetchParams, fetch_impl},
    sw_install::install_impl,
};

use precache_client::Worker;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for precache.
#[derive(Clone)]
pub struct PrecacheServer {
    tool_router: ToolRouter<Self>,
    worker: Worker,
}

#[tool_router]
impl PrecacheServer {
    /// Create a new server handler around a worker.
    pub fn new(worker: Worker) -> Self {
        Self { tool_router: Self::tool_router(), worker }
    }

    #[tool(description = "Run the install step: open the current cache and pre-cache every manifest asset. \
                          Fails as a whole if any asset cannot be fetched.")]
    async fn sw_install(&self) -> Result<CallToolResult, McpError> {
        install_impl(&self.worker).await
    }

    #[tool(description = "Run the activate step: delete every cache whose name is not the current cache name.")]
    async fn sw_activate(&self) -> Result<CallToolResult, McpError> {
        activate_impl(&self.worker).await
    }

    #[tool(description = "Answer a request cache-first. Returns the stored response if present, \
                          otherwise fetches from the network without storing the result.")]
    async fn sw_fetch(&self, params: Parameters<SwFetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.worker, params.0).await
    }

    #[tool(description = "List the entries of a cache (default: the current cache).")]
    async fn cache_keys(&self, params: Parameters<CacheKeysParams>) -> Result<CallToolResult, McpError> {
        keys_impl(self.worker.db(), params.0).await
    }

    #[tool(description = "Delete a cache and all of its entries.")]
    async fn cache_delete(&self, params: Parameters<CacheDeleteParams>) -> Result<CallToolResult, McpError> {
        delete_impl(self.worker.db(), params.0).await
    }
}

impl ServerHandler for PrecacheServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-precache".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
