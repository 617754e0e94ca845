//! Hackage documentation MCP implementation.
//!
//! Exposes a single `get_docs` tool that resolves a module on a Hackage
//! package page and returns the module's documentation as plain text.
//!
//! # Example
//! ```no_run
//! use hackage_docs_mcp::mcp::HackageDocs;
//! use rmcp::{ServiceExt, transport::stdio};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let service = HackageDocs::new().serve(stdio()).await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```

use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities};
use rmcp::{ServerHandler, model::ServerInfo, tool};

use crate::hackage::{DocRequest, HackageClient};

/// MCP service answering `get_docs` calls against Hackage.
#[derive(Debug, Clone, Default)]
pub struct HackageDocs {
    client: HackageClient,
}

#[tool(tool_box)]
impl HackageDocs {
    pub fn new() -> Self {
        Self::with_client(HackageClient::new())
    }

    /// Serves documentation from the host `client` points at.
    pub fn with_client(client: HackageClient) -> Self {
        Self { client }
    }

    /// Always yields a string: the module text, or a description of what failed.
    #[tool(description = "Retrieve the documentation for a specific module of a Haskell package from Hackage. \
        Returns the extracted documentation text for the module, or an error message. \
        Example calls: get_docs(\"lens\", \"5.0.0\", \"Control.Lens\"), \
        get_docs(\"vector-algorithms\", \"0.8.0\", \"Data.Vector.Algorithms\")")]
    async fn get_docs(
        &self,
        #[tool(aggr)]
        request: DocRequest,
    ) -> String {
        match self.client.fetch_docs(&request).await {
            Ok(text) => text,
            Err(err) => {
                tracing::error!("get_docs failed for {:?}: {}", request, err);
                err.to_string()
            }
        }
    }
}

#[tool(tool_box)]
impl ServerHandler for HackageDocs {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server reads Haskell module documentation from Hackage. \
                Use the 'get_docs' tool with the package name, the package version and the \
                exact module name (e.g. 'Control.Lens') to get the module's documentation as text.".to_string()
            ),
        }
    }
}
