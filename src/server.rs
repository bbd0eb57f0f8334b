//! MCP server implementation and shared documentation state.

use crate::config::Config;
use crate::schema::inline_schema_for_type;
use crate::search::DocumentationIndex;
use crate::tools::get_doc::{GetDocRequest, handle_get_doc};
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::status::{IndexStatusRequest, handle_index_status};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// State shared by every tool call: the index and the settings it was built with.
#[derive(Debug, Clone)]
pub struct DocState {
    index: Arc<DocumentationIndex>,
    config: Arc<Config>,
}

impl DocState {
    pub fn new(index: Arc<DocumentationIndex>, config: Config) -> Self {
        Self {
            index,
            config: Arc::new(config),
        }
    }

    pub fn index(&self) -> &Arc<DocumentationIndex> {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// MCP Server for documentation search
#[derive(Clone)]
pub struct DocServer {
    /// Shared documentation state (index, configuration)
    state: DocState,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocServer {
    pub fn new(state: DocState) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared DocState.
    pub fn doc_state(&self) -> &DocState {
        &self.state
    }

    #[tool(
        description = "Search the documentation by keywords using TF-IDF ranking. Returns matching pages with title, id, URL, relevance score and a short summary, best match first.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_docs(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).inspect_err(|e| {
            tracing::debug!("search_docs failed: {}", e);
        })
    }

    #[tool(
        description = "Retrieve the full text of one documentation page by its id (as shown in search results), including its section outline.",
        input_schema = inline_schema_for_type::<GetDocRequest>()
    )]
    async fn get_doc(
        &self,
        Parameters(request): Parameters<GetDocRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_doc(&self.state, request).inspect_err(|e| {
            tracing::debug!("get_doc failed: {}", e);
        })
    }

    #[tool(
        description = "Show how many documentation pages are indexed and where they are loaded from.",
        input_schema = inline_schema_for_type::<IndexStatusRequest>()
    )]
    async fn index_status(
        &self,
        Parameters(request): Parameters<IndexStatusRequest>,
    ) -> std::result::Result<String, String> {
        Ok(handle_index_status(&self.state, request))
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docsearch-mcp: keyword search over a documentation site. \
                 Use search_docs to find pages, then get_doc with a result's id to read the page. \
                 index_status reports how many pages are loaded."
                    .to_string(),
            )
    }
}

/// A state over `index` with default limits, for handler tests.
#[cfg(test)]
pub(crate) fn test_state(index: DocumentationIndex) -> DocState {
    let config = Config {
        docs_dir: std::path::PathBuf::from("docs"),
        base_url: None,
        default_limit: crate::config::DEFAULT_LIMIT,
        max_limit: crate::config::DEFAULT_MAX_LIMIT,
        refresh_interval: None,
    };
    DocState::new(Arc::new(index), config)
}
