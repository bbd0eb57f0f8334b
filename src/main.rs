use clap::Parser;
use docsearch_mcp::cli::{Cli, Commands};
use docsearch_mcp::tools::{GetDocRequest, SearchRequest, handle_get_doc, handle_search};
use docsearch_mcp::{Config, DocServer, DocSource, DocState, DocumentationIndex, worker};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    docsearch_mcp::tracing::init();

    let config = Config::load(&cli)?;
    let source = DocSource::new(config.docs_dir.clone(), config.base_url.clone());
    let index = Arc::new(DocumentationIndex::new());
    worker::refresh(&index, &source).await?;

    let refresh_interval = config.refresh_interval;
    let state = DocState::new(Arc::clone(&index), config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Search { query, limit } => {
            print_outcome(handle_search(&state, SearchRequest { query, limit }))
        }
        Commands::Get { id } => print_outcome(handle_get_doc(&state, GetDocRequest { id })),
        Commands::Serve => serve(state, source, refresh_interval).await,
    }
}

fn print_outcome(outcome: Result<String, String>) -> anyhow::Result<()> {
    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(message) => anyhow::bail!(message),
    }
}

async fn serve(
    state: DocState,
    source: DocSource,
    refresh_interval: Option<std::time::Duration>,
) -> anyhow::Result<()> {
    let refresher = refresh_interval.map(|period| {
        tracing::info!("Refreshing documentation every {:?}", period);
        worker::spawn_refresh_loop(Arc::clone(state.index()), source, period)
    });

    tracing::info!("Starting docsearch-mcp MCP server");

    let server = DocServer::new(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;
    service.waiting().await?;

    if let Some(handle) = refresher {
        handle.abort();
    }
    tracing::info!("MCP client disconnected, shutting down");

    Ok(())
}
