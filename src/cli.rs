use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docsearch-mcp")]
#[command(about = "Search documentation pages for AI assistants", long_about = None)]
pub struct Cli {
    /// Directory of Markdown / text pages to index
    #[arg(short = 'd', long, env = "DOCSEARCH_DOCS_DIR", global = true)]
    pub docs_dir: Option<PathBuf>,
    /// URL the pages are published under, used to build page links
    #[arg(long, env = "DOCSEARCH_BASE_URL", global = true)]
    pub base_url: Option<String>,
    /// Results returned when a search does not ask for a limit
    #[arg(long, global = true)]
    pub default_limit: Option<usize>,
    /// Upper bound on results per search
    #[arg(long, global = true)]
    pub max_limit: Option<usize>,
    /// Reload the docs directory every N seconds (0 disables)
    #[arg(long, env = "DOCSEARCH_REFRESH_SECS", global = true)]
    pub refresh_secs: Option<u64>,
    /// TOML config file; command-line values take precedence over it
    #[arg(short, long, env = "DOCSEARCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the MCP tools over stdio (default)
    Serve,
    /// Run one search and print the results
    Search {
        query: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print one page by id
    Get { id: String },
}
