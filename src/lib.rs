pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod schema;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;
pub mod types;
pub mod worker;

pub use config::Config;
pub use error::{IndexError, LoadError, Result};
pub use loader::{DocSource, LoadReport};
pub use search::{DocumentationIndex, SUMMARY_MAX_CHARS};
pub use server::{DocServer, DocState};
pub use types::{Document, HeadingLevel, SearchResult, Section};
pub use worker::{RefreshSummary, refresh, spawn_refresh_loop};
