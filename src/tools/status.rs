use crate::server::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct IndexStatusRequest {}

/// Report index size and where the pages come from.
pub fn handle_index_status(state: &DocState, _request: IndexStatusRequest) -> String {
    let index = state.index();
    let config = state.config();

    let mut output = format!(
        "Indexed documents: {}\nDistinct terms: {}\nSource: {}\n",
        index.count(),
        index.term_count(),
        config.docs_dir.display()
    );
    if let Some(base_url) = &config.base_url {
        let _ = writeln!(output, "Base URL: {}", base_url);
    }
    match config.refresh_interval {
        Some(period) => {
            let _ = writeln!(output, "Refresh: every {}s", period.as_secs());
        }
        None => output.push_str("Refresh: disabled\n"),
    }
    output
}
