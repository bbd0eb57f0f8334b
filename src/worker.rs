//! Startup indexing and periodic refresh of the documentation index.
//!
//! A refresh reloads every page from the [`DocSource`] and re-indexes it. Pages
//! already known are replaced in place, so repeated refreshes keep the index
//! statistics exactly as if each page had been indexed once.

use crate::error::Result;
use crate::loader::DocSource;
use crate::search::DocumentationIndex;
use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

/// Counts from one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Pages accepted by the index
    pub indexed: usize,
    /// Files the loader could not read
    pub skipped: usize,
    /// Pages the index rejected
    pub failed: usize,
    /// Index size after the pass
    pub total: usize,
}

/// Loads the source and indexes every page on a blocking thread.
///
/// Tokenizing a whole site is CPU-bound, so none of it runs on the async
/// workers that serve tool calls.
pub async fn refresh(
    index: &Arc<DocumentationIndex>,
    source: &DocSource,
) -> Result<RefreshSummary> {
    let start = std::time::Instant::now();
    let target = Arc::clone(index);
    let loader = source.clone();
    let summary = tokio::task::spawn_blocking(move || index_source(&target, &loader))
        .await
        .context("Document indexing task panicked")??;

    tracing::info!(
        "Indexed {} documents from {} ({} skipped, {} failed, {} total, {} terms) in {:?}",
        summary.indexed,
        source.root().display(),
        summary.skipped,
        summary.failed,
        summary.total,
        index.term_count(),
        start.elapsed()
    );

    Ok(summary)
}

/// Synchronous body of [`refresh`]: one load pass, then one `index` call per page.
fn index_source(index: &DocumentationIndex, source: &DocSource) -> Result<RefreshSummary> {
    let report = source.load()?;

    let mut summary = RefreshSummary {
        skipped: report.skipped,
        ..RefreshSummary::default()
    };

    for doc in report.documents {
        let id = doc.id.clone();
        match index.index(doc) {
            Ok(()) => summary.indexed += 1,
            Err(e) => {
                tracing::warn!("Failed to index '{}': {}", id, e);
                summary.failed += 1;
            }
        }
    }
    summary.total = index.count();

    Ok(summary)
}

/// Re-runs [`refresh`] every `period` until the returned task is aborted.
///
/// The first tick fires after one full period; startup indexing is the
/// caller's job. Failed passes are logged and retried on the next tick.
pub fn spawn_refresh_loop(
    index: Arc<DocumentationIndex>,
    source: DocSource,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // `interval` completes its first tick immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::debug!("Refreshing documentation from {}", source.root().display());
            if let Err(e) = refresh(&index, &source).await {
                tracing::error!("Documentation refresh failed: {:#}", e);
            }
        }
    })
}
