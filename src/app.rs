//! One full run: search, rank, report, alert, remember.

use anyhow::Result;
use chrono::Local;

use crate::analyze::Scorer;
use crate::config::AppConfig;
use crate::ingest::providers::{IndeedProvider, LinkedInProvider};
use crate::ingest::types::ListingSource;
use crate::ingest::{self, RunOutcome};
use crate::ledger::{JsonFileLedger, LedgerStore};
use crate::notify::{JobAlert, NotifierMux};
use crate::report;

/// Both job boards, configured from `cfg.http`.
pub fn default_sources(cfg: &AppConfig) -> Result<Vec<Box<dyn ListingSource>>> {
    let http = cfg.http_settings();
    Ok(vec![
        Box::new(IndeedProvider::from_settings(&http)?),
        Box::new(LinkedInProvider::from_settings(&http)?),
    ])
}

/// Run with explicit collaborators. Ledger errors are fatal; report and
/// notification errors are logged and the run still succeeds.
pub async fn run_with(
    cfg: &AppConfig,
    sources: &[Box<dyn ListingSource>],
    ledger: &dyn LedgerStore,
    notifier: &NotifierMux,
) -> Result<RunOutcome> {
    let scorer = Scorer::new(&cfg.profile);
    let outcome = ingest::run(&cfg.queries(), sources, ledger, &scorer, &cfg.throttle()).await?;

    tracing::info!(
        fetched = outcome.fetched,
        known = outcome.known,
        duplicates = outcome.duplicates,
        failed_calls = outcome.failed_calls,
        "total new jobs found: {}",
        outcome.postings.len()
    );

    match JobAlert::summarize(&outcome.postings) {
        Some(alert) => {
            notifier.notify(&alert).await;
            publish_report(cfg, &outcome).await;
        }
        None => tracing::info!("no new jobs to report"),
    }

    if ingest::commit_ledger(&outcome, ledger)? {
        tracing::debug!(added = outcome.new_ids.len(), "ledger updated");
    }
    Ok(outcome)
}

async fn publish_report(cfg: &AppConfig, outcome: &RunOutcome) {
    let html = report::render_html(&outcome.postings, Local::now());
    let path = &cfg.paths.report;
    if let Err(e) = report::write_report(path, &html) {
        tracing::warn!("❌ error saving HTML file: {e:#}");
        return;
    }
    tracing::info!(
        "✅ saved {} jobs to HTML file: {}",
        outcome.postings.len(),
        path.display()
    );
    if cfg.report.open_browser {
        if let Err(e) = report::open_in_browser(path, &cfg.report.browser).await {
            tracing::warn!("📂 HTML file saved (couldn't auto-open): {e:#}");
        }
    }
}

/// Production entry: real job boards + JSON ledger at `cfg.paths.ledger`.
pub async fn run_once(cfg: &AppConfig) -> Result<RunOutcome> {
    let started = Local::now();
    tracing::info!("job search started: {}", started.format("%Y-%m-%d %H:%M:%S"));

    let sources = default_sources(cfg)?;
    let ledger = JsonFileLedger::new(&cfg.paths.ledger);
    let notifier = NotifierMux::from_config(&cfg.notify);
    let outcome = run_with(cfg, &sources, &ledger, &notifier).await?;

    tracing::info!(
        "job search completed at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(outcome)
}
