// src/ingest/mod.rs
pub mod providers;
pub mod types;

use crate::analyze::Scorer;
use crate::ingest::types::{ListingSource, Posting, SearchQuery};
use crate::ledger::{merge_and_truncate, LedgerStore, LEDGER_CAP};
use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::time::Duration;

/// One-time metrics registration (so series show up once a recorder is installed).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("jobs_fetched_total", "Postings returned by providers.");
        describe_counter!("jobs_new_total", "Postings kept as new after dedup.");
        describe_counter!(
            "jobs_known_total",
            "Postings dropped because the ledger already had them."
        );
        describe_counter!(
            "jobs_duplicate_total",
            "Postings dropped as duplicates within one run."
        );
        describe_counter!(
            "jobs_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_histogram!("jobs_parse_ms", "Provider parse time in milliseconds.");
        describe_gauge!("jobs_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Tidy text the HTML parser already decoded: fold NBSP and smart quotes,
/// collapse whitespace. Literal `<...>` and `&` in the text are kept.
pub fn normalize_text(s: &str) -> String {
    let out = s
        .replace('\u{a0}', " ")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Fixed politeness pauses between remote calls. Not a retry/backoff policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throttle {
    pub between_sources: Duration,
    pub between_queries: Duration,
}

impl Throttle {
    pub fn none() -> Self {
        Self {
            between_sources: Duration::ZERO,
            between_queries: Duration::ZERO,
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            between_sources: Duration::from_secs(2),
            between_queries: Duration::from_secs(3),
        }
    }
}

async fn pause(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}

/// Everything fetched in one run, before scoring and dedup.
#[derive(Debug, Default)]
pub struct Collected {
    pub postings: Vec<Posting>,
    pub failed_calls: usize,
}

/// Result of one run: ranked new postings plus what to add to the ledger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// New postings, best match first; ties keep fetch order.
    pub postings: Vec<Posting>,
    /// Non-empty identifiers accepted this run, in acceptance order.
    pub new_ids: Vec<String>,
    /// Identifiers loaded from the ledger at the start of the run.
    pub known_ids: Vec<String>,
    pub fetched: usize,
    pub known: usize,
    pub duplicates: usize,
    pub failed_calls: usize,
}

/// Visit every query × source (source innermost). A failing call is logged
/// and counts as zero postings; it never aborts the run.
pub async fn collect(
    queries: &[SearchQuery],
    sources: &[Box<dyn ListingSource>],
    throttle: &Throttle,
) -> Collected {
    ensure_metrics_described();

    let mut out = Collected::default();
    for (qi, query) in queries.iter().enumerate() {
        tracing::info!(target: "ingest", title = %query.title, "searching");
        for (si, source) in sources.iter().enumerate() {
            match source.search(query).await {
                Ok(mut found) => {
                    tracing::info!(
                        target: "ingest",
                        provider = source.name(),
                        found = found.len(),
                        "  - found {} jobs on {}",
                        found.len(),
                        source.name()
                    );
                    counter!("jobs_fetched_total").increment(found.len() as u64);
                    out.postings.append(&mut found);
                }
                Err(e) => {
                    tracing::warn!(
                        target: "ingest",
                        error = ?e,
                        provider = source.name(),
                        title = %query.title,
                        "provider error"
                    );
                    counter!("jobs_provider_errors_total").increment(1);
                    out.failed_calls += 1;
                }
            }
            if si + 1 < sources.len() {
                pause(throttle.between_sources).await;
            }
        }
        if qi + 1 < queries.len() {
            pause(throttle.between_queries).await;
        }
    }
    out
}

/// Score, drop known and intra-run duplicates, rank.
///
/// Empty identifiers are never deduplicated.
pub fn select_new(
    raw: Vec<Posting>,
    known: &HashSet<String>,
    scorer: &Scorer,
) -> (Vec<Posting>, Vec<String>, usize, usize) {
    let mut accepted: HashSet<String> = HashSet::new();
    let mut new_ids = Vec::new();
    let mut keep = Vec::with_capacity(raw.len());
    let mut known_out = 0usize;
    let mut dup_out = 0usize;

    for p in raw {
        let b = scorer.breakdown(&p.title, &p.description);
        tracing::debug!(
            target: "ingest",
            id = %p.identifier,
            score = b.score,
            required = ?b.required,
            nice = ?b.nice_to_have,
            leadership = ?b.leadership,
            "scored {}",
            p.title
        );
        let p = p.with_score(b.score);

        if !p.identifier.is_empty() {
            if known.contains(&p.identifier) {
                known_out += 1;
                continue;
            }
            if !accepted.insert(p.identifier.clone()) {
                dup_out += 1;
                continue;
            }
            new_ids.push(p.identifier.clone());
        }
        keep.push(p);
    }

    // Vec::sort_by is stable: equal scores keep accumulation order.
    keep.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    (keep, new_ids, known_out, dup_out)
}

/// Run the whole pipeline once. Only a ledger load failure is fatal.
pub async fn run(
    queries: &[SearchQuery],
    sources: &[Box<dyn ListingSource>],
    ledger: &dyn LedgerStore,
    scorer: &Scorer,
    throttle: &Throttle,
) -> Result<RunOutcome> {
    let known_ids = ledger.load().context("loading seen-jobs ledger")?;
    let known: HashSet<String> = known_ids.iter().cloned().collect();

    let collected = collect(queries, sources, throttle).await;
    let fetched = collected.postings.len();
    let (postings, new_ids, known_cnt, dup_cnt) = select_new(collected.postings, &known, scorer);

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("jobs_new_total").increment(postings.len() as u64);
    counter!("jobs_known_total").increment(known_cnt as u64);
    counter!("jobs_duplicate_total").increment(dup_cnt as u64);
    gauge!("jobs_last_run_ts").set(now as f64);

    Ok(RunOutcome {
        postings,
        new_ids,
        known_ids,
        fetched,
        known: known_cnt,
        duplicates: dup_cnt,
        failed_calls: collected.failed_calls,
    })
}

/// Persist the run's new identifiers. Skipped when no new identifier was
/// accepted. Returns whether the ledger was written.
pub fn commit_ledger(outcome: &RunOutcome, ledger: &dyn LedgerStore) -> Result<bool> {
    if outcome.new_ids.is_empty() {
        return Ok(false);
    }
    let merged = merge_and_truncate(
        outcome.known_ids.clone(),
        outcome.new_ids.iter().cloned(),
        LEDGER_CAP,
    );
    ledger.save(&merged).context("saving seen-jobs ledger")?;
    Ok(true)
}
