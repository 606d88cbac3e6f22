// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod app;
pub mod config;
pub mod ingest;
pub mod ledger;
pub mod notify;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{Scorer, ScoringProfile};
pub use crate::ingest::types::{JobSource, ListingSource, Posting, SearchQuery};
pub use crate::ingest::{RunOutcome, Throttle};
pub use crate::ledger::{JsonFileLedger, LedgerStore, MemoryLedger, LEDGER_CAP};
pub use crate::notify::{JobAlert, NotifierMux};
