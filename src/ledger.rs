//! ledger.rs — bounded record of posting identifiers already reported.
//!
//! The ledger is a flat JSON array of strings. It is loaded once per run,
//! extended with the run's newly accepted identifiers, truncated to
//! `LEDGER_CAP` (oldest dropped first) and written back.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum number of identifiers retained across runs.
pub const LEDGER_CAP: usize = 1000;

pub trait LedgerStore: Send + Sync {
    /// Persisted identifiers in insertion order; empty if nothing was saved yet.
    fn load(&self) -> Result<Vec<String>>;
    /// Replace the persisted identifiers. Caller applies the cap first.
    fn save(&self, ids: &[String]) -> Result<()>;
}

/// Append `new` to `known` and keep only the last `cap` entries.
pub fn merge_and_truncate<I>(mut known: Vec<String>, new: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    known.extend(new);
    if known.len() > cap {
        let excess = known.len() - cap;
        known.drain(0..excess);
    }
    known
}

/// JSON file ledger, e.g. `sent_jobs.json`.
#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    path: PathBuf,
}

impl JsonFileLedger {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LedgerStore for JsonFileLedger {
    fn load(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading ledger {}", self.path.display()))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("parsing ledger {}", self.path.display()))?;
        Ok(ids)
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating ledger dir {}", dir.display()))?;
        }
        let body = serde_json::to_vec_pretty(ids).context("serializing ledger")?;

        // Write next to the target and rename so a failed write never leaves a torn file.
        let tmp = self.tmp_path();
        fs::write(&tmp, body).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing ledger {}", self.path.display()))?;
        Ok(())
    }
}

/// In-process ledger for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<Vec<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self {
            inner: Mutex::new(ids.into_iter().collect()),
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.inner.lock().expect("ledger mutex poisoned").clone()
    }
}

impl LedgerStore for MemoryLedger {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.snapshot())
    }

    fn save(&self, ids: &[String]) -> Result<()> {
        *self.inner.lock().expect("ledger mutex poisoned") = ids.to_vec();
        Ok(())
    }
}
