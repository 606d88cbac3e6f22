// src/notify/mod.rs
//! Alerts for a finished run: one summary per run, fanned out to the
//! enabled channels. Channel failures are logged, never propagated.

pub mod desktop;

use anyhow::Result;

use crate::ingest::types::Posting;

pub use desktop::DesktopNotifier;

/// Summary of a run's new postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAlert {
    pub title: String,
    pub message: String,
    pub count: usize,
}

impl JobAlert {
    /// `None` when there is nothing new. Postings must be ranked best-first.
    pub fn summarize(postings: &[Posting]) -> Option<Self> {
        let top = postings.first()?;
        let message = match postings {
            [only] => format!("{} at {}", only.title, only.company),
            [first, second] => format!("{}, {}", first.title, second.title),
            _ => format!(
                "{} at {} and {} more",
                top.title,
                top.company,
                postings.len() - 1
            ),
        };
        Some(Self {
            title: format!("{} New Jobs Found!", postings.len()),
            message,
            count: postings.len(),
        })
    }
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &JobAlert) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Writes the alert to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, alert: &JobAlert) -> Result<()> {
        tracing::info!(target: "notify", count = alert.count, "{}: {}", alert.title, alert.message);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[derive(Default)]
pub struct NotifierMux {
    channels: Vec<Box<dyn Notifier>>,
}

impl NotifierMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, n: Box<dyn Notifier>) -> Self {
        self.channels.push(n);
        self
    }

    /// Log channel always on, desktop when enabled.
    pub fn from_config(cfg: &crate::config::NotifyConfig) -> Self {
        let mux = Self::new().with(Box::new(LogNotifier));
        if cfg.desktop {
            mux.with(Box::new(DesktopNotifier::new()))
        } else {
            mux
        }
    }

    /// Returns how many channels delivered.
    pub async fn notify(&self, alert: &JobAlert) -> usize {
        let mut ok = 0usize;
        for ch in &self.channels {
            match ch.send(alert).await {
                Ok(()) => ok += 1,
                Err(e) => tracing::warn!(channel = ch.name(), "⚠️ could not send notification: {e:#}"),
            }
        }
        ok
    }
}
