// src/ingest/types.rs
use anyhow::Result;
use std::fmt;

/// Longest description snippet kept on a posting, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// Which listing site produced a posting.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
pub enum JobSource {
    Indeed,
    LinkedIn,
}

impl JobSource {
    /// Lowercase tag used as the identifier prefix, e.g. `indeed_123`.
    pub fn tag(self) -> &'static str {
        match self {
            JobSource::Indeed => "indeed",
            JobSource::LinkedIn => "linkedin",
        }
    }

    /// Human-facing name used in logs and the report.
    pub fn label(self) -> &'static str {
        match self {
            JobSource::Indeed => "Indeed",
            JobSource::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scraped job listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Posting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String, // <= MAX_DESCRIPTION_CHARS, may be empty
    pub url: String,         // may be empty
    pub source: JobSource,
    pub identifier: String, // "<tag>_<native>", empty when the site gave no id
    pub match_score: u8,    // assigned during aggregation
}

impl Posting {
    /// Build a posting from provider fields. The identifier is derived from
    /// `native_id`; a blank native id yields an empty identifier.
    pub fn new(
        source: JobSource,
        native_id: &str,
        title: &str,
        company: &str,
        location: &str,
        description: &str,
        url: &str,
    ) -> Self {
        let native = native_id.trim();
        let identifier = if native.is_empty() {
            String::new()
        } else {
            format!("{}_{}", source.tag(), native)
        };
        Self {
            title: crate::ingest::normalize_text(title),
            company: crate::ingest::normalize_text(company),
            location: crate::ingest::normalize_text(location),
            description: truncate_chars(
                &crate::ingest::normalize_text(description),
                MAX_DESCRIPTION_CHARS,
            ),
            url: url.trim().to_string(),
            source,
            identifier,
            match_score: 0,
        }
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.match_score = score;
        self
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        s.chars().take(max).collect()
    } else {
        s.to_string()
    }
}

/// Search parameters handed to every listing source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
    pub radius_miles: u32,
    pub job_type: String, // e.g. "remote", "full-time", "contract"
    pub posted_within_days: u32,
}

impl SearchQuery {
    /// Free-text keywords sent to the site: title plus job type.
    pub fn keywords(&self) -> String {
        let jt = self.job_type.trim();
        if jt.is_empty() {
            self.title.trim().to_string()
        } else {
            format!("{} {}", self.title.trim(), jt)
        }
    }
}

#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Posting>>;
    fn name(&self) -> &'static str;
}
