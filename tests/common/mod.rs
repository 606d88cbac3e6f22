// tests/common/mod.rs
#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use job_scout::{JobSource, ListingSource, Posting, SearchQuery};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same postings for every query.
pub struct StaticSource {
    pub name: &'static str,
    pub postings: Vec<Posting>,
    pub calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(name: &'static str, postings: Vec<Posting>) -> Self {
        Self {
            name,
            postings,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ListingSource for StaticSource {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Posting>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.postings.clone())
    }
    fn name(&self) -> &'static str {
        self.name
    }
}

/// Always errors, like a site that times out.
pub struct FailingSource;

#[async_trait]
impl ListingSource for FailingSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Posting>> {
        anyhow::bail!("timed out searching {}", query.title)
    }
    fn name(&self) -> &'static str {
        "Failing"
    }
}

pub fn posting(source: JobSource, native_id: &str, title: &str, description: &str) -> Posting {
    Posting::new(source, native_id, title, "Acme", "Remote", description, "")
}

pub fn query(title: &str) -> SearchQuery {
    SearchQuery {
        title: title.to_string(),
        location: "Winter Springs, FL".to_string(),
        radius_miles: 50,
        job_type: "remote".to_string(),
        posted_within_days: 7,
    }
}
