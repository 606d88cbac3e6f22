// src/ingest/providers/indeed.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use scraper::Html;

use super::{fetch_page, first_text, selector, HttpSettings, Mode};
use crate::ingest::types::{JobSource, ListingSource, Posting, SearchQuery};

pub const INDEED_SEARCH_URL: &str = "https://www.indeed.com/jobs";
const VIEW_URL: &str = "https://www.indeed.com/viewjob";

/// Indeed search results (`div.job_seen_beacon` cards).
pub struct IndeedProvider {
    mode: Mode,
    max_results: usize,
}

impl IndeedProvider {
    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(INDEED_SEARCH_URL, settings)
    }

    pub fn with_base_url(base_url: &str, settings: &HttpSettings) -> Result<Self> {
        Ok(Self {
            mode: Mode::http(base_url, settings)?,
            max_results: settings.max_results,
        })
    }

    /// Parse a stored results page instead of hitting the network.
    pub fn from_fixture_str(html: &str) -> Self {
        Self {
            mode: Mode::Fixture(html.to_string()),
            max_results: HttpSettings::default().max_results,
        }
    }

    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    /// `?q=<title job_type>&l=<location>&radius=<miles>&fromage=<days>`
    pub fn search_url(base_url: &str, query: &SearchQuery) -> Result<url::Url> {
        url::Url::parse_with_params(
            base_url,
            &[
                ("q", query.keywords()),
                ("l", query.location.clone()),
                ("radius", query.radius_miles.to_string()),
                ("fromage", query.posted_within_days.to_string()),
            ],
        )
        .with_context(|| format!("building indeed url from {base_url}"))
    }

    pub fn parse_results(html: &str, query: &SearchQuery, max: usize) -> Result<Vec<Posting>> {
        let t0 = std::time::Instant::now();
        let doc = Html::parse_document(html);

        let card_sel = selector("div.job_seen_beacon")?;
        let title_sel = selector("h2.jobTitle")?;
        let company_sel = selector(r#"span[data-testid="company-name"]"#)?;
        let location_sel = selector(r#"div[data-testid="text-location"]"#)?;
        let link_sel = selector("a")?;
        let snippet_sel = selector("div.job-snippet")?;

        let mut out = Vec::new();
        for card in doc.select(&card_sel).take(max) {
            let (Some(title), Some(company)) =
                (first_text(&card, &title_sel), first_text(&card, &company_sel))
            else {
                tracing::debug!(provider = "Indeed", "card without title/company skipped");
                continue;
            };
            let location =
                first_text(&card, &location_sel).unwrap_or_else(|| query.location.clone());

            let native_id = card
                .select(&title_sel)
                .next()
                .and_then(|t| t.select(&link_sel).next())
                .and_then(|a| a.value().attr("data-jk"))
                .unwrap_or_default()
                .trim()
                .to_string();
            let url = if native_id.is_empty() {
                String::new()
            } else {
                format!("{VIEW_URL}?jk={native_id}")
            };
            let description = first_text(&card, &snippet_sel).unwrap_or_default();

            out.push(Posting::new(
                JobSource::Indeed,
                &native_id,
                &title,
                &company,
                &location,
                &description,
                &url,
            ));
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("jobs_parse_ms").record(ms);
        Ok(out)
    }
}

#[async_trait]
impl ListingSource for IndeedProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Posting>> {
        match &self.mode {
            Mode::Fixture(html) => Self::parse_results(html, query, self.max_results),
            Mode::Http { base_url, client } => {
                let url = Self::search_url(base_url, query)?;
                let body = fetch_page(client, &url).await.context("indeed search")?;
                Self::parse_results(&body, query, self.max_results)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Indeed"
    }
}
