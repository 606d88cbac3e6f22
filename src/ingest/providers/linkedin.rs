// src/ingest/providers/linkedin.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use once_cell::sync::OnceCell;
use scraper::Html;

use super::{fetch_page, first_text, selector, HttpSettings, Mode};
use crate::ingest::types::{JobSource, ListingSource, Posting, SearchQuery};

pub const LINKEDIN_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";

/// LinkedIn public job search (`div.base-card` cards). Listings carry no
/// description, so postings from here are scored on title alone.
pub struct LinkedInProvider {
    mode: Mode,
    max_results: usize,
}

/// Numeric job id from `/jobs/view/<id>` or `/jobs/view/<slug>-<id>`.
pub fn job_id_from_url(href: &str) -> Option<String> {
    static RE: OnceCell<regex::Regex> = OnceCell::new();
    let re = RE.get_or_init(|| regex::Regex::new(r"/jobs/view/(?:[^/?#]*-)?(\d+)").unwrap());
    re.captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

impl LinkedInProvider {
    pub fn from_settings(settings: &HttpSettings) -> Result<Self> {
        Self::with_base_url(LINKEDIN_SEARCH_URL, settings)
    }

    pub fn with_base_url(base_url: &str, settings: &HttpSettings) -> Result<Self> {
        Ok(Self {
            mode: Mode::http(base_url, settings)?,
            max_results: settings.max_results,
        })
    }

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

    /// `?keywords=..&location=..&distance=<miles>&f_TPR=r<seconds>`
    pub fn search_url(base_url: &str, query: &SearchQuery) -> Result<url::Url> {
        let window_secs = u64::from(query.posted_within_days) * 86_400;
        url::Url::parse_with_params(
            base_url,
            &[
                ("keywords", query.keywords()),
                ("location", query.location.clone()),
                ("distance", query.radius_miles.to_string()),
                ("f_TPR", format!("r{window_secs}")),
            ],
        )
        .with_context(|| format!("building linkedin url from {base_url}"))
    }

    pub fn parse_results(html: &str, query: &SearchQuery, max: usize) -> Result<Vec<Posting>> {
        let t0 = std::time::Instant::now();
        let doc = Html::parse_document(html);

        let card_sel = selector("div.base-card")?;
        let title_sel = selector("h3.base-search-card__title")?;
        let company_sel = selector("h4.base-search-card__subtitle")?;
        let location_sel = selector("span.job-search-card__location")?;
        let link_sel = selector("a.base-card__full-link")?;

        let mut out = Vec::new();
        for card in doc.select(&card_sel).take(max) {
            let href = card
                .select(&link_sel)
                .next()
                .and_then(|a| a.value().attr("href"));
            let (Some(title), Some(company), Some(href)) = (
                first_text(&card, &title_sel),
                first_text(&card, &company_sel),
                href,
            ) else {
                tracing::debug!(provider = "LinkedIn", "incomplete card skipped");
                continue;
            };
            let location =
                first_text(&card, &location_sel).unwrap_or_else(|| query.location.clone());
            let native_id = job_id_from_url(href).unwrap_or_default();

            out.push(Posting::new(
                JobSource::LinkedIn,
                &native_id,
                &title,
                &company,
                &location,
                "",
                href,
            ));
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("jobs_parse_ms").record(ms);
        Ok(out)
    }
}

#[async_trait]
impl ListingSource for LinkedInProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Posting>> {
        match &self.mode {
            Mode::Fixture(html) => Self::parse_results(html, query, self.max_results),
            Mode::Http { base_url, client } => {
                let url = Self::search_url(base_url, query)?;
                let body = fetch_page(client, &url).await.context("linkedin search")?;
                Self::parse_results(&body, query, self.max_results)
            }
        }
    }

    fn name(&self) -> &'static str {
        "LinkedIn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_plain_and_slug_forms() {
        assert_eq!(
            job_id_from_url("https://www.linkedin.com/jobs/view/3812345678/?trk=x").as_deref(),
            Some("3812345678")
        );
        assert_eq!(
            job_id_from_url(
                "https://www.linkedin.com/jobs/view/engineering-manager-at-acme-3899990001?refId=1"
            )
            .as_deref(),
            Some("3899990001")
        );
        assert_eq!(job_id_from_url("https://www.linkedin.com/company/acme"), None);
    }

    #[test]
    fn search_url_uses_seconds_window() {
        let q = SearchQuery {
            title: "Director of Engineering".into(),
            location: "Orlando, FL".into(),
            radius_miles: 25,
            job_type: "remote".into(),
            posted_within_days: 7,
        };
        let url = LinkedInProvider::search_url(LINKEDIN_SEARCH_URL, &q).unwrap();
        let tpr = url
            .query_pairs()
            .find(|(k, _)| k == "f_TPR")
            .map(|(_, v)| v.into_owned());
        assert_eq!(tpr.as_deref(), Some("r604800"));
    }
}
