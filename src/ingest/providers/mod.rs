// src/ingest/providers/mod.rs
//! Listing-site providers. Each one either fetches a search page over HTTP
//! or parses a stored HTML fixture; both paths share the same parser.

pub mod indeed;
pub mod linkedin;

use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Selector};
use std::time::Duration;

pub use indeed::IndeedProvider;
pub use linkedin::LinkedInProvider;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// HTTP knobs shared by all providers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_results: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_results: 10,
        }
    }
}

pub(crate) enum Mode {
    Fixture(String),
    Http {
        base_url: String,
        client: reqwest::Client,
    },
}

impl Mode {
    pub(crate) fn http(base_url: &str, settings: &HttpSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .context("building http client")?;
        Ok(Mode::Http {
            base_url: base_url.to_string(),
            client,
        })
    }
}

/// GET `url` and return the body; non-2xx is an error.
pub(crate) async fn fetch_page(client: &reqwest::Client, url: &url::Url) -> Result<String> {
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("non-2xx from {url}"))?
        .text()
        .await
        .context("reading response body")
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e}"))
}

/// Text of the first element under `root` matching `sel`, whitespace-collapsed.
pub(crate) fn first_text(root: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    root.select(sel)
        .next()
        .map(|el| crate::ingest::normalize_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}
