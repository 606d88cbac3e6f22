// src/config/mod.rs
//! Application configuration.
//!
//! Lookup order:
//! 1) $JOB_SCOUT_CONFIG (must exist when set)
//! 2) config/job_scout.toml
//! 3) config/job_scout.json
//! 4) built-in defaults
//!
//! Every section is optional; missing keys keep their defaults.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::analyze::ScoringProfile;
use crate::ingest::providers::{HttpSettings, DEFAULT_USER_AGENT};
use crate::ingest::types::SearchQuery;
use crate::ingest::Throttle;

pub const ENV_CONFIG_PATH: &str = "JOB_SCOUT_CONFIG";
const DEFAULT_TOML_PATH: &str = "config/job_scout.toml";
const DEFAULT_JSON_PATH: &str = "config/job_scout.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub profile: ScoringProfile,
    pub http: HttpConfig,
    pub throttle: ThrottleConfig,
    pub paths: PathsConfig,
    pub report: ReportConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub titles: Vec<String>,
    pub location: String,
    pub radius_miles: u32,
    /// "remote" | "full-time" | "contract"
    pub job_type: String,
    pub posted_within_days: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            titles: vec![
                "Director of Engineering".into(),
                "Engineering Manager".into(),
                "Senior Engineering Manager".into(),
                "VP of Engineering".into(),
            ],
            location: "Winter Springs, FL".into(),
            radius_miles: 50,
            job_type: "remote".into(),
            posted_within_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_results_per_source: usize,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_results_per_source: 10,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    pub between_sources_secs: u64,
    pub between_queries_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            between_sources_secs: 2,
            between_queries_secs: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub ledger: PathBuf,
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ledger: PathBuf::from("sent_jobs.json"),
            report: PathBuf::from("latest_jobs.html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub open_browser: bool,
    /// Preferred browser on macOS (`open -a <browser>`).
    pub browser: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            open_browser: true,
            browser: "Google Chrome".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub desktop: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { desktop: true }
    }
}

impl AppConfig {
    /// One query per configured title, sharing the search parameters.
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.search
            .titles
            .iter()
            .map(|title| SearchQuery {
                title: title.clone(),
                location: self.search.location.clone(),
                radius_miles: self.search.radius_miles,
                job_type: self.search.job_type.clone(),
                posted_within_days: self.search.posted_within_days,
            })
            .collect()
    }

    pub fn throttle(&self) -> Throttle {
        Throttle {
            between_sources: Duration::from_secs(self.throttle.between_sources_secs),
            between_queries: Duration::from_secs(self.throttle.between_queries_secs),
        }
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.http.timeout_secs.max(1)),
            user_agent: self.http.user_agent.clone(),
            max_results: self.http.max_results_per_source,
        }
    }

    fn sanitized(mut self) -> Self {
        self.search.titles = self
            .search
            .titles
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.search.posted_within_days = self.search.posted_within_days.max(1);
        if self.http.user_agent.trim().is_empty() {
            self.http.user_agent = DEFAULT_USER_AGENT.into();
        }
        self.profile = self.profile.sanitized();
        self
    }
}

/// Load configuration from an explicit path. Supports TOML or JSON formats.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing config {}", path.display()))
}

/// Load configuration using env var + fallbacks (see module docs).
pub fn load_default() -> Result<AppConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_JSON_PATH);
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(AppConfig::default().sanitized())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AppConfig> {
    let cfg = match hint_ext {
        "toml" => toml::from_str::<AppConfig>(s)?,
        "json" => serde_json::from_str::<AppConfig>(s)?,
        // No usable extension: JSON documents start with '{'.
        _ if s.trim_start().starts_with('{') => serde_json::from_str::<AppConfig>(s)?,
        _ => toml::from_str::<AppConfig>(s)?,
    };
    Ok(cfg.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg = parse_config("", "toml").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.queries().len(), 4);
    }

    #[test]
    fn json_and_toml_sections_override() {
        let toml = r#"
[search]
titles = ["Staff Engineer", "  "]
job_type = "contract"

[throttle]
between_sources_secs = 0
"#;
        let cfg = parse_config(toml, "toml").unwrap();
        assert_eq!(cfg.search.titles, vec!["Staff Engineer".to_string()]);
        assert_eq!(cfg.search.location, "Winter Springs, FL");
        assert_eq!(cfg.throttle().between_sources, Duration::ZERO);
        assert_eq!(cfg.throttle().between_queries, Duration::from_secs(3));

        let json = r#"{"paths": {"ledger": "state/seen.json"}}"#;
        let cfg = parse_config(json, "").unwrap();
        assert_eq!(cfg.paths.ledger, PathBuf::from("state/seen.json"));
        assert_eq!(cfg.paths.report, PathBuf::from("latest_jobs.html"));
    }

    #[test]
    fn queries_carry_search_params() {
        let cfg = AppConfig::default();
        let q = &cfg.queries()[1];
        assert_eq!(q.title, "Engineering Manager");
        assert_eq!(q.radius_miles, 50);
        assert_eq!(q.posted_within_days, 7);
        assert_eq!(q.job_type, "remote");
    }

    #[test]
    fn zero_day_window_is_raised_to_one() {
        let cfg = parse_config("[search]\nposted_within_days = 0\n", "toml").unwrap();
        assert_eq!(cfg.search.posted_within_days, 1);
    }
}
