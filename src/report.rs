//! HTML digest of new postings, written to disk and opened in a browser.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::ingest::types::Posting;

/// Informal quality bucket shown next to each posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Excellent, // >= 70
    Good,      // 40..=69
    Potential, // < 40
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => MatchTier::Excellent,
            40..=69 => MatchTier::Good,
            _ => MatchTier::Potential,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "🔥 Excellent Match",
            MatchTier::Good => "✓ Good Match",
            MatchTier::Potential => "• Potential Match",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            MatchTier::Excellent => "high-match",
            MatchTier::Good => "medium-match",
            MatchTier::Potential => "low-match",
        }
    }
}

/// (excellent, good, potential)
pub fn tier_counts(postings: &[Posting]) -> (usize, usize, usize) {
    postings
        .iter()
        .fold((0, 0, 0), |(e, g, p), j| match MatchTier::from_score(j.match_score) {
            MatchTier::Excellent => (e + 1, g, p),
            MatchTier::Good => (e, g + 1, p),
            MatchTier::Potential => (e, g, p + 1),
        })
}

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; line-height: 1.6; color: #333; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; padding: 20px; }
.container { max-width: 1200px; margin: 0 auto; }
.header { background: white; border-radius: 12px; padding: 30px; text-align: center; margin-bottom: 30px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
.header h1 { color: #667eea; font-size: 32px; margin-bottom: 10px; }
.header p { color: #666; font-size: 18px; }
.stats { display: flex; justify-content: center; gap: 20px; margin-top: 20px; }
.stat { background: #f8f9fa; padding: 10px 20px; border-radius: 8px; }
.stat strong { color: #667eea; font-size: 24px; }
.job { background: white; border-radius: 12px; padding: 25px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.job-header { display: flex; justify-content: space-between; align-items: start; margin-bottom: 15px; flex-wrap: wrap; gap: 10px; }
.job-title { font-size: 22px; font-weight: bold; color: #2c3e50; margin-bottom: 8px; }
.company { font-size: 18px; color: #555; margin-bottom: 8px; }
.location { color: #777; margin-bottom: 12px; font-size: 15px; }
.source { display: inline-block; background: #e9ecef; padding: 4px 12px; border-radius: 4px; font-size: 13px; color: #495057; margin-left: 10px; }
.match-score { display: inline-block; padding: 8px 16px; border-radius: 6px; font-weight: bold; font-size: 14px; white-space: nowrap; }
.high-match { background-color: #28a745; color: white; }
.medium-match { background-color: #ffc107; color: black; }
.low-match { background-color: #6c757d; color: white; }
.description { color: #666; margin: 15px 0; padding: 15px; background: #f8f9fa; border-radius: 6px; font-size: 15px; }
.apply-btn { display: inline-block; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; margin-top: 15px; font-weight: 600; }
.footer { text-align: center; padding: 30px; color: white; margin-top: 30px; font-size: 14px; }
.timestamp { background: rgba(255,255,255,0.9); padding: 10px 20px; border-radius: 6px; margin-top: 10px; display: inline-block; color: #667eea; font-weight: 600; }
"#;

/// Render the full report page. Postings are expected to be ranked already.
pub fn render_html(postings: &[Posting], generated_at: DateTime<Local>) -> String {
    let (excellent, good, potential) = tier_counts(postings);
    let mut out = String::with_capacity(4096 + postings.len() * 1024);

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Job Search Results - {date}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<div class="header">
<h1>🎯 Your Job Search Results</h1>
<p>Found {total} new opportunities matching your profile</p>
<div class="stats">
<div class="stat"><strong>{excellent}</strong><div>Excellent Matches</div></div>
<div class="stat"><strong>{good}</strong><div>Good Matches</div></div>
<div class="stat"><strong>{potential}</strong><div>Potential Matches</div></div>
</div>
</div>
"#,
        date = generated_at.format("%B %d, %Y"),
        total = postings.len(),
    );

    for job in postings {
        let tier = MatchTier::from_score(job.match_score);
        let description = if job.description.is_empty() {
            format!("Click to view full description on {}", job.source.label())
        } else {
            job.description.clone()
        };
        let _ = write!(
            out,
            r#"<div class="job">
<div class="job-header">
<div>
<div class="job-title">{title}</div>
<div class="company">🏢 {company}</div>
<div class="location">📍 {location}<span class="source">{source}</span></div>
</div>
<span class="match-score {class}">{label} ({score}%)</span>
</div>
<div class="description">{description}</div>
<a href="{url}" class="apply-btn" target="_blank">View &amp; Apply →</a>
</div>
"#,
            title = encode_text(&job.title),
            company = encode_text(&job.company),
            location = encode_text(&job.location),
            source = job.source.label(),
            class = tier.css_class(),
            label = tier.label(),
            score = job.match_score,
            description = encode_text(&description),
            url = encode_double_quoted_attribute(&job.url),
        );
    }

    let _ = write!(
        out,
        r#"<div class="footer">
<p>This is an automated job search digest. Jobs are ranked by match score based on your resume.</p>
<div class="timestamp">Generated: {ts}</div>
</div>
</div>
</body>
</html>
"#,
        ts = generated_at.format("%B %d, %Y at %I:%M %p"),
    );
    out
}

pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(path, html).with_context(|| format!("writing report {}", path.display()))
}

/// Open the report in a browser. macOS tries `browser` first, then the default app.
pub async fn open_in_browser(path: &Path, browser: &str) -> Result<()> {
    use tokio::process::Command;

    if cfg!(target_os = "macos") {
        if !browser.trim().is_empty() {
            let status = Command::new("open")
                .arg("-a")
                .arg(browser)
                .arg(path)
                .status()
                .await;
            if matches!(status, Ok(s) if s.success()) {
                tracing::info!("📂 opening jobs in {browser}");
                return Ok(());
            }
        }
        let status = Command::new("open")
            .arg(path)
            .status()
            .await
            .context("spawn open")?;
        anyhow::ensure!(status.success(), "open exited with {status}");
    } else {
        let status = Command::new("xdg-open")
            .arg(path)
            .status()
            .await
            .context("spawn xdg-open")?;
        anyhow::ensure!(status.success(), "xdg-open exited with {status}");
    }
    tracing::info!("📂 opening jobs in default browser");
    Ok(())
}
