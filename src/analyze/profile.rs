//! Skill profile used by the match scorer.
//!
//! TOML shape (all keys optional, defaults shown in `ScoringProfile::default`):
//! ```toml
//! [profile]
//! required = ["React", "TypeScript"]
//! nice_to_have = ["Python"]
//! leadership = ["lead", "manage"]
//! cap = 100
//!
//! [profile.weights]
//! required = 10
//! nice = 5
//! leadership = 3
//! ```

use serde::{Deserialize, Serialize};

/// Points awarded per matched term in each list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub required: u32,
    pub nice: u32,
    pub leadership: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            required: 10,
            nice: 5,
            leadership: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub required: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub leadership: Vec<String>,
    pub weights: ScoreWeights,
    pub cap: u32,
}

pub const MAX_SCORE: u32 = 100;

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            required: strings(&[
                "React",
                "TypeScript",
                "Node.js",
                "JavaScript",
                "AI",
                "ML",
                "OpenAI",
                "LangChain",
                "Team Leadership",
                "Engineering Management",
            ]),
            nice_to_have: strings(&[
                "EdTech",
                "Education Technology",
                "React Native",
                "Python",
                "GCP",
                "AWS",
                "MongoDB",
            ]),
            leadership: strings(&["lead", "manage", "director", "mentor", "team"]),
            weights: ScoreWeights::default(),
            cap: MAX_SCORE,
        }
    }
}

impl ScoringProfile {
    /// Trim terms, drop blanks, keep `cap` within the score range.
    pub fn sanitized(mut self) -> Self {
        self.required = clean_terms(self.required);
        self.nice_to_have = clean_terms(self.nice_to_have);
        self.leadership = clean_terms(self.leadership);
        self.cap = self.cap.min(MAX_SCORE);
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn clean_terms(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let p: ScoringProfile = toml::from_str(
            r#"
required = ["Rust"]
[weights]
nice = 7
"#,
        )
        .unwrap();
        assert_eq!(p.required, vec!["Rust".to_string()]);
        assert_eq!(p.weights.nice, 7);
        assert_eq!(p.weights.required, 10);
        assert_eq!(p.leadership.len(), 5);
        assert_eq!(p.cap, 100);
    }

    #[test]
    fn sanitize_drops_blank_terms_and_clamps_cap() {
        let p = ScoringProfile {
            required: vec!["  Go ".into(), "".into(), "   ".into()],
            cap: 250,
            ..ScoringProfile::default()
        }
        .sanitized();
        assert_eq!(p.required, vec!["Go".to_string()]);
        assert_eq!(p.cap, 100);
    }
}
