//! Keyword match scoring for job postings.
//!
//! Score = 10 per required skill present + 5 per nice-to-have present
//! + 3 per leadership keyword present, clamped to the profile cap.
//! Matching is a case-folded substring test over `title + " " + description`,
//! so "manage" also hits "Manager" and "ai" hits "maintain". Each term
//! counts at most once no matter how often it occurs.

use super::profile::{ScoreWeights, ScoringProfile};

/// Which terms of each list matched, for debug output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub required: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub leadership: Vec<String>,
    pub score: u8,
}

/// Immutable scorer built once per run from a profile.
#[derive(Clone, Debug)]
pub struct Scorer {
    required: Vec<(String, String)>, // (original, lowercased)
    nice_to_have: Vec<(String, String)>,
    leadership: Vec<(String, String)>,
    weights: ScoreWeights,
    cap: u32,
}

impl Scorer {
    pub fn new(profile: &ScoringProfile) -> Self {
        fn fold(terms: &[String]) -> Vec<(String, String)> {
            terms
                .iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| (t.clone(), t.to_lowercase()))
                .collect()
        }
        Self {
            required: fold(&profile.required),
            nice_to_have: fold(&profile.nice_to_have),
            leadership: fold(&profile.leadership),
            weights: profile.weights,
            cap: profile.cap.min(super::profile::MAX_SCORE),
        }
    }

    /// Match score in `[0, cap]`.
    pub fn score(&self, title: &str, description: &str) -> u8 {
        self.breakdown(title, description).score
    }

    pub fn breakdown(&self, title: &str, description: &str) -> ScoreBreakdown {
        let text = format!("{title} {description}").to_lowercase();

        let hits = |terms: &[(String, String)]| -> Vec<String> {
            terms
                .iter()
                .filter(|(_, folded)| text.contains(folded.as_str()))
                .map(|(orig, _)| orig.clone())
                .collect()
        };

        let required = hits(&self.required);
        let nice_to_have = hits(&self.nice_to_have);
        let leadership = hits(&self.leadership);

        let raw = required.len() as u64 * u64::from(self.weights.required)
            + nice_to_have.len() as u64 * u64::from(self.weights.nice)
            + leadership.len() as u64 * u64::from(self.weights.leadership);
        let score = raw.min(u64::from(self.cap)) as u8;

        ScoreBreakdown {
            required,
            nice_to_have,
            leadership,
            score,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(&ScoringProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn react_in_title_only_scores_ten() {
        let s = Scorer::default();
        assert_eq!(s.score("React Developer", ""), 10);
    }

    #[test]
    fn manager_with_typescript_and_lead() {
        let s = Scorer::default();
        let b = s.breakdown("Engineering Manager", "TypeScript lead");
        assert_eq!(b.required, vec!["TypeScript".to_string()]);
        assert_eq!(b.leadership, vec!["lead".to_string(), "manage".to_string()]);
        assert_eq!(b.score, 16);
    }

    #[test]
    fn repeated_term_counts_once() {
        let s = Scorer::default();
        assert_eq!(
            s.score("React", "react REACT react"),
            s.score("React", "")
        );
    }

    #[test]
    fn substring_quirk_is_kept() {
        // "maintain" contains "ai"
        let s = Scorer::default();
        assert_eq!(s.score("Maintain", ""), 10);
    }

    #[test]
    fn score_is_capped() {
        let s = Scorer::default();
        let everything = "React TypeScript Node.js JavaScript OpenAI LangChain \
            Team Leadership Engineering Management EdTech Education Technology \
            React Native Python GCP AWS MongoDB director mentor";
        assert_eq!(s.score(everything, everything), 100);
    }

    #[test]
    fn custom_weights_and_cap() {
        let p = ScoringProfile {
            required: vec!["rust".into()],
            nice_to_have: vec![],
            leadership: vec![],
            weights: ScoreWeights {
                required: 40,
                nice: 0,
                leadership: 0,
            },
            cap: 30,
        };
        assert_eq!(Scorer::new(&p).score("Rust engineer", ""), 30);
    }
}
