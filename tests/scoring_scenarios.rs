// tests/scoring_scenarios.rs
use job_scout::{Scorer, ScoringProfile};

#[test]
fn required_skill_in_title_only() {
    let s = Scorer::new(&ScoringProfile::default());
    assert_eq!(s.score("React Developer", ""), 10);
}

#[test]
fn manager_title_with_typescript_and_lead() {
    // TypeScript (10) + "lead" (3) + "manage" inside "Manager" (3)
    let s = Scorer::new(&ScoringProfile::default());
    assert_eq!(s.score("Engineering Manager", "TypeScript lead"), 16);
}

#[test]
fn scores_stay_in_range() {
    let s = Scorer::default();
    let samples = [
        ("", ""),
        ("Cashier", "Evening shifts"),
        ("React TypeScript Node.js JavaScript", "OpenAI LangChain ML AWS GCP Python MongoDB"),
        (
            "Director, Team Leadership",
            "Engineering Management; mentor; EdTech; Education Technology; React Native",
        ),
    ];
    for (t, d) in samples {
        let v = s.score(t, d);
        assert!(v <= 100, "{t:?} / {d:?} scored {v}");
    }
}

#[test]
fn adding_a_missing_term_never_lowers_the_score() {
    let s = Scorer::default();
    let base_title = "Platform Engineer";
    let base_desc = "Builds services";
    let base = s.score(base_title, base_desc);

    let profile = ScoringProfile::default();
    let all_terms = profile
        .required
        .iter()
        .chain(profile.nice_to_have.iter())
        .chain(profile.leadership.iter());
    for term in all_terms {
        let extended = format!("{base_desc} {term}");
        assert!(
            s.score(base_title, &extended) >= base,
            "adding {term:?} lowered the score"
        );
    }
}

#[test]
fn rescoring_is_deterministic() {
    let s = Scorer::default();
    let a = s.score("VP of Engineering", "Mentor managers; AWS; Python");
    let b = s.score("VP of Engineering", "Mentor managers; AWS; Python");
    assert_eq!(a, b);
}

#[test]
fn empty_description_scores_no_higher_than_populated() {
    let s = Scorer::default();
    let title = "Engineering Manager";
    assert!(s.score(title, "") <= s.score(title, "React, TypeScript, AWS"));
}
