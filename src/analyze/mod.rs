// src/analyze/mod.rs
//! Match scoring: skill profile + scorer.

pub mod profile;
pub mod scoring;

pub use crate::analyze::profile::{ScoreWeights, ScoringProfile};
pub use crate::analyze::scoring::{ScoreBreakdown, Scorer};
