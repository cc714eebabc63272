// Scoring core: features -> fused final score -> decision, plus the skill gap.
// Pure functions over loaded capabilities; orchestration lives in `engine`.

pub mod decision;
pub mod features;
pub mod fusion;
pub mod policy;
pub mod skill_gap;

use serde::Serialize;

pub use decision::{decide, Decision, DecisionStatus};
pub use skill_gap::SkillGap;

/// Scores for one (resume, job description) pair. Fractions in [0, 1] except coverage,
/// which is a percentage in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    #[serde(rename = "final")]
    pub final_score: f64,
    pub quality: f64,
    #[serde(rename = "match")]
    pub match_score: f64,
    pub coverage: f64,
    /// Shared keywords, ascending, at most `MATCHED_SKILLS_LIMIT`.
    pub matched_skills: Vec<String>,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fraction in [0, 1] to a percentage rounded to two decimals.
pub fn as_percent(fraction: f64) -> f64 {
    round2(fraction * 100.0)
}
