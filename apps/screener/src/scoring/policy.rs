//! Scoring policy constants. Not runtime-configurable: changing any of these changes
//! who passes.

/// `final >= HIGH_IMPACT_THRESHOLD` passes regardless of sub-scores.
pub const HIGH_IMPACT_THRESHOLD: f64 = 0.75;
/// Below high impact, a pass needs `final >= PASS_THRESHOLD` and `match >= MATCH_THRESHOLD`.
pub const PASS_THRESHOLD: f64 = 0.65;
pub const MATCH_THRESHOLD: f64 = 0.50;
pub const QUALITY_THRESHOLD: f64 = 0.50;

pub const MATCH_WEIGHT: f64 = 0.75;
pub const QUALITY_WEIGHT: f64 = 0.25;

/// Coverage percentages above which the boosts apply. Both can fire together.
pub const COVERAGE_BOOST_TIER: f64 = 40.0;
pub const COVERAGE_BOOST: f64 = 0.10;
pub const STRONG_COVERAGE_TIER: f64 = 60.0;
pub const STRONG_COVERAGE_BOOST: f64 = 0.05;

/// Match below this is treated as an irrelevant resume.
pub const IRRELEVANCE_MATCH_FLOOR: f64 = 0.20;
pub const IRRELEVANCE_PENALTY: f64 = 0.10;

/// Substituted when the quality model cannot produce a prediction.
pub const FALLBACK_QUALITY: f64 = 0.5;

/// Confidence is 0.5 at the pass threshold, grows 1.5 per unit of distance, caps here.
pub const CONFIDENCE_FLOOR: f64 = 0.5;
pub const CONFIDENCE_SLOPE: f64 = 1.5;
pub const CONFIDENCE_CAP: f64 = 0.98;

pub const LOW_RISK_THRESHOLD: f64 = 0.80;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.60;

/// Sub-score level at which explanations call a signal strong.
pub const STRONG_SIGNAL: f64 = 0.60;

pub const PAGE_SIZE: usize = 10;
pub const MATCHED_SKILLS_LIMIT: usize = 10;
pub const MISSING_SKILLS_LIMIT: usize = 10;
pub const RECOMMENDATION_LIMIT: usize = 5;
pub const TOP_SKILLS_LIMIT: usize = 8;
