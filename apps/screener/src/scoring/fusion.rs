use crate::scoring::policy::{
    COVERAGE_BOOST, COVERAGE_BOOST_TIER, IRRELEVANCE_MATCH_FLOOR, IRRELEVANCE_PENALTY,
    MATCH_WEIGHT, QUALITY_WEIGHT, STRONG_COVERAGE_BOOST, STRONG_COVERAGE_TIER,
};

/// Fuses the three signals into the final score in [0, 1].
///
/// `0.75·match + 0.25·quality`, then +0.10 above 40% coverage and a further +0.05 above
/// 60% (the two boosts stack), then −0.10 when match is below 0.20, then clamp.
pub fn fuse(quality: f64, match_score: f64, coverage: f64) -> f64 {
    let mut score = MATCH_WEIGHT * match_score + QUALITY_WEIGHT * quality;

    if coverage > COVERAGE_BOOST_TIER {
        score += COVERAGE_BOOST;
    }
    if coverage > STRONG_COVERAGE_TIER {
        score += STRONG_COVERAGE_BOOST;
    }
    if match_score < IRRELEVANCE_MATCH_FLOOR {
        score -= IRRELEVANCE_PENALTY;
    }

    score.clamp(0.0, 1.0)
}
