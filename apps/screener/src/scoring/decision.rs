//! Decision engine — maps a `ScoreResult` to PASS/FAIL, confidence, risk tier and a
//! templated explanation.
//!
//! Stateless precedence rule, no history:
//! 1. `final >= HIGH_IMPACT_THRESHOLD` → PASS, whatever the sub-scores say.
//! 2. `final >= PASS_THRESHOLD && match >= MATCH_THRESHOLD` → PASS.
//! 3. otherwise FAIL.
//!
//! Every text produced here is a fixed template filled with the scores, so deciding the
//! same result twice yields an identical `Decision`.

use serde::Serialize;

use crate::scoring::policy::{
    CONFIDENCE_CAP, CONFIDENCE_FLOOR, CONFIDENCE_SLOPE, COVERAGE_BOOST_TIER,
    HIGH_IMPACT_THRESHOLD, LOW_RISK_THRESHOLD, MATCH_THRESHOLD, MEDIUM_RISK_THRESHOLD,
    PASS_THRESHOLD, QUALITY_THRESHOLD, STRONG_COVERAGE_TIER, STRONG_SIGNAL,
};
use crate::scoring::{as_percent, ScoreResult};

pub const REASON_STRUCTURE: &str = "structure issues";
pub const REASON_ALIGNMENT: &str = "poor alignment";
pub const REASON_SKILLS: &str = "critical skills missing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explainability {
    pub quality_explanation: String,
    pub match_explanation: String,
    pub coverage_explanation: String,
    pub decision_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub status: DecisionStatus,
    /// In [0.5, 0.98]; lowest at the pass threshold.
    pub confidence: f64,
    pub reason_text: String,
    pub risk_tier: RiskTier,
    /// Empty whenever `status` is PASS.
    pub failure_reasons: Vec<String>,
    pub explainability: Explainability,
}

/// Derives the full decision from a score result.
pub fn decide(result: &ScoreResult) -> Decision {
    let status = decide_status(result.final_score, result.quality, result.match_score);
    let failure_reasons =
        failure_reasons(status, result.quality, result.match_score, result.coverage);

    Decision {
        status,
        confidence: confidence(result.final_score),
        reason_text: reason_text(status, result.final_score, &failure_reasons),
        risk_tier: risk_tier(result.final_score),
        explainability: explain(result, status),
        failure_reasons,
    }
}

/// Quality is accepted for symmetry with the other signals but never gates the outcome;
/// it only feeds the failure reasons.
pub fn decide_status(final_score: f64, _quality: f64, match_score: f64) -> DecisionStatus {
    if final_score >= HIGH_IMPACT_THRESHOLD {
        DecisionStatus::Pass
    } else if final_score >= PASS_THRESHOLD && match_score >= MATCH_THRESHOLD {
        DecisionStatus::Pass
    } else {
        DecisionStatus::Fail
    }
}

pub fn confidence(final_score: f64) -> f64 {
    (CONFIDENCE_FLOOR + CONFIDENCE_SLOPE * (final_score - PASS_THRESHOLD).abs()).min(CONFIDENCE_CAP)
}

pub fn risk_tier(final_score: f64) -> RiskTier {
    if final_score >= LOW_RISK_THRESHOLD {
        RiskTier::Low
    } else if final_score >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Ordered: structure, alignment, skills. A PASS always yields an empty list.
pub fn failure_reasons(
    status: DecisionStatus,
    quality: f64,
    match_score: f64,
    coverage: f64,
) -> Vec<String> {
    if status == DecisionStatus::Pass {
        return Vec::new();
    }

    let mut reasons = Vec::new();
    if quality < QUALITY_THRESHOLD {
        reasons.push(REASON_STRUCTURE.to_string());
    }
    if match_score < MATCH_THRESHOLD {
        reasons.push(REASON_ALIGNMENT.to_string());
    }
    if coverage < COVERAGE_BOOST_TIER {
        reasons.push(REASON_SKILLS.to_string());
    }
    reasons
}

fn reason_text(status: DecisionStatus, final_score: f64, reasons: &[String]) -> String {
    let pct = as_percent(final_score);
    match status {
        DecisionStatus::Pass => {
            format!("Candidate meets the hiring bar with a final score of {pct:.1}%.")
        }
        DecisionStatus::Fail if reasons.is_empty() => format!(
            "Candidate falls short of the hiring bar: final score {pct:.1}% is below the {:.0}% pass threshold.",
            PASS_THRESHOLD * 100.0
        ),
        DecisionStatus::Fail => format!(
            "Candidate falls short of the hiring bar ({pct:.1}%): {}.",
            reasons.join(", ")
        ),
    }
}

pub fn explain(result: &ScoreResult, status: DecisionStatus) -> Explainability {
    let quality_pct = as_percent(result.quality);
    let match_pct = as_percent(result.match_score);
    let final_pct = as_percent(result.final_score);
    let coverage = result.coverage;

    let quality_explanation = if result.quality >= STRONG_SIGNAL {
        format!("Resume structure and writing quality are strong ({quality_pct:.1}%).")
    } else {
        format!(
            "Resume structure needs work ({quality_pct:.1}%): clearer sections and quantified achievements would help."
        )
    };

    let match_explanation = if result.match_score >= STRONG_SIGNAL {
        format!("Content aligns closely with the job description ({match_pct:.1}% semantic match).")
    } else {
        format!(
            "Content only loosely aligns with the job description ({match_pct:.1}% semantic match)."
        )
    };

    let coverage_explanation = if coverage > STRONG_COVERAGE_TIER {
        format!("Covers {coverage:.2}% of the job's keywords, earning both coverage boosts.")
    } else if coverage > COVERAGE_BOOST_TIER {
        format!("Covers {coverage:.2}% of the job's keywords, earning the coverage boost.")
    } else {
        format!("Covers only {coverage:.2}% of the job's keywords; no coverage boost applied.")
    };

    let decision_explanation = match status {
        DecisionStatus::Pass if result.final_score >= HIGH_IMPACT_THRESHOLD => format!(
            "Final score {final_pct:.1}% clears the {:.0}% high-impact bar, so the candidate passes regardless of sub-scores.",
            HIGH_IMPACT_THRESHOLD * 100.0
        ),
        DecisionStatus::Pass => format!(
            "Final score {final_pct:.1}% clears the {:.0}% pass threshold with a {match_pct:.1}% match.",
            PASS_THRESHOLD * 100.0
        ),
        DecisionStatus::Fail => format!(
            "Final score {final_pct:.1}% does not pass: it needs {:.0}% outright, or {:.0}% with at least a {:.0}% match.",
            HIGH_IMPACT_THRESHOLD * 100.0,
            PASS_THRESHOLD * 100.0,
            MATCH_THRESHOLD * 100.0
        ),
    };

    Explainability {
        quality_explanation,
        match_explanation,
        coverage_explanation,
        decision_explanation,
    }
}
