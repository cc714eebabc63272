use serde::Serialize;

use crate::nlp::KeywordSet;
use crate::scoring::policy::{MATCHED_SKILLS_LIMIT, MISSING_SKILLS_LIMIT, RECOMMENDATION_LIMIT};

pub const GENERIC_RECOMMENDATION: &str =
    "Quantify your achievements with concrete metrics (percentages, revenue, time saved) to stand out further.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGap {
    /// Keywords in both resume and job description, ascending, at most 10.
    pub matched: Vec<String>,
    /// Job-description keywords absent from the resume, ascending, at most 10.
    pub missing: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Compares keyword sets extracted from the raw (not normalized) resume and job text.
pub fn skill_gap(resume_keywords: &KeywordSet, jd_keywords: &KeywordSet) -> SkillGap {
    // BTreeSet iteration is already ascending.
    let matched: Vec<String> = jd_keywords
        .intersection(resume_keywords)
        .take(MATCHED_SKILLS_LIMIT)
        .cloned()
        .collect();
    let missing: Vec<String> = jd_keywords
        .difference(resume_keywords)
        .take(MISSING_SKILLS_LIMIT)
        .cloned()
        .collect();

    let recommendations = if missing.is_empty() {
        vec![GENERIC_RECOMMENDATION.to_string()]
    } else {
        missing
            .iter()
            .take(RECOMMENDATION_LIMIT)
            .map(|skill| recommend(skill))
            .collect()
    };

    SkillGap {
        matched,
        missing,
        recommendations,
    }
}

fn recommend(skill: &str) -> String {
    format!("Add evidence of '{skill}': a project, role or certification where you applied it.")
}
