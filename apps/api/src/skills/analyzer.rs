//! Gap Analyzer — compares resume skills against a role's required skills.
//!
//! `Strategy::Llm` asks the model for a `GapReport`-shaped JSON object and validates it.
//! `Strategy::Fallback` is a deterministic set difference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{strip_json_fences, LlmError};
use crate::skills::normalizer::normalize;
use crate::skills::prompts::render_gap_prompt;
use crate::skills::Strategy;

pub const MAX_RECOMMENDATIONS: usize = 3;
const GAP_ANALYSIS_MAX_TOKENS: u32 = 600;

/// A suggested course for one missing skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    pub course: String,
}

/// Gap report returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub score: u32, // 0 – 100
    pub have: Vec<String>,
    pub weak: Vec<String>, // only ever filled by the LLM strategy
    pub missing: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

/// Wire shape accepted from the model. Every key is required.
#[derive(Debug, Deserialize)]
struct ModelGapReport {
    score: f64,
    have: Vec<String>,
    weak: Vec<String>,
    missing: Vec<String>,
    recommendations: Vec<Recommendation>,
}

pub struct GapAnalyzer {
    strategy: Strategy,
}

impl GapAnalyzer {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub async fn analyze(
        &self,
        resume_skills: &[String],
        role_skills: &[String],
    ) -> Result<GapReport, LlmError> {
        let report = match &self.strategy {
            Strategy::Fallback => fallback_analysis(resume_skills, role_skills),
            Strategy::Llm(provider) => {
                let prompt = render_gap_prompt(resume_skills, role_skills);
                let raw = provider.complete(&prompt, GAP_ANALYSIS_MAX_TOKENS).await?;
                parse_gap_response(&raw, role_skills)
            }
        };
        debug!(
            "Gap analysis: score={} have={} weak={} missing={}",
            report.score,
            report.have.len(),
            report.weak.len(),
            report.missing.len()
        );
        Ok(report)
    }
}

/// Deterministic comparison by exact normalized-string membership.
///
/// `score = floor(100 * |have| / max(1, |role_skills|))`, so a role with no
/// required skills scores 0.
pub fn fallback_analysis(resume_skills: &[String], role_skills: &[String]) -> GapReport {
    let resume: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();

    let (have, missing): (Vec<String>, Vec<String>) = role_skills
        .iter()
        .cloned()
        .partition(|skill| resume.contains(skill.as_str()));

    let score = (100 * have.len() / role_skills.len().max(1)) as u32;

    let recommendations = missing
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|skill| Recommendation {
            skill: skill.clone(),
            course: format!("Course for {skill}"),
        })
        .collect();

    GapReport {
        score,
        have,
        weak: Vec::new(),
        missing,
        recommendations,
    }
}

/// Report used when the model's answer cannot be trusted: nothing matched.
pub fn safe_default(role_skills: &[String]) -> GapReport {
    GapReport {
        score: 0,
        have: Vec::new(),
        weak: Vec::new(),
        missing: role_skills.to_vec(),
        recommendations: Vec::new(),
    }
}

/// Parses and validates model output into a `GapReport`.
///
/// Missing keys, wrong types or a non-finite score yield `safe_default`.
/// Otherwise the score is clamped to 0–100, lists are normalized, `missing` is
/// restricted to the role's skills and recommendations keep only the first
/// course for each missing skill, at most three.
pub fn parse_gap_response(raw: &str, role_skills: &[String]) -> GapReport {
    let parsed: ModelGapReport = match serde_json::from_str(strip_json_fences(raw)) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Unusable gap analysis from model, using safe default: {e}");
            return safe_default(role_skills);
        }
    };

    if !parsed.score.is_finite() {
        warn!("Model returned non-finite score, using safe default");
        return safe_default(role_skills);
    }

    let role: HashSet<&str> = role_skills.iter().map(String::as_str).collect();

    let missing: Vec<String> = normalize_list(parsed.missing)
        .into_iter()
        .filter(|skill| role.contains(skill.as_str()))
        .collect();

    // At most one course per missing skill.
    let mut unrecommended: HashSet<&str> = missing.iter().map(String::as_str).collect();
    let recommendations = parsed
        .recommendations
        .into_iter()
        .filter_map(|rec| {
            let skill = normalize(&rec.skill);
            let course = rec.course.trim().to_string();
            (!course.is_empty() && unrecommended.remove(skill.as_str()))
                .then_some(Recommendation { skill, course })
        })
        .take(MAX_RECOMMENDATIONS)
        .collect();

    GapReport {
        score: parsed.score.round().clamp(0.0, 100.0) as u32,
        have: normalize_list(parsed.have),
        weak: normalize_list(parsed.weak),
        missing,
        recommendations,
    }
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .collect()
}
