// All LLM prompt constants for the skill pipeline.

/// Skill extraction prompt template. Replace `{resume_text}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a helpful assistant. Extract a JSON array of short skill names from the resume text below.
Return only valid JSON (an array of strings).
Resume:
---
{resume_text}
---"#;

/// Gap analysis prompt template.
/// Replace: {resume_skills}, {role_skills} (both JSON arrays)
pub const GAP_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert career coach. Given a list of skills extracted from the resume:
{resume_skills}
and a list of required skills for a role:
{role_skills}
Return only JSON with keys:
- score: integer 0-100 = percent matched
- have: array of skills the candidate clearly has
- weak: array of skills partially present / needs improvement
- missing: array of skills not present
- recommendations: array of objects { skill, course } (3 items max)
Example:
{ "score": 70, "have": ["python","sql"], "weak": ["data visualization"], "missing": ["deep learning"], "recommendations":[{"skill":"deep learning","course":"Intro to Deep Learning - Coursera"}] }"#;

pub fn render_extraction_prompt(resume_text: &str) -> String {
    SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

/// Both lists are embedded as JSON arrays.
pub fn render_gap_prompt(resume_skills: &[String], role_skills: &[String]) -> String {
    let resume_json = serde_json::to_string(resume_skills).unwrap_or_else(|_| "[]".to_string());
    let role_json = serde_json::to_string(role_skills).unwrap_or_else(|_| "[]".to_string());
    GAP_ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_skills}", &resume_json)
        .replace("{role_skills}", &role_json)
}
