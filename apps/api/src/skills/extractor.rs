//! Skill Extractor — turns free resume text into a list of normalized skills.
//!
//! `Strategy::Llm` asks the model for a JSON array of skill names.
//! `Strategy::Fallback` keeps alphabetic whitespace-separated tokens.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::llm_client::{strip_json_fences, LlmError};
use crate::skills::normalizer::normalize;
use crate::skills::prompts::render_extraction_prompt;
use crate::skills::Strategy;

/// Upper bound on skills produced by the non-JSON paths.
pub const MAX_EXTRACTED_SKILLS: usize = 40;
const EXTRACTION_MAX_TOKENS: u32 = 400;

pub struct SkillExtractor {
    strategy: Strategy,
}

impl SkillExtractor {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Extracts skills from `resume_text`. Only the LLM call itself can fail;
    /// unusable model output degrades to a best-effort list.
    pub async fn extract(&self, resume_text: &str) -> Result<Vec<String>, LlmError> {
        let skills = match &self.strategy {
            Strategy::Fallback => fallback_extract(resume_text),
            Strategy::Llm(provider) => {
                let prompt = render_extraction_prompt(resume_text);
                let raw = provider.complete(&prompt, EXTRACTION_MAX_TOKENS).await?;
                parse_skill_response(&raw)
            }
        };
        debug!(
            "Extracted {} skills ({} strategy)",
            skills.len(),
            self.strategy.mode()
        );
        Ok(skills)
    }
}

/// Tokenizes on whitespace, keeps lower-cased alphabetic tokens longer than one
/// character, in first-seen order without repeats, capped at `MAX_EXTRACTED_SKILLS`.
pub fn fallback_extract(resume_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    resume_text
        .split_whitespace()
        .map(normalize)
        .filter(|token| token.chars().count() > 1 && token.chars().all(char::is_alphabetic))
        .filter(|token| seen.insert(token.clone()))
        .take(MAX_EXTRACTED_SKILLS)
        .collect()
}

/// Interprets raw model output.
///
/// - JSON array: string elements, normalized; anything else in the array is dropped.
/// - Other JSON: empty.
/// - Not JSON: newline/comma separated segments, normalized, capped at `MAX_EXTRACTED_SKILLS`.
pub fn parse_skill_response(raw: &str) -> Vec<String> {
    let text = strip_json_fences(raw);
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(normalize)
            .filter(|s| !s.is_empty())
            .collect(),
        Ok(_) => Vec::new(),
        Err(_) => text
            .replace('\n', ",")
            .split(',')
            .map(normalize)
            .filter(|s| !s.is_empty())
            .take(MAX_EXTRACTED_SKILLS)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::CompletionProvider;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct CannedProvider {
        reply: String,
        prompts: Mutex<Vec<(String, u32)>>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 401,
                message: "invalid api key".to_string(),
            })
        }
    }

    #[test]
    fn test_fallback_keeps_alphabetic_tokens() {
        let skills = fallback_extract("Python, SQL, and C++ experience.");
        assert_eq!(skills, vec!["python", "sql", "and", "experience"]);
        assert!(!skills.iter().any(|s| s.contains("c++")));
    }

    #[test]
    fn test_fallback_drops_short_and_numeric_tokens() {
        let skills = fallback_extract("I have 5 years of R and k8s (Kubernetes).");
        assert_eq!(skills, vec!["have", "years", "of", "and", "kubernetes"]);
    }

    #[test]
    fn test_fallback_dedups_in_first_seen_order() {
        let skills = fallback_extract("Rust rust RUST. Go, rust go");
        assert_eq!(skills, vec!["rust", "go"]);
    }

    #[test]
    fn test_fallback_caps_at_forty() {
        let words: Vec<String> = (0..60u8)
            .map(|i| format!("w{}{}", (b'a' + i % 26) as char, (b'a' + i / 26) as char))
            .collect();
        let skills = fallback_extract(&words.join(" "));
        assert_eq!(skills.len(), MAX_EXTRACTED_SKILLS);
        assert_eq!(skills[0], "waa");
    }

    #[test]
    fn test_fallback_blank_text() {
        assert!(fallback_extract("").is_empty());
        assert!(fallback_extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_parse_json_array() {
        let skills = parse_skill_response(r#"["Python", " SQL ", 42, null, "Deep Learning"]"#);
        assert_eq!(skills, vec!["python", "sql", "deep learning"]);
    }

    #[test]
    fn test_parse_fenced_json_array() {
        let skills = parse_skill_response("```json\n[\"Rust\", \"Tokio\"]\n```");
        assert_eq!(skills, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_parse_non_array_json_is_empty() {
        assert!(parse_skill_response(r#"{"skills": ["python"]}"#).is_empty());
        assert!(parse_skill_response("42").is_empty());
    }

    #[test]
    fn test_parse_invalid_json_splits_on_delimiters() {
        let skills = parse_skill_response("Python, SQL\nDocker,, \n Kubernetes");
        assert_eq!(skills, vec!["python", "sql", "docker", "kubernetes"]);
    }

    #[test]
    fn test_parse_invalid_json_caps_at_forty() {
        let raw: Vec<String> = (0..100).map(|i| format!("skill {i}")).collect();
        let skills = parse_skill_response(&raw.join(", "));
        assert_eq!(skills.len(), MAX_EXTRACTED_SKILLS);
        assert_eq!(skills[39], "skill 39");
    }

    #[tokio::test]
    async fn test_extract_fallback_strategy() {
        let extractor = SkillExtractor::new(Strategy::Fallback);
        let skills = extractor.extract("Python and SQL").await.unwrap();
        assert_eq!(skills, vec!["python", "and", "sql"]);
    }

    #[tokio::test]
    async fn test_extract_llm_strategy_sends_prompt() {
        let provider = CannedProvider::new(r#"["Python", "SQL"]"#);
        let extractor = SkillExtractor::new(Strategy::Llm(provider.clone()));

        let skills = extractor.extract("Senior data person").await.unwrap();
        assert_eq!(skills, vec!["python", "sql"]);

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("Senior data person"));
        assert_eq!(prompts[0].1, EXTRACTION_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_extract_llm_strategy_garbage_reply_degrades() {
        let extractor = SkillExtractor::new(Strategy::Llm(CannedProvider::new(
            "Sure! Skills: python, sql",
        )));
        let skills = extractor.extract("whatever").await.unwrap();
        assert_eq!(skills, vec!["sure! skills: python", "sql"]);
    }

    #[tokio::test]
    async fn test_extract_llm_blank_reply_is_empty() {
        for reply in ["", "   \n  "] {
            let extractor = SkillExtractor::new(Strategy::Llm(CannedProvider::new(reply)));
            let skills = extractor.extract("Python developer").await.unwrap();
            assert!(skills.is_empty(), "reply {reply:?} gave {skills:?}");
        }
    }

    #[tokio::test]
    async fn test_extract_llm_failure_propagates() {
        let extractor = SkillExtractor::new(Strategy::Llm(Arc::new(FailingProvider)));
        let err = extractor.extract("anything").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
    }
}
