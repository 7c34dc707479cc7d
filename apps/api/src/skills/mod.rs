// Skill gap pipeline: normalize → extract → registry lookup → analyze.
// All LLM calls go through llm_client::CompletionProvider.

use std::sync::Arc;

use crate::llm_client::CompletionProvider;

pub mod analyzer;
pub mod extractor;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
pub mod registry;

/// How the extractor and analyzer do their work.
///
/// Chosen once at startup from `Config` and handed to each stage at construction.
#[derive(Clone)]
pub enum Strategy {
    Llm(Arc<dyn CompletionProvider>),
    Fallback,
}

impl Strategy {
    /// Label reported by `/health` and in startup logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Strategy::Llm(_) => "llm",
            Strategy::Fallback => "fallback",
        }
    }
}
