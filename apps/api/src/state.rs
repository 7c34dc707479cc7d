use std::sync::Arc;

use crate::skills::analyzer::GapAnalyzer;
use crate::skills::extractor::SkillExtractor;
use crate::skills::registry::RoleSkillRegistry;
use crate::skills::Strategy;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoleSkillRegistry>,
    pub extractor: Arc<SkillExtractor>,
    pub analyzer: Arc<GapAnalyzer>,
    /// "llm" or "fallback", reported by /health.
    pub mode: &'static str,
}

impl AppState {
    /// Wires both pipeline stages to the same strategy.
    pub fn new(registry: RoleSkillRegistry, strategy: Strategy) -> Self {
        Self {
            registry: Arc::new(registry),
            mode: strategy.mode(),
            extractor: Arc::new(SkillExtractor::new(strategy.clone())),
            analyzer: Arc::new(GapAnalyzer::new(strategy)),
        }
    }
}
