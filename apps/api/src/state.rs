use std::sync::Arc;

use crate::analysis::service::AnalysisOptions;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The LLM backend. `LlmClient` in production, a scripted fake in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub analysis: AnalysisOptions,
}
