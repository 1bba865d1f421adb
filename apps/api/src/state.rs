use std::sync::Arc;

use crate::consultation::HistoryMode;
use crate::knowledge::{KnowledgeDocument, Persona};
use crate::llm_client::{CompletionService, ModelChoice};
use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub persona: Persona,
    /// Loaded once at startup; read-only afterwards.
    pub knowledge: Arc<KnowledgeDocument>,
    /// Pluggable completion backend. `LlmClient` in production, stubs in tests.
    pub llm: Arc<dyn CompletionService>,
    pub sessions: SessionRegistry,
    pub default_model: ModelChoice,
    pub history_mode: HistoryMode,
}
