use std::sync::Arc;

use crate::chat::chat_log::ChatLog;
use crate::config::Config;
use crate::llm_client::ChatCompletion;
use crate::resume::ResumeText;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; PDF text or the embedded fallback.
    pub resume: ResumeText,
    pub llm: Arc<dyn ChatCompletion>,
    /// `None` when no document store is configured.
    pub chat_log: Option<Arc<dyn ChatLog>>,
}
