use std::sync::Arc;

use crate::config::Config;
use crate::conversation::chat::ChatBot;
use crate::errors::AppError;
use crate::knowledge::KnowledgeBase;
use crate::rules::router::IntentRouter;

pub const RULE_BASED_BACKEND: &str = "rule-based";
pub const LLM_BACKEND: &str = "llm";

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub knowledge: Arc<KnowledgeBase>,
    pub router: Arc<IntentRouter>,
    /// Present only when an API key is configured.
    pub chat: Option<Arc<ChatBot>>,
    pub config: Config,
}

impl AppState {
    pub fn backend(&self) -> &'static str {
        if self.chat.is_some() {
            LLM_BACKEND
        } else {
            RULE_BASED_BACKEND
        }
    }

    /// The chat bot, or a validation error for endpoints that need the LLM backend.
    pub fn require_chat(&self) -> Result<&ChatBot, AppError> {
        self.chat.as_deref().ok_or_else(|| {
            AppError::Validation(
                "this endpoint requires the LLM backend; set ANTHROPIC_API_KEY".to_string(),
            )
        })
    }
}
