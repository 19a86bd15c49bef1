use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::conversation::prompts::ConceptLevel;
use crate::conversation::session::ConversationMessage;
use crate::errors::AppError;
use crate::rules::router::Intent;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Missing is treated as empty and rejected with the same validation error.
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub query: String,
    pub response: String,
    pub success: bool,
    pub bot_type: &'static str,
    /// Matched rule, rule-based backend only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CodeExampleRequest {
    #[serde(default)]
    pub topic: String,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSummaryRequest {
    #[serde(default)]
    pub project: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub level: ConceptLevel,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub response: String,
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// POST /api/chat
///
/// Answers through the LLM when configured, otherwise through the intent router.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let query = required("query", &req.query)?;

    let (response, intent) = match &state.chat {
        Some(bot) => (bot.chat(&query).await?, None),
        None => (state.router.resolve(&query), state.router.classify(&query)),
    };

    Ok(Json(ChatResponse {
        query,
        response,
        success: true,
        bot_type: state.backend(),
        intent,
    }))
}

/// POST /api/chat/stream
///
/// One SSE event per fragment (`{"chunk": ...}`), then `{"done": true}`, or
/// `{"error": ...}` if the service fails mid-reply. The session stays locked
/// until the client has the whole reply or disconnects.
pub async fn handle_chat_stream(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let query = required("query", &req.query)?;
    let bot = state.require_chat()?;
    let mut fragments = bot.chat_stream(&query).await?;

    let stream = async_stream::stream! {
        while let Some(item) = fragments.next().await {
            match item {
                Ok(chunk) => {
                    yield Ok(Event::default().data(json!({ "chunk": chunk }).to_string()));
                }
                Err(e) => {
                    warn!("Chat stream failed: {e}");
                    yield Ok(Event::default().data(json!({ "error": e.to_string() }).to_string()));
                    return;
                }
            }
        }
        yield Ok(Event::default().data(json!({ "done": true }).to_string()));
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// POST /api/chat/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.require_chat()?.reset().await;
    Ok(Json(json!({ "success": true, "message": "Conversation reset" })))
}

/// GET /api/chat/history
pub async fn handle_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let messages = state.require_chat()?.history().await;
    Ok(Json(HistoryResponse { messages }))
}

/// POST /api/assist/code-example
pub async fn handle_code_example(
    State(state): State<AppState>,
    Json(req): Json<CodeExampleRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let topic = required("topic", &req.topic)?;
    let language = req.language.as_deref().map(str::trim).filter(|l| !l.is_empty());
    let response = state.require_chat()?.code_example(&topic, language).await?;
    Ok(Json(AssistResponse { response }))
}

/// POST /api/assist/project-summary
pub async fn handle_project_summary(
    State(state): State<AppState>,
    Json(req): Json<ProjectSummaryRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let project = required("project", &req.project)?;
    let bot = state.require_chat()?;
    // Use the canonical name when the request names a known project.
    let name = state
        .knowledge
        .project_by_name(&project)
        .and_then(|p| p.name.clone())
        .unwrap_or(project);
    info!("Project summary requested for {name}");
    let response = bot.project_summary(&name).await?;
    Ok(Json(AssistResponse { response }))
}

/// GET /api/assist/recruiter-pitch
pub async fn handle_recruiter_pitch(
    State(state): State<AppState>,
) -> Result<Json<AssistResponse>, AppError> {
    let response = state.require_chat()?.recruiter_pitch().await?;
    Ok(Json(AssistResponse { response }))
}

/// POST /api/assist/explain
pub async fn handle_explain(
    State(state): State<AppState>,
    Json(req): Json<ExplainRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let concept = required("concept", &req.concept)?;
    let response = state
        .require_chat()?
        .explain_concept(&concept, req.level)
        .await?;
    Ok(Json(AssistResponse { response }))
}
