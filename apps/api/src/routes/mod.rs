pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::conversation::handlers as chat;
use crate::rules::handlers as info;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Conversation
        .route("/api/chat", post(chat::handle_chat))
        .route("/api/chat/stream", post(chat::handle_chat_stream))
        .route("/api/chat/reset", post(chat::handle_reset))
        .route("/api/chat/history", get(chat::handle_history))
        // Knowledge
        .route("/api/info/developer", get(info::handle_developer_info))
        .route("/api/info/skills", get(info::handle_skills))
        .route("/api/projects", get(info::handle_list_projects))
        .route("/api/projects/:id", get(info::handle_get_project))
        .route("/api/roadmap/:focus", get(info::handle_roadmap))
        // One-shot assistance (LLM backend only)
        .route("/api/assist/code-example", post(chat::handle_code_example))
        .route(
            "/api/assist/project-summary",
            post(chat::handle_project_summary),
        )
        .route(
            "/api/assist/recruiter-pitch",
            get(chat::handle_recruiter_pitch),
        )
        .route("/api/assist/explain", post(chat::handle_explain))
        .with_state(state)
}
