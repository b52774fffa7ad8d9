//! Axum route handlers for the chat API.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::chat::pipeline::answer_question;
use crate::errors::AppError;
use crate::models::chat::{AnswerResponse, Question};
use crate::state::AppState;

/// POST /api/chat
///
/// Returns `{"answer": ...}`, or HTTP 500 `{"detail": ...}` when the API key
/// is missing or the upstream call fails.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<Question>,
) -> Result<Json<AnswerResponse>, AppError> {
    let answer = answer_question(&state, &request.question).await?;
    debug!(source = ?answer.source, "Chat answered");
    Ok(Json(AnswerResponse {
        answer: answer.text,
    }))
}

/// GET /api/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "text": state.resume.as_str() }))
}

/// GET /api/chat-info
///
/// Static description of the chat endpoint for humans poking at the API.
pub async fn handle_chat_info() -> Json<Value> {
    Json(json!({
        "path": "/api/chat",
        "method": "POST",
        "content_type": "application/json",
        "body_example": { "question": "What are his technical skills?" },
        "curl_example": concat!(
            "curl -X POST http://localhost:8000/api/chat ",
            "-H 'Content-Type: application/json' ",
            r#"-d '{"question": "What are his technical skills?"}'"#,
        ),
    }))
}
