use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub question: String,
}

/// Successful body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// One question/answer pair written to the `chats` table. Never read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLogEntry {
    pub question: String,
    pub answer: String,
    /// Unix seconds.
    pub timestamp: i64,
}

impl ChatLogEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now().timestamp(),
        }
    }
}
