//! Question-answering pipeline.
//!
//! credential check → shortcut match → (prompt → upstream call) → background
//! log → answer. Only the credential check and the upstream call can fail.

use tracing::{debug, info};

use crate::chat::chat_log::record_in_background;
use crate::chat::prompts::build_messages;
use crate::chat::shortcuts::{match_shortcut, SHORTCUT_GROUPS};
use crate::errors::AppError;
use crate::models::chat::ChatLogEntry;
use crate::state::AppState;

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Shortcut,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Answers one question.
///
/// The API key is required even for shortcut questions: without it every
/// request fails before the shortcut table is consulted.
pub async fn answer_question(state: &AppState, question: &str) -> Result<Answer, AppError> {
    if !state.llm.has_credentials() {
        return Err(AppError::MissingCredentials);
    }

    let answer = match match_shortcut(question, SHORTCUT_GROUPS) {
        Some(shortcut) => {
            debug!(
                group = shortcut.group,
                categories = ?shortcut.categories,
                "Answered by shortcut"
            );
            Answer {
                text: shortcut.answer,
                source: AnswerSource::Shortcut,
            }
        }
        None => {
            let messages = build_messages(&state.resume, question);
            let text = state
                .llm
                .complete(&messages)
                .await
                .and_then(|response| response.answer_text())
                .map_err(|e| AppError::Upstream(format!("{e:#}")))?;
            info!("Answered by model");
            Answer {
                text,
                source: AnswerSource::Model,
            }
        }
    };

    record_in_background(
        state.chat_log.clone(),
        ChatLogEntry::new(question, answer.text.clone()),
    );

    Ok(answer)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::chat::chat_log::testing::ChannelChatLog;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::resume::ResumeText;

    fn state_with(llm: Arc<ScriptedCompletion>, chat_log: Option<Arc<ChannelChatLog>>) -> AppState {
        AppState {
            config: Config::from_vars(|_| None).unwrap(),
            resume: ResumeText::new("Jane Doe\nSkills: Rust, Go"),
            llm,
            chat_log: chat_log.map(|log| log as Arc<dyn crate::chat::chat_log::ChatLog>),
        }
    }

    #[tokio::test]
    async fn test_shortcut_skips_upstream() {
        let llm = Arc::new(ScriptedCompletion::answering("model answer"));
        let state = state_with(llm.clone(), None);

        let answer = answer_question(&state, "What is your email?").await.unwrap();
        assert_eq!(answer.source, AnswerSource::Shortcut);
        assert_eq!(answer.text, "Email: yug30112005@gmail.com");
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_model_path_calls_upstream_once_with_two_messages() {
        let llm = Arc::new(ScriptedCompletion::answering("Rust and Go."));
        let state = state_with(llm.clone(), None);

        let question = "What programming languages does he know?";
        let answer = answer_question(&state, question).await.unwrap();
        assert_eq!(answer.source, AnswerSource::Model);
        assert_eq!(answer.text, "Rust and Go.");

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert!(calls[0][1]
            .content
            .contains("Question: What programming languages does he know?"));
        assert!(calls[0][1].content.contains("Skills: Rust, Go"));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_even_for_shortcuts() {
        let llm = Arc::new(ScriptedCompletion::without_credentials());
        let state = state_with(llm.clone(), None);

        let err = answer_question(&state, "github?").await.unwrap_err();
        assert!(matches!(err, AppError::MissingCredentials));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_mapped_and_not_logged() {
        let llm = Arc::new(ScriptedCompletion::failing("connection reset by peer"));
        let (log, mut rx) = ChannelChatLog::channel();
        let state = state_with(llm, Some(Arc::new(log)));

        let err = answer_question(&state, "Tell me about his projects")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("connection reset")));

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_upstream_failure_and_not_logged() {
        let llm = Arc::new(ScriptedCompletion::returning_body(r#"{"choices":[]}"#));
        let (log, mut rx) = ChannelChatLog::channel();
        let state = state_with(llm.clone(), Some(Arc::new(log)));

        let err = answer_question(&state, "Tell me about his projects")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(llm.calls().len(), 1);

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_model_and_shortcut_answers_are_logged() {
        let llm = Arc::new(ScriptedCompletion::answering("He built a chat app."));
        let (log, mut rx) = ChannelChatLog::channel();
        let state = state_with(llm, Some(Arc::new(log)));

        answer_question(&state, "Tell me about his projects").await.unwrap();
        answer_question(&state, "phone?").await.unwrap();

        let mut entries = Vec::new();
        for _ in 0..2 {
            let entry = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .unwrap()
                .unwrap();
            entries.push(entry);
        }
        entries.sort_by(|a, b| a.question.cmp(&b.question));
        assert_eq!(entries[0].question, "Tell me about his projects");
        assert_eq!(entries[0].answer, "He built a chat app.");
        assert_eq!(entries[1].question, "phone?");
        assert_eq!(entries[1].answer, "Phone: +91 93133 98556");
    }
}
