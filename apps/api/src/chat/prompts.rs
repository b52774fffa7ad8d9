// Prompt Assembler for résumé questions.
// The full résumé is inlined on every request; there is no truncation.

use crate::llm_client::ChatMessage;
use crate::resume::ResumeText;

/// System instruction: résumé-grounded answers, brief small talk allowed.
pub const RESUME_QA_SYSTEM: &str = "You are an assistant that answers questions strictly based on the provided resume. \
    For factual questions about the candidate (skills, projects, experience, education, certificates), \
    only use information contained in the resume. \
    If the answer is not contained in the resume, respond briefly with: 'I don't know based on the resume.' \
    If the user's message is a short polite greeting or remark \
    (for example: 'hi', 'hello', 'how are you', 'thank you'), respond briefly and politely (1-2 sentences). \
    Keep such small-talk responses friendly but short.";

/// Builds the `[system, user]` message pair for one question.
pub fn build_messages(resume: &ResumeText, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(RESUME_QA_SYSTEM),
        ChatMessage::user(render_user_prompt(resume.as_str(), question)),
    ]
}

fn render_user_prompt(resume: &str, question: &str) -> String {
    format!("Resume:\n{resume}\n\nQuestion: {question}")
}
