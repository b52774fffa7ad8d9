// Résumé Q&A: shortcut answers, prompt assembly, the request pipeline and the
// best-effort interaction log. All upstream calls go through llm_client.

pub mod chat_log;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod shortcuts;
