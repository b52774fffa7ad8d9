//! Interaction Logger: best-effort persistence of answered questions.
//!
//! Writes happen on a detached task. A failed or slow write is logged at
//! debug level and dropped; it never reaches the HTTP response.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::models::chat::ChatLogEntry;

const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// A sink for Q&A pairs. Carried in `AppState` as `Option<Arc<dyn ChatLog>>`;
/// `None` means logging is disabled.
#[async_trait]
pub trait ChatLog: Send + Sync {
    async fn record(&self, entry: &ChatLogEntry) -> Result<()>;
}

/// Appends entries to the Postgres `chats` table.
pub struct PgChatLog {
    pool: PgPool,
}

impl PgChatLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatLog for PgChatLog {
    async fn record(&self, entry: &ChatLogEntry) -> Result<()> {
        sqlx::query(r#"INSERT INTO chats (question, answer, "timestamp") VALUES ($1, $2, $3)"#)
            .bind(&entry.question)
            .bind(&entry.answer)
            .bind(entry.timestamp)
            .execute(&self.pool)
            .await
            .context("failed to insert chat log entry")?;
        Ok(())
    }
}

/// Fire-and-forget write of `entry`. Returns immediately; errors and
/// timeouts are swallowed.
pub fn record_in_background(log: Option<Arc<dyn ChatLog>>, entry: ChatLogEntry) {
    let Some(log) = log else {
        return;
    };

    tokio::spawn(async move {
        match tokio::time::timeout(WRITE_TIMEOUT, log.record(&entry)).await {
            Ok(Ok(())) => debug!("chat log entry stored"),
            Ok(Err(e)) => debug!("chat log write failed: {e:#}"),
            Err(_) => debug!("chat log write timed out after {WRITE_TIMEOUT:?}"),
        }
    });
}
