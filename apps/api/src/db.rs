use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::{debug, info, warn};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_CHATS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS chats (
        id          BIGSERIAL PRIMARY KEY,
        question    TEXT   NOT NULL,
        answer      TEXT   NOT NULL,
        "timestamp" BIGINT NOT NULL
    )
"#;

/// Creates the chat-log connection pool, or `None` when logging is disabled.
///
/// The pool connects lazily, so an unreachable server never blocks startup.
/// A database must be named either by `database_name` or in the URL path;
/// otherwise logging is disabled with a warning.
pub fn create_chat_log_pool(
    database_url: Option<&str>,
    database_name: Option<&str>,
) -> Option<PgPool> {
    let Some(url) = database_url else {
        info!("DATABASE_URL not set; chat logging disabled");
        return None;
    };

    match connect_options(url, database_name) {
        Ok(Some(options)) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .connect_lazy_with(options);
            info!("PostgreSQL chat log pool configured");
            Some(pool)
        }
        Ok(None) => {
            warn!(
                "DATABASE_URL does not name a database and DATABASE_NAME is not set. \
                 Database features will be disabled."
            );
            None
        }
        Err(e) => {
            warn!("Invalid DATABASE_URL ({e:#}); chat logging disabled");
            None
        }
    }
}

/// Resolves connection options, returning `Ok(None)` when no database name
/// can be determined.
fn connect_options(url: &str, database_name: Option<&str>) -> Result<Option<PgConnectOptions>> {
    let options = PgConnectOptions::from_str(url).context("could not parse connection URL")?;

    match database_name.or_else(|| database_from_url(url)) {
        Some(name) => Ok(Some(options.database(name))),
        None => Ok(None),
    }
}

/// The database segment of a `postgres://user@host:port/<db>?params` URL.
fn database_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    let name = path.split(['?', '#']).next().unwrap_or_default();
    (!name.is_empty()).then_some(name)
}

/// Creates the `chats` table if it is missing. Failures are logged and ignored;
/// inserts will simply fail and be swallowed until the table exists.
pub async fn ensure_chat_table(pool: &PgPool) {
    match sqlx::query(CREATE_CHATS_TABLE).execute(pool).await {
        Ok(_) => debug!("chats table ready"),
        Err(e) => warn!("Could not ensure chats table: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_from_url_reads_path_segment() {
        assert_eq!(
            database_from_url("postgres://user:pw@localhost:5432/portfolio"),
            Some("portfolio")
        );
        assert_eq!(
            database_from_url("postgres://localhost/portfolio?sslmode=disable"),
            Some("portfolio")
        );
    }

    #[test]
    fn test_database_from_url_without_path_is_none() {
        assert_eq!(database_from_url("postgres://localhost:5432"), None);
        assert_eq!(database_from_url("postgres://localhost:5432/"), None);
        assert_eq!(database_from_url("postgres://localhost/?sslmode=disable"), None);
    }

    #[test]
    fn test_explicit_name_enables_url_without_database() {
        let options = connect_options("postgres://localhost:5432", Some("explicit")).unwrap();
        assert!(options.is_some());
    }

    #[test]
    fn test_no_name_anywhere_disables_logging() {
        assert!(connect_options("postgres://localhost:5432", None)
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_missing_url_disables_pool() {
        assert!(create_chat_log_pool(None, Some("portfolio")).is_none());
    }

    #[tokio::test]
    async fn test_unparseable_url_disables_pool() {
        assert!(create_chat_log_pool(Some("not a url"), None).is_none());
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect_at_creation() {
        // Nothing listens on this port; creation must still succeed.
        let pool = create_chat_log_pool(Some("postgres://localhost:1/portfolio"), None);
        assert!(pool.is_some());
    }
}
