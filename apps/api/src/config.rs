use anyhow::{Context, Result};

pub const DEFAULT_RESUME_PATH: &str = "../Yug Resume_tp.pdf";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_APP_TITLE: &str = "Yug Portfolio Chat";
const DEFAULT_PORT: u16 = 8000;

/// Origins always allowed by CORS, before `FRONTEND_ORIGINS` is appended.
pub const BASE_ALLOWED_ORIGINS: &[&str] = &["https://portfolio-virid-six-qe701qheol.vercel.app"];

/// Application configuration loaded from environment variables.
/// Everything is optional: a missing API key or database URL degrades the
/// affected feature instead of stopping startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub resume_path: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_url: String,
    pub app_url: String,
    pub app_title: String,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values are
    /// treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            resume_path: or_default("RESUME_PATH", DEFAULT_RESUME_PATH),
            database_url: var("DATABASE_URL"),
            database_name: var("DATABASE_NAME"),
            openrouter_api_key: var("OPENROUTER_API_KEY"),
            openrouter_model: or_default("OPENROUTER_MODEL", DEFAULT_MODEL),
            openrouter_url: or_default("OPENROUTER_URL", DEFAULT_OPENROUTER_URL),
            app_url: or_default("APP_URL", DEFAULT_APP_URL),
            app_title: or_default("APP_TITLE", DEFAULT_APP_TITLE),
            allowed_origins: allowed_origins(var("FRONTEND_ORIGINS").as_deref()),
            port,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

/// Fixed allow-list followed by the comma-separated extras, blanks dropped.
fn allowed_origins(extra: Option<&str>) -> Vec<String> {
    let mut origins: Vec<String> = BASE_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();
    if let Some(extra) = extra {
        origins.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from),
        );
    }
    origins
}
