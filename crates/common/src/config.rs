use crate::error::AppError;

/// Production homework status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token for the homework review API
    pub practicum_token: String,

    /// Telegram bot token used for notification delivery
    pub telegram_token: String,

    /// Destination chat identifier
    pub telegram_chat_id: String,

    /// Homework status endpoint (default: the production Practicum URL)
    pub practicum_endpoint: String,

    /// Seconds between polls (default: 600)
    pub poll_interval_secs: u64,

    /// Timeout for outbound HTTP calls in seconds (default: 30; must stay
    /// well under the poll interval)
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// The three credential variables are mandatory; a missing or blank value
    /// is a fatal startup condition.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            practicum_token: required_var("PRACTICUM_TOKEN")?,
            telegram_token: required_var("TELEGRAM_TOKEN")?,
            telegram_chat_id: required_var("TELEGRAM_CHAT_ID")?,
            practicum_endpoint: std::env::var("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            poll_interval_secs: parsed_var("POLL_INTERVAL_SECS", 600)?,
            http_timeout_secs: parsed_var("HTTP_TIMEOUT_SECS", 30)?,
        })
    }
}

fn required_var(key: &str) -> Result<String, AppError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "{key} environment variable is required"
        ))),
    }
}

fn parsed_var(key: &str, default: u64) -> Result<u64, AppError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} must be a valid u64"))),
        Err(_) => Ok(default),
    }
}
