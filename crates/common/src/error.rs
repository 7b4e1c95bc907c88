use thiserror::Error;

/// Common error types used across the application.
///
/// The poll loop matches on variants to pick log severity and message
/// content, so every failure mode gets its own tag instead of a catch-all.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("homework API returned HTTP {status} (from_date={from_date})")]
    ApiStatus { status: u16, from_date: i64 },

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("API response is not a JSON object")]
    NotAnObject,

    #[error("API response is missing the `{0}` field")]
    ResponseFieldMissing(&'static str),

    #[error("API response field `{0}` is not {1}")]
    ResponseFieldType(&'static str, &'static str),

    #[error("homework record is missing the `{0}` field")]
    HomeworkFieldMissing(&'static str),

    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),

    #[error("notification delivery failed: {0}")]
    Notify(String),
}

impl AppError {
    /// Whether this failure is an expected upstream hiccup (logged at warn)
    /// rather than a contract violation (logged at error).
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Transport(_) | AppError::ApiStatus { .. })
    }
}
