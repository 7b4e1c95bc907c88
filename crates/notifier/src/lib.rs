//! Telegram delivery for poll-loop notifications.
//!
//! A single-feature Bot API client: `sendMessage` to one fixed chat, nothing
//! else. The poll loop talks to it through `send_best_effort`, which logs
//! delivery failures and never propagates them.

use std::time::Duration;

use serde::Serialize;

use sentinel_common::error::AppError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Client for sending text messages to one chat via the Telegram Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str, timeout: Duration) -> Result<Self, AppError> {
        Self::with_base_url(TELEGRAM_API_BASE, token, chat_id, timeout)
    }

    /// Point the notifier at a non-default Bot API host (used by tests).
    pub fn with_base_url(
        base_url: &str,
        token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Send a text message to the configured chat.
    pub async fn send(&self, text: &str) -> Result<(), AppError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Notify(format!(
                "telegram API returned HTTP {}",
                response.status().as_u16()
            )));
        }

        tracing::info!(chat_id = %self.chat_id, "message delivered to chat");
        Ok(())
    }

    /// Send, logging any delivery failure instead of propagating it.
    ///
    /// A failed notification never disturbs the caller's control flow.
    pub async fn send_best_effort(&self, text: &str) {
        if let Err(e) = self.send(text).await {
            tracing::error!(error = %e, message = text, "failed to deliver message");
        }
    }
}
