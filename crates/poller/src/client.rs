use std::time::Duration;

use serde_json::Value;

use sentinel_common::error::AppError;

/// HTTP client for the homework status API.
pub struct HomeworkClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HomeworkClient {
    pub fn new(endpoint: String, token: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Fetch every status update since `from_date` (Unix seconds).
    ///
    /// Returns the decoded body without interpreting it; shape checks are the
    /// validator's job. No retries here: the loop's fixed sleep is the only
    /// backoff.
    pub async fn fetch(&self, from_date: i64) -> Result<Value, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::ApiStatus {
                status: status.as_u16(),
                from_date,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| AppError::MalformedResponse(e.to_string()))
    }
}
