use std::time::Duration;

use sentinel_common::error::AppError;
use sentinel_notifier::TelegramNotifier;
use sentinel_statuses::{format::render_status_change, validate::check_response};

use crate::client::HomeworkClient;

/// Outcome of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A review-status change was detected and reported to the chat.
    StatusChange(String),
    /// The API returned no new records.
    NoChange,
}

/// Poller that repeatedly asks the homework API for updates and forwards
/// detected status changes to the chat.
pub struct StatusPoller {
    client: HomeworkClient,
    notifier: TelegramNotifier,
    poll_interval: Duration,
    /// Unix-seconds cursor: the API returns records updated since this point.
    /// Owned exclusively by the loop.
    from_date: i64,
}

impl StatusPoller {
    pub fn new(
        client: HomeworkClient,
        notifier: TelegramNotifier,
        poll_interval: Duration,
        from_date: i64,
    ) -> Self {
        Self {
            client,
            notifier,
            poll_interval,
            from_date,
        }
    }

    /// The current poll cursor.
    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Start the polling loop. Runs indefinitely until the task is cancelled.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            from_date = self.from_date,
            "Status poller started"
        );

        loop {
            match self.poll_once().await {
                Ok(CycleOutcome::StatusChange(message)) => {
                    tracing::info!(message = %message, "Status change reported");
                }
                Ok(CycleOutcome::NoChange) => {}
                Err(e) => self.report_failure(&e).await,
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Run one poll cycle: fetch, validate, and report the newest record.
    ///
    /// The cursor advances only after a change has been reported; any failure
    /// leaves it untouched so the next cycle retries the same window.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, AppError> {
        let raw = self.client.fetch(self.from_date).await?;
        let page = check_response(&raw)?;

        let Some(latest) = page.homeworks.first() else {
            tracing::debug!(from_date = self.from_date, "No status change");
            return Ok(CycleOutcome::NoChange);
        };

        // The API orders records newest first; only the newest is reported.
        let message = render_status_change(latest)?;
        self.notifier.send_best_effort(&message).await;
        self.from_date = page.current_date;

        Ok(CycleOutcome::StatusChange(message))
    }

    /// Loop-level error path: log with variant-appropriate severity, then
    /// tell the chat about the failure. A delivery error in here is swallowed
    /// by `send_best_effort`; this path never ends the process.
    pub async fn report_failure(&self, error: &AppError) {
        if error.is_transient() {
            tracing::warn!(error = %error, "Poll cycle failed, will retry after sleep");
        } else {
            tracing::error!(error = %error, "Poll cycle failed, will retry after sleep");
        }

        self.notifier
            .send_best_effort(&format!("Сбой в работе программы: {error}"))
            .await;
    }
}
