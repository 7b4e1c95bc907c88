use std::time::Duration;

use chrono::Utc;

use sentinel_common::{config::AppConfig, error::AppError};
use sentinel_notifier::TelegramNotifier;
use sentinel_poller::client::HomeworkClient;
use sentinel_poller::poller::StatusPoller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_poller=info,sentinel_statuses=debug".into()),
        )
        .init();

    tracing::info!("Homework Sentinel starting...");

    // Load configuration; a missing credential is fatal, announced once.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Required configuration is missing, refusing to start");
            notify_startup_failure(&e).await;
            std::process::exit(1);
        }
    };

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let client = HomeworkClient::new(
        config.practicum_endpoint.clone(),
        config.practicum_token.clone(),
        timeout,
    )?;
    let notifier = TelegramNotifier::new(&config.telegram_token, &config.telegram_chat_id, timeout)?;

    let mut poller = StatusPoller::new(
        client,
        notifier,
        Duration::from_secs(config.poll_interval_secs),
        Utc::now().timestamp(),
    );

    tracing::info!(endpoint = %config.practicum_endpoint, "Starting status poller");

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = poller.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Status poller exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Homework Sentinel stopped.");
    Ok(())
}

/// One best-effort chat notification about a fatal startup problem, built
/// straight from the raw environment since config loading already failed.
/// Skipped silently when the bot credentials themselves are unusable.
async fn notify_startup_failure(error: &AppError) {
    let (Ok(token), Ok(chat_id)) = (
        std::env::var("TELEGRAM_TOKEN"),
        std::env::var("TELEGRAM_CHAT_ID"),
    ) else {
        return;
    };
    if token.trim().is_empty() || chat_id.trim().is_empty() {
        return;
    }

    let Ok(notifier) = TelegramNotifier::new(&token, &chat_id, Duration::from_secs(10)) else {
        return;
    };
    notifier
        .send_best_effort(&format!("Сбой в работе программы: {error}"))
        .await;
}
