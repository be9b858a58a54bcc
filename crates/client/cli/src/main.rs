//! Headless client entry point.
//!
//! Plays a scripted session: an autopilot takes the player's turns, descends
//! whenever it stands on the down stairs, and saves periodically.
mod autopilot;
mod config;
mod presentation;
mod script;

use anyhow::Result;
use config::CliConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    script::run(&config)
}

/// Logs to a per-session file; stdout is reserved for the transcript.
fn setup_logging(
    config: &CliConfig,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let session_log_dir = config.log_dir.join(&config.session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", config.session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}
