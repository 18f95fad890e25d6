//! Chime Watcher
//!
//! Run with: cargo run --bin chime-watch
//!
//! Re-fetches the logged-in user's reminders on an interval and plays the
//! fulfillment cue once for every reminder that comes due. Log in first with
//! `chime login`; the watcher shares the stored session.
//!
//! # Configuration
//!
//! Same config file and environment variables as `chime`, in particular:
//! - `CHIME_POLL_INTERVAL`: Seconds between fetches (default: 30)
//! - `CHIME_NOTIFY_WINDOW`: Due window in seconds (default: 60)
//! - `CHIME_SOUND_PLAYER`: bell, command or silent (default: bell)
//! - `RUST_LOG`: Log filter (default: chime=info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use chime::api::HttpClient;
use chime::config::Config;
use chime::dashboard::ReminderController;
use chime::error::ClientError;
use chime::notify::build_player;
use chime::session::SessionStore;

#[derive(Parser)]
#[command(name = "chime-watch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play a cue when a reminder comes due")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reminder service URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }

    chime::telemetry::init(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting Chime watcher v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Reminder service: {}", config.api.base_url);
    tracing::info!("Session directory: {}", config.session.data_dir);

    let client = HttpClient::new(config.api.client_config())
        .context("Failed to build HTTP client")?;
    let controller = Arc::new(ReminderController::new(
        Arc::new(client),
        SessionStore::in_dir(&config.session.data_dir),
        build_player(&config.sound),
        config.notify.window(),
    ));

    let poll = config.notify.poll_interval();
    tracing::info!(
        poll_secs = poll.as_secs(),
        window_secs = config.notify.window_secs,
        "Watching reminders"
    );

    tokio::select! {
        _ = watch(controller, poll) => {},
        _ = shutdown_signal() => {},
    }

    tracing::info!("Chime watcher stopped");
    Ok(())
}

async fn watch(controller: Arc<ReminderController>, poll: std::time::Duration) {
    let mut ticker = tokio::time::interval(poll);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match controller.refresh().await {
            Ok(()) => {
                let state = controller.state();
                tracing::debug!(
                    count = state.reminders.len(),
                    user = ?state.user_name,
                    "Poll complete"
                );
            }
            Err(ClientError::MissingSession(_)) => {
                tracing::warn!("Not logged in; run `chime login` to start watching");
            }
            Err(e) => {
                tracing::error!(error = %e, "Poll failed");
            }
        }
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
