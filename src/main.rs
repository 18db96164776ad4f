/*
 * CLI entrypoint driving the response generator's cache-build flow.
 * There is no HTTP router here - mounting one is the transport's job,
 * out of scope for this crate (see SPEC_FULL.md §1).
 */

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachewire::persistence::fake::InMemoryPersistence;
use cachewire::{AppState, Config};

#[derive(Parser)]
#[command(name = "cachewire", version = cachewire::VERSION, about = "Response generator cache builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single `generate_caches` sweep and exit.
    ServeOnce,
    /// Run the periodic daily cache-build loop until interrupted.
    Daemon {
        /// How often to check whether a day has elapsed, in seconds.
        #[arg(long, default_value_t = 3600)]
        poll_interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting cachewire {} ({})", cachewire::VERSION, cachewire::GIT_COMMIT);

    let config = Config::from_env()?;
    // The persistence layer is an external collaborator out of scope for
    // this crate; wiring a real database behind `Persistence` is the
    // consuming application's job. This in-memory fake keeps the CLI
    // runnable standalone.
    let persistence = Arc::new(InMemoryPersistence::new());
    let state = AppState::new(config, persistence);

    let cli = Cli::parse();
    match cli.command {
        Command::ServeOnce => {
            state.orchestrator.generate_caches().await;
            info!("cache sweep complete");
        }
        Command::Daemon { poll_interval_secs } => {
            run_daemon(state, Duration::from_secs(poll_interval_secs)).await;
        }
    }

    Ok(())
}

async fn run_daemon(state: AppState, poll_interval: Duration) {
    info!("daemon loop starting, polling every {:?}", poll_interval);
    let mut interval = tokio::time::interval(poll_interval);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                state.orchestrator.generate_caches().await;
            }
            _ = shutdown_signal() => {
                info!("shutdown signal received, stopping daemon loop");
                break;
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("received termination signal");
}
