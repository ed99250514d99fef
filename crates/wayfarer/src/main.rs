//! Runs the travel assistant service.

#[macro_use]
extern crate tracing;

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use wayfarer::{AppState, Config, router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials are checked once, here. A missing one aborts startup.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    debug!("loaded config: {config:?}");

    let app = router(AppState::from_config(&config));
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {}: {err}", config.bind_addr);
            return ExitCode::FAILURE;
        }
    };
    info!("listening on {}", config.bind_addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("error waiting for ctrl-c: {err}");
    }
    info!("shutting down");
}
