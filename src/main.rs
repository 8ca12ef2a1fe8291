//! hello-service HTTP server
//!
//! Binds the port given by `PORT` (default 8080) and serves until the
//! process is terminated.

use clap::Parser;
use hello_service::{
    app,
    cli::Cli,
    config::{Config, parse_port},
    handlers::AppState,
    telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    telemetry::init(&config.observability.log_level);

    if let Some(raw) = cli.port.as_deref()
        && parse_port(raw).is_none()
    {
        tracing::warn!(
            port = raw,
            fallback = config.server.port,
            "Ignoring unparsable port"
        );
    }

    let state = AppState::new()?;
    let app = app::router(state);

    let addr = config.socket_addr();
    tracing::info!("Starting hello-service on {}", addr);
    tracing::info!("Health check available at http://{}/healthz", addr);
    tracing::info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
