//! Forum server entry point.
//!
//! Pure startup glue: parse flags, load configuration, initialize
//! observability, compose rate limiter ∘ router, load TLS material, serve.
//! Every failure here is fatal and reported once; nothing below this file
//! branches on startup state.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use forum_server::config;
use forum_server::error::ServerError;
use forum_server::http::HttpServer;
use forum_server::lifecycle::{self, Shutdown};
use forum_server::observability::{logging, metrics};
use forum_server::routing::HandlerSet;

#[derive(Parser, Debug)]
#[command(name = "forum-server")]
#[command(about = "TLS bootstrap and admission-controlled routing for the forum")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::load_or_default(&args.config).map_err(ServerError::Config)?;
    logging::init(&config.observability);

    tracing::info!("forum-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Handler wiring point: the forum application's page, auth, post,
    // comment and moderation handlers plug in here. Until they land, every
    // named route answers 501 while the table keeps its final shape.
    let handlers = HandlerSet::uniform(axum::routing::any(unimplemented_route));

    let shutdown = Arc::new(Shutdown::new());
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config, handlers);
    if let Err(e) = server.run(&shutdown).await {
        tracing::error!(error = %e, "Server failed to start");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn unimplemented_route() -> axum::http::StatusCode {
    axum::http::StatusCode::NOT_IMPLEMENTED
}
