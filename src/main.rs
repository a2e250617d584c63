//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.

use http11_server::config::Config;
use http11_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http11_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuración desde CLI o env
    let config = Config::new();

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    }
    config.log_summary();

    let mut server = Server::new(config);

    // Esto bloquea el thread
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "Fatal server error");
        std::process::exit(1);
    }
}
