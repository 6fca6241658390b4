//! # Quill Blog Server
//!
//! Server-rendered blog on Actix-web: posts listed newest first, with
//! create, edit and delete through HTML forms.

use actix_files::Files;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod forms;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod views;

use config::{AppConfig, Environment};
use middleware::MethodOverride;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;
    if config.session_secret.is_none() && config.environment == Environment::Development {
        tracing::warn!("SESSION_SECRET not set; acceptable in development only");
    }

    tracing::info!(
        environment = config.environment.as_str(),
        public_dir = %config.public_dir.display(),
        "Starting Quill blog server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;
    let server_state = state.clone();
    let public_dir = config.public_dir.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            // Outermost, so request spans and ids see the logical verb.
            .wrap(MethodOverride)
            .app_data(web::Data::new(server_state.clone()))
            .configure(handlers::configure_routes)
            .service(Files::new("/", public_dir.clone()))
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .bind((config.host.as_str(), config.port))?
    .run();

    let handle = server.handle();
    actix_rt::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received, draining connections");
        handle.stop(true).await;
    });

    server.await?;

    state.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
