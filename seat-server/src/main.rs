use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use seat_server::config::ServerConfig;
use seat_server::directory::MemoryDirectory;
use seat_server::directory::seed::{demo_seed, load_seed};
use seat_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seat_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let directory = match &config.data_path {
        Some(path) => match load_seed(path) {
            Ok(directory) => directory,
            Err(e) => {
                error!("failed to load seed data: {e}");
                std::process::exit(1);
            }
        },
        None if config.demo_seed => {
            let today = Local::now().date_naive();
            match MemoryDirectory::from_seed(demo_seed(today)) {
                Ok(directory) => directory,
                Err(e) => {
                    error!("failed to build demo network: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => MemoryDirectory::new(),
    };

    let state = AppState::new(directory, config.availability.clone());
    let app = create_router(state);

    info!("Seat booking server listening on http://{}", config.addr);
    info!("API Endpoints:");
    info!("  GET  /health");
    info!("  GET  /api/v1/stations");
    info!("  GET  /api/v1/trips/scheduled");
    info!("  GET  /api/v1/trips/available-seats");
    info!("  GET  /api/v1/trips/:id/seats/:seat_id/availability");
    info!("  POST /api/v1/bookings");

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.addr);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutting down");
}
