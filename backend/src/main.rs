//! Backend entry-point: loads settings, installs tracing and serves the
//! users API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_backend::inbound::http::health::HealthState;
use users_backend::settings::AppSettings;

const DEFAULT_LOG_FILTER: &str = "info";

const ROUTES: [&str; 9] = [
    "POST /users",
    "GET /users",
    "GET /users/stats",
    "GET /users/{id}",
    "PUT /users/{id}",
    "DELETE /users/{id}",
    "GET /health",
    "GET /health/ready",
    "GET /health/live",
];

fn init_tracing(json_logs: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let result = if json_logs {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings =
        AppSettings::load().map_err(|e| std::io::Error::other(format!("invalid settings: {e}")))?;
    init_tracing(settings.json_logs);

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr))?;

    info!(%bind_addr, routes = ?ROUTES, "users API listening");
    server.await
}
