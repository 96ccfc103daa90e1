//! Backend entry-point: loads settings, prepares the lesson store, and serves
//! the REST endpoints and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lesson_backend::inbound::http::health::HealthState;
use lesson_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    let (host, port) = settings.bind_address();
    info!(%host, port, "lesson backend listening");
    server.await
}

async fn build_server_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_address());
    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}
