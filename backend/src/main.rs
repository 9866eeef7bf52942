//! Cake manager entry-point: loads settings, prepares storage and serves the
//! REST API.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cake_manager::config::CakeManagerSettings;
use cake_manager::inbound::http::health::HealthState;
use cake_manager::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use cake_manager::server::{ServerConfig, create_server, drain_on};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CakeManagerSettings::load()
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let mut config = ServerConfig::new(settings.bind_addr(), settings.account_directory());

    if let Some(database_url) = settings.database_url() {
        let applied = run_pending_migrations(database_url)
            .await
            .wrap_err("failed to migrate database")?;
        info!(applied, "database schema up to date");

        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server =
        create_server(health_state.clone(), config).wrap_err("failed to start server")?;
    actix_web::rt::spawn(drain_on(health_state, shutdown_signal()));
    server.await.wrap_err("server terminated with an error")
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
