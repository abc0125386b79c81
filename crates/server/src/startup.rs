use std::sync::Arc;

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::{AppConfig, LogFormat, StoreBackend};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::{
    hasher::Argon2PasswordHasher,
    repo::{memory::InMemoryCredentialStore, seaorm::SeaOrmCredentialStore},
    repository::CredentialStore,
};
use service::tasks::{
    repo::{memory::InMemoryTaskStore, seaorm::SeaOrmTaskStore},
    repository::TaskStore,
};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the stores and hasher selected by configuration.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let hasher = Argon2PasswordHasher::from_config(&cfg.hashing)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let (accounts, tasks): (Arc<dyn CredentialStore>, Arc<dyn TaskStore>) = match cfg.store.backend {
        StoreBackend::Memory => {
            warn!("using in-memory stores; accounts and tasks are lost on restart");
            (Arc::new(InMemoryCredentialStore::new()), Arc::new(InMemoryTaskStore::new()))
        }
        StoreBackend::Database => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                models::db::migrate(&db).await?;
            }
            (Arc::new(SeaOrmCredentialStore::new(db.clone())), Arc::new(SeaOrmTaskStore::new(db)))
        }
    };

    Ok(ServerState::new(accounts, Arc::new(hasher), tasks))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = cfg.server.bind_addr()?;
    info!(%addr, backend = ?cfg.store.backend, "starting accounts server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
