use anyhow::{Context, Result};
use axum::Router;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::database::{self, DbPool};
use crate::services::ingestion::IngestionService;
use crate::services::ranking::RankingService;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        info!("=== Starting Server ===");

        let pool = database::create_pool(&self.config.database_path)?;
        database::setup::ensure_schema(&mut database::get_connection(&pool)?)?;
        info!("  → Database ready at {}", self.config.database_path);

        let app = build_app(pool, self.config.clone())?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Router with shared state, request tracing and permissive CORS
pub fn build_app(pool: DbPool, config: AppConfig) -> Result<Router> {
    let state = Arc::new(AppState {
        ranking: RankingService::new(pool.clone(), config.clone())?,
        ingestion: IngestionService::new(pool, config),
    });

    Ok(create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    ))
}
