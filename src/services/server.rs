use anyhow::{Context, Result};
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool};
use crate::documents::DocumentStore;

pub struct ServerService {
    config: AppConfig,
}

impl ServerService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let pool = self.prepare_database()?;
        let documents = DocumentStore::new(&self.config.documents.path)?;

        let state = Arc::new(AppState::new(pool, Arc::new(documents), &self.config));
        let app = create_router(state).layer(cors_layer());

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("Server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Dropping the router drops the last pool handle and closes its connections.
        info!("Server stopped");
        Ok(())
    }

    /// Startup fails unless the primary store answers the probe.
    fn prepare_database(&self) -> Result<DbPool> {
        let settings = &self.config.database;
        let pool = database::create_pool(settings)
            .with_context(|| format!("Cannot open database at {}", settings.path))?;

        database::setup::apply_schema(&mut database::get_connection(&pool)?)?;
        database::check_connectivity(&pool).context("Database connectivity check failed")?;

        info!(
            "Connected to database {} (pool size {})",
            settings.path, settings.pool_size
        );
        Ok(pool)
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections");
}
