use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

use api::{AppState, Repositories, create_router};
use catalog::{GoogleBooksClient, seed::seed_genres};
use common::{
    database::{StorageBackend, ensure_schema, health_check, init_pool},
    settings::Settings,
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    telemetry::init(&settings.log.filter);

    info!("Starting library API service");

    let (repositories, pool) = match settings.database.backend {
        StorageBackend::Postgres => {
            let pool = init_pool(&settings.database).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            ensure_schema(&pool).await?;
            (Repositories::postgres(&pool), Some(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            (Repositories::in_memory(), None)
        }
    };

    seed_genres(repositories.genres.as_ref()).await?;

    let client = GoogleBooksClient::new(
        settings.catalog.base_url.clone(),
        Duration::from_secs(settings.catalog.timeout_secs),
    )?;

    let state = AppState::new(repositories, Arc::new(client), &settings, pool);

    match state.credentials.sessions().cleanup_expired().await {
        Ok(removed) => info!(removed, "Expired sessions purged"),
        Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
    }

    let app = create_router(state);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
