//! services/api/src/bin/api.rs

use api_lib::{
    adapters::JsonFileStore, build_router, config::Config, error::ApiError, seed,
    web::state::AppState, ApiDoc,
};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dairy_cms_core::ports::CollectionStore;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Prepare Storage & Seed First-Run Data ---
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    let store: Arc<dyn CollectionStore> = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    seed::run(&store).await?;
    info!("Data directory ready at {:?}", config.data_dir);

    // --- 3. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState::new(store, config.clone()));

    // The storefront and the admin panel are separate origins; the API is
    // public-read anyway, so CORS stays open like the system it replaces.
    let cors = CorsLayer::permissive();

    let api_router = build_router(app_state)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
