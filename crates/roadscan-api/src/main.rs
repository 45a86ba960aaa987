use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use roadscan_core::config::LayeredConfig;
use roadscan_report::ReportGenerator;
use roadscan_store::{snapshot, FileSnapshotStore, MemoryInspectionStore};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadscan_api::config::ApiConfig;
use roadscan_api::router::create_router;
use roadscan_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadscan_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = LayeredConfig::with_defaults().load_from_env();

    tracing::info!(
        port = api_config.port,
        data_dir = %config.data_dir.value,
        "Starting roadscan API server"
    );

    let store = Arc::new(MemoryInspectionStore::new());
    let durability = Arc::new(FileSnapshotStore::new(config.data_dir.value.clone()));

    // Reload whatever the durability layer has from previous runs
    snapshot::load(store.as_ref(), durability.as_ref()).await;

    let reports = ReportGenerator::new(
        store.clone(),
        config.inspector_name.value.clone(),
        config.organization.value.clone(),
    );

    let state = Arc::new(AppState::new(store, durability, reports));

    let cors = CorsLayer::new()
        .allow_origin(api_config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = format!("0.0.0.0:{}", api_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.unwrap();
}
