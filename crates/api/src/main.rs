use std::sync::Arc;

use stockforge_api::app;
use stockforge_api::config::AppConfig;
use stockforge_store::JsonFileStore;

#[tokio::main]
async fn main() {
    stockforge_observability::init();

    let config = AppConfig::from_env();

    let store = Arc::new(JsonFileStore::new(&config.data_path));
    let sender = stockforge_alerts::sender_from_env();
    let services = Arc::new(app::services::AppServices::new(store, sender));

    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.unwrap();
}
