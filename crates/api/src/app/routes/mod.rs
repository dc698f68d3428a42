use axum::Router;

pub mod reports;
pub mod settings;
pub mod stock;
pub mod system;
pub mod usage;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/stock", stock::router())
        .nest("/usage", usage::router())
        .nest("/reports", reports::router())
        .merge(settings::router())
}
