use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockforge_inventory::AppSettings;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

pub async fn get_settings(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.settings() {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_settings(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<AppSettings>,
) -> axum::response::Response {
    match services.update_settings(body) {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
