use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockforge_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/logs", get(list_logs).post(log_usage))
}

pub async fn list_logs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_logs() {
        Ok(logs) => {
            let body: Vec<_> = logs.iter().map(dto::log_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn log_usage(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LogUsageRequest>,
) -> axum::response::Response {
    if body.item_id.trim().is_empty() {
        return errors::domain_error_to_response(
            stockforge_core::DomainError::validation("itemId", "You must select an item"),
        );
    }
    let item_id: ItemId = match body.item_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id");
        }
    };

    match services.log_usage(body.into_usage_request(item_id)).await {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "log": dto::log_to_json(&outcome.log),
                "item": dto::item_to_json(&outcome.item),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
