use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use stockforge_core::ItemId;
use stockforge_inventory::{NewStockItem, StockItemPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/export", get(export_csv))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_items() {
        Ok(items) => {
            let body: Vec<_> = items.iter().map(dto::item_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewStockItem>,
) -> axum::response::Response {
    match services.create_item(body).await {
        Ok(item) => (StatusCode::CREATED, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id");
        }
    };

    match services.get_item(id) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<StockItemPatch>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id");
        }
    };

    match services.update_item(id, body).await {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid item id");
        }
    };

    match services.delete_item(id) {
        Ok(true) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": true })),
        )
            .into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn export_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.export_stock_csv() {
        Ok(body) => {
            let filename = format!(
                "attachment; filename=\"stockforge_inventory_{}.csv\"",
                Utc::now().format("%Y-%m-%d")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, filename),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
