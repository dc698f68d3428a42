use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/usage", get(usage_report))
}

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    range: Option<String>,
}

pub async fn usage_report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ReportParams>,
) -> axum::response::Response {
    let since = match params.range.as_deref().unwrap_or("7d") {
        "7d" => Some(Utc::now() - Duration::days(7)),
        "30d" => Some(Utc::now() - Duration::days(30)),
        "all" => None,
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_range",
                "range must be one of: 7d, 30d, all",
            );
        }
    };

    match services.usage_report(since) {
        Ok(totals) => (StatusCode::OK, Json(totals)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
