use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockforge_core::{DomainError, FieldErrors};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => validation_response(errors),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InsufficientStock(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", msg)
        }
        DomainError::Persistence(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn validation_response(errors: FieldErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": errors.to_string(),
            "errors": errors,
        })),
    )
        .into_response()
}
