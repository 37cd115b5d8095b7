pub mod dictionary;
pub mod hello;
pub mod simplify;

use axum::{http::StatusCode, Json};

use crate::server::serializers::{ApiError, ApiMessage};

// ---------- small helpers ----------
fn bad(msg: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: msg.into() }))
}

fn internal(msg: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError { error: msg.into() }),
    )
}

fn message(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<ApiMessage>) {
    (status, Json(ApiMessage { message: msg.into() }))
}
