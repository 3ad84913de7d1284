use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub(super) fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "unauthorized")
}

pub(super) fn forbidden(msg: &str) -> Response {
    error_response(StatusCode::FORBIDDEN, msg)
}

pub(super) fn unavailable(msg: &str) -> Response {
    error_response(StatusCode::SERVICE_UNAVAILABLE, msg)
}

pub(super) fn bad_request(msg: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn not_found(msg: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, msg)
}

// Drive wraps errors as {"error": {"code": .., "message": ..}}.
fn error_response(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": {"code": status.as_u16(), "message": msg}
        })),
    )
        .into_response()
}
