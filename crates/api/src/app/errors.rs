use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gstforge_core::DomainError;
use gstforge_session::SessionError;
use gstforge_sheets::ExportError;

pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match &err {
        SessionError::Domain(DomainError::NotFound(_)) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        SessionError::Domain(DomainError::InvariantViolation(msg)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg.clone())
        }
        SessionError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg.clone())
        }
        SessionError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg.clone())
        }
        SessionError::Export(ExportError::MalformedUrl(_)) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_url", err.to_string())
        }
        SessionError::Export(ExportError::Remote { .. }) => {
            json_error(StatusCode::BAD_GATEWAY, "remote_error", err.to_string())
        }
        SessionError::Render(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "render_error", err.to_string())
        }
        SessionError::NotConfigured => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "not_configured", err.to_string())
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
