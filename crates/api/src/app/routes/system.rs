use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::{AppState, dto};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Pending notices, oldest first. Each notice is returned once.
pub async fn notices(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let notices = state.session.lock().await.take_notices();
    Json(dto::NoticesView { notices })
}
