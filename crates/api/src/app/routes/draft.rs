use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
};

use gstforge_core::LineItemId;
use gstforge_invoicing::DraftUpdate;

use crate::app::{AppState, dto, errors};

pub async fn get_draft(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let session = state.session.lock().await;
    Json(dto::DraftView::from(session.draft())).into_response()
}

pub async fn apply_update(
    Extension(state): Extension<Arc<AppState>>,
    Json(update): Json<DraftUpdate>,
) -> axum::response::Response {
    let mut session = state.session.lock().await;
    match session.apply(update) {
        Ok(draft) => Json(dto::DraftView::from(draft)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn add_item(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let mut session = state.session.lock().await;
    match session.apply(DraftUpdate::AddItem) {
        Ok(draft) => (StatusCode::CREATED, Json(dto::DraftView::from(draft))).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

/// Removing the only remaining item (or an unknown one) leaves the list as is.
pub async fn remove_item(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LineItemId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid line item id"),
    };

    let mut session = state.session.lock().await;
    match session.apply(DraftUpdate::RemoveItem { id }) {
        Ok(draft) => Json(dto::DraftView::from(draft)).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}

pub async fn preview(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(state.session.lock().await.preview())
}

pub async fn reset(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let mut session = state.session.lock().await;
    session.reset();
    Json(dto::DraftView::from(session.draft())).into_response()
}
