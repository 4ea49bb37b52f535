use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::app::{AppState, errors};

/// Render the draft and return it as a PDF download.
pub async fn export_document(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let rendered = {
        let mut session = state.session.lock().await;
        match session.export_document() {
            Ok(v) => v,
            Err(e) => return errors::session_error_to_response(e),
        }
    };

    if let Some(dir) = &state.output_dir {
        match rendered.save_to(dir) {
            Ok(path) => tracing::info!(path = %path.display(), "invoice document saved"),
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "failed to save invoice document"),
        }
    }

    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response()
}

/// Append the draft's items to the spreadsheet named in its export settings.
///
/// The session lock is only held to snapshot the draft and to record the
/// outcome; the form stays editable while requests are in flight.
pub async fn export_sheet(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let pending = match state.session.lock().await.begin_sheet_export() {
        Ok(v) => v,
        Err(e) => return errors::session_error_to_response(e),
    };

    let outcome = pending.run(state.exporter.as_ref()).await;

    match state.session.lock().await.finish_sheet_export(outcome) {
        Ok(report) => Json(report).into_response(),
        Err(e) => errors::session_error_to_response(e),
    }
}
