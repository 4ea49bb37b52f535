use axum::{
    Router,
    routing::{delete, get, post},
};

pub mod draft;
pub mod exports;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/draft", get(draft::get_draft))
        .route("/draft/updates", post(draft::apply_update))
        .route("/draft/items", post(draft::add_item))
        .route("/draft/items/:id", delete(draft::remove_item))
        .route("/draft/preview", get(draft::preview))
        .route("/draft/reset", post(draft::reset))
        .route("/exports/document", post(exports::export_document))
        .route("/exports/sheet", post(exports::export_sheet))
        .route("/notices", get(system::notices))
}
