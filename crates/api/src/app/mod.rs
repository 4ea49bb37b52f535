//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response views of the draft
//! - `errors.rs`: consistent error responses

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use gstforge_session::InvoiceSession;
use gstforge_sheets::{HttpTransport, SheetsExporter};

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;

/// State shared by all handlers. The session is the single draft being
/// edited; handlers take turns on it.
pub struct AppState {
    pub session: Mutex<InvoiceSession>,
    pub exporter: Option<SheetsExporter<HttpTransport>>,
    pub output_dir: Option<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            session: Mutex::new(InvoiceSession::new(config.seller.clone())),
            exporter: config
                .sheets_endpoint
                .as_ref()
                .map(|endpoint| SheetsExporter::new(HttpTransport::new(endpoint.clone()))),
            output_dir: config.output_dir.clone(),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    if config.sheets_endpoint.is_none() {
        tracing::warn!("GSTFORGE_SHEETS_ENDPOINT not set; spreadsheet export is disabled");
    }
    build_app_with_state(Arc::new(AppState::from_config(config)))
}

pub fn build_app_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
}
