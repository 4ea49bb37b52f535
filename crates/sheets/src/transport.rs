//! The network seam of the exporter.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use gstforge_invoicing::Credential;

use crate::error::TransportError;
use crate::row::AppendBody;
use crate::spreadsheet_id::SpreadsheetId;

/// One append call, for the line item at `item` (1-based).
#[derive(Debug, Clone)]
pub struct AppendRequest<'a> {
    pub spreadsheet_id: &'a SpreadsheetId,
    pub credential: &'a Credential,
    pub item: usize,
    pub body: AppendBody,
}

/// Sends a single append request and waits for its outcome.
#[async_trait]
pub trait SheetsTransport: Send + Sync {
    async fn append_row(&self, request: &AppendRequest<'_>) -> Result<(), TransportError>;
}

/// `reqwest`-backed transport posting to a spreadsheet script endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SheetsTransport for HttpTransport {
    async fn append_row(&self, request: &AppendRequest<'_>) -> Result<(), TransportError> {
        // The script endpoint expects a simple (non-preflighted) request, so
        // the JSON travels as text/plain.
        let body = serde_json::to_string(&request.body)
            .map_err(|e| TransportError::Network(format!("failed to encode body: {e}")))?;

        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("spreadsheetId", request.spreadsheet_id.as_str()),
                ("key", request.credential.expose()),
            ])
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: error_message(status, resp.text().await),
            });
        }

        let text = resp.text().await.unwrap_or_default();
        tracing::debug!(item = request.item, response = %text, "row appended");
        Ok(())
    }
}

/// Text for a failed call: the response body, or the status line when the
/// body is empty or cannot be read.
fn error_message<E>(status: reqwest::StatusCode, body: Result<String, E>) -> String {
    match body {
        Ok(text) if !text.trim().is_empty() => text,
        _ => format!("HTTP {status}"),
    }
}
