use thiserror::Error;

/// Failure of a single append call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint answered with a non-2xx status; `body` is its text.
    #[error("{body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The sheet URL has no `/spreadsheets/d/<id>` segment. No request was sent.
    #[error("invalid spreadsheet URL: {0}")]
    MalformedUrl(String),

    /// Appending line item `item` (1-based) failed; later items were skipped.
    #[error("spreadsheet append failed for item {item}: {source}")]
    Remote {
        item: usize,
        #[source]
        source: TransportError,
    },
}

impl ExportError {
    /// 1-based index of the line item that failed, when a request was made.
    pub fn failed_item(&self) -> Option<usize> {
        match self {
            ExportError::Remote { item, .. } => Some(*item),
            _ => None,
        }
    }
}
