//! `gstforge-sheets`: appends invoice rows to a remote spreadsheet.
//!
//! Contract: one `POST` per line item to a spreadsheet script endpoint,
//! `Content-Type: text/plain`, body `{"values": [<18 strings>]}`, with the
//! spreadsheet id and access key passed as query parameters. Requests are
//! sequential; the first failure stops the export and nothing already written
//! is rolled back.

pub mod error;
pub mod exporter;
pub mod row;
pub mod spreadsheet_id;
pub mod transport;

pub use error::{ExportError, TransportError};
pub use exporter::{ExportReport, SheetExport, SheetsExporter};
pub use row::{AppendBody, sheet_row};
pub use spreadsheet_id::SpreadsheetId;
pub use transport::{AppendRequest, HttpTransport, SheetsTransport};
