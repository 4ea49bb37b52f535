//! `gstforge-render`: printable GST invoice documents.
//!
//! Rendering is split in two passes:
//! - `invoice` / `table`: a pure layout pass producing a paginated [`Document`]
//!   of positioned draw operations (millimetres, measured from the top-left).
//! - `pdf`: paints a [`Document`] into PDF bytes with `printpdf`.

pub mod error;
pub mod invoice;
pub mod layout;
pub mod pdf;
pub mod table;

pub use error::RenderError;
pub use invoice::{InvoiceDocumentInput, document_file_name, render_invoice};
pub use layout::{Align, DrawOp, Document, Page, Rgb, TextOp, Weight};
pub use pdf::to_pdf_bytes;
