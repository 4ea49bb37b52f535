//! `gstforge-session`
//!
//! **Responsibility:** the in-memory form state behind the invoice page.
//!
//! This crate provides:
//! - The single mutable [`InvoiceSession`] holding the draft being composed
//! - Typed update dispatch onto the draft
//! - Document and spreadsheet export actions with required-field checks
//! - A short log of user-facing notices (success/error toasts)
//!
//! Nothing here is persisted; a session is discarded when the user leaves.

pub mod error;
pub mod notice;
pub mod session;

pub use error::SessionError;
pub use notice::{Notice, NoticeLevel};
pub use session::{DraftPreview, InvoiceSession, PendingSheetExport, RenderedInvoice};
