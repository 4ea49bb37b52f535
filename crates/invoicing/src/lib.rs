//! Invoicing domain module.
//!
//! This crate contains the business rules of a GST invoice draft: line items,
//! seller/buyer details, totals and the CGST/SGST vs IGST split. It is purely
//! deterministic domain logic (no IO, no HTTP, no rendering).

pub mod draft;
pub mod format;
pub mod line_item;
pub mod party;
pub mod tax;
pub mod totals;

pub use draft::{Credential, DraftUpdate, ExportSettings, InvoiceDraft, REQUIRED_FIELDS_MESSAGE};
pub use line_item::LineItem;
pub use party::{PartyDetails, PartyField};
pub use tax::{CGST_RATE, IGST_RATE, SGST_RATE, TaxBreakdown, TaxRegime, calculate_tax, round_half_up};
pub use totals::{InvoiceSummary, subtotal};
