use chrono::NaiveDate;
use serde::Serialize;

use gstforge_core::{AggregateRoot, LineItemId};
use gstforge_invoicing::{InvoiceDraft, InvoiceSummary, LineItem, PartyDetails};
use gstforge_session::Notice;

// -------------------------
// Response DTOs
// -------------------------

/// JSON view of the draft. The credential itself is never included.
#[derive(Debug, Serialize)]
pub struct DraftView<'a> {
    pub version: u64,
    pub invoice_number: &'a str,
    pub invoice_date: NaiveDate,
    pub seller: &'a PartyDetails,
    pub buyer: &'a PartyDetails,
    pub items: &'a [LineItem],
    pub next_item_id: Option<LineItemId>,
    pub sheet_url: &'a str,
    pub has_credential: bool,
    pub summary: InvoiceSummary,
}

impl<'a> From<&'a InvoiceDraft> for DraftView<'a> {
    fn from(draft: &'a InvoiceDraft) -> Self {
        Self {
            version: draft.version(),
            invoice_number: draft.invoice_number(),
            invoice_date: draft.invoice_date(),
            seller: draft.seller(),
            buyer: draft.buyer(),
            items: draft.items(),
            next_item_id: draft.next_item_id().ok(),
            sheet_url: &draft.export_settings().sheet_url,
            has_credential: draft.export_settings().has_credential(),
            summary: draft.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoticesView {
    pub notices: Vec<Notice>,
}
