use serde::Serialize;

use gstforge_core::Entity;
use gstforge_invoicing::LineItem;
use gstforge_invoicing::format::{fixed2, plain};

use crate::exporter::SheetExport;

/// JSON body of one append call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendBody {
    pub values: Vec<String>,
}

/// Flat, self-contained row for one line item.
///
/// Invoice-level totals are repeated on every row so each remote row can be
/// read on its own. Column order:
/// invoice no, date, buyer name, address, GSTIN, state, state code,
/// item id, description, HSN, qty, rate, amount,
/// subtotal, CGST, SGST, IGST, grand total.
pub fn sheet_row(export: &SheetExport<'_>, item: &LineItem) -> Vec<String> {
    let buyer = export.buyer;
    let summary = export.summary;
    vec![
        export.invoice_number.to_string(),
        export.invoice_date.to_string(),
        buyer.name.clone(),
        buyer.address.clone(),
        buyer.gstin.clone(),
        buyer.state.clone(),
        buyer.state_code.clone(),
        item.id().to_string(),
        item.description().to_string(),
        item.hsn().to_string(),
        plain(item.quantity()),
        plain(item.rate()),
        plain(item.amount()),
        fixed2(summary.subtotal),
        fixed2(summary.tax.cgst),
        fixed2(summary.tax.sgst),
        fixed2(summary.tax.igst),
        fixed2(summary.grand_total),
    ]
}
