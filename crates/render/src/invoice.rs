//! Layout of the printed tax invoice.

use chrono::NaiveDate;

use gstforge_invoicing::format::{fixed2, plain};
use gstforge_invoicing::{InvoiceDraft, InvoiceSummary, LineItem, PartyDetails, TaxRegime};

use crate::layout::{Align, Document, MARGIN_MM, PAGE_HEIGHT_MM, Rgb};
use crate::table::{Column, Table, TableEnd};

const TITLE: &str = "TAX INVOICE";
const LEFT_X: f32 = 20.0;
const BOX_X: f32 = 140.0;
const BOX_TEXT_X: f32 = 142.0;
const BOX_WIDTH: f32 = 65.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_X: f32 = 14.0;
const TABLE_START_Y: f32 = 110.0;
/// Vertical space used by the totals, notes and signature lines.
const SUMMARY_HEIGHT: f32 = 72.0;

const ITEM_COLUMNS: [Column; 6] = [
    Column { header: "Sr. no.", width: 16.0, align: Align::Left },
    Column { header: "Particulars", width: 70.0, align: Align::Left },
    Column { header: "HSN", width: 24.0, align: Align::Left },
    Column { header: "Qty", width: 20.0, align: Align::Right },
    Column { header: "Rate", width: 24.0, align: Align::Right },
    Column { header: "Amount", width: 28.0, align: Align::Right },
];

/// Everything the printed invoice shows.
///
/// The caller is responsible for refusing to render a draft without an
/// invoice number or buyer name.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceDocumentInput<'a> {
    pub invoice_number: &'a str,
    pub invoice_date: NaiveDate,
    pub seller: &'a PartyDetails,
    pub buyer: &'a PartyDetails,
    pub items: &'a [LineItem],
    pub summary: &'a InvoiceSummary,
}

impl<'a> InvoiceDocumentInput<'a> {
    pub fn from_draft(draft: &'a InvoiceDraft, summary: &'a InvoiceSummary) -> Self {
        Self {
            invoice_number: draft.invoice_number(),
            invoice_date: draft.invoice_date(),
            seller: draft.seller(),
            buyer: draft.buyer(),
            items: draft.items(),
            summary,
        }
    }
}

/// `Invoice-<number>.pdf`, with characters unsafe in file names replaced.
pub fn document_file_name(invoice_number: &str) -> String {
    let safe: String = invoice_number
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("Invoice-{safe}.pdf")
}

pub fn render_invoice(input: &InvoiceDocumentInput<'_>) -> Document {
    let mut doc = Document::new(format!("{TITLE} {}", input.invoice_number));

    draw_header(&mut doc, input);

    let table = Table {
        x: TABLE_X,
        columns: &ITEM_COLUMNS,
        rows: input
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                vec![
                    (idx + 1).to_string(),
                    item.description().to_string(),
                    item.hsn().to_string(),
                    plain(item.quantity()),
                    plain(item.rate()),
                    fixed2(item.amount()),
                ]
            })
            .collect(),
    };
    let end = table.draw(&mut doc, 0, TABLE_START_Y);

    draw_summary(&mut doc, input, end);

    tracing::debug!(
        invoice_number = input.invoice_number,
        items = input.items.len(),
        pages = doc.page_count(),
        "invoice laid out"
    );
    doc
}

fn draw_header(doc: &mut Document, input: &InvoiceDocumentInput<'_>) {
    let seller = input.seller;
    let buyer = input.buyer;
    let page = doc.page_mut(0);

    page.text(105.0, 20.0, 20.0, TITLE)
        .align(Align::Center)
        .bold()
        .color(Rgb::BRAND_BLUE);
    page.text(LEFT_X, 35.0, 16.0, &seller.name).bold().color(Rgb::BRAND_BLUE);
    page.text(LEFT_X, 42.0, BODY_SIZE, &seller.address);
    page.text(LEFT_X, 48.0, BODY_SIZE, format!("GSTIN: {}", seller.gstin));

    page.stroke_rect(BOX_X, 25.0, BOX_WIDTH, 35.0);
    page.text(BOX_TEXT_X, 32.0, BODY_SIZE, format!("Invoice No.: {}", input.invoice_number));
    page.text(BOX_TEXT_X, 38.0, BODY_SIZE, format!("State: {}", seller.state));
    page.text(BOX_TEXT_X, 44.0, BODY_SIZE, format!("Code: {}", seller.state_code));
    page.text(BOX_TEXT_X, 50.0, BODY_SIZE, format!("Date: {}", input.invoice_date));
    page.text(BOX_TEXT_X, 56.0, BODY_SIZE, "Vehicle No.: ");

    let buyer_state = buyer.state.to_uppercase();
    page.stroke_rect(BOX_X, 65.0, BOX_WIDTH, 20.0);
    page.text(BOX_TEXT_X, 72.0, BODY_SIZE, format!("GST No.: {}", buyer.gstin));
    page.text(BOX_TEXT_X, 78.0, BODY_SIZE, format!("STATE: {buyer_state}"));
    page.text(BOX_TEXT_X, 84.0, BODY_SIZE, format!("CODE: {}", buyer.state_code));

    page.text(LEFT_X, 70.0, BODY_SIZE, "Details of Receiver Billed to:").bold();
    page.text(LEFT_X, 77.0, BODY_SIZE, format!("Name: {}", buyer.name));
    page.text(LEFT_X, 84.0, BODY_SIZE, format!("Address: {}", buyer.address));
    page.text(LEFT_X, 91.0, BODY_SIZE, format!("GSTIN: {}", buyer.gstin));
    page.text(
        LEFT_X,
        98.0,
        BODY_SIZE,
        format!("STATE: {buyer_state}    STATE CODE: {}", buyer.state_code),
    );
}

fn draw_summary(doc: &mut Document, input: &InvoiceDocumentInput<'_>, end: TableEnd) {
    let summary = input.summary;

    let (page_idx, top) = if end.y + SUMMARY_HEIGHT > PAGE_HEIGHT_MM - MARGIN_MM {
        (doc.add_page(), MARGIN_MM)
    } else {
        (end.page, end.y)
    };
    let page = doc.page_mut(page_idx);

    let subtotal = fixed2(summary.subtotal);
    page.text(LEFT_X, top + 10.0, BODY_SIZE, format!("Total GST Amount: {subtotal}"));
    page.text(LEFT_X, top + 17.0, BODY_SIZE, format!("Invoice Value Rs.: {subtotal}"));

    match summary.tax.regime {
        TaxRegime::Intrastate => {
            page.text(BOX_X, top + 10.0, BODY_SIZE, format!("CGST 9%: {}", fixed2(summary.tax.cgst)));
            page.text(BOX_X, top + 17.0, BODY_SIZE, format!("SGST 9%: {}", fixed2(summary.tax.sgst)));
        }
        TaxRegime::Interstate => {
            page.text(BOX_X, top + 10.0, BODY_SIZE, format!("IGST 18%: {}", fixed2(summary.tax.igst)));
        }
    }
    page.text(BOX_X, top + 24.0, BODY_SIZE, format!("Round Off: {}", fixed2(summary.round_off)));
    page.text(BOX_X, top + 31.0, BODY_SIZE, format!("TOTAL: {}", fixed2(summary.grand_total)))
        .bold();

    page.text(LEFT_X, top + 40.0, BODY_SIZE, "N.B.: Goods once sold will not be taken back.");
    page.text(
        LEFT_X,
        top + 47.0,
        BODY_SIZE,
        "Received the above-mentioned goods in good order &",
    );
    page.text(LEFT_X, top + 54.0, BODY_SIZE, "condition.");
    page.text(BOX_X, top + 60.0, BODY_SIZE, format!("For, {}", input.seller.name));
    page.text(LEFT_X, top + 70.0, BODY_SIZE, "Receiver's Signature");
}
