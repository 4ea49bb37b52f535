use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::Serialize;

use gstforge_core::{Aggregate, AggregateRoot};
use gstforge_invoicing::{DraftUpdate, InvoiceDraft, PartyDetails, TaxRegime};
use gstforge_render::{InvoiceDocumentInput, document_file_name, render_invoice, to_pdf_bytes};
use gstforge_sheets::{ExportReport, SheetExport, SheetsExporter, SheetsTransport};

use crate::error::SessionError;
use crate::notice::Notice;

const MAX_NOTICES: usize = 32;

/// Live totals shown next to the form while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DraftPreview {
    pub subtotal: f64,
    pub tax: f64,
    pub regime: TaxRegime,
    pub grand_total: f64,
}

#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RenderedInvoice {
    /// Write the PDF into `dir` under its download file name.
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// A validated copy of the draft, ready to be sent to the spreadsheet.
#[derive(Debug, Clone)]
pub struct PendingSheetExport {
    draft: InvoiceDraft,
}

impl PendingSheetExport {
    /// Send the snapshot's rows. Needs no access to the session.
    pub async fn run<T: SheetsTransport>(
        &self,
        exporter: Option<&SheetsExporter<T>>,
    ) -> Result<ExportReport, SessionError> {
        let exporter = exporter.ok_or(SessionError::NotConfigured)?;
        let summary = self.draft.summary();
        let export = SheetExport::from_draft(&self.draft, &summary)?;
        Ok(exporter.export(&export).await?)
    }
}

/// The invoice page's state: one draft plus recent notices.
#[derive(Debug)]
pub struct InvoiceSession {
    draft: InvoiceDraft,
    notices: VecDeque<Notice>,
}

impl InvoiceSession {
    pub fn new(seller: PartyDetails) -> Self {
        Self::with_draft(InvoiceDraft::for_seller(seller))
    }

    pub fn with_draft(draft: InvoiceDraft) -> Self {
        Self {
            draft,
            notices: VecDeque::new(),
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// Start over with a blank draft for the same seller.
    pub fn reset(&mut self) {
        self.draft = InvoiceDraft::for_seller(self.draft.seller().clone());
        self.notices.clear();
    }

    /// Apply one form edit. A rejected edit leaves the draft untouched.
    pub fn apply(&mut self, update: DraftUpdate) -> Result<&InvoiceDraft, SessionError> {
        let kind = update.name();
        if let Err(err) = self.draft.apply(&update) {
            tracing::warn!(update = kind, error = %err, "draft update rejected");
            return Err(err.into());
        }
        tracing::debug!(update = kind, version = self.draft.version(), "draft updated");
        Ok(&self.draft)
    }

    pub fn preview(&self) -> DraftPreview {
        let summary = self.draft.summary();
        DraftPreview {
            subtotal: summary.subtotal,
            tax: summary.tax.total,
            regime: summary.tax.regime,
            grand_total: summary.grand_total,
        }
    }

    /// Render the draft to PDF bytes. Nothing is produced when required
    /// fields are missing.
    pub fn export_document(&mut self) -> Result<RenderedInvoice, SessionError> {
        let outcome = self.render_document();
        match &outcome {
            Ok(rendered) => {
                tracing::info!(
                    file_name = %rendered.file_name,
                    bytes = rendered.bytes.len(),
                    "invoice document generated"
                );
                self.push(Notice::success("invoice PDF generated"));
            }
            Err(err) => self.fail("document export failed", err),
        }
        outcome
    }

    /// Append the draft's line items to the configured spreadsheet.
    ///
    /// `exporter` is `None` when no spreadsheet endpoint is configured.
    /// Callers sharing the session behind a lock should use
    /// [`begin_sheet_export`](Self::begin_sheet_export) and
    /// [`finish_sheet_export`](Self::finish_sheet_export) instead, so the
    /// lock is not held while requests are in flight.
    pub async fn export_to_sheet<T: SheetsTransport>(
        &mut self,
        exporter: Option<&SheetsExporter<T>>,
    ) -> Result<ExportReport, SessionError> {
        let pending = self.begin_sheet_export()?;
        let outcome = pending.run(exporter).await;
        self.finish_sheet_export(outcome)
    }

    /// Validate the draft for a spreadsheet export and snapshot it.
    ///
    /// Later edits to the session do not affect the snapshot.
    pub fn begin_sheet_export(&mut self) -> Result<PendingSheetExport, SessionError> {
        let outcome = self.snapshot_for_sheet();
        if let Err(err) = &outcome {
            self.fail("spreadsheet export failed", err);
        }
        outcome
    }

    /// Record the outcome of a [`PendingSheetExport`] as a notice.
    pub fn finish_sheet_export(
        &mut self,
        outcome: Result<ExportReport, SessionError>,
    ) -> Result<ExportReport, SessionError> {
        match &outcome {
            Ok(report) => {
                self.push(Notice::success(format!(
                    "rows saved to the spreadsheet: {}",
                    report.items_written
                )));
            }
            Err(err) => self.fail("spreadsheet export failed", err),
        }
        outcome
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    fn render_document(&self) -> Result<RenderedInvoice, SessionError> {
        self.draft.ensure_exportable()?;
        let summary = self.draft.summary();
        let input = InvoiceDocumentInput::from_draft(&self.draft, &summary);
        let bytes = to_pdf_bytes(&render_invoice(&input))?;
        Ok(RenderedInvoice {
            file_name: document_file_name(self.draft.invoice_number()),
            bytes,
        })
    }

    fn snapshot_for_sheet(&self) -> Result<PendingSheetExport, SessionError> {
        self.draft.ensure_exportable()?;
        self.draft.sheet_target()?;
        Ok(PendingSheetExport {
            draft: self.draft.clone(),
        })
    }

    fn fail(&mut self, action: &str, err: &SessionError) {
        if err.is_input_error() {
            tracing::warn!(error = %err, "{action}");
            self.push(Notice::error(err.user_message()));
        } else {
            tracing::error!(error = %err, "{action}");
            self.push(Notice::error(format!("{action}: {}", err.user_message())));
        }
    }

    fn push(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use gstforge_core::LineItemId;
    use gstforge_invoicing::{Credential, PartyField, REQUIRED_FIELDS_MESSAGE};
    use gstforge_sheets::{AppendRequest, HttpTransport, TransportError};

    use super::*;
    use crate::notice::NoticeLevel;

    fn seller() -> PartyDetails {
        PartyDetails {
            name: "Acme Traders".into(),
            address: "12 Market Road".into(),
            gstin: "27AAAAA0000A1Z5".into(),
            state: "Maharashtra".into(),
            state_code: "27".into(),
        }
    }

    fn session() -> InvoiceSession {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        InvoiceSession::with_draft(InvoiceDraft::new(seller(), date))
    }

    fn first() -> LineItemId {
        LineItemId::FIRST
    }

    fn fill_for_export(s: &mut InvoiceSession) {
        s.apply(DraftUpdate::SetInvoiceNumber { value: "INV-7".into() }).unwrap();
        s.apply(DraftUpdate::SetBuyerField {
            field: PartyField::Name,
            value: "Globex".into(),
        })
        .unwrap();
        s.apply(DraftUpdate::SetBuyerField {
            field: PartyField::State,
            value: "Karnataka".into(),
        })
        .unwrap();
        s.apply(DraftUpdate::SetItemQuantity { id: first(), value: 2.0 }).unwrap();
        s.apply(DraftUpdate::SetItemRate { id: first(), value: 100.0 }).unwrap();
    }

    struct Recorder {
        fail_on: Option<usize>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SheetsTransport for Recorder {
        async fn append_row(&self, request: &AppendRequest<'_>) -> Result<(), TransportError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.body.values[0].clone());
            if Some(calls.len()) == self.fail_on {
                return Err(TransportError::Status {
                    status: 403,
                    body: "forbidden".into(),
                });
            }
            Ok(())
        }
    }

    fn with_sheet(s: &mut InvoiceSession) {
        s.apply(DraftUpdate::SetSheetUrl {
            value: "https://docs.google.com/spreadsheets/d/abc123/edit".into(),
        })
        .unwrap();
        s.apply(DraftUpdate::SetCredential {
            value: Credential::new("secret"),
        })
        .unwrap();
    }

    #[test]
    fn preview_tracks_edits() {
        let mut s = session();
        fill_for_export(&mut s);
        let p = s.preview();
        assert_eq!(p.subtotal, 200.0);
        assert_eq!(p.regime, TaxRegime::Interstate);
        assert_eq!(p.tax, 36.0);
        assert_eq!(p.grand_total, 236.0);
    }

    #[test]
    fn rejected_update_keeps_draft() {
        let mut s = session();
        let version = s.draft().version();
        let err = s
            .apply(DraftUpdate::SetItemQuantity { id: first(), value: -1.0 })
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(s.draft().version(), version);
        assert_eq!(s.draft().items()[0].quantity(), 0.0);
    }

    #[test]
    fn document_export_requires_invoice_number() {
        let mut s = session();
        s.apply(DraftUpdate::SetBuyerField {
            field: PartyField::Name,
            value: "Globex".into(),
        })
        .unwrap();

        let err = s.export_document().unwrap_err();
        assert!(matches!(err, SessionError::Domain(_)));

        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn document_export_produces_named_pdf() {
        let mut s = session();
        fill_for_export(&mut s);

        let rendered = s.export_document().unwrap();
        assert_eq!(rendered.file_name, "Invoice-INV-7.pdf");
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(s.notices().next().map(|n| n.level), Some(NoticeLevel::Success));
    }

    #[test]
    fn rendered_invoice_saves_under_file_name() {
        let dir = std::env::temp_dir().join(format!("gstforge-{}", uuid::Uuid::now_v7()));
        let rendered = RenderedInvoice {
            file_name: "Invoice-1.pdf".into(),
            bytes: b"%PDF-1.3".to_vec(),
        };
        let path = rendered.save_to(&dir).unwrap();
        assert_eq!(path, dir.join("Invoice-1.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn sheet_export_requires_url_and_key() {
        let mut s = session();
        fill_for_export(&mut s);
        let exporter = SheetsExporter::new(Recorder {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        });

        let err = s.export_to_sheet(Some(&exporter)).await.unwrap_err();
        assert!(err.is_input_error());
        assert!(exporter.transport().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sheet_export_without_endpoint_is_reported() {
        let mut s = session();
        fill_for_export(&mut s);
        with_sheet(&mut s);

        let err = s
            .export_to_sheet::<HttpTransport>(None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotConfigured));
        assert_eq!(s.take_notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn failed_sheet_export_keeps_draft_intact() {
        let mut s = session();
        fill_for_export(&mut s);
        with_sheet(&mut s);
        s.apply(DraftUpdate::AddItem).unwrap();
        s.apply(DraftUpdate::AddItem).unwrap();
        let version = s.draft().version();

        let exporter = SheetsExporter::new(Recorder {
            fail_on: Some(2),
            calls: Mutex::new(Vec::new()),
        });
        let err = s.export_to_sheet(Some(&exporter)).await.unwrap_err();

        assert!(!err.is_input_error());
        assert_eq!(exporter.transport().calls.lock().unwrap().len(), 2);
        assert_eq!(s.draft().version(), version);
        assert_eq!(s.draft().items().len(), 3);

        let notices = s.take_notices();
        assert!(notices[0].message.contains("forbidden"));
    }

    #[tokio::test]
    async fn successful_sheet_export_reports_rows() {
        let mut s = session();
        fill_for_export(&mut s);
        with_sheet(&mut s);

        let exporter = SheetsExporter::new(Recorder {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        });
        let report = s.export_to_sheet(Some(&exporter)).await.unwrap();
        assert_eq!(report.items_written, 1);
        assert_eq!(
            s.take_notices()[0].message,
            "rows saved to the spreadsheet: 1"
        );
    }

    #[tokio::test]
    async fn edits_during_sheet_export_do_not_leak_into_rows() {
        let mut s = session();
        fill_for_export(&mut s);
        with_sheet(&mut s);

        let pending = s.begin_sheet_export().unwrap();
        s.apply(DraftUpdate::SetInvoiceNumber { value: "INV-8".into() }).unwrap();

        let exporter = SheetsExporter::new(Recorder {
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        });
        let outcome = pending.run(Some(&exporter)).await;
        let report = s.finish_sheet_export(outcome).unwrap();

        assert_eq!(report.items_written, 1);
        assert_eq!(*exporter.transport().calls.lock().unwrap(), vec!["INV-7".to_string()]);
        assert_eq!(s.draft().invoice_number(), "INV-8");
        assert_eq!(s.take_notices()[0].level, NoticeLevel::Success);
    }

    #[test]
    fn begin_sheet_export_validates_before_snapshot() {
        let mut s = session();
        fill_for_export(&mut s);

        let err = s.begin_sheet_export().unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(
            s.take_notices()[0].message,
            "please provide the spreadsheet URL and access key"
        );
    }

    #[test]
    fn notices_are_bounded() {
        let mut s = session();
        for _ in 0..(MAX_NOTICES + 5) {
            let _ = s.export_document();
        }
        assert_eq!(s.notices().count(), MAX_NOTICES);
        assert!(s.take_notices().len() == MAX_NOTICES);
        assert_eq!(s.notices().count(), 0);
    }

    #[test]
    fn reset_keeps_seller_only() {
        let mut s = session();
        fill_for_export(&mut s);
        s.reset();
        assert_eq!(s.draft().invoice_number(), "");
        assert_eq!(s.draft().seller(), &seller());
        assert_eq!(s.draft().items().len(), 1);
    }
}
