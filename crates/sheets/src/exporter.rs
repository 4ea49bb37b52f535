use chrono::NaiveDate;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use gstforge_core::DomainResult;
use gstforge_invoicing::{Credential, InvoiceDraft, InvoiceSummary, LineItem, PartyDetails};

use crate::error::ExportError;
use crate::row::{AppendBody, sheet_row};
use crate::spreadsheet_id::SpreadsheetId;
use crate::transport::{AppendRequest, SheetsTransport};

/// Invoice data and destination for one spreadsheet export.
#[derive(Debug, Clone, Copy)]
pub struct SheetExport<'a> {
    pub invoice_number: &'a str,
    pub invoice_date: NaiveDate,
    pub buyer: &'a PartyDetails,
    pub items: &'a [LineItem],
    pub summary: &'a InvoiceSummary,
    pub sheet_url: &'a str,
    pub credential: &'a Credential,
}

impl<'a> SheetExport<'a> {
    /// Fails when the draft has no sheet URL or access key.
    pub fn from_draft(draft: &'a InvoiceDraft, summary: &'a InvoiceSummary) -> DomainResult<Self> {
        let (sheet_url, credential) = draft.sheet_target()?;
        Ok(Self {
            invoice_number: draft.invoice_number(),
            invoice_date: draft.invoice_date(),
            buyer: draft.buyer(),
            items: draft.items(),
            summary,
            sheet_url,
            credential,
        })
    }
}

/// Outcome of a fully successful export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Correlates the log lines of one export run.
    pub export_id: Uuid,
    pub items_written: usize,
}

pub struct SheetsExporter<T> {
    transport: T,
}

impl<T: SheetsTransport> SheetsExporter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Append one row per line item, in list order, one request at a time.
    ///
    /// The spreadsheet id is parsed before anything is sent. The first failed
    /// request aborts the export; rows already appended stay in the sheet.
    pub async fn export(&self, export: &SheetExport<'_>) -> Result<ExportReport, ExportError> {
        let spreadsheet_id = SpreadsheetId::from_url(export.sheet_url)?;
        let export_id = Uuid::now_v7();

        let span = tracing::info_span!(
            "sheet_export",
            %export_id,
            spreadsheet = %spreadsheet_id,
            invoice_number = export.invoice_number,
            items = export.items.len(),
        );

        async {
            for (idx, item) in export.items.iter().enumerate() {
                let request = AppendRequest {
                    spreadsheet_id: &spreadsheet_id,
                    credential: export.credential,
                    item: idx + 1,
                    body: AppendBody {
                        values: sheet_row(export, item),
                    },
                };

                if let Err(source) = self.transport.append_row(&request).await {
                    tracing::error!(item = idx + 1, error = %source, "append failed; export aborted");
                    return Err(ExportError::Remote {
                        item: idx + 1,
                        source,
                    });
                }
                tracing::debug!(item = idx + 1, "row appended");
            }

            tracing::info!(rows = export.items.len(), "rows saved to spreadsheet");
            Ok(ExportReport {
                export_id,
                items_written: export.items.len(),
            })
        }
        .instrument(span)
        .await
    }
}
