//! The invoice draft aggregate and its closed set of typed updates.

use chrono::{NaiveDate, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use gstforge_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Entity, LineItemId};

use crate::line_item::{LineItem, ensure_non_negative};
use crate::party::{PartyDetails, PartyField};
use crate::totals::InvoiceSummary;

/// Message shown when a document or sheet export is attempted without the
/// two mandatory fields.
pub const REQUIRED_FIELDS_MESSAGE: &str = "please fill in invoice number and buyer details";

/// Access key for the spreadsheet endpoint.
///
/// Write-only: it is never serialized and its `Debug` output is redacted.
#[derive(Clone, Deserialize)]
#[serde(from = "String")]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Where the spreadsheet export goes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSettings {
    pub sheet_url: String,
    #[serde(skip)]
    credential: Option<Credential>,
}

impl ExportSettings {
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.as_ref().is_some_and(|c| !c.is_blank())
    }
}

/// Typed edits accepted by [`InvoiceDraft`].
///
/// One variant per editable field or field group; the wire form is tagged by
/// `kind`, e.g. `{"kind": "set_item_rate", "id": 2, "value": 150.0}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftUpdate {
    SetInvoiceNumber { value: String },
    SetInvoiceDate { value: NaiveDate },
    SetSellerField { field: PartyField, value: String },
    SetBuyerField { field: PartyField, value: String },
    ReplaceSeller { details: PartyDetails },
    ReplaceBuyer { details: PartyDetails },
    AddItem,
    RemoveItem { id: LineItemId },
    SetItemDescription { id: LineItemId, value: String },
    SetItemHsn { id: LineItemId, value: String },
    SetItemQuantity { id: LineItemId, value: f64 },
    SetItemRate { id: LineItemId, value: f64 },
    SetSheetUrl { value: String },
    SetCredential { value: Credential },
    ClearCredential,
}

impl DraftUpdate {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DraftUpdate::SetInvoiceNumber { .. } => "set_invoice_number",
            DraftUpdate::SetInvoiceDate { .. } => "set_invoice_date",
            DraftUpdate::SetSellerField { .. } => "set_seller_field",
            DraftUpdate::SetBuyerField { .. } => "set_buyer_field",
            DraftUpdate::ReplaceSeller { .. } => "replace_seller",
            DraftUpdate::ReplaceBuyer { .. } => "replace_buyer",
            DraftUpdate::AddItem => "add_item",
            DraftUpdate::RemoveItem { .. } => "remove_item",
            DraftUpdate::SetItemDescription { .. } => "set_item_description",
            DraftUpdate::SetItemHsn { .. } => "set_item_hsn",
            DraftUpdate::SetItemQuantity { .. } => "set_item_quantity",
            DraftUpdate::SetItemRate { .. } => "set_item_rate",
            DraftUpdate::SetSheetUrl { .. } => "set_sheet_url",
            DraftUpdate::SetCredential { .. } => "set_credential",
            DraftUpdate::ClearCredential => "clear_credential",
        }
    }
}

/// Aggregate root: the invoice being composed.
///
/// Lives only in memory for the duration of a session. Invariants:
/// - at least one line item is always present;
/// - line item ids are unique and never reused once issued.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDraft {
    invoice_number: String,
    invoice_date: NaiveDate,
    seller: PartyDetails,
    buyer: PartyDetails,
    items: Vec<LineItem>,
    export: ExportSettings,
    #[serde(skip)]
    last_issued: LineItemId,
    version: u64,
}

impl InvoiceDraft {
    /// A fresh draft with one blank line item.
    pub fn new(seller: PartyDetails, invoice_date: NaiveDate) -> Self {
        Self {
            invoice_number: String::new(),
            invoice_date,
            seller,
            buyer: PartyDetails::default(),
            items: vec![LineItem::blank(LineItemId::FIRST)],
            export: ExportSettings::default(),
            last_issued: LineItemId::FIRST,
            version: 0,
        }
    }

    /// A fresh draft dated today (UTC).
    pub fn for_seller(seller: PartyDetails) -> Self {
        Self::new(seller, Utc::now().date_naive())
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    pub fn seller(&self) -> &PartyDetails {
        &self.seller
    }

    pub fn buyer(&self) -> &PartyDetails {
        &self.buyer
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export
    }

    pub fn summary(&self) -> InvoiceSummary {
        InvoiceSummary::compute(&self.items, &self.seller, &self.buyer)
    }

    /// Id the next `AddItem` will receive.
    pub fn next_item_id(&self) -> DomainResult<LineItemId> {
        let max_existing = self.items.iter().map(|i| i.id()).max().unwrap_or(LineItemId::FIRST);
        max_existing.max(self.last_issued).next()
    }

    /// Refuse document/sheet export unless the mandatory fields are filled.
    pub fn ensure_exportable(&self) -> DomainResult<()> {
        if self.invoice_number.trim().is_empty() || self.buyer.name.trim().is_empty() {
            return Err(DomainError::validation(REQUIRED_FIELDS_MESSAGE));
        }
        Ok(())
    }

    /// Sheet URL and credential, both required for a spreadsheet export.
    pub fn sheet_target(&self) -> DomainResult<(&str, &Credential)> {
        let url = self.export.sheet_url.trim();
        match self.export.credential() {
            Some(credential) if !url.is_empty() && !credential.is_blank() => Ok((url, credential)),
            _ => Err(DomainError::validation(
                "please provide the spreadsheet URL and access key",
            )),
        }
    }

    fn item_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    fn ensure_item(&self, id: LineItemId) -> DomainResult<()> {
        if self.item(id).is_none() {
            return Err(DomainError::not_found(format!("line item {id}")));
        }
        Ok(())
    }
}

impl AggregateRoot for InvoiceDraft {
    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for InvoiceDraft {
    type Update = DraftUpdate;
    type Error = DomainError;

    fn check(&self, update: &DraftUpdate) -> Result<(), DomainError> {
        match update {
            DraftUpdate::AddItem => self.next_item_id().map(|_| ()),
            DraftUpdate::SetItemDescription { id, .. } | DraftUpdate::SetItemHsn { id, .. } => {
                self.ensure_item(*id)
            }
            DraftUpdate::SetItemQuantity { id, value } => {
                self.ensure_item(*id)?;
                ensure_non_negative("quantity", *value)
            }
            DraftUpdate::SetItemRate { id, value } => {
                self.ensure_item(*id)?;
                ensure_non_negative("rate", *value)
            }
            _ => Ok(()),
        }
    }

    fn evolve(&mut self, update: &DraftUpdate) {
        match update {
            DraftUpdate::SetInvoiceNumber { value } => self.invoice_number = value.clone(),
            DraftUpdate::SetInvoiceDate { value } => self.invoice_date = *value,
            DraftUpdate::SetSellerField { field, value } => self.seller.set(*field, value.clone()),
            DraftUpdate::SetBuyerField { field, value } => self.buyer.set(*field, value.clone()),
            DraftUpdate::ReplaceSeller { details } => self.seller = details.clone(),
            DraftUpdate::ReplaceBuyer { details } => self.buyer = details.clone(),
            DraftUpdate::AddItem => {
                // `check` guarantees the id space is not exhausted.
                if let Ok(id) = self.next_item_id() {
                    self.items.push(LineItem::blank(id));
                    self.last_issued = id;
                }
            }
            DraftUpdate::RemoveItem { id } => {
                if self.items.len() > 1 {
                    self.items.retain(|i| i.id() != *id);
                } else {
                    tracing::debug!(item = %id, "refusing to remove the last line item");
                }
            }
            DraftUpdate::SetItemDescription { id, value } => {
                if let Some(item) = self.item_mut(*id) {
                    item.set_description(value.clone());
                }
            }
            DraftUpdate::SetItemHsn { id, value } => {
                if let Some(item) = self.item_mut(*id) {
                    item.set_hsn(value.clone());
                }
            }
            DraftUpdate::SetItemQuantity { id, value } => {
                if let Some(item) = self.item_mut(*id) {
                    item.set_quantity(*value);
                }
            }
            DraftUpdate::SetItemRate { id, value } => {
                if let Some(item) = self.item_mut(*id) {
                    item.set_rate(*value);
                }
            }
            DraftUpdate::SetSheetUrl { value } => self.export.sheet_url = value.clone(),
            DraftUpdate::SetCredential { value } => self.export.credential = Some(value.clone()),
            DraftUpdate::ClearCredential => self.export.credential = None,
        }

        self.version += 1;
    }
}
