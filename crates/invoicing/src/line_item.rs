use serde::{Deserialize, Serialize};

use gstforge_core::{DomainError, DomainResult, Entity, LineItemId};

/// One row of the invoice table.
///
/// `amount` is never stored: it is `quantity * rate` at read time, so it can
/// never drift from the two inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord", into = "LineItemRecord")]
pub struct LineItem {
    id: LineItemId,
    description: String,
    hsn: String,
    quantity: f64,
    rate: f64,
}

impl LineItem {
    pub fn new(
        id: LineItemId,
        description: impl Into<String>,
        hsn: impl Into<String>,
        quantity: f64,
        rate: f64,
    ) -> DomainResult<Self> {
        ensure_non_negative("quantity", quantity)?;
        ensure_non_negative("rate", rate)?;
        Ok(Self {
            id,
            description: description.into(),
            hsn: hsn.into(),
            quantity,
            rate,
        })
    }

    /// An empty row, as added by the form.
    pub fn blank(id: LineItemId) -> Self {
        Self {
            id,
            description: String::new(),
            hsn: String::new(),
            quantity: 0.0,
            rate: 0.0,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// HSN tariff classification code.
    pub fn hsn(&self) -> &str {
        &self.hsn
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }

    pub(crate) fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub(crate) fn set_hsn(&mut self, value: impl Into<String>) {
        self.hsn = value.into();
    }

    pub(crate) fn set_quantity(&mut self, value: f64) {
        self.quantity = value;
    }

    pub(crate) fn set_rate(&mut self, value: f64) {
        self.rate = value;
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> LineItemId {
        self.id
    }
}

/// Quantities and rates must be finite and non-negative.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Wire shape of a line item; carries the derived amount for readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LineItemRecord {
    id: LineItemId,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hsn: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    rate: f64,
    /// Ignored on input.
    #[serde(default)]
    amount: f64,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = DomainError;

    fn try_from(r: LineItemRecord) -> Result<Self, Self::Error> {
        LineItem::new(r.id, r.description, r.hsn, r.quantity, r.rate)
    }
}

impl From<LineItem> for LineItemRecord {
    fn from(item: LineItem) -> Self {
        let amount = item.amount();
        Self {
            id: item.id,
            description: item.description,
            hsn: item.hsn,
            quantity: item.quantity,
            rate: item.rate,
            amount,
        }
    }
}
