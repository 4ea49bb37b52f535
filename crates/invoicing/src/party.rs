use serde::{Deserialize, Serialize};

use gstforge_core::ValueObject;

/// Name, address and GST registration of one side of an invoice.
///
/// Seller and buyer are two independent instances; nothing links them apart
/// from the jurisdiction comparison used by the tax split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyDetails {
    pub name: String,
    pub address: String,
    pub gstin: String,
    /// Jurisdiction (state) name, compared case-insensitively.
    pub state: String,
    pub state_code: String,
}

impl ValueObject for PartyDetails {}

/// Editable fields of [`PartyDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyField {
    Name,
    Address,
    Gstin,
    State,
    StateCode,
}

impl PartyDetails {
    pub fn set(&mut self, field: PartyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PartyField::Name => self.name = value,
            PartyField::Address => self.address = value,
            PartyField::Gstin => self.gstin = value,
            PartyField::State => self.state = value,
            PartyField::StateCode => self.state_code = value,
        }
    }

    /// Whether both parties sit in the same state.
    ///
    /// The comparison is a literal, case-insensitive one: blank states are
    /// not special-cased and only match another blank state.
    pub fn same_jurisdiction(&self, other: &PartyDetails) -> bool {
        same_state(&self.state, &other.state)
    }
}

pub(crate) fn same_state(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
