//! GST split: CGST + SGST inside one state, IGST across states.

use serde::Serialize;

use gstforge_core::ValueObject;

use crate::line_item::LineItem;
use crate::party::same_state;
use crate::totals::subtotal;

pub const CGST_RATE: f64 = 0.09;
pub const SGST_RATE: f64 = 0.09;
pub const IGST_RATE: f64 = 0.18;

/// Which tax layout applies to an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// Seller and buyer in the same state: CGST + SGST.
    Intrastate,
    /// Different states: IGST.
    Interstate,
}

impl TaxRegime {
    pub fn between(seller_state: &str, buyer_state: &str) -> Self {
        if same_state(seller_state, buyer_state) {
            TaxRegime::Intrastate
        } else {
            TaxRegime::Interstate
        }
    }
}

/// Tax amounts for a whole invoice.
///
/// Exactly one of {cgst, sgst} or {igst} is populated; `total` is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub regime: TaxRegime,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total: f64,
}

impl ValueObject for TaxBreakdown {}

/// Round half up, the convention used for every tax component.
///
/// Inputs are never negative, where `f64::round` (half away from zero) is
/// half up without the `x + 0.5` representation error.
pub fn round_half_up(value: f64) -> f64 {
    value.round()
}

/// Compute the tax split for `items`.
///
/// Each component is rounded independently from the full subtotal, so an
/// intrastate CGST + SGST can differ by one unit from the IGST the same
/// subtotal would attract across states.
pub fn calculate_tax(items: &[LineItem], seller_state: &str, buyer_state: &str) -> TaxBreakdown {
    let subtotal = subtotal(items);
    match TaxRegime::between(seller_state, buyer_state) {
        TaxRegime::Intrastate => {
            let cgst = round_half_up(subtotal * CGST_RATE);
            let sgst = round_half_up(subtotal * SGST_RATE);
            TaxBreakdown {
                regime: TaxRegime::Intrastate,
                cgst,
                sgst,
                igst: 0.0,
                total: cgst + sgst,
            }
        }
        TaxRegime::Interstate => {
            let igst = round_half_up(subtotal * IGST_RATE);
            TaxBreakdown {
                regime: TaxRegime::Interstate,
                cgst: 0.0,
                sgst: 0.0,
                igst,
                total: igst,
            }
        }
    }
}
