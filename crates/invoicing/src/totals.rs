use serde::Serialize;

use crate::line_item::LineItem;
use crate::party::PartyDetails;
use crate::tax::{TaxBreakdown, calculate_tax};

/// Sum of line amounts, in list order.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().fold(0.0, |sum, item| sum + item.amount())
}

/// Figures printed below the item table and shown on the totals card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub subtotal: f64,
    pub tax: TaxBreakdown,
    /// Always zero: amounts are not rounded to whole rupees.
    pub round_off: f64,
    pub grand_total: f64,
}

impl InvoiceSummary {
    pub fn compute(items: &[LineItem], seller: &PartyDetails, buyer: &PartyDetails) -> Self {
        let subtotal = subtotal(items);
        let tax = calculate_tax(items, &seller.state, &buyer.state);
        Self {
            subtotal,
            tax,
            round_off: 0.0,
            grand_total: subtotal + tax.total,
        }
    }
}
