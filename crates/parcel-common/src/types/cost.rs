//! Cost breakdown - the itemised quote for a shipment
//!
//! ```text
//! subtotal = base + weight surcharge + insurance + fragile + delivery
//! total    = subtotal + subtotal * tax_rate
//! ```
//!
//! Amounts are kept at full decimal precision. Rounding to cents happens only
//! when an amount is formatted for display.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::delivery::DeliveryPreference;

/// Number of decimal places shown for money
pub const MONEY_DECIMALS: u32 = 2;

/// Round an amount to cents for display (half away from zero)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `$1234.50`
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", round_money(amount))
}

/// Kind of a cost line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    BaseRate,
    WeightSurcharge,
    Insurance,
    FragileHandling,
    Delivery,
}

/// A labelled amount in a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub kind: LineItemKind,
    pub label: String,
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(kind: LineItemKind, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, format_money(self.amount))
    }
}

/// Fully itemised shipment quote
///
/// Produced by the pricing engine and never mutated afterwards. A confirmed
/// shipment stores it verbatim so receipts show exactly what was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Flat handling fee
    pub base_rate: Decimal,
    /// Per-kg charge on weight above the threshold
    pub weight_surcharge: Decimal,
    /// Flat insurance fee
    pub insurance_cost: Decimal,
    /// Special handling fee for fragile packages
    pub fragile_charge: Decimal,
    /// Fee for the selected delivery speed
    pub delivery_cost: Decimal,
    /// Delivery speed the quote was computed for
    pub delivery: DeliveryPreference,
    /// Sum of the five components above
    pub subtotal: Decimal,
    /// Tax rate applied once to the subtotal (e.g. 0.16)
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CostBreakdown {
    /// Ordered line items making up the subtotal
    pub fn line_items(&self) -> Vec<LineItem> {
        vec![
            LineItem::new(LineItemKind::BaseRate, "Base rate", self.base_rate),
            LineItem::new(
                LineItemKind::WeightSurcharge,
                "Excess weight surcharge",
                self.weight_surcharge,
            ),
            LineItem::new(LineItemKind::Insurance, "Merchandise insurance", self.insurance_cost),
            LineItem::new(
                LineItemKind::FragileHandling,
                "Fragile handling",
                self.fragile_charge,
            ),
            LineItem::new(
                LineItemKind::Delivery,
                self.delivery.service_label(),
                self.delivery_cost,
            ),
        ]
    }

    /// Line items with a non-zero amount, as shown on receipts
    pub fn charged_items(&self) -> Vec<LineItem> {
        self.line_items()
            .into_iter()
            .filter(|item| !item.amount.is_zero())
            .collect()
    }

    /// Tax rate as a whole percentage, e.g. `16`
    pub fn tax_percent(&self) -> Decimal {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.line_items() {
            writeln!(f, "{item}")?;
        }
        writeln!(f, "Subtotal: {}", format_money(self.subtotal))?;
        writeln!(f, "Tax ({}%): {}", self.tax_percent(), format_money(self.tax))?;
        write!(f, "Total: {}", format_money(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> CostBreakdown {
        CostBreakdown {
            base_rate: dec!(50),
            weight_surcharge: dec!(2.664),
            insurance_cost: dec!(15),
            fragile_charge: dec!(0),
            delivery_cost: dec!(10),
            delivery: DeliveryPreference::Standard,
            subtotal: dec!(77.664),
            tax_rate: dec!(0.16),
            tax: dec!(12.42624),
            total: dec!(90.09024),
        }
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_format_money_pads_cents() {
        assert_eq!(format_money(dec!(87)), "$87.00");
        assert_eq!(format_money(dec!(156.6)), "$156.60");
    }

    #[test]
    fn test_line_items_order() {
        let kinds: Vec<LineItemKind> = sample().line_items().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineItemKind::BaseRate,
                LineItemKind::WeightSurcharge,
                LineItemKind::Insurance,
                LineItemKind::FragileHandling,
                LineItemKind::Delivery,
            ]
        );
    }

    #[test]
    fn test_charged_items_skip_zero_amounts() {
        let charged = sample().charged_items();
        assert_eq!(charged.len(), 4);
        assert!(charged
            .iter()
            .all(|item| item.kind != LineItemKind::FragileHandling));
    }

    #[test]
    fn test_display_rounds_only_at_presentation() {
        let breakdown = sample();
        let text = breakdown.to_string();
        assert!(text.contains("Excess weight surcharge: $2.66"));
        assert!(text.contains("Tax (16%): $12.43"));
        assert!(text.contains("Total: $90.09"));
        // Stored values keep full precision
        assert_eq!(breakdown.total, dec!(90.09024));
    }
}
