//! Rate card - every constant the pricing formula uses
//!
//! The canonical card is:
//!
//! | Component              | Amount                      |
//! |------------------------|-----------------------------|
//! | Base rate              | 50.00                       |
//! | Weight surcharge       | 8.00 per kg above 15 kg     |
//! | Insurance              | 15.00                       |
//! | Fragile handling       | 10.00                       |
//! | Delivery               | 10.00 / 20.00 / 30.00       |
//! | Tax                    | 16% of the subtotal         |

use parcel_common::{DeliveryPreference, PricingError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Pricing constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub base_rate: Decimal,
    /// Weight up to which no surcharge applies (inclusive)
    pub weight_threshold_kg: Decimal,
    /// Charged per kg of weight above the threshold
    pub excess_weight_rate: Decimal,
    pub insurance_cost: Decimal,
    pub fragile_charge: Decimal,
    pub standard_delivery: Decimal,
    pub express_delivery: Decimal,
    pub overnight_delivery: Decimal,
    /// Fraction of the subtotal, in `[0, 1)`
    pub tax_rate: Decimal,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            base_rate: dec!(50.00),
            weight_threshold_kg: Decimal::from(parcel_common::WEIGHT_THRESHOLD_KG),
            excess_weight_rate: dec!(8.00),
            insurance_cost: dec!(15.00),
            fragile_charge: dec!(10.00),
            standard_delivery: dec!(10.00),
            express_delivery: dec!(20.00),
            overnight_delivery: dec!(30.00),
            tax_rate: dec!(0.16),
        }
    }
}

impl RateCard {
    /// Flat fee for a delivery speed
    pub fn delivery_cost(&self, delivery: DeliveryPreference) -> Decimal {
        match delivery {
            DeliveryPreference::Standard => self.standard_delivery,
            DeliveryPreference::Express => self.express_delivery,
            DeliveryPreference::Overnight => self.overnight_delivery,
        }
    }

    /// Reject negative amounts and out-of-range tax
    pub fn validate(&self) -> Result<(), PricingError> {
        let amounts = [
            ("base rate", self.base_rate),
            ("weight threshold", self.weight_threshold_kg),
            ("excess weight rate", self.excess_weight_rate),
            ("insurance cost", self.insurance_cost),
            ("fragile charge", self.fragile_charge),
            ("standard delivery", self.standard_delivery),
            ("express delivery", self.express_delivery),
            ("overnight delivery", self.overnight_delivery),
        ];
        if let Some((name, value)) = amounts.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(PricingError::invalid(format!(
                "{name} must not be negative, got {value}"
            )));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate >= Decimal::ONE {
            return Err(PricingError::invalid(format!(
                "tax rate must be in [0, 1), got {}",
                self.tax_rate
            )));
        }
        Ok(())
    }

    /// Load a rate card from a JSON file
    pub fn from_json_file(path: &str) -> parcel_common::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            parcel_common::ParcelError::Config(format!("Failed to read rate card {path}: {e}"))
        })?;
        let card: RateCard = serde_json::from_str(&content)?;
        card.validate()?;
        Ok(card)
    }
}

/// Builder for non-canonical rate cards (promotions, other markets)
#[derive(Debug, Clone, Default)]
pub struct RateCardBuilder {
    card: RateCard,
}

impl RateCardBuilder {
    /// Start from the canonical card
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_rate(mut self, amount: Decimal) -> Self {
        self.card.base_rate = amount;
        self
    }

    /// Set the surcharge threshold and per-kg excess rate
    pub fn with_weight_surcharge(mut self, threshold_kg: Decimal, rate_per_kg: Decimal) -> Self {
        self.card.weight_threshold_kg = threshold_kg;
        self.card.excess_weight_rate = rate_per_kg;
        self
    }

    pub fn with_insurance(mut self, amount: Decimal) -> Self {
        self.card.insurance_cost = amount;
        self
    }

    pub fn with_fragile_charge(mut self, amount: Decimal) -> Self {
        self.card.fragile_charge = amount;
        self
    }

    /// Set the fee for one delivery speed
    pub fn with_delivery_cost(mut self, delivery: DeliveryPreference, amount: Decimal) -> Self {
        match delivery {
            DeliveryPreference::Standard => self.card.standard_delivery = amount,
            DeliveryPreference::Express => self.card.express_delivery = amount,
            DeliveryPreference::Overnight => self.card.overnight_delivery = amount,
        }
        self
    }

    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.card.tax_rate = rate;
        self
    }

    pub fn build(self) -> Result<RateCard, PricingError> {
        self.card.validate()?;
        Ok(self.card)
    }
}
