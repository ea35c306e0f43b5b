//! Shipment pricing engine
//!
//! Computes an itemised quote from weight, fragility and delivery speed:
//! - Weight surcharge: zero up to the threshold, then a flat rate per excess kg
//! - Delivery: flat lookup per speed, no interpolation
//! - Tax: applied once, to the subtotal of all other components
//!
//! All arithmetic is exact decimal and checked. Nothing is rounded here; a
//! weight too large to price is rejected rather than wrapped or panicked on.

use std::str::FromStr;

use parcel_common::{
    CostBreakdown, DeliveryPreference, PackageDetails, PricingError, ShipmentDraft,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::rates::RateCard;

/// Pricing engine over a rate card
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rates: RateCard,
}

impl PricingEngine {
    /// Create an engine with a validated rate card
    pub fn new(rates: RateCard) -> Result<Self, PricingError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &RateCard {
        &self.rates
    }

    /// Compute the full cost breakdown for a package
    ///
    /// A weight of zero means nothing has been entered yet and is rejected
    /// like a negative weight; the caller shows no quote in that case.
    #[instrument(skip(self))]
    pub fn compute_cost(
        &self,
        weight_kg: Decimal,
        is_fragile: bool,
        delivery: DeliveryPreference,
    ) -> Result<CostBreakdown, PricingError> {
        if weight_kg <= Decimal::ZERO {
            return Err(PricingError::invalid(format!(
                "weight must be positive, got {weight_kg}"
            )));
        }

        let rates = &self.rates;
        let weight_surcharge = self.weight_surcharge(weight_kg)?;
        let fragile_charge = if is_fragile {
            rates.fragile_charge
        } else {
            Decimal::ZERO
        };
        let delivery_cost = rates.delivery_cost(delivery);

        let subtotal = [
            weight_surcharge,
            rates.insurance_cost,
            fragile_charge,
            delivery_cost,
        ]
        .into_iter()
        .try_fold(rates.base_rate, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| overflow("subtotal"))?;
        let tax = subtotal
            .checked_mul(rates.tax_rate)
            .ok_or_else(|| overflow("tax"))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| overflow("total"))?;

        debug!(%subtotal, %tax, %total, "Computed shipment quote");

        Ok(CostBreakdown {
            base_rate: rates.base_rate,
            weight_surcharge,
            insurance_cost: rates.insurance_cost,
            fragile_charge,
            delivery_cost,
            delivery,
            subtotal,
            tax_rate: rates.tax_rate,
            tax,
            total,
        })
    }

    /// Surcharge on the weight above the threshold only
    pub fn weight_surcharge(&self, weight_kg: Decimal) -> Result<Decimal, PricingError> {
        let excess = weight_kg
            .checked_sub(self.rates.weight_threshold_kg)
            .ok_or_else(|| overflow("weight surcharge"))?;
        if excess > Decimal::ZERO {
            excess
                .checked_mul(self.rates.excess_weight_rate)
                .ok_or_else(|| overflow("weight surcharge"))
        } else {
            Ok(Decimal::ZERO)
        }
    }

    /// Quote a package for a delivery speed
    pub fn quote_package(
        &self,
        package: &PackageDetails,
        delivery: DeliveryPreference,
    ) -> Result<CostBreakdown, PricingError> {
        package.validate()?;
        self.compute_cost(package.weight_kg, package.is_fragile, delivery)
    }

    /// Quote whatever a draft holds so far
    ///
    /// Works at any step once package details exist, so a form can show a
    /// live quote while the recipient is still being entered.
    pub fn quote_draft(&self, draft: &ShipmentDraft) -> parcel_common::Result<CostBreakdown> {
        let package = draft.package()?;
        Ok(self.quote_package(package, draft.delivery)?)
    }
}

fn overflow(what: &str) -> PricingError {
    PricingError::invalid(format!("{what} overflows for this weight"))
}

/// Compute a quote with the canonical rate card
pub fn compute_cost(
    weight_kg: Decimal,
    is_fragile: bool,
    delivery: DeliveryPreference,
) -> Result<CostBreakdown, PricingError> {
    PricingEngine::default().compute_cost(weight_kg, is_fragile, delivery)
}

/// Parse a weight typed into a form
pub fn parse_weight(input: &str) -> Result<Decimal, PricingError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PricingError::invalid("weight is empty"));
    }
    Decimal::from_str(trimmed)
        .map_err(|_| PricingError::invalid(format!("weight '{trimmed}' is not a number")))
}
