//! Pricing module
//!
//! Provides the shipment cost calculation with:
//! - A configurable rate card (canonical rates by default)
//! - Threshold-based weight surcharge
//! - Flat delivery-speed fees
//! - Tax applied once to the subtotal

pub mod engine;
pub mod rates;

pub use engine::{compute_cost, parse_weight, PricingEngine};
pub use rates::{RateCard, RateCardBuilder};
