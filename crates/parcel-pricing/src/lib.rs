//! # Parcel Pricing
//!
//! Shipment pricing, confirmation, receipts, and history for Parcel.
//!
//! ## Pricing Formula
//!
//! ```text
//! Subtotal = Base + Weight + Insurance + Fragile + Delivery
//! Total    = Subtotal × (1 + Tax)
//! ```
//!
//! Where:
//! - Base: flat 50.00 handling fee
//! - Weight: 8.00 per kg above 15 kg (nothing at or below 15 kg)
//! - Insurance: flat 15.00
//! - Fragile: 10.00 when the package is fragile
//! - Delivery: 10.00 standard, 20.00 express, 30.00 overnight
//! - Tax: 16% IVA, applied once to the subtotal

pub mod history;
pub mod pricing;
pub mod receipt;
pub mod shipment;

pub use history::{find_by_tracking_id, recent, search, DashboardSummary, StatusFilter};
pub use pricing::{compute_cost, parse_weight, PricingEngine, RateCard, RateCardBuilder};
pub use receipt::Receipt;
pub use shipment::ShipmentConfirmer;
