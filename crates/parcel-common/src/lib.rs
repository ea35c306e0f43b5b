//! # Parcel Common
//!
//! Shared types and errors for the Parcel shipping client.
//!
//! ## Core Types
//!
//! - [`PackageDetails`]: weight, dimensions, fragility and declared value
//! - [`DeliveryPreference`]: standard, express or overnight service
//! - [`CostBreakdown`]: itemised, tax-inclusive shipment quote
//! - [`ShipmentDraft`]: immutable multi-step shipment being filled in
//! - [`ShipmentRecord`]: confirmed shipment with its stored costs and tracking timeline
//! - [`ExperienceRating`]: sender's star ratings once a shipment is delivered
//! - [`TrackingId`]: `PREFIX-YYYY-NNNNNN` shipment identifier

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{
    DraftError, ParcelError, PricingError, RatingError, Result, ShipmentError, TrackingError,
};
pub use types::{
    cost::{CostBreakdown, LineItem, LineItemKind},
    delivery::DeliveryPreference,
    draft::{DraftStep, ShipmentDraft},
    package::{Currency, PackageDetails},
    rating::ExperienceRating,
    recipient::Recipient,
    shipment::{ShipmentRecord, ShipmentStatus, TrackingEvent},
    tracking_id::{TrackingId, TrackingIdGenerator},
};

/// Parcel version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Weight up to which no surcharge applies (kg, inclusive)
pub const WEIGHT_THRESHOLD_KG: u32 = 15;

/// Days between confirmation and estimated delivery
pub const ESTIMATED_TRANSIT_DAYS: i64 = 3;

/// Default tracking identifier prefix
pub const DEFAULT_TRACKING_PREFIX: &str = "TRK";

/// Default shipment origin
pub const DEFAULT_ORIGIN: &str = "Ciudad de México, México";

/// Default recipient country
pub const DEFAULT_COUNTRY: &str = "México";
