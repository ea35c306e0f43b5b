//! Error types for Parcel
//!
//! Provides a unified error type and domain-specific error variants

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{draft::DraftStep, shipment::ShipmentStatus};

/// Result type alias using ParcelError
pub type Result<T> = std::result::Result<T, ParcelError>;

/// Unified error type for Parcel operations
#[derive(Debug, Error)]
pub enum ParcelError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Draft errors
    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    // Shipment lifecycle errors
    #[error("Shipment error: {0}")]
    Shipment(#[from] ShipmentError),

    // Tracking identifier errors
    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    // Experience rating errors
    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Pricing calculation errors
///
/// Always a caller bug: form input should be validated before a quote is
/// requested. Nothing here is retryable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        PricingError::InvalidInput(reason.into())
    }
}

/// Shipment draft errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Package details have not been entered")]
    MissingPackage,

    #[error("Recipient details have not been entered")]
    MissingRecipient,

    #[error("Accepted quote no longer matches the draft")]
    StaleQuote,

    #[error("Draft is already at the review step")]
    AlreadyReviewed,

    #[error("Draft is at step {actual}, expected {expected}")]
    WrongStep {
        expected: DraftStep,
        actual: DraftStep,
    },
}

/// Confirmed shipment errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShipmentError {
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    #[error("Unknown shipment status: {0}")]
    UnknownStatus(String),

    #[error("Tracking event at {at} is earlier than the last event at {last}")]
    EventOutOfOrder {
        at: DateTime<Utc>,
        last: DateTime<Utc>,
    },

    #[error("Shipment is {0}, only delivered shipments accept this")]
    NotDelivered(ShipmentStatus),

    #[error("Shipment has already been rated")]
    AlreadyRated,
}

/// Experience rating errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("An overall rating is required")]
    MissingOverall,

    #[error("{category} rating must be 1 to 5 stars, got {stars}")]
    OutOfRange { category: &'static str, stars: u8 },
}

/// Tracking identifier errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackingError {
    #[error("Malformed tracking id: {0}")]
    Malformed(String),

    #[error("Invalid tracking prefix: {0}")]
    InvalidPrefix(String),

    #[error("Could not generate a unique tracking id after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

// Implement From for common external error types
impl From<serde_json::Error> for ParcelError {
    fn from(err: serde_json::Error) -> Self {
        ParcelError::Serialization(err.to_string())
    }
}
