//! Confirmed shipments and their delivery status

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    cost::CostBreakdown, delivery::DeliveryPreference, package::PackageDetails,
    rating::ExperienceRating, recipient::Recipient, tracking_id::TrackingId,
};
use crate::error::{Result as ParcelResult, ShipmentError};

/// Where a shipment is in its journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    /// Confirmed, label created, not yet picked up
    #[default]
    Pending,
    InTransit,
    /// Held at customs
    Customs,
    Delivered,
    Cancelled,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Customs,
        ShipmentStatus::Delivered,
        ShipmentStatus::Cancelled,
    ];

    /// Delivered and cancelled shipments never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered | ShipmentStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        use ShipmentStatus::*;
        matches!(
            (self, next),
            (Pending, InTransit)
                | (Pending, Cancelled)
                | (InTransit, Customs)
                | (InTransit, Delivered)
                | (Customs, InTransit)
                | (Customs, Delivered)
        )
    }

    /// Default event text when a shipment enters this status
    pub fn event_details(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Shipping label created",
            ShipmentStatus::InTransit => "Package in transit",
            ShipmentStatus::Customs => "Held at customs",
            ShipmentStatus::Delivered => "Package delivered",
            ShipmentStatus::Cancelled => "Shipment cancelled",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Customs => "customs",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentStatus::Pending => write!(f, "Pending"),
            ShipmentStatus::InTransit => write!(f, "In transit"),
            ShipmentStatus::Customs => write!(f, "Customs"),
            ShipmentStatus::Delivered => write!(f, "Delivered"),
            ShipmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for ShipmentStatus {
    type Err = ShipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ShipmentError::UnknownStatus(s.trim().to_string()))
    }
}

/// One entry in a shipment's tracking history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub at: DateTime<Utc>,
    /// Shipment status once this event happened
    pub status: ShipmentStatus,
    pub location: String,
    pub details: String,
}

impl TrackingEvent {
    pub fn new(
        at: DateTime<Utc>,
        status: ShipmentStatus,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            at,
            status,
            location: location.into(),
            details: details.into(),
        }
    }

    /// Event for entering `status`, with the status's default details
    pub fn status_change(
        at: DateTime<Utc>,
        status: ShipmentStatus,
        location: impl Into<String>,
    ) -> Self {
        Self::new(at, status, location, status.event_details())
    }
}

impl fmt::Display for TrackingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<10}  {}  {}",
            self.at.format("%Y-%m-%d %H:%M"),
            self.status.to_string(),
            self.location,
            self.details
        )
    }
}

/// A confirmed shipment
///
/// The cost breakdown is the quote the sender accepted, stored as-is. Nothing
/// downstream recomputes prices from the package attributes.
///
/// `events` is kept oldest first and its last entry always carries the
/// current `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub id: Uuid,
    pub tracking_id: TrackingId,
    pub origin: String,
    pub destination: String,
    pub recipient: Recipient,
    pub package: PackageDetails,
    pub delivery: DeliveryPreference,
    pub status: ShipmentStatus,
    pub costs: CostBreakdown,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery: NaiveDate,
    #[serde(default)]
    pub events: Vec<TrackingEvent>,
    #[serde(default)]
    pub rating: Option<ExperienceRating>,
}

impl ShipmentRecord {
    /// Record with `event` appended
    ///
    /// An event in the current status is a progress note (arrived at a hub,
    /// problem reported) and is always accepted. An event in a new status must
    /// be an allowed transition.
    pub fn record_event(&self, event: TrackingEvent) -> Result<Self, ShipmentError> {
        if let Some(last) = self.events.last() {
            if event.at < last.at {
                return Err(ShipmentError::EventOutOfOrder {
                    at: event.at,
                    last: last.at,
                });
            }
        }
        if event.status != self.status && !self.status.can_transition_to(event.status) {
            return Err(ShipmentError::InvalidTransition {
                from: self.status,
                to: event.status,
            });
        }

        let mut next = self.clone();
        next.status = event.status;
        next.events.push(event);
        Ok(next)
    }

    /// Record with its status moved to `next`, logged at `location`
    pub fn with_status(
        &self,
        next: ShipmentStatus,
        at: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Result<Self, ShipmentError> {
        if !self.status.can_transition_to(next) {
            return Err(ShipmentError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.record_event(TrackingEvent::status_change(at, next, location))
    }

    /// Sender confirms the package arrived at its destination
    pub fn mark_delivered(&self, at: DateTime<Utc>) -> Result<Self, ShipmentError> {
        let destination = self.destination.clone();
        self.with_status(ShipmentStatus::Delivered, at, destination)
    }

    /// Sender reports a problem with a delivered package
    pub fn report_problem(
        &self,
        at: DateTime<Utc>,
        description: &str,
    ) -> Result<Self, ShipmentError> {
        if self.status != ShipmentStatus::Delivered {
            return Err(ShipmentError::NotDelivered(self.status));
        }
        self.record_event(TrackingEvent::new(
            at,
            ShipmentStatus::Delivered,
            self.destination.clone(),
            format!("Problem reported: {}", description.trim()),
        ))
    }

    /// Record carrying the sender's rating; delivered shipments only, once
    pub fn rate(&self, rating: ExperienceRating) -> ParcelResult<Self> {
        if self.status != ShipmentStatus::Delivered {
            return Err(ShipmentError::NotDelivered(self.status).into());
        }
        if self.rating.is_some() {
            return Err(ShipmentError::AlreadyRated.into());
        }
        rating.validate()?;
        Ok(Self {
            rating: Some(rating),
            ..self.clone()
        })
    }

    /// Tracking history, newest first
    pub fn timeline(&self) -> impl Iterator<Item = &TrackingEvent> {
        self.events.iter().rev()
    }

    /// Where the package was last seen
    pub fn last_location(&self) -> &str {
        self.events
            .last()
            .map(|event| event.location.as_str())
            .unwrap_or(self.origin.as_str())
    }
}
