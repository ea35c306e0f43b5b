//! Shipment confirmation
//!
//! Turns a reviewed draft and the quote the sender accepted into a
//! `ShipmentRecord`. The quote is stored verbatim; it is only re-derived to
//! make sure the sender did not accept a figure for different inputs.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use parcel_common::{
    CostBreakdown, DraftError, DraftStep, Result, ShipmentDraft, ShipmentRecord, ShipmentStatus,
    TrackingEvent, TrackingId, TrackingIdGenerator, ESTIMATED_TRANSIT_DAYS,
};
use rand::Rng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::pricing::PricingEngine;

/// Confirms drafts into shipment records
#[derive(Debug, Clone)]
pub struct ShipmentConfirmer {
    engine: PricingEngine,
    tracking: TrackingIdGenerator,
    origin: String,
}

impl ShipmentConfirmer {
    pub fn new(
        engine: PricingEngine,
        tracking: TrackingIdGenerator,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            tracking,
            origin: origin.into(),
        }
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Confirm a reviewed draft
    ///
    /// `taken` holds tracking ids already in use; the new id avoids them.
    #[instrument(skip_all, fields(delivery = %draft.delivery))]
    pub fn confirm<R: Rng + ?Sized>(
        &self,
        draft: &ShipmentDraft,
        accepted: &CostBreakdown,
        rng: &mut R,
        taken: &HashSet<TrackingId>,
        now: DateTime<Utc>,
    ) -> Result<ShipmentRecord> {
        draft.ensure_step(DraftStep::Review)?;
        let package = draft.package()?;
        let recipient = draft.recipient()?;
        recipient.validate()?;

        let expected = self.engine.quote_draft(draft)?;
        if &expected != accepted {
            warn!(
                accepted_total = %accepted.total,
                expected_total = %expected.total,
                "Accepted quote does not match draft"
            );
            return Err(DraftError::StaleQuote.into());
        }

        let tracking_id = self.tracking.generate_unique(rng, taken)?;
        let record = ShipmentRecord {
            id: Uuid::now_v7(),
            tracking_id,
            origin: self.origin.clone(),
            destination: recipient.destination(),
            recipient: recipient.clone(),
            package: package.clone(),
            delivery: draft.delivery,
            status: ShipmentStatus::Pending,
            costs: accepted.clone(),
            created_at: now,
            estimated_delivery: now.date_naive() + Duration::days(ESTIMATED_TRANSIT_DAYS),
            events: vec![TrackingEvent::status_change(
                now,
                ShipmentStatus::Pending,
                self.origin.clone(),
            )],
            rating: None,
        };

        info!(
            tracking_id = %record.tracking_id,
            total = %record.costs.total,
            "Shipment confirmed"
        );
        Ok(record)
    }
}
