//! Shipment history search and dashboard summary

use std::str::FromStr;

use parcel_common::{ShipmentError, ShipmentRecord, ShipmentStatus, TrackingId};
use rust_decimal::Decimal;
use serde::Serialize;

/// Status filter for the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ShipmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ShipmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ShipmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Records whose tracking id or destination contains `term` (case-insensitive)
/// and whose status passes `filter`, in input order
pub fn search<'a>(
    records: &'a [ShipmentRecord],
    term: &str,
    filter: StatusFilter,
) -> Vec<&'a ShipmentRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|record| filter.matches(record.status))
        .filter(|record| {
            needle.is_empty()
                || record.tracking_id.to_string().to_lowercase().contains(&needle)
                || record.destination.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The shipment with exactly this tracking id
pub fn find_by_tracking_id<'a>(
    records: &'a [ShipmentRecord],
    tracking_id: &TrackingId,
) -> Option<&'a ShipmentRecord> {
    records
        .iter()
        .find(|record| &record.tracking_id == tracking_id)
}

/// Most recent `limit` records, newest first
pub fn recent(records: &[ShipmentRecord], limit: usize) -> Vec<&ShipmentRecord> {
    let mut sorted: Vec<&ShipmentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Counts and spend shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_shipments: usize,
    /// Count per status, in lifecycle order
    pub by_status: Vec<(ShipmentStatus, usize)>,
    /// Sum of stored totals, cancelled shipments excluded
    pub total_spent: Decimal,
}

impl DashboardSummary {
    pub fn from_records(records: &[ShipmentRecord]) -> Self {
        let by_status = ShipmentStatus::ALL
            .iter()
            .map(|status| {
                let count = records.iter().filter(|r| r.status == *status).count();
                (*status, count)
            })
            .collect();

        let total_spent = records
            .iter()
            .filter(|r| r.status != ShipmentStatus::Cancelled)
            .map(|r| r.costs.total)
            .sum();

        Self {
            total_shipments: records.len(),
            by_status,
            total_spent,
        }
    }

    pub fn count(&self, status: ShipmentStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Shipments still on their way (in transit or at customs)
    pub fn active(&self) -> usize {
        self.count(ShipmentStatus::InTransit) + self.count(ShipmentStatus::Customs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use parcel_common::{DeliveryPreference, PackageDetails, Recipient};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn record(
        suffix: u32,
        city: &str,
        state: &str,
        status: ShipmentStatus,
        hours: i64,
    ) -> ShipmentRecord {
        let costs = crate::pricing::compute_cost(dec!(10), false, DeliveryPreference::Standard)
            .unwrap();
        let recipient = Recipient::new("Cliente", "Calle 1", city).with_state(state);
        ShipmentRecord {
            id: Uuid::nil(),
            tracking_id: TrackingId::new("TRK", 2025, suffix).unwrap(),
            origin: "Ciudad de México, México".to_string(),
            destination: recipient.destination(),
            recipient,
            package: PackageDetails::new(dec!(10)),
            delivery: DeliveryPreference::Standard,
            status,
            costs,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
                + Duration::hours(hours),
            estimated_delivery: NaiveDate::from_ymd_opt(2025, 2, 4).unwrap(),
            events: Vec::new(),
            rating: None,
        }
    }

    fn records() -> Vec<ShipmentRecord> {
        vec![
            record(100001, "Guadalajara", "Jalisco", ShipmentStatus::Delivered, 0),
            record(100002, "Monterrey", "Nuevo León", ShipmentStatus::InTransit, 5),
            record(200003, "Tijuana", "Baja California", ShipmentStatus::Customs, 2),
            record(200004, "Puebla", "Puebla", ShipmentStatus::Cancelled, 9),
            record(300005, "Mérida", "Yucatán", ShipmentStatus::Pending, 1),
        ]
    }

    #[test]
    fn test_search_by_tracking_id() {
        let records = records();
        let found = search(&records, "trk-2025-2000", StatusFilter::All);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_search_by_destination_case_insensitive() {
        let records = records();
        let found = search(&records, "MONTERREY", StatusFilter::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tracking_id.suffix(), 100002);
    }

    #[test]
    fn test_search_with_status_filter() {
        let records = records();
        let filter: StatusFilter = "delivered".parse().unwrap();
        let found = search(&records, "", filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].status, ShipmentStatus::Delivered);

        assert!(search(&records, "Monterrey", filter).is_empty());
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in transit".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ShipmentStatus::InTransit)
        );
        assert!("lost".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_find_by_tracking_id() {
        let records = records();
        let id: TrackingId = "trk-2025-200003".parse().unwrap();
        let found = find_by_tracking_id(&records, &id).unwrap();
        assert_eq!(found.destination, "Tijuana, Baja California");

        let missing = TrackingId::new("TRK", 2025, 999999).unwrap();
        assert!(find_by_tracking_id(&records, &missing).is_none());
        // Exact match only, unlike search
        let partial = TrackingId::new("TRK", 2024, 200003).unwrap();
        assert!(find_by_tracking_id(&records, &partial).is_none());
    }

    #[test]
    fn test_recent_newest_first() {
        let records = records();
        let latest = recent(&records, 3);
        let suffixes: Vec<u32> = latest.iter().map(|r| r.tracking_id.suffix()).collect();
        assert_eq!(suffixes, vec![200004, 100002, 200003]);
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = DashboardSummary::from_records(&records());

        assert_eq!(summary.total_shipments, 5);
        assert_eq!(summary.count(ShipmentStatus::Delivered), 1);
        assert_eq!(summary.count(ShipmentStatus::Cancelled), 1);
        assert_eq!(summary.active(), 2);
        // Four non-cancelled shipments at 87.00 each
        assert_eq!(summary.total_spent, dec!(348.00));
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = DashboardSummary::from_records(&[]);
        assert_eq!(summary.total_shipments, 0);
        assert_eq!(summary.total_spent, Decimal::ZERO);
        assert_eq!(summary.active(), 0);
    }
}
