//! Subcommand implementations
//!
//! Each command returns its output as a string so it can be tested without
//! capturing stdout.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use parcel_common::{
    types::cost::format_money, Currency, DeliveryPreference, PackageDetails, Recipient,
    ShipmentDraft, ShipmentRecord, ShipmentStatus, TrackingId, TrackingIdGenerator,
};
use parcel_pricing::{
    find_by_tracking_id, parse_weight, recent, search, DashboardSummary, PricingEngine, Receipt,
    ShipmentConfirmer, StatusFilter,
};
use rand::Rng;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use crate::config::QuoteConfig;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show an itemised quote for a package
    Quote(QuoteArgs),
    /// Confirm a shipment and print its record and receipt
    Confirm(ConfirmArgs),
    /// Validate a tracking id and show its parts
    ParseTrackingId {
        /// Tracking id, e.g. TRK-2025-482913
        id: String,
    },
    /// Show the tracking timeline of a saved shipment
    Track(TrackArgs),
    /// Dashboard counts and recent shipments from saved records
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Tracking id, e.g. TRK-2025-482913
    pub id: String,

    /// JSON file holding an array of shipment records
    #[arg(long)]
    pub records: PathBuf,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// JSON file holding an array of shipment records
    #[arg(long)]
    pub records: PathBuf,

    /// Match on tracking id or destination
    #[arg(long, default_value = "")]
    pub search: String,

    /// all, pending, in_transit, customs, delivered or cancelled
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// How many matching shipments to list
    #[arg(long, default_value_t = 5)]
    pub recent: usize,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Package weight in kg
    #[arg(long)]
    pub weight: String,

    /// Package needs fragile handling
    #[arg(long)]
    pub fragile: bool,

    /// standard, express or overnight
    #[arg(long, default_value_t = DeliveryPreference::Standard)]
    pub delivery: DeliveryPreference,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ConfirmArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[arg(long, default_value_t = Decimal::ZERO)]
    pub length: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub width: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub height: Decimal,

    /// Declared value of the contents
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub value: Decimal,
    /// Currency of the declared value (defaults to PARCEL_CURRENCY)
    #[arg(long)]
    pub currency: Option<Currency>,
    #[arg(long)]
    pub description: Option<String>,

    /// Recipient name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub instructions: Option<String>,
}

pub fn run(command: &Command, config: &QuoteConfig) -> Result<String> {
    match command {
        Command::Quote(args) => quote(args, &config.engine()?),
        Command::Confirm(args) => {
            let confirmer = ShipmentConfirmer::new(
                config.engine()?,
                TrackingIdGenerator::for_current_year(&config.tracking_prefix)?,
                config.origin.clone(),
            );
            confirm(args, config, &confirmer, &mut rand::thread_rng(), Utc::now())
        }
        Command::ParseTrackingId { id } => parse_tracking_id(id),
        Command::Track(args) => track(&args.id, &load_records(&args.records)?),
        Command::History(args) => history(args, &load_records(&args.records)?),
    }
}

/// Read saved shipment records from a JSON array
pub fn load_records(path: &Path) -> Result<Vec<ShipmentRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file {}", path.display()))?;
    let records = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file {}", path.display()))?;
    Ok(records)
}

pub fn quote(args: &QuoteArgs, engine: &PricingEngine) -> Result<String> {
    let weight = parse_weight(&args.weight)?;
    let breakdown = engine.compute_cost(weight, args.fragile, args.delivery)?;

    if args.json {
        Ok(serde_json::to_string_pretty(&json!({
            "weight_kg": weight,
            "is_fragile": args.fragile,
            "quote": breakdown,
            "line_items": breakdown.line_items(),
        }))?)
    } else {
        Ok(breakdown.to_string())
    }
}

pub fn confirm<R: Rng + ?Sized>(
    args: &ConfirmArgs,
    config: &QuoteConfig,
    confirmer: &ShipmentConfirmer,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<String> {
    let weight = parse_weight(&args.quote.weight)?;
    let mut package = PackageDetails::new(weight)
        .with_dimensions(args.length, args.width, args.height)
        .with_fragile(args.quote.fragile)
        .with_declared_value(args.value, args.currency.unwrap_or(config.currency));
    if let Some(description) = &args.description {
        package = package.with_description(description);
    }

    let mut recipient = Recipient::new(&args.name, &args.address, &args.city);
    if let Some(state) = &args.state {
        recipient = recipient.with_state(state);
    }
    if let Some(zip) = &args.zip {
        recipient = recipient.with_zip_code(zip);
    }
    if let Some(phone) = &args.phone {
        recipient = recipient.with_phone(phone);
    }
    if let Some(email) = &args.email {
        recipient = recipient.with_email(email);
    }
    if let Some(instructions) = &args.instructions {
        recipient = recipient.with_special_instructions(instructions);
    }

    let draft = ShipmentDraft::new()
        .with_package(package)
        .advance()?
        .with_recipient(recipient)
        .with_delivery(args.quote.delivery)
        .advance()?;

    let accepted = confirmer.engine().quote_draft(&draft)?;
    let record = confirmer.confirm(&draft, &accepted, rng, &HashSet::new(), now)?;
    let receipt = Receipt::from_record(&record);
    info!(tracking_id = %record.tracking_id, "Receipt ready: {}", receipt.file_name());

    if args.quote.json {
        Ok(serde_json::to_string_pretty(&json!({
            "record": record,
            "receipt": receipt,
        }))?)
    } else {
        Ok(receipt.to_string())
    }
}

pub fn parse_tracking_id(id: &str) -> Result<String> {
    let parsed: TrackingId = id.parse()?;
    Ok(format!(
        "{parsed}\n  prefix: {}\n  year:   {}\n  number: {:06}",
        parsed.prefix(),
        parsed.year(),
        parsed.suffix()
    ))
}

pub fn track(id: &str, records: &[ShipmentRecord]) -> Result<String> {
    let tracking_id: TrackingId = id.parse()?;
    let record = find_by_tracking_id(records, &tracking_id)
        .ok_or_else(|| anyhow!("No shipment with tracking id {tracking_id}"))?;

    let mut out = format!(
        "{}  {}\n{} -> {}\nEstimated delivery: {}\nLast seen: {}\n",
        record.tracking_id,
        record.status,
        record.origin,
        record.destination,
        record.estimated_delivery,
        record.last_location()
    );
    for event in record.timeline() {
        out.push_str(&format!("\n  {event}"));
    }
    if let Some(rating) = &record.rating {
        out.push_str(&format!("\n\nRating: {} ({}/5)", rating.stars(), rating.overall));
        if let Some(comment) = &rating.comment {
            out.push_str(&format!("\n  \"{comment}\""));
        }
    }
    Ok(out)
}

pub fn history(args: &HistoryArgs, records: &[ShipmentRecord]) -> Result<String> {
    let summary = DashboardSummary::from_records(records);
    let mut out = format!(
        "Shipments: {} ({} active)\n",
        summary.total_shipments,
        summary.active()
    );
    for status in ShipmentStatus::ALL {
        out.push_str(&format!("  {:<10} {}\n", status.to_string(), summary.count(status)));
    }
    out.push_str(&format!("Total spent: {}\n", format_money(summary.total_spent)));

    let matching: Vec<ShipmentRecord> = search(records, &args.search, args.status)
        .into_iter()
        .cloned()
        .collect();
    out.push_str("\nRecent shipments:");
    if matching.is_empty() {
        out.push_str("\n  (none)");
    }
    for record in recent(&matching, args.recent) {
        out.push_str(&format!(
            "\n  {}  {:<10}  {}  {}",
            record.tracking_id,
            record.status.to_string(),
            record.destination,
            format_money(record.costs.total)
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use parcel_common::PricingError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quote_args(weight: &str, fragile: bool, delivery: DeliveryPreference) -> QuoteArgs {
        QuoteArgs {
            weight: weight.to_string(),
            fragile,
            delivery,
            json: false,
        }
    }

    #[test]
    fn test_quote_text() {
        let out = quote(
            &quote_args("20", true, DeliveryPreference::Express),
            &PricingEngine::default(),
        )
        .unwrap();
        assert!(out.contains("Subtotal: $135.00"));
        assert!(out.contains("Total: $156.60"));
    }

    #[test]
    fn test_quote_json() {
        let mut args = quote_args("10", false, DeliveryPreference::Standard);
        args.json = true;
        let out = quote(&args, &PricingEngine::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        // Decimals serialize as strings at full precision
        let total: Decimal = value["quote"]["total"].as_str().unwrap().parse().unwrap();
        assert_eq!(total, Decimal::new(87, 0));
        assert_eq!(value["line_items"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_quote_rejects_zero_weight() {
        let err = quote(
            &quote_args("0", false, DeliveryPreference::Standard),
            &PricingEngine::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PricingError>(),
            Some(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_quote_rejects_unparseable_weight() {
        let err = quote(
            &quote_args("ten", false, DeliveryPreference::Standard),
            &PricingEngine::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_confirm_prints_receipt() {
        let config = QuoteConfig::default();
        let confirmer = ShipmentConfirmer::new(
            PricingEngine::default(),
            TrackingIdGenerator::new("TRK", 2025).unwrap(),
            config.origin.clone(),
        );
        let args = ConfirmArgs {
            quote: quote_args("15", false, DeliveryPreference::Overnight),
            length: Decimal::new(30, 0),
            width: Decimal::new(20, 0),
            height: Decimal::new(10, 0),
            value: Decimal::new(500, 0),
            currency: None,
            description: None,
            name: "Ana López".to_string(),
            address: "Av. Reforma 100".to_string(),
            city: "Puebla".to_string(),
            state: Some("Puebla".to_string()),
            zip: None,
            phone: None,
            email: None,
            instructions: None,
        };
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

        let out = confirm(&args, &config, &confirmer, &mut StdRng::seed_from_u64(5), now).unwrap();
        assert!(out.starts_with("SHIPMENT RECEIPT\nTRK-2025-"));
        assert!(out.contains("$110.20"));
        assert!(out.contains("$500.00 MXN"));
        assert!(out.contains("2025-05-04"));
    }

    #[test]
    fn test_confirm_requires_recipient_fields() {
        let config = QuoteConfig::default();
        let confirmer = ShipmentConfirmer::new(
            PricingEngine::default(),
            TrackingIdGenerator::new("TRK", 2025).unwrap(),
            config.origin.clone(),
        );
        let args = ConfirmArgs {
            quote: quote_args("3", false, DeliveryPreference::Standard),
            length: Decimal::ZERO,
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            value: Decimal::ZERO,
            currency: None,
            description: None,
            name: "Ana".to_string(),
            address: " ".to_string(),
            city: "Puebla".to_string(),
            state: None,
            zip: None,
            phone: None,
            email: None,
            instructions: None,
        };
        let err = confirm(&args, &config, &confirmer, &mut StdRng::seed_from_u64(5), Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn test_quote_rejects_overflowing_weight() {
        let err = quote(
            &quote_args("10000000000000000000000000000", false, DeliveryPreference::Standard),
            &PricingEngine::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PricingError>(),
            Some(PricingError::InvalidInput(_))
        ));
    }

    fn saved_records() -> Vec<ShipmentRecord> {
        let confirmer = ShipmentConfirmer::new(
            PricingEngine::default(),
            TrackingIdGenerator::new("TRK", 2025).unwrap(),
            "Ciudad de México, México",
        );
        let draft = ShipmentDraft::new()
            .with_package(PackageDetails::new(Decimal::new(10, 0)))
            .advance()
            .unwrap()
            .with_recipient(Recipient::new("Ana", "Calle 1", "Puebla").with_state("Puebla"))
            .advance()
            .unwrap();
        let quote = confirmer.engine().quote_draft(&draft).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

        let first = confirmer
            .confirm(&draft, &quote, &mut StdRng::seed_from_u64(1), &HashSet::new(), now)
            .unwrap();
        let taken: HashSet<TrackingId> = [first.tracking_id.clone()].into_iter().collect();
        let second = confirmer
            .confirm(
                &draft,
                &quote,
                &mut StdRng::seed_from_u64(2),
                &taken,
                now + chrono::Duration::hours(1),
            )
            .unwrap()
            .with_status(
                ShipmentStatus::InTransit,
                now + chrono::Duration::hours(6),
                "Cholula, Puebla",
            )
            .unwrap()
            .mark_delivered(now + chrono::Duration::days(1))
            .unwrap()
            .rate(parcel_common::ExperienceRating::new(4).with_comment("Good"))
            .unwrap();
        vec![first, second]
    }

    #[test]
    fn test_track_shows_timeline_newest_first() {
        let records = saved_records();
        let id = records[1].tracking_id.to_string().to_lowercase();

        let out = track(&id, &records).unwrap();
        assert!(out.starts_with(&format!("{}  Delivered", records[1].tracking_id)));
        assert!(out.contains("Last seen: Puebla, Puebla"));
        let delivered = out.find("Package delivered").unwrap();
        let in_transit = out.find("Package in transit").unwrap();
        let created = out.find("Shipping label created").unwrap();
        assert!(delivered < in_transit && in_transit < created);
        assert!(out.contains("Rating: ****- (4/5)"));
        assert!(out.contains("\"Good\""));
    }

    #[test]
    fn test_track_unknown_id() {
        let err = track("TRK-2025-100000", &saved_records()).unwrap_err();
        assert!(err.to_string().contains("No shipment"));
        assert!(track("not-an-id", &saved_records()).is_err());
    }

    #[test]
    fn test_history_summary_and_recent() {
        let records = saved_records();
        let args = HistoryArgs {
            records: PathBuf::from("unused.json"),
            search: String::new(),
            status: StatusFilter::All,
            recent: 5,
        };

        let out = history(&args, &records).unwrap();
        assert!(out.starts_with("Shipments: 2 (0 active)"));
        assert!(out.contains("Total spent: $174.00"));
        // Newest shipment listed first
        let newer = out.find(&records[1].tracking_id.to_string()).unwrap();
        let older = out.find(&records[0].tracking_id.to_string()).unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_history_filtered_to_nothing() {
        let args = HistoryArgs {
            records: PathBuf::from("unused.json"),
            search: "Tijuana".to_string(),
            status: StatusFilter::All,
            recent: 5,
        };
        let out = history(&args, &saved_records()).unwrap();
        assert!(out.contains("Recent shipments:\n  (none)"));
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/nonexistent/records.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read records file"));
    }

    #[test]
    fn test_parse_tracking_id() {
        let out = parse_tracking_id("trk-2025-482913").unwrap();
        assert!(out.starts_with("TRK-2025-482913"));
        assert!(out.contains("year:   2025"));
        assert!(parse_tracking_id("TRK-2025").is_err());
    }
}
