//! Plain-text shipment receipt
//!
//! Built from a stored record only. Amounts come from the record's cost
//! breakdown, so the receipt total always equals the stored total.

use std::fmt;

use parcel_common::types::cost::format_money;
use parcel_common::ShipmentRecord;
use serde::Serialize;

/// One `label: value` line of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub label: String,
    pub value: String,
}

impl ReceiptLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled group of receipt lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptSection {
    pub title: String,
    pub lines: Vec<ReceiptLine>,
}

/// Human-readable receipt for a confirmed shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub tracking_id: String,
    pub sections: Vec<ReceiptSection>,
}

impl Receipt {
    pub fn from_record(record: &ShipmentRecord) -> Self {
        let shipment = ReceiptSection {
            title: "Shipment".to_string(),
            lines: vec![
                ReceiptLine::new("Tracking ID", record.tracking_id.to_string()),
                ReceiptLine::new("Service", record.delivery.service_label()),
                ReceiptLine::new("Status", record.status.to_string()),
                ReceiptLine::new("Origin", record.origin.clone()),
                ReceiptLine::new("Destination", record.destination.clone()),
                ReceiptLine::new(
                    "Estimated delivery",
                    record.estimated_delivery.format("%Y-%m-%d").to_string(),
                ),
            ],
        };

        let recipient = &record.recipient;
        let mut recipient_lines = vec![
            ReceiptLine::new("Name", recipient.name.clone()),
            ReceiptLine::new("Address", recipient.address.clone()),
            ReceiptLine::new("City", recipient.destination()),
        ];
        if let Some(zip) = &recipient.zip_code {
            recipient_lines.push(ReceiptLine::new("Zip code", zip.clone()));
        }
        if let Some(phone) = &recipient.phone {
            recipient_lines.push(ReceiptLine::new("Phone", phone.clone()));
        }

        let package = &record.package;
        let mut package_lines = vec![
            ReceiptLine::new("Weight", format!("{} kg", package.weight_kg.normalize())),
            ReceiptLine::new("Dimensions", package.dimensions_label()),
            ReceiptLine::new(
                "Type",
                if package.is_fragile { "Fragile" } else { "Standard" },
            ),
            ReceiptLine::new(
                "Declared value",
                format!("{} {}", format_money(package.declared_value), package.currency),
            ),
        ];
        if let Some(description) = &package.description {
            package_lines.push(ReceiptLine::new("Contents", description.clone()));
        }

        let costs = &record.costs;
        let mut cost_lines: Vec<ReceiptLine> = costs
            .charged_items()
            .into_iter()
            .map(|item| ReceiptLine::new(item.label, format_money(item.amount)))
            .collect();
        cost_lines.push(ReceiptLine::new("Subtotal", format_money(costs.subtotal)));
        cost_lines.push(ReceiptLine::new(
            format!("IVA ({}%)", costs.tax_percent()),
            format_money(costs.tax),
        ));
        cost_lines.push(ReceiptLine::new("Total", format_money(costs.total)));

        Self {
            tracking_id: record.tracking_id.to_string(),
            sections: vec![
                shipment,
                ReceiptSection {
                    title: "Recipient".to_string(),
                    lines: recipient_lines,
                },
                ReceiptSection {
                    title: "Package".to_string(),
                    lines: package_lines,
                },
                ReceiptSection {
                    title: "Costs".to_string(),
                    lines: cost_lines,
                },
            ],
        }
    }

    /// Value of the first line with `label`, in any section
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter())
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }

    /// Suggested file name for an exported receipt
    pub fn file_name(&self) -> String {
        format!("Shipment-{}.txt", self.tracking_id)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SHIPMENT RECEIPT")?;
        writeln!(f, "{}", self.tracking_id)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "[{}]", section.title)?;
            let width = section
                .lines
                .iter()
                .map(|line| line.label.chars().count())
                .max()
                .unwrap_or(0);
            for line in &section.lines {
                writeln!(f, "  {:<width$}  {}", line.label, line.value, width = width)?;
            }
        }
        Ok(())
    }
}
