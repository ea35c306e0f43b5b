//! Delivery speed selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PricingError;

/// Delivery speed chosen by the sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPreference {
    /// 3-5 business days
    #[default]
    Standard,
    /// 1-2 business days
    Express,
    /// Next day
    Overnight,
}

impl DeliveryPreference {
    pub const ALL: [DeliveryPreference; 3] = [
        DeliveryPreference::Standard,
        DeliveryPreference::Express,
        DeliveryPreference::Overnight,
    ];

    /// Interpret a form value, falling back to standard for anything unknown
    pub fn from_form_value(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!(value, "Unrecognised delivery preference, using standard");
            DeliveryPreference::Standard
        })
    }

    /// Wire name used in forms and stored records
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryPreference::Standard => "standard",
            DeliveryPreference::Express => "express",
            DeliveryPreference::Overnight => "overnight",
        }
    }

    /// Human-readable service name
    pub fn service_label(&self) -> &'static str {
        match self {
            DeliveryPreference::Standard => "Standard Shipping",
            DeliveryPreference::Express => "Express Shipping",
            DeliveryPreference::Overnight => "Overnight Shipping",
        }
    }
}

impl fmt::Display for DeliveryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryPreference {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(DeliveryPreference::Standard),
            "express" => Ok(DeliveryPreference::Express),
            "overnight" => Ok(DeliveryPreference::Overnight),
            other => Err(PricingError::invalid(format!(
                "unknown delivery preference '{other}'"
            ))),
        }
    }
}
