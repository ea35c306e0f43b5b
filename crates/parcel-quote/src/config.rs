//! parcel-quote configuration

use anyhow::Result;
use parcel_common::{Currency, DEFAULT_ORIGIN, DEFAULT_TRACKING_PREFIX};
use parcel_pricing::{PricingEngine, RateCard};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Prefix for generated tracking ids
    pub tracking_prefix: String,
    /// Origin stored on confirmed shipments
    pub origin: String,
    /// Currency assumed for declared values when none is given
    pub currency: Currency,
    /// Optional JSON rate card replacing the canonical rates
    pub rates_file: Option<String>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            tracking_prefix: DEFAULT_TRACKING_PREFIX.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            currency: Currency::Mxn,
            rates_file: None,
        }
    }
}

impl QuoteConfig {
    /// Load configuration from the environment (and `.env` if present)
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build configuration from any key lookup; unset keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(prefix) = lookup("PARCEL_TRACKING_PREFIX") {
            cfg.tracking_prefix = prefix.trim().to_ascii_uppercase();
        }
        if let Some(origin) = lookup("PARCEL_ORIGIN") {
            cfg.origin = origin;
        }
        if let Some(currency) = lookup("PARCEL_CURRENCY") {
            match currency.parse() {
                Ok(c) => cfg.currency = c,
                Err(e) => warn!("Ignoring PARCEL_CURRENCY: {}", e),
            }
        }
        if let Some(path) = lookup("PARCEL_RATES_FILE").filter(|p| !p.trim().is_empty()) {
            cfg.rates_file = Some(path);
        }

        cfg
    }

    /// Pricing engine for the configured rate card
    pub fn engine(&self) -> Result<PricingEngine> {
        let rates = match &self.rates_file {
            Some(path) => RateCard::from_json_file(path)?,
            None => RateCard::default(),
        };
        Ok(PricingEngine::new(rates)?)
    }
}
