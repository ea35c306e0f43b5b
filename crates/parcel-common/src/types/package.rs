//! Package details entered in the first step of a shipment
//!
//! Only weight and fragility feed the price. Dimensions and declared value
//! are carried through to the record and receipt for display.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Currency of the declared package value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Mxn,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Mxn => "MXN",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "MXN" => Ok(Currency::Mxn),
            "EUR" => Ok(Currency::Eur),
            other => Err(PricingError::invalid(format!("unknown currency '{other}'"))),
        }
    }
}

/// Physical and declared attributes of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    /// Weight in kilograms
    pub weight_kg: Decimal,
    pub length_cm: Decimal,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    pub is_fragile: bool,
    /// Declared value for insurance purposes
    pub declared_value: Decimal,
    pub currency: Currency,
    pub description: Option<String>,
}

impl PackageDetails {
    /// Create a package with the given weight and no other attributes set
    pub fn new(weight_kg: Decimal) -> Self {
        Self {
            weight_kg,
            length_cm: Decimal::ZERO,
            width_cm: Decimal::ZERO,
            height_cm: Decimal::ZERO,
            is_fragile: false,
            declared_value: Decimal::ZERO,
            currency: Currency::default(),
            description: None,
        }
    }

    /// Set dimensions in centimetres
    pub fn with_dimensions(
        mut self,
        length_cm: Decimal,
        width_cm: Decimal,
        height_cm: Decimal,
    ) -> Self {
        self.length_cm = length_cm;
        self.width_cm = width_cm;
        self.height_cm = height_cm;
        self
    }

    /// Mark the package as fragile
    pub fn with_fragile(mut self, is_fragile: bool) -> Self {
        self.is_fragile = is_fragile;
        self
    }

    /// Set declared value and its currency
    pub fn with_declared_value(mut self, value: Decimal, currency: Currency) -> Self {
        self.declared_value = value;
        self.currency = currency;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the attributes a quote and a record depend on
    ///
    /// Weight must be strictly positive; dimensions and declared value must
    /// not be negative.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.weight_kg <= Decimal::ZERO {
            return Err(PricingError::invalid(format!(
                "weight must be positive, got {}",
                self.weight_kg
            )));
        }
        for (name, value) in [
            ("length", self.length_cm),
            ("width", self.width_cm),
            ("height", self.height_cm),
            ("declared value", self.declared_value),
        ] {
            if value < Decimal::ZERO {
                return Err(PricingError::invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Dimensions formatted as `L x W x H cm`
    pub fn dimensions_label(&self) -> String {
        format!(
            "{} x {} x {} cm",
            self.length_cm.normalize(),
            self.width_cm.normalize(),
            self.height_cm.normalize()
        )
    }
}
