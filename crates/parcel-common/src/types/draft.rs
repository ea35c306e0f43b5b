//! Shipment draft - the multi-step shipment wizard as an immutable value
//!
//! A draft moves through three steps:
//! - Package: weight, dimensions, fragility
//! - Recipient: who receives it and how fast
//! - Review: everything entered, ready to quote and confirm
//!
//! Every transition returns a new draft; the previous one is left untouched
//! so a caller can keep it for "back" navigation or comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{delivery::DeliveryPreference, package::PackageDetails, recipient::Recipient};
use crate::error::{DraftError, Result};

/// Wizard step a draft is currently at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStep {
    #[default]
    Package,
    Recipient,
    Review,
}

impl DraftStep {
    /// 1-based step number as shown in the wizard header
    pub fn number(&self) -> u8 {
        match self {
            DraftStep::Package => 1,
            DraftStep::Recipient => 2,
            DraftStep::Review => 3,
        }
    }
}

impl fmt::Display for DraftStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftStep::Package => write!(f, "package"),
            DraftStep::Recipient => write!(f, "recipient"),
            DraftStep::Review => write!(f, "review"),
        }
    }
}

/// In-progress shipment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDraft {
    pub step: DraftStep,
    pub package: Option<PackageDetails>,
    pub recipient: Option<Recipient>,
    pub delivery: DeliveryPreference,
}

impl ShipmentDraft {
    /// Start an empty draft at the package step
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with the package details replaced
    pub fn with_package(&self, package: PackageDetails) -> Self {
        Self {
            package: Some(package),
            ..self.clone()
        }
    }

    /// Draft with the recipient replaced
    pub fn with_recipient(&self, recipient: Recipient) -> Self {
        Self {
            recipient: Some(recipient),
            ..self.clone()
        }
    }

    /// Draft with a different delivery speed
    pub fn with_delivery(&self, delivery: DeliveryPreference) -> Self {
        Self {
            delivery,
            ..self.clone()
        }
    }

    /// Move to the next step after validating the current one
    pub fn advance(&self) -> Result<Self> {
        let next = match self.step {
            DraftStep::Package => {
                self.package()?.validate()?;
                DraftStep::Recipient
            }
            DraftStep::Recipient => {
                self.recipient()?.validate()?;
                DraftStep::Review
            }
            DraftStep::Review => return Err(DraftError::AlreadyReviewed.into()),
        };

        Ok(Self {
            step: next,
            ..self.clone()
        })
    }

    /// Move to the previous step, keeping everything entered so far
    pub fn back(&self) -> Self {
        let step = match self.step {
            DraftStep::Package | DraftStep::Recipient => DraftStep::Package,
            DraftStep::Review => DraftStep::Recipient,
        };
        Self {
            step,
            ..self.clone()
        }
    }

    /// Fail unless the draft is at `expected`
    pub fn ensure_step(&self, expected: DraftStep) -> std::result::Result<(), DraftError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(DraftError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    pub fn package(&self) -> std::result::Result<&PackageDetails, DraftError> {
        self.package.as_ref().ok_or(DraftError::MissingPackage)
    }

    pub fn recipient(&self) -> std::result::Result<&Recipient, DraftError> {
        self.recipient.as_ref().ok_or(DraftError::MissingRecipient)
    }

    pub fn is_ready_for_review(&self) -> bool {
        self.step == DraftStep::Review
    }
}
