//! Tracking identifiers for confirmed shipments
//!
//! Format: `PREFIX-YYYY-NNNNNN`, e.g. `TRK-2025-482913`
//! - PREFIX: 2-8 uppercase ASCII letters
//! - YYYY: four-digit year the shipment was confirmed
//! - NNNNNN: six-digit random suffix (100000-999999)

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TrackingError;

/// Smallest six-digit suffix
pub const MIN_SUFFIX: u32 = 100_000;

/// Largest six-digit suffix
pub const MAX_SUFFIX: u32 = 999_999;

/// Attempts made before giving up on finding an unused id
pub const MAX_GENERATION_ATTEMPTS: u32 = 32;

/// Shipment tracking identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId {
    prefix: String,
    year: i32,
    suffix: u32,
}

impl TrackingId {
    /// Build an id from its parts, validating each
    pub fn new(prefix: &str, year: i32, suffix: u32) -> Result<Self, TrackingError> {
        validate_prefix(prefix)?;
        if !(1000..=9999).contains(&year) {
            return Err(TrackingError::Malformed(format!("year {year} is not four digits")));
        }
        if !(MIN_SUFFIX..=MAX_SUFFIX).contains(&suffix) {
            return Err(TrackingError::Malformed(format!(
                "suffix {suffix} is not six digits"
            )));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            year,
            suffix,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn suffix(&self) -> u32 {
        self.suffix
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{:06}", self.prefix, self.year, self.suffix)
    }
}

impl FromStr for TrackingId {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('-');
        let (Some(prefix), Some(year), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TrackingError::Malformed(trimmed.to_string()));
        };

        if year.len() != 4 || suffix.len() != 6 {
            return Err(TrackingError::Malformed(trimmed.to_string()));
        }
        if !year.bytes().chain(suffix.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(TrackingError::Malformed(trimmed.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| TrackingError::Malformed(trimmed.to_string()))?;
        let suffix: u32 = suffix
            .parse()
            .map_err(|_| TrackingError::Malformed(trimmed.to_string()))?;

        Self::new(&prefix.to_ascii_uppercase(), year, suffix)
    }
}

impl TryFrom<String> for TrackingId {
    type Error = TrackingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackingId> for String {
    fn from(id: TrackingId) -> Self {
        id.to_string()
    }
}

fn validate_prefix(prefix: &str) -> Result<(), TrackingError> {
    let valid = (2..=8).contains(&prefix.len()) && prefix.bytes().all(|b| b.is_ascii_uppercase());
    if valid {
        Ok(())
    } else {
        Err(TrackingError::InvalidPrefix(prefix.to_string()))
    }
}

/// Generates tracking ids for one prefix and year
#[derive(Debug, Clone)]
pub struct TrackingIdGenerator {
    prefix: String,
    year: i32,
}

impl TrackingIdGenerator {
    pub fn new(prefix: &str, year: i32) -> Result<Self, TrackingError> {
        let prefix = prefix.trim().to_ascii_uppercase();
        validate_prefix(&prefix)?;
        // Reuse the id validation for the year
        TrackingId::new(&prefix, year, MIN_SUFFIX)?;
        Ok(Self { prefix, year })
    }

    /// Generator for the current UTC year
    pub fn for_current_year(prefix: &str) -> Result<Self, TrackingError> {
        Self::new(prefix, chrono::Utc::now().year())
    }

    /// Draw a random id
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TrackingId {
        TrackingId {
            prefix: self.prefix.clone(),
            year: self.year,
            suffix: rng.gen_range(MIN_SUFFIX..=MAX_SUFFIX),
        }
    }

    /// Draw an id not present in `taken`
    ///
    /// Uniqueness across the whole system is the store's responsibility; this
    /// only avoids ids the caller already knows about.
    pub fn generate_unique<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        taken: &HashSet<TrackingId>,
    ) -> Result<TrackingId, TrackingError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let id = self.generate(rng);
            if !taken.contains(&id) {
                return Ok(id);
            }
        }
        Err(TrackingError::Exhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_display_format() {
        let id = TrackingId::new("TRK", 2025, 123456).unwrap();
        assert_eq!(id.to_string(), "TRK-2025-123456");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed: TrackingId = "trk-2025-482913".parse().unwrap();
        assert_eq!(parsed.to_string(), "TRK-2025-482913");
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.suffix(), 482913);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "TRK",
            "TRK-2025",
            "TRK-25-123456",
            "TRK-2025-12345",
            "TRK-2025-1234567",
            "TRK-2025-12a456",
            "TRK-2025-123456-1",
            "T-2025-123456",
            "TRK1-2025-123456",
            // leading zeros fall below the generated range
            "ENV-2024-001234",
        ] {
            assert!(bad.parse::<TrackingId>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let id = TrackingId::new("TRK", 2025, 654321).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"TRK-2025-654321\"");
        let back: TrackingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<TrackingId>("\"nope\"").is_err());
    }

    #[test]
    fn test_generator_rejects_bad_prefix() {
        assert!(matches!(
            TrackingIdGenerator::new("T", 2025),
            Err(TrackingError::InvalidPrefix(_))
        ));
        assert!(TrackingIdGenerator::new("trk", 2025).is_ok());
    }

    #[test]
    fn test_generated_ids_parse() {
        let generator = TrackingIdGenerator::new("TRK", 2025).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = generator.generate(&mut rng);
            assert!((MIN_SUFFIX..=MAX_SUFFIX).contains(&id.suffix()));
            assert_eq!(id.to_string().parse::<TrackingId>().unwrap(), id);
        }
    }

    #[test]
    fn test_generate_unique_skips_taken() {
        let generator = TrackingIdGenerator::new("TRK", 2025).unwrap();
        let first = generator.generate(&mut StdRng::seed_from_u64(1));

        let mut taken = HashSet::new();
        taken.insert(first.clone());

        let id = generator
            .generate_unique(&mut StdRng::seed_from_u64(1), &taken)
            .unwrap();
        assert_ne!(id, first);
    }
}
