//! Sender feedback on a delivered shipment

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// Lowest and highest star scores
pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// Star ratings left after delivery
///
/// A score of `0` means the sender did not pick any stars. Only the overall
/// score is required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceRating {
    pub overall: u8,
    pub speed: Option<u8>,
    pub communication: Option<u8>,
    pub packaging: Option<u8>,
    pub comment: Option<String>,
}

impl ExperienceRating {
    pub fn new(overall: u8) -> Self {
        Self {
            overall,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, stars: u8) -> Self {
        self.speed = Some(stars);
        self
    }

    pub fn with_communication(mut self, stars: u8) -> Self {
        self.communication = Some(stars);
        self
    }

    pub fn with_packaging(mut self, stars: u8) -> Self {
        self.packaging = Some(stars);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.trim().is_empty()).then_some(comment);
        self
    }

    /// Overall score present, every given score within 1..=5
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.overall == 0 {
            return Err(RatingError::MissingOverall);
        }

        let scores = [
            ("overall", Some(self.overall)),
            ("speed", self.speed),
            ("communication", self.communication),
            ("packaging", self.packaging),
        ];
        for (category, stars) in scores {
            if let Some(stars) = stars {
                if !(MIN_STARS..=MAX_STARS).contains(&stars) {
                    return Err(RatingError::OutOfRange { category, stars });
                }
            }
        }
        Ok(())
    }

    /// Overall score drawn as filled and empty stars
    pub fn stars(&self) -> String {
        let filled = self.overall.min(MAX_STARS) as usize;
        format!(
            "{}{}",
            "*".repeat(filled),
            "-".repeat(MAX_STARS as usize - filled)
        )
    }
}
