//! Recipient information entered in the second step of a shipment

use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Person and address a shipment is delivered to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub special_instructions: Option<String>,
}

impl Recipient {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: None,
            zip_code: None,
            country: crate::DEFAULT_COUNTRY.to_string(),
            phone: None,
            email: None,
            special_instructions: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_special_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    /// Name, address and city must be filled in
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingField("name"));
        }
        if self.address.trim().is_empty() {
            return Err(DraftError::MissingField("address"));
        }
        if self.city.trim().is_empty() {
            return Err(DraftError::MissingField("city"));
        }
        Ok(())
    }

    /// Destination shown in listings, e.g. `Guadalajara, Jalisco`
    pub fn destination(&self) -> String {
        match self.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}", self.city.trim(), state),
            None => self.city.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_address_city() {
        assert!(Recipient::new("Ana", "Calle 1", "Puebla").validate().is_ok());
        assert_eq!(
            Recipient::new(" ", "Calle 1", "Puebla").validate(),
            Err(DraftError::MissingField("name"))
        );
        assert_eq!(
            Recipient::new("Ana", "", "Puebla").validate(),
            Err(DraftError::MissingField("address"))
        );
        assert_eq!(
            Recipient::new("Ana", "Calle 1", "").validate(),
            Err(DraftError::MissingField("city"))
        );
    }

    #[test]
    fn test_destination() {
        let recipient = Recipient::new("Ana", "Calle 1", "Guadalajara");
        assert_eq!(recipient.destination(), "Guadalajara");
        assert_eq!(
            recipient.with_state("Jalisco").destination(),
            "Guadalajara, Jalisco"
        );
    }

    #[test]
    fn test_default_country() {
        assert_eq!(Recipient::new("Ana", "Calle 1", "Puebla").country, "México");
    }
}
