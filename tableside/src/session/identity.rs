//! Diner identity
//!
//! Registration never leaves the device. The backend only ever sees
//! these fields inside order payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Full name is required")]
    MissingName,

    #[error("Phone number is required")]
    MissingPhone,
}

/// Locally registered diner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub fullname: String,
    pub phone_number: String,
}

impl UserIdentity {
    /// Validate login input and build an identity
    pub fn new(fullname: &str, phone_number: &str) -> Result<Self, IdentityError> {
        let fullname = fullname.trim();
        let phone_number = phone_number.trim();
        if fullname.is_empty() {
            return Err(IdentityError::MissingName);
        }
        if phone_number.is_empty() {
            return Err(IdentityError::MissingPhone);
        }
        Ok(Self {
            fullname: fullname.to_string(),
            phone_number: phone_number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_input() {
        let user = UserIdentity::new("  Asha Rao ", " 555-0101 ").unwrap();
        assert_eq!(user.fullname, "Asha Rao");
        assert_eq!(user.phone_number, "555-0101");
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        assert_eq!(
            UserIdentity::new("   ", "555-0101"),
            Err(IdentityError::MissingName)
        );
        assert_eq!(
            UserIdentity::new("Asha Rao", ""),
            Err(IdentityError::MissingPhone)
        );
    }

    #[test]
    fn test_wire_key_spelling() {
        let user = UserIdentity::new("Asha Rao", "555-0101").unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullname"], "Asha Rao");
        assert_eq!(json["phoneNumber"], "555-0101");
    }
}
