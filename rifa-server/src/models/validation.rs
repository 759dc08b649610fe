//! Validation error and buyer-input newtypes

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for a buyer name.
const MAX_BUYER_NAME_LEN: usize = 120;

/// Phone pattern: digits with the usual separators, 7-20 chars.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9()+\-\s]{7,20}$").expect("invalid phone regex"));

/// Validation error for request fields
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validated buyer name (trimmed, non-empty, bounded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerName(String);

impl BuyerName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "buyer name",
            });
        }

        if trimmed.len() > MAX_BUYER_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "buyer name",
                max: MAX_BUYER_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BuyerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated buyer phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "phone" });
        }

        if !PHONE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "phone",
                reason: "must be 7-20 digits with optional ()+- separators",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_name_trims_and_accepts() {
        let name = BuyerName::new("  Joe  ").unwrap();
        assert_eq!(name.as_str(), "Joe");
    }

    #[test]
    fn buyer_name_rejects_empty() {
        assert!(matches!(
            BuyerName::new("   "),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn buyer_name_rejects_too_long() {
        let long = "a".repeat(MAX_BUYER_NAME_LEN + 1);
        assert!(matches!(
            BuyerName::new(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn phone_accepts_common_formats() {
        assert!(Phone::new("555-0100").is_ok());
        assert!(Phone::new("(11) 98765-4321").is_ok());
        assert!(Phone::new("+55 11 98765 4321").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_short() {
        assert!(Phone::new("call-me").is_err());
        assert!(Phone::new("123").is_err());
        assert!(matches!(
            Phone::new(""),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "buyer name",
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "buyer name exceeds maximum length of 120 characters"
        );
    }
}
