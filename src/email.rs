use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{LendingError, Result};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Invalid regex pattern");
}

/// validated, lower-cased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LendingError::InvalidEmail {
                message: "email cannot be empty".to_string(),
            });
        }
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(LendingError::InvalidEmail {
                message: format!("invalid email format: {trimmed}"),
            });
        }
        Ok(Email(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// part after the @
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }

    /// part before the @
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = LendingError;

    fn from_str(s: &str) -> Result<Self> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = LendingError;

    fn try_from(value: String) -> Result<Self> {
        Email::new(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        let email = Email::new("  Max.Mustermann@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "max.mustermann@example.com");
        assert_eq!(email.local_part(), "max.mustermann");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_rejected() {
        for bad in ["", "   ", "no-at-sign", "a@b", "a@b.c", "two@@example.com", "sp ace@example.com"] {
            let err = Email::new(bad).unwrap_err();
            assert!(matches!(err, LendingError::InvalidEmail { .. }), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_email_serde() {
        let email: Email = serde_json::from_str(r#""Jane@Example.org""#).unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), r#""jane@example.org""#);
        assert!(serde_json::from_str::<Email>(r#""nope""#).is_err());
    }
}
