use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::errors::{LendingError, Result};
use crate::types::CustomerId;

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 500;

lazy_static! {
    static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[\d\s\-\(\)]+$").expect("Invalid regex pattern");
}

/// customer that loan offers are issued to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// input for registering a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// partial update; `None` leaves a field untouched, a blank phone or address clears it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }
}

impl CustomerUpdate {
    /// the requested email, validated
    pub fn parsed_email(&self) -> Result<Option<Email>> {
        self.email.as_deref().map(Email::new).transpose()
    }
}

impl Customer {
    /// validate the input and build a customer stamped at `now`
    pub fn register(id: CustomerId, input: NewCustomer, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id,
            first_name: normalize_name("first_name", &input.first_name)?,
            last_name: normalize_name("last_name", &input.last_name)?,
            email: Email::new(&input.email)?,
            phone: normalize_phone(input.phone.as_deref())?,
            address: normalize_address(input.address.as_deref())?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// change phone and/or address; absent values are kept
    pub fn update_contact_info(
        &mut self,
        phone: Option<&str>,
        address: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let phone = phone.map(|p| normalize_phone(Some(p))).transpose()?;
        let address = address.map(|a| normalize_address(Some(a))).transpose()?;

        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(address) = address {
            self.address = address;
        }
        self.updated_at = now;
        Ok(())
    }

    /// apply a partial update; nothing changes unless every field validates
    pub fn apply_update(&mut self, update: &CustomerUpdate, now: DateTime<Utc>) -> Result<()> {
        let first_name = update
            .first_name
            .as_deref()
            .map(|n| normalize_name("first_name", n))
            .transpose()?;
        let last_name = update
            .last_name
            .as_deref()
            .map(|n| normalize_name("last_name", n))
            .transpose()?;
        let email = update.parsed_email()?;

        // validate contact fields on a scratch copy
        let mut staged = self.clone();
        staged.update_contact_info(update.phone.as_deref(), update.address.as_deref(), now)?;

        if let Some(first_name) = first_name {
            staged.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            staged.last_name = last_name;
        }
        if let Some(email) = email {
            staged.email = email;
        }

        *self = staged;
        Ok(())
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

fn normalize_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LendingError::validation(field, "name cannot be empty or just whitespace"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(LendingError::validation(
            field,
            format!("name cannot exceed {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_phone(value: Option<&str>) -> Result<Option<String>> {
    let Some(phone) = value.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if !PHONE_REGEX.is_match(phone) {
        return Err(LendingError::validation("phone", format!("invalid phone number: {phone}")));
    }
    Ok(Some(phone.to_string()))
}

fn normalize_address(value: Option<&str>) -> Result<Option<String>> {
    let Some(address) = value.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(None);
    };
    if address.chars().count() > MAX_ADDRESS_LEN {
        return Err(LendingError::validation(
            "address",
            format!("address cannot exceed {MAX_ADDRESS_LEN} characters"),
        ));
    }
    Ok(Some(address.to_string()))
}
