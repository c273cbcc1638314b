use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{LendingError, Result};
use crate::types::Currency;

/// lending platform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingConfig {
    /// currency every request is denominated in
    pub currency: Currency,
    pub limits: LoanLimits,
}

/// bounds applied to incoming loan requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanLimits {
    /// exclusive lower bound is zero; this is the inclusive upper bound
    pub max_loan_amount: Decimal,
    /// smallest principal a persisted offer may carry
    pub min_offer_amount: Decimal,
    pub max_interest_rate: Decimal,
    pub min_term_months: u32,
    pub max_term_months: u32,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            max_loan_amount: dec!(1000000),
            min_offer_amount: dec!(1000),
            max_interest_rate: dec!(100),
            min_term_months: 1,
            max_term_months: 360,
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self::for_currency(Currency::EUR)
    }
}

impl LendingConfig {
    /// default limits in another currency
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency,
            limits: LoanLimits::default(),
        }
    }

    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LendingConfig = serde_json::from_str(json).map_err(|e| {
            LendingError::validation("config", format!("cannot parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;

        if limits.max_loan_amount <= Decimal::ZERO {
            return Err(LendingError::validation(
                "max_loan_amount",
                "must be positive",
            ));
        }
        if limits.min_offer_amount > limits.max_loan_amount {
            return Err(LendingError::validation(
                "min_offer_amount",
                format!("must not exceed max_loan_amount {}", limits.max_loan_amount),
            ));
        }
        if limits.max_interest_rate < Decimal::ZERO || limits.max_interest_rate > Decimal::ONE_HUNDRED {
            return Err(LendingError::validation(
                "max_interest_rate",
                "must be between 0 and 100",
            ));
        }
        if limits.min_term_months == 0 || limits.min_term_months > limits.max_term_months {
            return Err(LendingError::validation(
                "min_term_months",
                format!("must be between 1 and max_term_months {}", limits.max_term_months),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = LendingConfig::default();
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.limits.max_loan_amount, dec!(1000000));
        assert_eq!(config.limits.min_offer_amount, dec!(1000));
        assert_eq!(config.limits.max_term_months, 360);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "currency": "USD",
            "limits": {
                "max_loan_amount": "50000",
                "min_offer_amount": "500",
                "max_interest_rate": "36",
                "min_term_months": 6,
                "max_term_months": 84
            }
        }"#;

        let config = LendingConfig::from_json(json).unwrap();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.limits.max_interest_rate, dec!(36));
        assert_eq!(config.limits.min_term_months, 6);
    }

    #[test]
    fn test_config_rejects_inverted_bounds() {
        let mut config = LendingConfig::for_currency(Currency::GBP);
        config.limits.min_offer_amount = dec!(2000000);
        assert!(matches!(config.validate(), Err(LendingError::Validation { .. })));

        let mut config = LendingConfig::default();
        config.limits.min_term_months = 0;
        assert!(config.validate().is_err());

        assert!(LendingConfig::from_json(r#"{"currency": "JPY"}"#).is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = LendingConfig::for_currency(Currency::GBP);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LendingConfig::from_json(&json).unwrap(), config);
    }
}
