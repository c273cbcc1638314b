use thiserror::Error;

use crate::types::{CustomerId, LoanOfferId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LendingError {
    #[error("invalid money: {message}")]
    InvalidMoney {
        message: String,
    },

    #[error("invalid percentage: {message}")]
    InvalidPercentage {
        message: String,
    },

    #[error("invalid loan parameters: {message}")]
    InvalidLoanParameters {
        message: String,
    },

    #[error("invalid email: {message}")]
    InvalidEmail {
        message: String,
    },

    #[error("validation failed for {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    #[error("customer not found: {id}")]
    CustomerNotFound {
        id: CustomerId,
    },

    #[error("customer with email {email} already exists")]
    CustomerAlreadyExists {
        email: String,
    },

    #[error("loan offer not found: {id}")]
    LoanOfferNotFound {
        id: LoanOfferId,
    },
}

impl LendingError {
    pub(crate) fn invalid_money(message: impl Into<String>) -> Self {
        LendingError::InvalidMoney { message: message.into() }
    }

    pub(crate) fn invalid_percentage(message: impl Into<String>) -> Self {
        LendingError::InvalidPercentage { message: message.into() }
    }

    pub(crate) fn invalid_loan(message: impl Into<String>) -> Self {
        LendingError::InvalidLoanParameters { message: message.into() }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        LendingError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// true for value-object and business-rule violations raised by the domain layer
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            LendingError::InvalidMoney { .. }
                | LendingError::InvalidPercentage { .. }
                | LendingError::InvalidLoanParameters { .. }
                | LendingError::InvalidEmail { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_errors() {
        assert!(LendingError::invalid_money("x").is_domain_error());
        assert!(LendingError::invalid_loan("x").is_domain_error());
        assert!(!LendingError::validation("term_months", "x").is_domain_error());
        assert!(!LendingError::CustomerNotFound { id: Uuid::nil() }.is_domain_error());
    }

    #[test]
    fn test_error_messages() {
        let err = LendingError::validation("loan_amount", "minimum loan amount is 1000 EUR");
        assert_eq!(err.to_string(), "validation failed for loan_amount: minimum loan amount is 1000 EUR");

        let err = LendingError::invalid_percentage("percentage cannot exceed 100: 100.01");
        assert_eq!(err.to_string(), "invalid percentage: percentage cannot exceed 100: 100.01");
    }
}
