use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanLimits;
use crate::decimal::{quantize, Money, Percentage};
use crate::errors::{LendingError, Result};
use crate::payments::LoanCalculation;
use crate::types::{Currency, CustomerId, LoanOfferId};

/// a priced loan offered to a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOffer {
    pub id: LoanOfferId,
    pub customer_id: CustomerId,
    pub principal: Money,
    pub interest_rate: Percentage,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub created_at: DateTime<Utc>,
}

impl LoanOffer {
    /// build an offer from calculated figures, checking the business rules
    pub fn create(
        id: LoanOfferId,
        customer_id: CustomerId,
        principal: Money,
        interest_rate: Percentage,
        term_months: u32,
        calculation: LoanCalculation,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if term_months == 0 {
            return Err(LendingError::invalid_loan(format!(
                "term must be positive, got {term_months}"
            )));
        }

        if !principal.is_positive() {
            return Err(LendingError::invalid_loan("principal must be positive"));
        }

        let currency = principal.currency();
        if [
            calculation.monthly_payment,
            calculation.total_payment,
            calculation.total_interest,
        ]
        .iter()
        .any(|m| m.currency() != currency)
        {
            return Err(LendingError::invalid_loan(
                "all money amounts must be in same currency",
            ));
        }

        Ok(Self {
            id,
            customer_id,
            principal,
            interest_rate,
            term_months,
            monthly_payment: calculation.monthly_payment,
            total_payment: calculation.total_payment,
            total_interest: calculation.total_interest,
            created_at,
        })
    }

    pub fn is_interest_free(&self) -> bool {
        self.interest_rate.is_zero()
    }

    /// nominal annual rate; monthly compounding is not reflected
    pub fn effective_annual_rate(&self) -> Percentage {
        self.interest_rate
    }

    pub fn currency(&self) -> Currency {
        self.principal.currency()
    }

    pub fn calculation(&self) -> LoanCalculation {
        LoanCalculation {
            monthly_payment: self.monthly_payment,
            total_payment: self.total_payment,
            total_interest: self.total_interest,
        }
    }
}

impl PartialEq for LoanOffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LoanOffer {}

/// request for a one-off calculation that is not persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCalculationRequest {
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
}

/// request for an offer issued to an existing customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanOfferRequest {
    pub customer_id: CustomerId,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
}

/// request terms after rounding and bounds checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    pub principal: Money,
    pub interest_rate: Percentage,
    pub term_months: u32,
}

impl LoanCalculationRequest {
    pub fn new(loan_amount: Decimal, interest_rate: Decimal, term_months: u32) -> Self {
        Self {
            loan_amount,
            interest_rate,
            term_months,
        }
    }

    pub fn validate(&self, limits: &LoanLimits, currency: Currency) -> Result<LoanTerms> {
        validate_terms(
            self.loan_amount,
            self.interest_rate,
            self.term_months,
            limits,
            currency,
        )
    }
}

impl LoanOfferRequest {
    pub fn new(
        customer_id: CustomerId,
        loan_amount: Decimal,
        interest_rate: Decimal,
        term_months: u32,
    ) -> Self {
        Self {
            customer_id,
            loan_amount,
            interest_rate,
            term_months,
        }
    }

    /// same checks as a calculation plus the minimum offer amount
    pub fn validate(&self, limits: &LoanLimits, currency: Currency) -> Result<LoanTerms> {
        let terms = validate_terms(
            self.loan_amount,
            self.interest_rate,
            self.term_months,
            limits,
            currency,
        )?;

        if terms.principal.amount() < limits.min_offer_amount {
            return Err(LendingError::validation(
                "loan_amount",
                format!("minimum loan amount is {} {}", limits.min_offer_amount, currency),
            ));
        }

        Ok(terms)
    }
}

fn validate_terms(
    loan_amount: Decimal,
    interest_rate: Decimal,
    term_months: u32,
    limits: &LoanLimits,
    currency: Currency,
) -> Result<LoanTerms> {
    let amount = quantize(loan_amount);
    if amount <= Decimal::ZERO || amount > limits.max_loan_amount {
        return Err(LendingError::validation(
            "loan_amount",
            format!("must be greater than 0 and at most {}", limits.max_loan_amount),
        ));
    }

    let rate = quantize(interest_rate);
    if rate < Decimal::ZERO || rate > limits.max_interest_rate {
        return Err(LendingError::validation(
            "interest_rate",
            format!("must be between 0 and {}", limits.max_interest_rate),
        ));
    }

    if term_months < limits.min_term_months || term_months > limits.max_term_months {
        return Err(LendingError::validation(
            "term_months",
            format!(
                "must be between {} and {}",
                limits.min_term_months, limits.max_term_months
            ),
        ));
    }

    Ok(LoanTerms {
        principal: Money::new(amount, currency),
        interest_rate: Percentage::new(rate)?,
        term_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::LoanCalculator;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_create_offer() {
        let principal = Money::eur(dec!(10000));
        let rate = Percentage::new(dec!(5.5)).unwrap();
        let calculation = LoanCalculator::calculate_all(principal, rate, 24).unwrap();

        let offer = LoanOffer::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            principal,
            rate,
            24,
            calculation,
            created_at(),
        )
        .unwrap();

        assert_eq!(offer.monthly_payment, Money::eur(dec!(440.96)));
        assert_eq!(offer.calculation(), calculation);
        assert!(!offer.is_interest_free());
        assert_eq!(offer.effective_annual_rate(), rate);
        assert_eq!(offer.currency(), Currency::EUR);
    }

    #[test]
    fn test_create_rejects_mixed_currencies() {
        let principal = Money::eur(dec!(1000));
        let calculation = LoanCalculation {
            monthly_payment: Money::new(dec!(100), Currency::USD),
            total_payment: Money::eur(dec!(1200)),
            total_interest: Money::eur(dec!(200)),
        };

        let err = LoanOffer::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            principal,
            Percentage::ZERO,
            12,
            calculation,
            created_at(),
        )
        .unwrap_err();
        assert!(matches!(err, LendingError::InvalidLoanParameters { .. }));
    }

    #[test]
    fn test_create_rejects_bad_terms() {
        let calculation = LoanCalculation {
            monthly_payment: Money::eur(dec!(0)),
            total_payment: Money::eur(dec!(0)),
            total_interest: Money::eur(dec!(0)),
        };

        assert!(LoanOffer::create(
            Uuid::new_v4(), Uuid::new_v4(), Money::eur(dec!(1000)), Percentage::ZERO, 0, calculation, created_at(),
        ).is_err());
        assert!(LoanOffer::create(
            Uuid::new_v4(), Uuid::new_v4(), Money::eur(dec!(0)), Percentage::ZERO, 12, calculation, created_at(),
        ).is_err());
    }

    #[test]
    fn test_interest_free_offer() {
        let principal = Money::eur(dec!(1200));
        let calculation = LoanCalculator::calculate_all(principal, Percentage::ZERO, 12).unwrap();
        let offer = LoanOffer::create(
            Uuid::new_v4(), Uuid::new_v4(), principal, Percentage::ZERO, 12, calculation, created_at(),
        )
        .unwrap();
        assert!(offer.is_interest_free());
    }

    #[test]
    fn test_calculation_request_rounds_then_validates() {
        let limits = LoanLimits::default();
        let request = LoanCalculationRequest::new(dec!(10000.005), dec!(5.499), 24);

        let terms = request.validate(&limits, Currency::EUR).unwrap();
        assert_eq!(terms.principal, Money::eur(dec!(10000.01)));
        assert_eq!(terms.interest_rate.value(), dec!(5.50));
        assert_eq!(terms.term_months, 24);

        // small amounts are fine for a calculation
        assert!(LoanCalculationRequest::new(dec!(50), dec!(1), 1).validate(&limits, Currency::EUR).is_ok());
    }

    #[test]
    fn test_calculation_request_bounds() {
        let limits = LoanLimits::default();
        let field_of = |request: LoanCalculationRequest| match request.validate(&limits, Currency::EUR) {
            Err(LendingError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        };

        assert_eq!(field_of(LoanCalculationRequest::new(dec!(0), dec!(5), 12)), "loan_amount");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(0.004), dec!(5), 12)), "loan_amount");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(1000000.01), dec!(5), 12)), "loan_amount");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(1000), dec!(-0.01), 12)), "interest_rate");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(1000), dec!(100.01), 12)), "interest_rate");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(1000), dec!(5), 0)), "term_months");
        assert_eq!(field_of(LoanCalculationRequest::new(dec!(1000), dec!(5), 361)), "term_months");

        assert!(LoanCalculationRequest::new(dec!(1000000), dec!(100), 360).validate(&limits, Currency::EUR).is_ok());
    }

    #[test]
    fn test_offer_request_minimum_amount() {
        let limits = LoanLimits::default();
        let customer_id = Uuid::new_v4();

        let err = LoanOfferRequest::new(customer_id, dec!(999.99), dec!(5), 12)
            .validate(&limits, Currency::EUR)
            .unwrap_err();
        assert!(matches!(err, LendingError::Validation { ref field, .. } if field == "loan_amount"));

        assert!(LoanOfferRequest::new(customer_id, dec!(1000), dec!(5), 12).validate(&limits, Currency::EUR).is_ok());
        // rounds up into range
        assert!(LoanOfferRequest::new(customer_id, dec!(999.995), dec!(5), 12).validate(&limits, Currency::EUR).is_ok());
    }

    #[test]
    fn test_request_deserialize() {
        let json = r#"{"loan_amount": "10000.00", "interest_rate": "5.5", "term_months": 24}"#;
        let request: LoanCalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, LoanCalculationRequest::new(dec!(10000), dec!(5.5), 24));
    }
}
