use log::debug;
use rust_decimal::Decimal;

use crate::decimal::{quantize, Money, Percentage};
use crate::errors::{LendingError, Result};
use crate::payments::LoanCalculation;

/// flat monthly amortization over exact decimals
///
/// All figures are derived from the closed-form annuity formula
/// `M = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the nominal annual rate over
/// twelve. A zero rate degenerates to `P / n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanCalculator;

impl LoanCalculator {
    /// monthly installment for the given principal, annual rate and term
    pub fn calculate_monthly_payment(
        principal: Money,
        annual_interest_rate: Percentage,
        term_months: u32,
    ) -> Result<Money> {
        if term_months == 0 {
            return Err(LendingError::invalid_loan(format!(
                "term must be positive, got {term_months}"
            )));
        }

        if !principal.is_positive() {
            return Err(LendingError::invalid_loan("principal must be positive"));
        }

        if annual_interest_rate.is_zero() {
            // Money rounds the quotient
            return Ok(Money::new(
                principal.amount() / Decimal::from(term_months),
                principal.currency(),
            ));
        }

        let r = annual_interest_rate.to_monthly_rate();
        let compound = compound_factor(r, term_months)?;

        let numerator = r * compound;
        let denominator = compound - Decimal::ONE;

        let payment = principal
            .amount()
            .checked_mul(numerator / denominator)
            .ok_or_else(|| LendingError::invalid_loan("monthly payment overflows"))?;

        Ok(Money::new(quantize(payment), principal.currency()))
    }

    /// sum of all installments
    pub fn calculate_total_payment(monthly_payment: Money, term_months: u32) -> Result<Money> {
        if term_months == 0 {
            return Err(LendingError::invalid_loan("term must be positive"));
        }

        monthly_payment.multiply(term_months)
    }

    /// total paid minus the principal borrowed
    pub fn calculate_total_interest(total_payment: Money, principal: Money) -> Result<Money> {
        if total_payment.currency() != principal.currency() {
            return Err(LendingError::invalid_loan(
                "total payment and principal must be in same currency",
            ));
        }

        total_payment.checked_sub(&principal)
    }

    /// monthly payment, total payment and total interest in one pass
    pub fn calculate_all(
        principal: Money,
        annual_interest_rate: Percentage,
        term_months: u32,
    ) -> Result<LoanCalculation> {
        let monthly_payment =
            Self::calculate_monthly_payment(principal, annual_interest_rate, term_months)?;
        let total_payment = Self::calculate_total_payment(monthly_payment, term_months)?;
        let total_interest = Self::calculate_total_interest(total_payment, principal)?;

        if total_interest.is_negative() {
            debug!("rounding leaves total interest negative: {}", total_interest);
        }

        debug!(
            "loan of {} at {} over {} months: monthly {}, total {}, interest {}",
            principal, annual_interest_rate, term_months, monthly_payment, total_payment, total_interest
        );

        Ok(LoanCalculation {
            monthly_payment,
            total_payment,
            total_interest,
        })
    }
}

/// (1 + r)^n by repeated squaring
fn compound_factor(monthly_rate: Decimal, months: u32) -> Result<Decimal> {
    let overflow = || {
        LendingError::invalid_loan(format!("compound factor overflows for {months} months"))
    };

    let mut base = Decimal::ONE + monthly_rate;
    let mut exp = months;
    let mut compound = Decimal::ONE;

    while exp > 0 {
        if exp & 1 == 1 {
            compound = compound.checked_mul(base).ok_or_else(overflow)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base).ok_or_else(overflow)?;
        }
    }

    Ok(compound)
}
