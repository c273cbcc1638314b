pub mod amortization;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::Currency;

pub use amortization::LoanCalculator;

/// aggregate figures for one loan, all in the principal's currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl LoanCalculation {
    pub fn currency(&self) -> Currency {
        self.monthly_payment.currency()
    }
}
