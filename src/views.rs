//! serializable response shapes
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::loan_offer::LoanOffer;
use crate::payments::LoanCalculation;
use crate::types::{Currency, CustomerId, LoanOfferId};

/// flattened customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerWithLoanOffersView {
    #[serde(flatten)]
    pub customer: CustomerView,
    pub loan_offers: Vec<LoanOfferView>,
}

/// flattened loan offer; amounts are 2-decimal fixed point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOfferView {
    pub id: LoanOfferId,
    pub customer_id: CustomerId,
    pub currency: Currency,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculationView {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

impl CustomerView {
    pub fn from_customer(customer: &Customer) -> Self {
        CustomerView {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.to_string(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

impl CustomerWithLoanOffersView {
    pub fn new(customer: &Customer, offers: &[LoanOffer]) -> Self {
        CustomerWithLoanOffersView {
            customer: CustomerView::from_customer(customer),
            loan_offers: offers.iter().map(LoanOfferView::from_offer).collect(),
        }
    }
}

impl LoanOfferView {
    pub fn from_offer(offer: &LoanOffer) -> Self {
        LoanOfferView {
            id: offer.id,
            customer_id: offer.customer_id,
            currency: offer.currency(),
            loan_amount: offer.principal.amount(),
            interest_rate: offer.interest_rate.value(),
            term_months: offer.term_months,
            monthly_payment: offer.monthly_payment.amount(),
            total_payment: offer.total_payment.amount(),
            total_interest: offer.total_interest.amount(),
            created_at: offer.created_at,
        }
    }
}

impl From<&LoanCalculation> for LoanCalculationView {
    fn from(calculation: &LoanCalculation) -> Self {
        LoanCalculationView {
            monthly_payment: calculation.monthly_payment.amount(),
            total_payment: calculation.total_payment.amount(),
            total_interest: calculation.total_interest.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::NewCustomer;
    use crate::decimal::{Money, Percentage};
    use crate::payments::LoanCalculator;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_calculation_view_json() {
        let calculation = LoanCalculator::calculate_all(
            Money::eur(dec!(12000)),
            Percentage::ZERO,
            12,
        )
        .unwrap();

        let value = serde_json::to_value(LoanCalculationView::from(&calculation)).unwrap();
        assert_eq!(value, json!({
            "monthly_payment": "1000.00",
            "total_payment": "12000.00",
            "total_interest": "0.00",
        }));
    }

    #[test]
    fn test_customer_with_offers_view() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let customer = Customer::register(
            Uuid::new_v4(),
            NewCustomer::new("Erika", "Musterfrau", "erika@example.com"),
            now,
        )
        .unwrap();

        let principal = Money::eur(dec!(10000));
        let rate = Percentage::new(dec!(5.5)).unwrap();
        let offer = LoanOffer::create(
            Uuid::new_v4(),
            customer.id,
            principal,
            rate,
            24,
            LoanCalculator::calculate_all(principal, rate, 24).unwrap(),
            now,
        )
        .unwrap();

        let view = CustomerWithLoanOffersView::new(&customer, std::slice::from_ref(&offer));
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["email"], "erika@example.com");
        assert_eq!(value["loan_offers"][0]["loan_amount"], "10000.00");
        assert_eq!(value["loan_offers"][0]["interest_rate"], "5.50");
        assert_eq!(value["loan_offers"][0]["monthly_payment"], "440.96");
        assert_eq!(value["loan_offers"][0]["currency"], "EUR");

        let parsed: CustomerWithLoanOffersView = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, view);
    }
}
