use std::cmp::Reverse;

use crate::customer::Customer;
use crate::email::Email;
use crate::errors::Result;
use crate::loan_offer::LoanOffer;
use crate::types::{CustomerId, LoanOfferId};

/// storage for customers
pub trait CustomerRepository: Send + Sync {
    fn insert_customer(&mut self, customer: Customer) -> Result<Customer>;
    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>>;
    fn find_customer_by_email(&self, email: &Email) -> Result<Option<Customer>>;
    /// newest first
    fn list_customers(&self) -> Result<Vec<Customer>>;
    fn count_customers(&self) -> Result<usize>;
    /// replace a stored customer; `None` when the id is unknown
    fn update_customer(&mut self, customer: Customer) -> Result<Option<Customer>>;
    fn delete_customer(&mut self, id: CustomerId) -> Result<bool>;

    fn customer_email_exists(&self, email: &Email) -> Result<bool> {
        Ok(self.find_customer_by_email(email)?.is_some())
    }
}

/// storage for loan offers
pub trait LoanOfferRepository: Send + Sync {
    fn insert_loan_offer(&mut self, offer: LoanOffer) -> Result<LoanOffer>;
    fn get_loan_offer(&self, id: LoanOfferId) -> Result<Option<LoanOffer>>;
    /// newest first
    fn list_loan_offers_for_customer(&self, customer_id: CustomerId) -> Result<Vec<LoanOffer>>;
    fn count_loan_offers_for_customer(&self, customer_id: CustomerId) -> Result<usize>;
    fn list_loan_offers(&self) -> Result<Vec<LoanOffer>>;
    fn delete_loan_offer(&mut self, id: LoanOfferId) -> Result<bool>;
    /// returns the number of offers removed
    fn delete_loan_offers_for_customer(&mut self, customer_id: CustomerId) -> Result<usize>;
}

/// both repositories, as the lending service needs them
pub trait LendingRepository: CustomerRepository + LoanOfferRepository {}

impl<T: CustomerRepository + LoanOfferRepository> LendingRepository for T {}

/// in-memory repository backed by vectors in insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    customers: Vec<Customer>,
    loan_offers: Vec<LoanOffer>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// newest first, later insertions win ties
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
    sorted.sort_by_key(|item| Reverse(created_at(item)));
    sorted
}

impl CustomerRepository for InMemoryStore {
    fn insert_customer(&mut self, customer: Customer) -> Result<Customer> {
        self.customers.push(customer.clone());
        Ok(customer)
    }

    fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.iter().find(|c| c.id == id).cloned())
    }

    fn find_customer_by_email(&self, email: &Email) -> Result<Option<Customer>> {
        Ok(self.customers.iter().find(|c| &c.email == email).cloned())
    }

    fn list_customers(&self) -> Result<Vec<Customer>> {
        Ok(newest_first(&self.customers, |c| c.created_at))
    }

    fn count_customers(&self) -> Result<usize> {
        Ok(self.customers.len())
    }

    fn update_customer(&mut self, customer: Customer) -> Result<Option<Customer>> {
        match self.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(stored) => {
                *stored = customer.clone();
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }

    fn delete_customer(&mut self, id: CustomerId) -> Result<bool> {
        let before = self.customers.len();
        self.customers.retain(|c| c.id != id);
        Ok(self.customers.len() < before)
    }
}

impl LoanOfferRepository for InMemoryStore {
    fn insert_loan_offer(&mut self, offer: LoanOffer) -> Result<LoanOffer> {
        self.loan_offers.push(offer.clone());
        Ok(offer)
    }

    fn get_loan_offer(&self, id: LoanOfferId) -> Result<Option<LoanOffer>> {
        Ok(self.loan_offers.iter().find(|o| o.id == id).cloned())
    }

    fn list_loan_offers_for_customer(&self, customer_id: CustomerId) -> Result<Vec<LoanOffer>> {
        let offers: Vec<LoanOffer> = self
            .loan_offers
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        Ok(newest_first(&offers, |o| o.created_at))
    }

    fn count_loan_offers_for_customer(&self, customer_id: CustomerId) -> Result<usize> {
        Ok(self
            .loan_offers
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .count())
    }

    fn list_loan_offers(&self) -> Result<Vec<LoanOffer>> {
        Ok(newest_first(&self.loan_offers, |o| o.created_at))
    }

    fn delete_loan_offer(&mut self, id: LoanOfferId) -> Result<bool> {
        let before = self.loan_offers.len();
        self.loan_offers.retain(|o| o.id != id);
        Ok(self.loan_offers.len() < before)
    }

    fn delete_loan_offers_for_customer(&mut self, customer_id: CustomerId) -> Result<usize> {
        let before = self.loan_offers.len();
        self.loan_offers.retain(|o| o.customer_id != customer_id);
        Ok(before - self.loan_offers.len())
    }
}
