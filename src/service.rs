use hourglass_rs::SafeTimeProvider;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::LendingConfig;
use crate::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::errors::{LendingError, Result};
use crate::events::{Event, EventStore};
use crate::loan_offer::{LoanCalculationRequest, LoanOffer, LoanOfferRequest};
use crate::payments::{LoanCalculation, LoanCalculator};
use crate::repository::LendingRepository;
use crate::types::{CustomerId, LoanOfferId};
use crate::views::{CustomerView, CustomerWithLoanOffersView, LoanCalculationView, LoanOfferView};

/// customer and loan offer use cases over a repository
///
/// Every operation that reads before it writes runs under one `&mut self`
/// borrow and finishes validating before the first write, so a failed call
/// leaves the repository untouched.
pub struct LendingService<'a, R: LendingRepository> {
    repository: R,
    config: LendingConfig,
    time: &'a SafeTimeProvider,
    events: EventStore,
}

impl<'a, R: LendingRepository> LendingService<'a, R> {
    pub fn new(repository: R, config: LendingConfig, time: &'a SafeTimeProvider) -> Self {
        Self {
            repository,
            config,
            time,
            events: EventStore::new(),
        }
    }

    pub fn config(&self) -> &LendingConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    // customers

    pub fn create_customer(&mut self, input: NewCustomer) -> Result<CustomerView> {
        let now = self.time.now();
        let customer = Customer::register(Uuid::new_v4(), input, now)?;

        if self.repository.customer_email_exists(&customer.email)? {
            warn!("rejected duplicate customer email {}", customer.email);
            return Err(LendingError::CustomerAlreadyExists {
                email: customer.email.to_string(),
            });
        }

        let customer = self.repository.insert_customer(customer)?;
        info!("registered customer {}", customer.id);

        self.events.emit(Event::CustomerRegistered {
            customer_id: customer.id,
            email: customer.email.clone(),
            timestamp: now,
        });

        Ok(CustomerView::from_customer(&customer))
    }

    pub fn get_customer(&self, id: CustomerId) -> Result<CustomerView> {
        let customer = self.require_customer(id)?;
        Ok(CustomerView::from_customer(&customer))
    }

    pub fn get_customer_with_loan_offers(&self, id: CustomerId) -> Result<CustomerWithLoanOffersView> {
        let customer = self.require_customer(id)?;
        let offers = self.repository.list_loan_offers_for_customer(id)?;
        Ok(CustomerWithLoanOffersView::new(&customer, &offers))
    }

    /// all customers, newest first, with the total count
    pub fn list_customers(&self) -> Result<(Vec<CustomerView>, usize)> {
        let customers = self.repository.list_customers()?;
        let total = self.repository.count_customers()?;
        Ok((customers.iter().map(CustomerView::from_customer).collect(), total))
    }

    pub fn update_customer(&mut self, id: CustomerId, update: CustomerUpdate) -> Result<CustomerView> {
        let mut customer = self.require_customer(id)?;

        if let Some(email) = update.parsed_email()? {
            if email != customer.email && self.repository.customer_email_exists(&email)? {
                warn!("rejected email change for customer {id}: {email} is taken");
                return Err(LendingError::CustomerAlreadyExists {
                    email: email.to_string(),
                });
            }
        }

        let now = self.time.now();
        customer.apply_update(&update, now)?;

        let customer = self
            .repository
            .update_customer(customer)?
            .ok_or(LendingError::CustomerNotFound { id })?;
        info!("updated customer {id}");

        self.events.emit(Event::CustomerUpdated {
            customer_id: id,
            timestamp: now,
        });

        Ok(CustomerView::from_customer(&customer))
    }

    /// remove a customer together with their loan offers
    pub fn delete_customer(&mut self, id: CustomerId) -> Result<()> {
        self.require_customer(id)?;

        let removed_offers = self.repository.delete_loan_offers_for_customer(id)?;
        if !self.repository.delete_customer(id)? {
            return Err(LendingError::CustomerNotFound { id });
        }
        info!("deleted customer {id} and {removed_offers} loan offers");

        self.events.emit(Event::CustomerRemoved {
            customer_id: id,
            loan_offers_removed: removed_offers,
            timestamp: self.time.now(),
        });

        Ok(())
    }

    // loans

    /// price a loan without storing anything
    pub fn calculate_loan(&mut self, request: LoanCalculationRequest) -> Result<LoanCalculationView> {
        let terms = request
            .validate(&self.config.limits, self.config.currency)
            .inspect_err(|e| warn!("rejected loan calculation: {e}"))?;

        let calculation = LoanCalculator::calculate_all(
            terms.principal,
            terms.interest_rate,
            terms.term_months,
        )?;

        self.events.emit(Event::LoanCalculated {
            principal: terms.principal,
            interest_rate: terms.interest_rate,
            term_months: terms.term_months,
            monthly_payment: calculation.monthly_payment,
            timestamp: self.time.now(),
        });

        Ok(LoanCalculationView::from(&calculation))
    }

    pub fn create_loan_offer(&mut self, request: LoanOfferRequest) -> Result<LoanOfferView> {
        let terms = request
            .validate(&self.config.limits, self.config.currency)
            .inspect_err(|e| warn!("rejected loan offer for customer {}: {e}", request.customer_id))?;

        self.require_customer(request.customer_id)?;

        let calculation: LoanCalculation = LoanCalculator::calculate_all(
            terms.principal,
            terms.interest_rate,
            terms.term_months,
        )?;

        let now = self.time.now();
        let offer = LoanOffer::create(
            Uuid::new_v4(),
            request.customer_id,
            terms.principal,
            terms.interest_rate,
            terms.term_months,
            calculation,
            now,
        )?;

        let offer = self.repository.insert_loan_offer(offer)?;
        info!(
            "issued loan offer {} to customer {}: {} over {} months",
            offer.id, offer.customer_id, offer.principal, offer.term_months
        );

        self.events.emit(Event::LoanOfferIssued {
            loan_offer_id: offer.id,
            customer_id: offer.customer_id,
            principal: offer.principal,
            monthly_payment: offer.monthly_payment,
            timestamp: now,
        });

        Ok(LoanOfferView::from_offer(&offer))
    }

    pub fn get_loan_offer(&self, id: LoanOfferId) -> Result<LoanOfferView> {
        let offer = self
            .repository
            .get_loan_offer(id)?
            .ok_or(LendingError::LoanOfferNotFound { id })?;
        Ok(LoanOfferView::from_offer(&offer))
    }

    /// a customer's offers, newest first, with the total count
    pub fn list_customer_loan_offers(&self, customer_id: CustomerId) -> Result<(Vec<LoanOfferView>, usize)> {
        self.require_customer(customer_id)?;

        let offers = self.repository.list_loan_offers_for_customer(customer_id)?;
        let total = self.repository.count_loan_offers_for_customer(customer_id)?;
        debug!("customer {customer_id} has {total} loan offers");

        Ok((offers.iter().map(LoanOfferView::from_offer).collect(), total))
    }

    fn require_customer(&self, id: CustomerId) -> Result<Customer> {
        self.repository
            .get_customer(id)?
            .ok_or(LendingError::CustomerNotFound { id })
    }
}
