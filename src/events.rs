use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::email::Email;
use crate::types::{CustomerId, LoanOfferId};

/// all events that can be emitted by the lending service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // customer events
    CustomerRegistered {
        customer_id: CustomerId,
        email: Email,
        timestamp: DateTime<Utc>,
    },
    CustomerUpdated {
        customer_id: CustomerId,
        timestamp: DateTime<Utc>,
    },
    CustomerRemoved {
        customer_id: CustomerId,
        loan_offers_removed: usize,
        timestamp: DateTime<Utc>,
    },

    // loan events
    LoanCalculated {
        principal: Money,
        interest_rate: Percentage,
        term_months: u32,
        monthly_payment: Money,
        timestamp: DateTime<Utc>,
    },
    LoanOfferIssued {
        loan_offer_id: LoanOfferId,
        customer_id: CustomerId,
        principal: Money,
        monthly_payment: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
