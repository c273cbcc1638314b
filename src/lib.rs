pub mod config;
pub mod customer;
pub mod decimal;
pub mod email;
pub mod errors;
pub mod events;
pub mod loan_offer;
pub mod payments;
pub mod repository;
pub mod service;
pub mod types;
pub mod views;

// re-export key types
pub use config::{LendingConfig, LoanLimits};
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use decimal::{Money, Percentage};
pub use email::Email;
pub use errors::{LendingError, Result};
pub use events::{Event, EventStore};
pub use loan_offer::{LoanCalculationRequest, LoanOffer, LoanOfferRequest, LoanTerms};
pub use payments::{LoanCalculation, LoanCalculator};
pub use repository::{CustomerRepository, InMemoryStore, LendingRepository, LoanOfferRepository};
pub use service::LendingService;
pub use types::{Currency, CustomerId, LoanOfferId};
pub use views::{CustomerView, CustomerWithLoanOffersView, LoanCalculationView, LoanOfferView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
