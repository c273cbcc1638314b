/// customer offers - register a customer, issue offers, print the json views
use loan_offers_rs::{
    InMemoryStore, LendingConfig, LendingService, LoanCalculationRequest, LoanOfferRequest,
    NewCustomer, SafeTimeProvider, TimeSource,
};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== customer loan offers ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut service = LendingService::new(InMemoryStore::new(), LendingConfig::default(), &time);

    let customer = service.create_customer(
        NewCustomer::new("Max", "Mustermann", "max.mustermann@example.com")
            .with_phone("+49 123 456789")
            .with_address("Musterstrasse 1, 10115 Berlin"),
    )?;
    println!("registered {} {} <{}>\n", customer.first_name, customer.last_name, customer.email);

    // quick quote before committing to an offer
    let quote = service.calculate_loan(LoanCalculationRequest::new(dec!(25000), dec!(4.9), 60))?;
    println!("quote: {}\n", serde_json::to_string_pretty(&quote)?);

    service.create_loan_offer(LoanOfferRequest::new(customer.id, dec!(25000), dec!(4.9), 60))?;
    controller.advance(Duration::days(7));
    service.create_loan_offer(LoanOfferRequest::new(customer.id, dec!(12000), dec!(0), 12))?;

    let view = service.get_customer_with_loan_offers(customer.id)?;
    println!("{}\n", serde_json::to_string_pretty(&view)?);

    for event in service.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
