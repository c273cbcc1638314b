/// quick start - price a loan
use loan_offers_rs::{LoanCalculator, Money, Percentage};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 10,000 EUR loan at 5.5% over two years
    let principal = Money::eur(dec!(10000));
    let rate = Percentage::new(dec!(5.5))?;

    let calculation = LoanCalculator::calculate_all(principal, rate, 24)?;

    println!("monthly payment: {}", calculation.monthly_payment);
    println!("total payment:   {}", calculation.total_payment);
    println!("total interest:  {}", calculation.total_interest);

    Ok(())
}
