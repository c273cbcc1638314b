use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::{LendingError, Result};
use crate::types::Currency;

/// fractional digits kept by every amount and rate
pub const SCALE: u32 = 2;

/// round half-up (away from zero) to two places and pin the scale to two
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// convert a float through its shortest string form so 0.1 stays 0.1
pub fn decimal_from_f64(value: f64) -> std::result::Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(&value.to_string())
}

/// Money type with cent precision and a currency tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

#[derive(Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    #[serde(default)]
    currency: Currency,
}

impl From<MoneyRepr> for Money {
    fn from(repr: MoneyRepr) -> Self {
        Money::new(repr.amount, repr.currency)
    }
}

impl Money {
    /// create from decimal, rounding half-up to cents
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Money {
            amount: quantize(amount),
            currency,
        }
    }

    /// create in the default currency
    pub fn eur(amount: Decimal) -> Self {
        Money::new(amount, Currency::EUR)
    }

    /// create from a currency code, rejecting codes outside EUR, USD and GBP
    pub fn from_code(amount: Decimal, code: &str) -> Result<Self> {
        Ok(Money::new(amount, code.parse()?))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str, currency: Currency) -> Result<Self> {
        let amount = Decimal::from_str_exact(s)
            .map_err(|e| LendingError::invalid_money(format!("cannot parse amount {s:?}: {e}")))?;
        Ok(Money::new(amount, currency))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other, "add")?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| LendingError::invalid_money(format!("{self} + {other} overflows")))?;
        Ok(Money::new(sum, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other, "subtract")?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| LendingError::invalid_money(format!("{self} - {other} overflows")))?;
        Ok(Money::new(difference, self.currency))
    }

    pub fn multiply(&self, factor: impl Into<Decimal>) -> Result<Money> {
        let factor = factor.into();
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| LendingError::invalid_money(format!("{self} * {factor} overflows")))?;
        Ok(Money::new(product, self.currency))
    }

    pub fn divide(&self, divisor: impl Into<Decimal>) -> Result<Money> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(LendingError::invalid_money("cannot divide by zero"));
        }
        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or_else(|| LendingError::invalid_money(format!("{self} / {divisor} overflows")))?;
        Ok(Money::new(quotient, self.currency))
    }

    pub fn multiply_f64(&self, factor: f64) -> Result<Money> {
        self.multiply(float_operand(factor)?)
    }

    pub fn divide_f64(&self, divisor: f64) -> Result<Money> {
        self.divide(float_operand(divisor)?)
    }

    /// ordering that refuses to compare different currencies
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering> {
        if self.currency != other.currency {
            return Err(LendingError::invalid_money(format!(
                "cannot compare different currencies: {} and {}",
                self.currency, other.currency
            )));
        }
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn less_than(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Less)
    }

    pub fn at_most(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Greater)
    }

    pub fn greater_than(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Greater)
    }

    pub fn at_least(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Less)
    }

    fn ensure_same_currency(&self, other: &Money, op: &str) -> Result<()> {
        if self.currency != other.currency {
            return Err(LendingError::invalid_money(format!(
                "cannot {op} different currencies: {} and {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

fn float_operand(value: f64) -> Result<Decimal> {
    decimal_from_f64(value)
        .map_err(|e| LendingError::invalid_money(format!("unsupported operand {value}: {e}")))
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}

/// annual interest rate expressed in percent, e.g. 5.50 for 5.5%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::from_parts(0, 0, 0, false, SCALE));
    pub const HUNDRED: Percentage = Percentage(Decimal::from_parts(10_000, 0, 0, false, SCALE));

    /// create from a percent value in [0, 100]
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(LendingError::invalid_percentage(format!(
                "percentage cannot be negative: {value}"
            )));
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(LendingError::invalid_percentage(format!(
                "percentage cannot exceed 100: {value}"
            )));
        }
        Ok(Percentage(quantize(value)))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// fraction form, 5.50 -> 0.055
    pub fn to_decimal(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// monthly periodic rate, nominal annual rate over twelve
    pub fn to_monthly_rate(&self) -> Decimal {
        self.to_decimal() / Decimal::from(12)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = LendingError;

    fn try_from(value: Decimal) -> Result<Self> {
        Percentage::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(p: Percentage) -> Self {
        p.0
    }
}
