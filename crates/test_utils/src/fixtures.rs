//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the accounting engine. Dates follow
//! the 2015 policy year most scenarios are written against.

use chrono::NaiveDate;
use core_kernel::{ContactId, Currency, Money, PolicyId};
use domain_billing::Contact;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard annual premium
    pub fn usd_1200() -> Money {
        Money::new(dec!(1200.00), Currency::USD)
    }

    /// Premium that does not split evenly into monthly installments
    pub fn usd_1300() -> Money {
        Money::new(dec!(1300.00), Currency::USD)
    }

    /// Creates a USD amount
    pub fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for date test data
pub struct DateFixtures;

impl DateFixtures {
    /// Builds a date, panicking on an invalid one
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Standard effective date (Jan 1, 2015)
    pub fn effective_date() -> NaiveDate {
        Self::ymd(2015, 1, 1)
    }

    /// Effective date on a month end, for clamping tests
    pub fn month_end_effective_date() -> NaiveDate {
        Self::ymd(2015, 1, 31)
    }
}

/// Fixture for contacts
pub struct ContactFixtures;

impl ContactFixtures {
    /// Agent contact
    pub fn agent() -> Contact {
        Contact::agent("Test Agent")
    }

    /// Named insured contact
    pub fn named_insured() -> Contact {
        Contact::named_insured("Test Insured")
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic policy ID for testing
    pub fn policy_id() -> PolicyId {
        PolicyId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic contact ID for testing
    pub fn contact_id() -> ContactId {
        ContactId::from(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }
}
