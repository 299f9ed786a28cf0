//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::{Currency, Money};
use domain_billing::BillingSchedule;
use proptest::prelude::*;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::AUD),
        Just(Currency::CAD),
    ]
}

/// Strategy for every schedule in the schedule table
pub fn billing_schedule_strategy() -> impl Strategy<Value = BillingSchedule> {
    proptest::sample::select(BillingSchedule::ALL.to_vec())
}

/// Strategy for generating premiums in minor units
pub fn premium_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy for generating positive premiums in any currency
pub fn premium_strategy() -> impl Strategy<Value = Money> {
    (premium_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating USD amounts
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    premium_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for effective dates spread over several years, month ends included
pub fn effective_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2015, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(offset)))
            .unwrap()
    })
}
