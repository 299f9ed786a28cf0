//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Currency, Money};
use domain_billing::{Invoice, PaymentOutcome, PaymentRefusal};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount
///
/// # Panics
///
/// Panics if the amounts differ
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that the installments sum exactly to the premium
///
/// # Panics
///
/// Panics if the currencies differ or the total is off by any amount
pub fn assert_installments_sum_to(invoices: &[Invoice], premium: &Money) {
    let total = Money::sum(premium.currency(), invoices.iter().map(|i| &i.amount_due))
        .unwrap_or_else(|e| panic!("Installments cannot be summed: {}", e));
    assert_eq!(
        total, *premium,
        "Installments sum to {}, expected {}",
        total, premium
    );
}

/// Asserts that the amounts due differ by at most one minor unit
pub fn assert_installments_balanced(invoices: &[Invoice], currency: Currency) {
    let unit = Decimal::new(1, currency.decimal_places());
    let amounts: Vec<Decimal> = invoices.iter().map(|i| i.amount_due.amount()).collect();
    if let (Some(max), Some(min)) = (amounts.iter().max(), amounts.iter().min()) {
        assert!(
            *max - *min <= unit,
            "Installments are uneven: max={}, min={}",
            max,
            min
        );
    }
}

/// Asserts that a payment was refused for cancellation pending
pub fn assert_refused_pending(outcome: &PaymentOutcome) {
    assert!(
        matches!(
            outcome,
            PaymentOutcome::Refused(PaymentRefusal::CancellationPending { .. })
        ),
        "Expected cancellation pending refusal, got {:?}",
        outcome
    );
}

/// Asserts that a payment was recorded
pub fn assert_recorded(outcome: &PaymentOutcome) {
    assert!(
        outcome.is_recorded(),
        "Expected recorded payment, got {:?}",
        outcome
    );
}
