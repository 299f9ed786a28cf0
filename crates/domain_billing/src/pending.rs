//! Cancellation-pending evaluation
//!
//! A policy is cancellation pending once an installment is past its due date
//! without being settled. Only agents may pay on such a policy.

use chrono::NaiveDate;

use core_kernel::{Currency, Money};

use crate::balance::total_paid;
use crate::config::PendingRule;
use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::payment::Payment;

/// Decides whether a policy is cancellation pending as of a date
///
/// Only active invoices whose due date is on or before `as_of` are
/// considered. See [`PendingRule`] for how each rule treats payments.
pub fn is_cancellation_pending(
    rule: PendingRule,
    currency: Currency,
    invoices: &[Invoice],
    payments: &[Payment],
    as_of: NaiveDate,
) -> Result<bool, BillingError> {
    let mut past_due = invoices
        .iter()
        .filter(|i| i.is_active() && i.is_past_due(as_of));

    match rule {
        PendingRule::InvoiceAmountDue => Ok(past_due.any(|i| !i.amount_due.is_zero())),
        PendingRule::OutstandingBalance => {
            let due = Money::sum(currency, past_due.map(|i| &i.amount_due))?;
            let paid = total_paid(currency, payments, as_of)?;
            Ok(due.checked_sub(&paid)?.is_positive())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ContactId, PolicyId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn annual(policy_id: PolicyId, amount: rust_decimal::Decimal) -> Vec<Invoice> {
        vec![Invoice::new(
            policy_id,
            date(2015, 1, 1),
            date(2015, 2, 1),
            date(2015, 2, 15),
            usd(amount),
        )]
    }

    #[test]
    fn test_not_pending_before_due_date() {
        let invoices = annual(PolicyId::new(), dec!(1200));
        for rule in [PendingRule::InvoiceAmountDue, PendingRule::OutstandingBalance] {
            assert!(!is_cancellation_pending(rule, Currency::USD, &invoices, &[], date(2015, 1, 31)).unwrap());
        }
    }

    #[test]
    fn test_pending_from_due_date_inclusive() {
        let invoices = annual(PolicyId::new(), dec!(1200));
        for rule in [PendingRule::InvoiceAmountDue, PendingRule::OutstandingBalance] {
            assert!(is_cancellation_pending(rule, Currency::USD, &invoices, &[], date(2015, 2, 1)).unwrap());
        }
    }

    #[test]
    fn test_zero_amount_invoice_is_never_pending() {
        let invoices = annual(PolicyId::new(), dec!(0));
        assert!(!is_cancellation_pending(
            PendingRule::InvoiceAmountDue,
            Currency::USD,
            &invoices,
            &[],
            date(2016, 1, 1)
        )
        .unwrap());
    }

    #[test]
    fn test_invoice_amount_rule_ignores_payments() {
        let policy_id = PolicyId::new();
        let invoices = annual(policy_id, dec!(1200));
        let payments = vec![Payment::new(policy_id, ContactId::new(), usd(dec!(1200)), date(2015, 1, 15))];

        assert!(is_cancellation_pending(
            PendingRule::InvoiceAmountDue,
            Currency::USD,
            &invoices,
            &payments,
            date(2015, 2, 10)
        )
        .unwrap());
    }

    #[test]
    fn test_outstanding_balance_rule_honors_payments() {
        let policy_id = PolicyId::new();
        let invoices = annual(policy_id, dec!(1200));
        let payments = vec![Payment::new(policy_id, ContactId::new(), usd(dec!(1200)), date(2015, 1, 15))];

        assert!(!is_cancellation_pending(
            PendingRule::OutstandingBalance,
            Currency::USD,
            &invoices,
            &payments,
            date(2015, 2, 10)
        )
        .unwrap());
    }

    #[test]
    fn test_superseded_invoices_are_ignored() {
        let mut invoices = annual(PolicyId::new(), dec!(1200));
        invoices[0].supersede();
        assert!(!is_cancellation_pending(
            PendingRule::InvoiceAmountDue,
            Currency::USD,
            &invoices,
            &[],
            date(2015, 6, 1)
        )
        .unwrap());
    }
}
