//! Payments and payment outcomes
//!
//! A payment is recorded only after the authorizer accepts it and is never
//! changed afterwards. A refused attempt is an ordinary outcome, not an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ContactId, Money, PaymentId, PolicyId};

/// A payment received against a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Policy paid on
    pub policy_id: PolicyId,
    /// Paying contact
    pub contact_id: ContactId,
    /// Amount paid
    pub amount_paid: Money,
    /// Date the payment was made
    pub transaction_date: NaiveDate,
}

impl Payment {
    /// Creates a new payment
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy being paid
    /// * `contact_id` - Who is paying
    /// * `amount_paid` - Payment amount
    /// * `transaction_date` - When the payment was made
    pub fn new(
        policy_id: PolicyId,
        contact_id: ContactId,
        amount_paid: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            policy_id,
            contact_id,
            amount_paid,
            transaction_date,
        }
    }

    /// Returns true if the payment was made on or before `as_of`
    pub fn is_made_by(&self, as_of: NaiveDate) -> bool {
        self.transaction_date <= as_of
    }
}

/// Why a payment attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentRefusal {
    /// The policy is cancellation pending and the payer is not an agent
    CancellationPending {
        contact_id: Option<ContactId>,
    },
    /// No payer was given and the policy has no named insured, or the
    /// payer does not resolve to a known contact
    UnverifiablePayer,
}

impl fmt::Display for PaymentRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentRefusal::CancellationPending { .. } => {
                f.write_str("only agents may make payments on cancellation pending policies")
            }
            PaymentRefusal::UnverifiablePayer => f.write_str("cannot verify payer"),
        }
    }
}

/// Result of a payment attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentOutcome {
    /// The payment was authorized and stored
    Recorded(Payment),
    /// The payment was refused and nothing was stored
    Refused(PaymentRefusal),
}

impl PaymentOutcome {
    /// Returns true if the payment was stored
    pub fn is_recorded(&self) -> bool {
        matches!(self, PaymentOutcome::Recorded(_))
    }

    /// Returns the stored payment, if any
    pub fn payment(&self) -> Option<&Payment> {
        match self {
            PaymentOutcome::Recorded(payment) => Some(payment),
            PaymentOutcome::Refused(_) => None,
        }
    }

    /// Returns the refusal reason, if any
    pub fn refusal(&self) -> Option<PaymentRefusal> {
        match self {
            PaymentOutcome::Recorded(_) => None,
            PaymentOutcome::Refused(reason) => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal::Decimal;

    #[test]
    fn test_outcome_accessors() {
        let payment = Payment::new(
            PolicyId::new(),
            ContactId::new(),
            Money::new(Decimal::from(400), Currency::USD),
            NaiveDate::from_ymd_opt(2015, 2, 1).unwrap(),
        );

        let recorded = PaymentOutcome::Recorded(payment.clone());
        assert!(recorded.is_recorded());
        assert_eq!(recorded.payment(), Some(&payment));
        assert!(recorded.refusal().is_none());

        let refused = PaymentOutcome::Refused(PaymentRefusal::UnverifiablePayer);
        assert!(!refused.is_recorded());
        assert!(refused.payment().is_none());
        assert_eq!(refused.refusal(), Some(PaymentRefusal::UnverifiablePayer));
    }

    #[test]
    fn test_made_by_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2015, 4, 1).unwrap();
        let payment = Payment::new(
            PolicyId::new(),
            ContactId::new(),
            Money::new(Decimal::from(600), Currency::USD),
            day,
        );
        assert!(payment.is_made_by(day));
        assert!(!payment.is_made_by(day.pred_opt().unwrap()));
    }
}
