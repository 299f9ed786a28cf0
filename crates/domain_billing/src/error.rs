//! Billing domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PolicyId, PortError};

/// Errors that can occur in the policy accounting engine
///
/// Refused payments are not errors; they come back as
/// [`PaymentOutcome::Refused`](crate::payment::PaymentOutcome::Refused).
#[derive(Debug, Error)]
pub enum BillingError {
    /// The policy id does not resolve to a stored policy
    #[error("Policy not found: {0}")]
    PolicyNotFound(PolicyId),

    /// The policy's billing schedule is not in the schedule table
    #[error("Unknown billing schedule '{0}': no invoices were generated")]
    UnknownBillingSchedule(String),

    /// A computed invoice date fell outside the representable calendar
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// Monetary arithmetic failed (currency mismatch, overflow)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The storage collaborator failed
    #[error("Storage error: {0}")]
    Store(#[from] PortError),
}

impl BillingError {
    /// Returns true for configuration problems the caller can fix by
    /// correcting policy data, as opposed to infrastructure failures
    pub fn is_configuration(&self) -> bool {
        matches!(self, BillingError::UnknownBillingSchedule(_))
    }

    /// Returns true if the policy could not be found
    pub fn is_not_found(&self) -> bool {
        matches!(self, BillingError::PolicyNotFound(_))
    }
}
