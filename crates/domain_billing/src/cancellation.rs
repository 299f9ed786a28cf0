//! Cancellation records and decisions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CancellationId, InvoiceId, PolicyId};

/// Record written once when a policy is canceled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanceledPolicy {
    /// Unique identifier
    pub id: CancellationId,
    /// Canceled policy
    pub policy_id: PolicyId,
    /// Date the cancellation was recorded
    pub cancellation_date: NaiveDate,
    /// Free-text reason
    pub reason: String,
    /// Date the cancellation evaluation was run for
    pub evaluated_as_of: NaiveDate,
    /// First invoice, by bill date, found unpaid at its cancel date
    pub triggering_invoice: InvoiceId,
}

impl CanceledPolicy {
    pub fn new(
        policy_id: PolicyId,
        cancellation_date: NaiveDate,
        reason: impl Into<String>,
        evaluated_as_of: NaiveDate,
        triggering_invoice: InvoiceId,
    ) -> Self {
        Self {
            id: CancellationId::new_v7(),
            policy_id,
            cancellation_date,
            reason: reason.into(),
            evaluated_as_of,
            triggering_invoice,
        }
    }
}

/// Outcome of a cancellation evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancellationDecision {
    /// The policy was canceled by this evaluation
    Canceled(CanceledPolicy),
    /// Every invoice past its cancel date had a zero balance on that date
    RemainsActive,
    /// The policy was already canceled; nothing was written
    AlreadyCanceled,
}

impl CancellationDecision {
    /// Returns true if this evaluation canceled the policy
    pub fn is_canceled(&self) -> bool {
        matches!(self, CancellationDecision::Canceled(_))
    }
}
