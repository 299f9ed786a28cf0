//! Installment invoices
//!
//! Each invoice bills one installment of a policy's annual premium. An
//! invoice carries three dates derived from its bill date:
//!
//! - **bill date**: the installment becomes payable
//! - **due date**: bill date plus the due grace period; after this the
//!   installment is past due
//! - **cancel date**: due date plus the cancellation grace period; an unpaid
//!   balance on this date cancels the policy
//!
//! Invoices are never deleted. Regenerating a policy's invoices marks the
//! previous set [`InvoiceState::Superseded`] so its history stays queryable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{InvoiceId, Money, PolicyId, PortError};

/// Lifecycle state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceState {
    /// Part of the policy's current invoice set
    Active,
    /// Replaced by a later invoice generation; excluded from all accounting
    Superseded,
}

impl InvoiceState {
    /// Returns the name stored on invoice records
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceState::Active => "Active",
            InvoiceState::Superseded => "Superseded",
        }
    }
}

impl fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceState {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(InvoiceState::Active),
            "Superseded" => Ok(InvoiceState::Superseded),
            other => Err(PortError::validation(format!("unknown invoice state '{}'", other))),
        }
    }
}

/// One installment invoice of a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: InvoiceId,
    /// Owning policy
    pub policy_id: PolicyId,
    /// Date the installment becomes payable
    pub bill_date: NaiveDate,
    /// Date after which the installment is past due
    pub due_date: NaiveDate,
    /// Date after which non-payment cancels the policy
    pub cancel_date: NaiveDate,
    /// Installment amount
    pub amount_due: Money,
    /// Lifecycle state
    pub state: InvoiceState,
}

impl Invoice {
    /// Creates a new active invoice
    pub fn new(
        policy_id: PolicyId,
        bill_date: NaiveDate,
        due_date: NaiveDate,
        cancel_date: NaiveDate,
        amount_due: Money,
    ) -> Self {
        Self {
            id: InvoiceId::new_v7(),
            policy_id,
            bill_date,
            due_date,
            cancel_date,
            amount_due,
            state: InvoiceState::Active,
        }
    }

    /// Returns true if the invoice belongs to the current invoice set
    pub fn is_active(&self) -> bool {
        self.state == InvoiceState::Active
    }

    /// Marks the invoice as replaced by a newer generation
    pub fn supersede(&mut self) {
        self.state = InvoiceState::Superseded;
    }

    /// Returns true if the installment has been billed on or before `as_of`
    pub fn is_billed_by(&self, as_of: NaiveDate) -> bool {
        self.bill_date <= as_of
    }

    /// Returns true if the due date is on or before `as_of`
    pub fn is_past_due(&self, as_of: NaiveDate) -> bool {
        self.due_date <= as_of
    }

    /// Returns true if the cancel date is on or before `as_of`
    pub fn is_past_cancel_date(&self, as_of: NaiveDate) -> bool {
        self.cancel_date <= as_of
    }
}
