//! Accounting engine configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How "cancellation pending" is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingRule {
    /// Pending when any past-due invoice has a nonzero `amount_due`.
    ///
    /// Payments are not considered, so once an installment passes its due
    /// date the policy stays pending. This matches the behavior existing
    /// callers depend on.
    #[default]
    InvoiceAmountDue,
    /// Pending when the amounts due on past-due invoices exceed the
    /// payments made by the evaluation date.
    OutstandingBalance,
}

impl FromStr for PendingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice_amount_due" => Ok(PendingRule::InvoiceAmountDue),
            "outstanding_balance" => Ok(PendingRule::OutstandingBalance),
            other => Err(format!("unknown pending rule '{}'", other)),
        }
    }
}

/// Grace periods and policies applied by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Months from bill date to due date
    pub due_grace_months: u32,
    /// Days from due date to cancel date
    pub cancel_grace_days: u32,
    /// Rule used for the cancellation-pending check
    pub pending_rule: PendingRule,
    /// Reason written on cancellation records
    pub cancellation_reason: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            due_grace_months: 1,
            cancel_grace_days: 14,
            pending_rule: PendingRule::InvoiceAmountDue,
            cancellation_reason: "Non-payment of premium".to_string(),
        }
    }
}

impl BillingConfig {
    /// Sets the cancellation-pending rule
    pub fn with_pending_rule(mut self, rule: PendingRule) -> Self {
        self.pending_rule = rule;
        self
    }

    /// Sets the days between due date and cancel date
    pub fn with_cancel_grace_days(mut self, days: u32) -> Self {
        self.cancel_grace_days = days;
        self
    }
}
