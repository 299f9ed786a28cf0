//! Policy records as seen by the accounting engine
//!
//! The engine only needs the billing-relevant slice of a policy: when it
//! starts, what it costs per year, how it is billed, whether it is still
//! active, and who may pay on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ContactId, Currency, Money, PolicyId, PortError};

use crate::error::BillingError;
use crate::schedule::BillingSchedule;

/// Policy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStatus {
    /// Policy is in force
    Active,
    /// Policy was canceled for non-payment; terminal
    Canceled,
}

impl PolicyStatus {
    /// Returns the name stored on policy records
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Canceled => "Canceled",
        }
    }

    /// Returns true once the policy has been canceled
    pub fn is_canceled(&self) -> bool {
        matches!(self, PolicyStatus::Canceled)
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyStatus {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(PolicyStatus::Active),
            "Canceled" => Ok(PolicyStatus::Canceled),
            other => Err(PortError::validation(format!("unknown policy status '{}'", other))),
        }
    }
}

/// An insurance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Human-readable policy number
    pub policy_number: String,
    /// Start of the policy term; the first installment is billed on this date
    pub effective_date: NaiveDate,
    /// Premium for one policy year
    pub annual_premium: Money,
    /// Stored billing schedule name, validated when invoices are generated
    pub billing_schedule: String,
    /// Status
    pub status: PolicyStatus,
    /// Named insured contact
    pub named_insured: Option<ContactId>,
    /// Agent of record
    pub agent: Option<ContactId>,
}

impl Policy {
    /// Creates a new active policy billed annually
    ///
    /// # Arguments
    ///
    /// * `policy_number` - Human-readable policy number
    /// * `effective_date` - Start of the policy term
    /// * `annual_premium` - Premium for one policy year
    pub fn new(
        policy_number: impl Into<String>,
        effective_date: NaiveDate,
        annual_premium: Money,
    ) -> Self {
        Self {
            id: PolicyId::new_v7(),
            policy_number: policy_number.into(),
            effective_date,
            annual_premium,
            billing_schedule: BillingSchedule::Annual.name().to_string(),
            status: PolicyStatus::Active,
            named_insured: None,
            agent: None,
        }
    }

    /// Sets the billing schedule by its stored name
    pub fn with_billing_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.billing_schedule = schedule.into();
        self
    }

    /// Sets the named insured
    pub fn with_named_insured(mut self, contact_id: ContactId) -> Self {
        self.named_insured = Some(contact_id);
        self
    }

    /// Sets the agent of record
    pub fn with_agent(mut self, contact_id: ContactId) -> Self {
        self.agent = Some(contact_id);
        self
    }

    /// Resolves the stored billing schedule name against the schedule table
    pub fn schedule(&self) -> Result<BillingSchedule, BillingError> {
        self.billing_schedule.parse()
    }

    /// Currency the policy is billed in
    pub fn currency(&self) -> Currency {
        self.annual_premium.currency()
    }

    /// Returns true once the policy has been canceled
    pub fn is_canceled(&self) -> bool {
        self.status.is_canceled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn policy() -> Policy {
        Policy::new(
            "Policy One",
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            Money::new(Decimal::from(365), Currency::USD),
        )
    }

    #[test]
    fn test_new_policy_defaults() {
        let p = policy();
        assert_eq!(p.status, PolicyStatus::Active);
        assert_eq!(p.schedule().unwrap(), BillingSchedule::Annual);
        assert!(p.named_insured.is_none());
        assert!(p.agent.is_none());
    }

    #[test]
    fn test_unknown_schedule_surfaces_on_resolution() {
        let p = policy().with_billing_schedule("Fortnightly");
        assert!(p.schedule().unwrap_err().is_configuration());
    }

    #[test]
    fn test_status_names() {
        assert_eq!("Canceled".parse::<PolicyStatus>().unwrap(), PolicyStatus::Canceled);
        assert!("Lapsed".parse::<PolicyStatus>().is_err());
        assert!(PolicyStatus::Canceled.is_canceled());
    }
}
