//! Billing schedule table
//!
//! Maps the stored billing-frequency name of a policy to the number of
//! installments it is billed in over one policy year.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;

/// Billing frequency of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingSchedule {
    /// One installment
    Annual,
    /// Two installments, six months apart
    #[serde(rename = "Two-Pay")]
    TwoPay,
    /// Three installments, four months apart
    #[serde(rename = "Semi-Annual")]
    SemiAnnual,
    /// Four installments, three months apart
    Quarterly,
    /// Twelve installments, one month apart
    Monthly,
}

impl BillingSchedule {
    /// Every recognized schedule
    pub const ALL: [BillingSchedule; 5] = [
        BillingSchedule::Annual,
        BillingSchedule::TwoPay,
        BillingSchedule::SemiAnnual,
        BillingSchedule::Quarterly,
        BillingSchedule::Monthly,
    ];

    /// Returns the number of installments per policy year
    pub fn installments(&self) -> u32 {
        match self {
            BillingSchedule::Annual => 1,
            BillingSchedule::TwoPay => 2,
            BillingSchedule::SemiAnnual => 3,
            BillingSchedule::Quarterly => 4,
            BillingSchedule::Monthly => 12,
        }
    }

    /// Returns the spacing between consecutive bill dates
    pub fn months_between_installments(&self) -> u32 {
        12 / self.installments()
    }

    /// Returns the name stored on policy records
    pub fn name(&self) -> &'static str {
        match self {
            BillingSchedule::Annual => "Annual",
            BillingSchedule::TwoPay => "Two-Pay",
            BillingSchedule::SemiAnnual => "Semi-Annual",
            BillingSchedule::Quarterly => "Quarterly",
            BillingSchedule::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for BillingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BillingSchedule {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillingSchedule::ALL
            .into_iter()
            .find(|schedule| schedule.name() == s)
            .ok_or_else(|| BillingError::UnknownBillingSchedule(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installment_counts() {
        let counts: Vec<u32> = BillingSchedule::ALL.iter().map(|s| s.installments()).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 12]);
    }

    #[test]
    fn test_spacing_covers_one_year() {
        for schedule in BillingSchedule::ALL {
            assert_eq!(schedule.installments() * schedule.months_between_installments(), 12);
        }
    }

    #[test]
    fn test_parse_round_trips_stored_names() {
        for schedule in BillingSchedule::ALL {
            assert_eq!(schedule.name().parse::<BillingSchedule>().unwrap(), schedule);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "Weekly".parse::<BillingSchedule>().unwrap_err();
        assert!(matches!(err, BillingError::UnknownBillingSchedule(name) if name == "Weekly"));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("annual".parse::<BillingSchedule>().is_err());
        assert!("TwoPay".parse::<BillingSchedule>().is_err());
    }
}
