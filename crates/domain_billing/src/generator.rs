//! Invoice generation
//!
//! Builds the installment invoices covering one policy year from the
//! policy's effective date, annual premium and billing schedule.

use chrono::{Days, Months, NaiveDate};

use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::policy::Policy;

/// Builds the invoice set for a policy without touching storage
///
/// Installment `i` is billed `i * (12 / n)` months after the effective
/// date, always counted from the effective date so month-end clamping never
/// accumulates. The premium is split with [`core_kernel::Money::allocate`]:
/// the installments sum to the annual premium exactly, including premiums
/// with digits below the currency's minor unit, and any remainder goes to
/// the earliest installments.
///
/// # Errors
///
/// Returns `BillingError::UnknownBillingSchedule` if the policy's schedule
/// name is not in the schedule table.
pub fn build_invoices(policy: &Policy, config: &BillingConfig) -> Result<Vec<Invoice>, BillingError> {
    let schedule = policy.schedule()?;
    let amounts = policy.annual_premium.allocate(schedule.installments())?;
    let step = schedule.months_between_installments();

    amounts
        .into_iter()
        .zip(0u32..)
        .map(|(amount_due, i)| {
            let bill_date = add_months(policy.effective_date, i * step)?;
            let due_date = add_months(bill_date, config.due_grace_months)?;
            let cancel_date = add_days(due_date, config.cancel_grace_days)?;
            Ok(Invoice::new(policy.id, bill_date, due_date, cancel_date, amount_due))
        })
        .collect()
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, BillingError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| BillingError::DateOutOfRange(format!("{} + {} months", date, months)))
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, BillingError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| BillingError::DateOutOfRange(format!("{} + {} days", date, days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::BillingSchedule;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(schedule: &str, premium: Money) -> Policy {
        Policy::new("Test Policy", date(2015, 1, 1), premium).with_billing_schedule(schedule)
    }

    #[test]
    fn test_annual_single_invoice() {
        let p = policy("Annual", Money::new(dec!(1200), Currency::USD));
        let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();

        assert_eq!(invoices.len(), 1);
        let inv = &invoices[0];
        assert_eq!(inv.bill_date, date(2015, 1, 1));
        assert_eq!(inv.due_date, date(2015, 2, 1));
        assert_eq!(inv.cancel_date, date(2015, 2, 15));
        assert_eq!(inv.amount_due.amount(), dec!(1200));
        assert_eq!(inv.policy_id, p.id);
    }

    #[test]
    fn test_quarterly_bill_dates() {
        let p = policy("Quarterly", Money::new(dec!(1200), Currency::USD));
        let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();

        let bill_dates: Vec<_> = invoices.iter().map(|i| i.bill_date).collect();
        assert_eq!(
            bill_dates,
            vec![date(2015, 1, 1), date(2015, 4, 1), date(2015, 7, 1), date(2015, 10, 1)]
        );
        assert!(invoices.iter().all(|i| i.amount_due.amount() == dec!(300)));
    }

    #[test]
    fn test_semi_annual_is_three_installments_four_months_apart() {
        let p = policy("Semi-Annual", Money::new(dec!(1200), Currency::USD));
        let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();

        let bill_dates: Vec<_> = invoices.iter().map(|i| i.bill_date).collect();
        assert_eq!(bill_dates, vec![date(2015, 1, 1), date(2015, 5, 1), date(2015, 9, 1)]);
    }

    #[test]
    fn test_monthly_remainder_goes_to_first_installments() {
        let p = policy("Monthly", Money::new(dec!(1300), Currency::USD));
        let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();

        assert_eq!(invoices.len(), 12);
        assert_eq!(invoices[0].amount_due.amount(), dec!(108.34));
        assert_eq!(invoices[11].amount_due.amount(), dec!(108.33));
        let amounts: Vec<Money> = invoices.iter().map(|i| i.amount_due).collect();
        assert_eq!(Money::sum(Currency::USD, &amounts).unwrap().amount(), dec!(1300));
    }

    #[test]
    fn test_month_end_effective_date_does_not_drift() {
        let p = Policy::new("Month End", date(2015, 1, 31), Money::new(dec!(1200), Currency::USD))
            .with_billing_schedule("Monthly");
        let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();

        assert_eq!(invoices[1].bill_date, date(2015, 2, 28));
        assert_eq!(invoices[2].bill_date, date(2015, 3, 31));
        assert_eq!(invoices[0].due_date, date(2015, 2, 28));
    }

    #[test]
    fn test_custom_grace_periods() {
        let p = policy("Annual", Money::new(dec!(1200), Currency::USD));
        let config = BillingConfig {
            due_grace_months: 2,
            cancel_grace_days: 30,
            ..BillingConfig::default()
        };
        let invoices = build_invoices(&p, &config).unwrap();

        assert_eq!(invoices[0].due_date, date(2015, 3, 1));
        assert_eq!(invoices[0].cancel_date, date(2015, 3, 31));
    }

    #[test]
    fn test_unknown_schedule_generates_nothing() {
        let p = policy("Biweekly", Money::new(dec!(1200), Currency::USD));
        let err = build_invoices(&p, &BillingConfig::default()).unwrap_err();
        assert!(matches!(err, BillingError::UnknownBillingSchedule(name) if name == "Biweekly"));
    }

    #[test]
    fn test_every_schedule_has_its_installment_count() {
        for schedule in BillingSchedule::ALL {
            let p = policy(schedule.name(), Money::new(dec!(1000), Currency::USD));
            let invoices = build_invoices(&p, &BillingConfig::default()).unwrap();
            assert_eq!(invoices.len() as u32, schedule.installments());
        }
    }

    #[test]
    fn test_sub_cent_premium_is_not_rounded_away() {
        let premium = Money::new(dec!(1200.005), Currency::USD);
        let invoices = build_invoices(&policy("Annual", premium), &BillingConfig::default()).unwrap();

        let total = Money::sum(Currency::USD, invoices.iter().map(|i| &i.amount_due)).unwrap();
        assert_eq!(total.amount(), dec!(1200.005));
    }

    #[test]
    fn test_fractional_yen_premium_sums_exactly() {
        let premium = Money::new(dec!(1000.5), Currency::JPY);
        let invoices = build_invoices(&policy("Quarterly", premium), &BillingConfig::default()).unwrap();

        let amounts: Vec<_> = invoices.iter().map(|i| i.amount_due.amount()).collect();
        assert_eq!(amounts, vec![dec!(250.2), dec!(250.1), dec!(250.1), dec!(250.1)]);
        let total = Money::sum(Currency::JPY, invoices.iter().map(|i| &i.amount_due)).unwrap();
        assert_eq!(total.amount(), dec!(1000.5));
    }
}
