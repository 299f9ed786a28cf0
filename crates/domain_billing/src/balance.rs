//! Account balance calculation

use chrono::NaiveDate;
use tracing::debug;

use core_kernel::{Currency, Money};

use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::payment::Payment;

/// Computes the account balance as of a date
///
/// Sums `amount_due` over active invoices billed on or before `as_of` and
/// subtracts payments made on or before `as_of`. Both comparisons are
/// inclusive. A negative result is a credit.
pub fn account_balance(
    currency: Currency,
    invoices: &[Invoice],
    payments: &[Payment],
    as_of: NaiveDate,
) -> Result<Money, BillingError> {
    let billed = Money::sum(
        currency,
        invoices
            .iter()
            .filter(|i| i.is_active() && i.is_billed_by(as_of))
            .map(|i| &i.amount_due),
    )?;
    let paid = total_paid(currency, payments, as_of)?;
    let balance = billed.checked_sub(&paid)?;

    debug!(%as_of, %billed, %paid, %balance, "computed account balance");
    Ok(balance)
}

/// Sums payments made on or before `as_of`
pub(crate) fn total_paid(
    currency: Currency,
    payments: &[Payment],
    as_of: NaiveDate,
) -> Result<Money, BillingError> {
    Ok(Money::sum(
        currency,
        payments
            .iter()
            .filter(|p| p.is_made_by(as_of))
            .map(|p| &p.amount_paid),
    )?)
}
