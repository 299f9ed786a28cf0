//! Policy account report
//!
//! Shows the invoices billed up to a date, the payments with the contact
//! who made each one, and the account balance on that date.

use chrono::NaiveDate;
use std::fmt;

use core_kernel::Money;
use domain_billing::{AccountingStore, BillingError, Contact, Invoice, Payment, PolicyAccounting};

/// A policy's account as of a date
#[derive(Debug, Clone)]
pub struct PolicyReport {
    pub policy_number: String,
    pub status: &'static str,
    pub as_of: NaiveDate,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<(Payment, Option<Contact>)>,
    pub balance: Money,
}

impl PolicyReport {
    /// Builds the report for the session's policy
    pub async fn build(
        accounting: &PolicyAccounting,
        store: &dyn AccountingStore,
        as_of: NaiveDate,
    ) -> Result<Self, BillingError> {
        let invoices = accounting.invoices_billed_through(as_of).await?;

        let mut payments = Vec::new();
        for payment in accounting.payments().await? {
            let contact = store.get_contact(payment.contact_id).await?;
            payments.push((payment, contact));
        }

        Ok(Self {
            policy_number: accounting.policy().policy_number.clone(),
            status: accounting.policy().status.as_str(),
            as_of,
            invoices,
            payments,
            balance: accounting.balance(Some(as_of)).await?,
        })
    }

    /// Returns true when no invoice has been billed by the report date
    pub fn has_invoices(&self) -> bool {
        !self.invoices.is_empty()
    }
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) as of {}", self.policy_number, self.status, self.as_of)?;

        if !self.has_invoices() {
            writeln!(f, "No invoices found")?;
        } else {
            writeln!(f, "Invoices:")?;
            for invoice in &self.invoices {
                writeln!(
                    f,
                    "  billed {}  due {}  cancel {}  {}",
                    invoice.bill_date, invoice.due_date, invoice.cancel_date, invoice.amount_due
                )?;
            }
        }

        if !self.payments.is_empty() {
            writeln!(f, "Payments:")?;
            for (payment, contact) in &self.payments {
                let payer = contact
                    .as_ref()
                    .map(|c| format!("{} ({})", c.name, c.role.as_str()))
                    .unwrap_or_else(|| payment.contact_id.to_string());
                writeln!(f, "  {}  {}  {}", payment.transaction_date, payment.amount_paid, payer)?;
            }
        }

        write!(f, "Balance: {}", self.balance)
    }
}
