//! PostgreSQL Accounting Adapter
//!
//! Implements the `AccountingStore` port on top of [`AccountingRepository`],
//! translating between domain models and database rows and mapping database
//! errors to `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresAccountingStore;
//! use domain_billing::{AccountingStore, PolicyAccounting};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn AccountingStore> = Arc::new(PostgresAccountingStore::new(pool));
//! let accounting = PolicyAccounting::open(store, policy_id).await?;
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ContactId, Currency, DomainPort, Money, PolicyId, PortError};
use domain_billing::{
    AccountingStore, CanceledPolicy, Contact, Invoice, Payment, Policy,
};

use crate::repositories::accounting::{
    AccountingRepository, CancellationRow, ContactRow, InvoiceRow, PaymentRow, PolicyRow,
};

/// PostgreSQL-backed implementation of the AccountingStore trait
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Connection failures -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresAccountingStore {
    repository: AccountingRepository,
}

impl PostgresAccountingStore {
    /// Creates a new PostgreSQL accounting store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AccountingRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &AccountingRepository {
        &self.repository
    }
}

impl DomainPort for PostgresAccountingStore {}

#[async_trait]
impl AccountingStore for PostgresAccountingStore {
    #[instrument(skip(self), fields(policy_id = %id))]
    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        debug!("Fetching policy by ID");

        let row = self
            .repository
            .find_policy(id.into())
            .await?
            .ok_or_else(|| PortError::not_found("Policy", id))?;

        row_to_policy(row)
    }

    #[instrument(skip(self, policy), fields(policy_id = %policy.id))]
    async fn insert_policy(&self, policy: &Policy) -> Result<(), PortError> {
        Ok(self.repository.insert_policy(&policy_to_row(policy)).await?)
    }

    #[instrument(skip(self), fields(contact_id = %id))]
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, PortError> {
        self.repository
            .find_contact(id.into())
            .await?
            .map(row_to_contact)
            .transpose()
    }

    #[instrument(skip(self, contact), fields(contact_id = %contact.id))]
    async fn insert_contact(&self, contact: &Contact) -> Result<(), PortError> {
        let row = ContactRow {
            contact_id: contact.id.into(),
            name: contact.name.clone(),
            role: contact.role.as_str().to_string(),
        };
        Ok(self.repository.insert_contact(&row).await?)
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn active_invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError> {
        self.repository
            .find_invoices(policy_id.into(), true)
            .await?
            .into_iter()
            .map(row_to_invoice)
            .collect()
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn invoice_history(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError> {
        self.repository
            .find_invoices(policy_id.into(), false)
            .await?
            .into_iter()
            .map(row_to_invoice)
            .collect()
    }

    #[instrument(skip(self, invoices), fields(policy_id = %policy_id, count = invoices.len()))]
    async fn replace_invoices(
        &self,
        policy_id: PolicyId,
        invoices: &[Invoice],
    ) -> Result<(), PortError> {
        if let Some(stray) = invoices.iter().find(|i| i.policy_id != policy_id) {
            return Err(PortError::validation(format!(
                "invoice {} belongs to policy {}, not {}",
                stray.id, stray.policy_id, policy_id
            )));
        }

        let rows: Vec<InvoiceRow> = invoices.iter().map(invoice_to_row).collect();
        let superseded = self
            .repository
            .replace_invoices(policy_id.into(), &rows)
            .await?;

        debug!(superseded, inserted = rows.len(), "Replaced invoices");
        Ok(())
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn payments(&self, policy_id: PolicyId) -> Result<Vec<Payment>, PortError> {
        self.repository
            .find_payments(policy_id.into())
            .await?
            .into_iter()
            .map(row_to_payment)
            .collect()
    }

    #[instrument(skip(self, payment), fields(payment_id = %payment.id))]
    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        let row = PaymentRow {
            payment_id: payment.id.into(),
            policy_id: payment.policy_id.into(),
            contact_id: payment.contact_id.into(),
            amount_paid: payment.amount_paid.amount(),
            currency: payment.amount_paid.currency().code().to_string(),
            transaction_date: payment.transaction_date,
        };
        Ok(self.repository.insert_payment(&row).await?)
    }

    #[instrument(skip(self, record), fields(policy_id = %record.policy_id))]
    async fn record_cancellation(&self, record: &CanceledPolicy) -> Result<(), PortError> {
        let row = CancellationRow {
            cancellation_id: record.id.into(),
            policy_id: record.policy_id.into(),
            cancellation_date: record.cancellation_date,
            reason: record.reason.clone(),
            evaluated_as_of: record.evaluated_as_of,
            triggering_invoice: record.triggering_invoice.into(),
        };
        Ok(self.repository.record_cancellation(&row).await?)
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn cancellations(&self, policy_id: PolicyId) -> Result<Vec<CanceledPolicy>, PortError> {
        Ok(self
            .repository
            .find_cancellations(policy_id.into())
            .await?
            .into_iter()
            .map(|row| CanceledPolicy {
                id: row.cancellation_id.into(),
                policy_id: row.policy_id.into(),
                cancellation_date: row.cancellation_date,
                reason: row.reason,
                evaluated_as_of: row.evaluated_as_of,
                triggering_invoice: row.triggering_invoice.into(),
            })
            .collect())
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn money(amount: Decimal, currency: &str) -> Result<Money, PortError> {
    let currency: Currency = currency
        .trim()
        .parse()
        .map_err(|e: core_kernel::MoneyError| PortError::internal(e.to_string()))?;
    Ok(Money::new(amount, currency))
}

fn row_to_policy(row: PolicyRow) -> Result<Policy, PortError> {
    Ok(Policy {
        id: row.policy_id.into(),
        policy_number: row.policy_number,
        effective_date: row.effective_date,
        annual_premium: money(row.annual_premium, &row.currency)?,
        billing_schedule: row.billing_schedule,
        status: row.status.parse()?,
        named_insured: row.named_insured.map(ContactId::from),
        agent: row.agent.map(ContactId::from),
    })
}

fn policy_to_row(policy: &Policy) -> PolicyRow {
    PolicyRow {
        policy_id: policy.id.into(),
        policy_number: policy.policy_number.clone(),
        effective_date: policy.effective_date,
        annual_premium: policy.annual_premium.amount(),
        currency: policy.currency().code().to_string(),
        billing_schedule: policy.billing_schedule.clone(),
        status: policy.status.as_str().to_string(),
        named_insured: policy.named_insured.map(Into::into),
        agent: policy.agent.map(Into::into),
    }
}

fn row_to_contact(row: ContactRow) -> Result<Contact, PortError> {
    Ok(Contact {
        id: row.contact_id.into(),
        name: row.name,
        role: row.role.parse()?,
    })
}

fn row_to_invoice(row: InvoiceRow) -> Result<Invoice, PortError> {
    Ok(Invoice {
        id: row.invoice_id.into(),
        policy_id: row.policy_id.into(),
        bill_date: row.bill_date,
        due_date: row.due_date,
        cancel_date: row.cancel_date,
        amount_due: money(row.amount_due, &row.currency)?,
        state: row.state.parse()?,
    })
}

fn invoice_to_row(invoice: &Invoice) -> InvoiceRow {
    InvoiceRow {
        invoice_id: invoice.id.into(),
        policy_id: invoice.policy_id.into(),
        bill_date: invoice.bill_date,
        due_date: invoice.due_date,
        cancel_date: invoice.cancel_date,
        amount_due: invoice.amount_due.amount(),
        currency: invoice.amount_due.currency().code().to_string(),
        state: invoice.state.as_str().to_string(),
    }
}

fn row_to_payment(row: PaymentRow) -> Result<Payment, PortError> {
    Ok(Payment {
        id: row.payment_id.into(),
        policy_id: row.policy_id.into(),
        contact_id: row.contact_id.into(),
        amount_paid: money(row.amount_paid, &row.currency)?,
        transaction_date: row.transaction_date,
    })
}
