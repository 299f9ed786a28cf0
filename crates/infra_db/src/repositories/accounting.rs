//! Accounting repository implementation
//!
//! Row-level access to contacts, policies, invoices, payments and
//! cancellation records. Every multi-statement write runs in one
//! transaction that first locks the owning policy row, which serializes
//! concurrent accounting writes against the same policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Stored invoice state of live invoices
pub const ACTIVE_STATE: &str = "Active";
/// Stored invoice state of replaced invoices
pub const SUPERSEDED_STATE: &str = "Superseded";
/// Stored policy status of canceled policies
pub const CANCELED_STATUS: &str = "Canceled";

/// Repository for the accounting tables
#[derive(Debug, Clone)]
pub struct AccountingRepository {
    pool: PgPool,
}

impl AccountingRepository {
    /// Creates a new AccountingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ------------------------------------------------------------------
    // Policies and contacts
    // ------------------------------------------------------------------

    /// Finds a policy by id
    pub async fn find_policy(&self, policy_id: Uuid) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, policy_number, effective_date, annual_premium, currency,
                   billing_schedule, status, named_insured, agent
            FROM policies
            WHERE policy_id = $1
            "#,
        )
        .bind(policy_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a policy
    pub async fn insert_policy(&self, row: &PolicyRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO policies (
                policy_id, policy_number, effective_date, annual_premium, currency,
                billing_schedule, status, named_insured, agent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.policy_id)
        .bind(&row.policy_number)
        .bind(row.effective_date)
        .bind(row.annual_premium)
        .bind(&row.currency)
        .bind(&row.billing_schedule)
        .bind(&row.status)
        .bind(row.named_insured)
        .bind(row.agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Finds a contact by id
    pub async fn find_contact(&self, contact_id: Uuid) -> Result<Option<ContactRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT contact_id, name, role FROM contacts WHERE contact_id = $1",
        )
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a contact
    pub async fn insert_contact(&self, row: &ContactRow) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO contacts (contact_id, name, role) VALUES ($1, $2, $3)")
            .bind(row.contact_id)
            .bind(&row.name)
            .bind(&row.role)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Lists a policy's invoices by bill date, optionally only active ones
    pub async fn find_invoices(
        &self,
        policy_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<InvoiceRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT invoice_id, policy_id, bill_date, due_date, cancel_date,
                   amount_due, currency, state
            FROM invoices
            WHERE policy_id = $1 AND (NOT $2 OR state = $3)
            ORDER BY bill_date, created_at
            "#,
        )
        .bind(policy_id)
        .bind(active_only)
        .bind(ACTIVE_STATE)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Supersedes the policy's active invoices and inserts `rows`
    ///
    /// Runs in a single transaction; on any failure nothing changes.
    pub async fn replace_invoices(
        &self,
        policy_id: Uuid,
        rows: &[InvoiceRow],
    ) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_policy(&mut tx, policy_id).await?;

        let superseded = sqlx::query(
            "UPDATE invoices SET state = $2 WHERE policy_id = $1 AND state = $3",
        )
        .bind(policy_id)
        .bind(SUPERSEDED_STATE)
        .bind(ACTIVE_STATE)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO invoices (
                    invoice_id, policy_id, bill_date, due_date, cancel_date,
                    amount_due, currency, state
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(row.invoice_id)
            .bind(row.policy_id)
            .bind(row.bill_date)
            .bind(row.due_date)
            .bind(row.cancel_date)
            .bind(row.amount_due)
            .bind(&row.currency)
            .bind(&row.state)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(superseded)
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Lists a policy's payments by transaction date
    pub async fn find_payments(&self, policy_id: Uuid) -> Result<Vec<PaymentRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, policy_id, contact_id, amount_paid, currency, transaction_date
            FROM payments
            WHERE policy_id = $1
            ORDER BY transaction_date, created_at
            "#,
        )
        .bind(policy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a payment under the policy lock
    pub async fn insert_payment(&self, row: &PaymentRow) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        lock_policy(&mut tx, row.policy_id).await?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id, policy_id, contact_id, amount_paid, currency, transaction_date
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.payment_id)
        .bind(row.policy_id)
        .bind(row.contact_id)
        .bind(row.amount_paid)
        .bind(&row.currency)
        .bind(row.transaction_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cancellation
    // ------------------------------------------------------------------

    /// Flips the policy to canceled and inserts the cancellation record
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the policy is already
    /// canceled.
    pub async fn record_cancellation(&self, row: &CancellationRow) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let status = lock_policy(&mut tx, row.policy_id).await?;
        if status == CANCELED_STATUS {
            return Err(DatabaseError::DuplicateEntry(format!(
                "policy {} is already canceled",
                row.policy_id
            )));
        }

        sqlx::query("UPDATE policies SET status = $2 WHERE policy_id = $1")
            .bind(row.policy_id)
            .bind(CANCELED_STATUS)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO canceled_policies (
                cancellation_id, policy_id, cancellation_date, reason,
                evaluated_as_of, triggering_invoice
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(row.cancellation_id)
        .bind(row.policy_id)
        .bind(row.cancellation_date)
        .bind(&row.reason)
        .bind(row.evaluated_as_of)
        .bind(row.triggering_invoice)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists a policy's cancellation records
    pub async fn find_cancellations(
        &self,
        policy_id: Uuid,
    ) -> Result<Vec<CancellationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CancellationRow>(
            r#"
            SELECT cancellation_id, policy_id, cancellation_date, reason,
                   evaluated_as_of, triggering_invoice
            FROM canceled_policies
            WHERE policy_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(policy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Locks the policy row for the rest of the transaction, returning its status
async fn lock_policy(
    tx: &mut Transaction<'_, Postgres>,
    policy_id: Uuid,
) -> Result<String, DatabaseError> {
    sqlx::query_scalar::<_, String>("SELECT status FROM policies WHERE policy_id = $1 FOR UPDATE")
        .bind(policy_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Policy", policy_id))
}

/// Database row for a contact
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRow {
    pub contact_id: Uuid,
    pub name: String,
    pub role: String,
}

/// Database row for a policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub policy_id: Uuid,
    pub policy_number: String,
    pub effective_date: NaiveDate,
    pub annual_premium: Decimal,
    pub currency: String,
    pub billing_schedule: String,
    pub status: String,
    pub named_insured: Option<Uuid>,
    pub agent: Option<Uuid>,
}

/// Database row for an invoice
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceRow {
    pub invoice_id: Uuid,
    pub policy_id: Uuid,
    pub bill_date: NaiveDate,
    pub due_date: NaiveDate,
    pub cancel_date: NaiveDate,
    pub amount_due: Decimal,
    pub currency: String,
    pub state: String,
}

/// Database row for a payment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub payment_id: Uuid,
    pub policy_id: Uuid,
    pub contact_id: Uuid,
    pub amount_paid: Decimal,
    pub currency: String,
    pub transaction_date: NaiveDate,
}

/// Database row for a cancellation record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CancellationRow {
    pub cancellation_id: Uuid,
    pub policy_id: Uuid,
    pub cancellation_date: NaiveDate,
    pub reason: String,
    pub evaluated_as_of: NaiveDate,
    pub triggering_invoice: Uuid,
}
