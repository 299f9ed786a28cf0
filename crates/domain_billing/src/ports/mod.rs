//! Billing Domain Ports
//!
//! The accounting engine reads and writes policies, invoices, payments,
//! contacts and cancellation records only through [`AccountingStore`].
//! Adapters decide where the data lives:
//!
//! - **PostgreSQL adapter**: `infra_db::PostgresAccountingStore`
//! - **In-memory adapter**: [`memory::InMemoryAccountingStore`], used by
//!   tests and embedded callers
//!
//! # Atomicity
//!
//! The multi-row writes the engine performs are each a single port call,
//! and adapters must apply each one all-or-nothing:
//!
//! - [`AccountingStore::replace_invoices`] supersedes the current invoice
//!   set and inserts the new one
//! - [`AccountingStore::insert_payment`] stores one payment
//! - [`AccountingStore::record_cancellation`] flips the policy to canceled
//!   and stores the cancellation record
//!
//! Adapters are also expected to serialize concurrent accounting writes
//! against the same policy id.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_billing::{AccountingStore, PolicyAccounting};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn AccountingStore> = Arc::new(PostgresAccountingStore::new(pool));
//! let accounting = PolicyAccounting::open(store, policy_id).await?;
//! let balance = accounting.balance(None).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ContactId, DomainPort, PolicyId, PortError};

use crate::cancellation::CanceledPolicy;
use crate::contact::Contact;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::policy::Policy;

pub mod memory;

/// Storage collaborator of the accounting engine
///
/// Query methods are scoped to one policy; the engine applies its own date
/// filters to the rows returned.
#[async_trait]
pub trait AccountingStore: DomainPort {
    // ========================================================================
    // Policies and contacts
    // ========================================================================

    /// Retrieves a policy by ID
    ///
    /// # Returns
    ///
    /// The policy if found, or `PortError::NotFound`
    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError>;

    /// Stores a new policy
    async fn insert_policy(&self, policy: &Policy) -> Result<(), PortError>;

    /// Retrieves a contact by ID, or `None` if it does not exist
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, PortError>;

    /// Stores a new contact
    async fn insert_contact(&self, contact: &Contact) -> Result<(), PortError>;

    // ========================================================================
    // Invoices
    // ========================================================================

    /// Returns the policy's active invoices ordered by bill date ascending
    ///
    /// Superseded invoices are never returned.
    async fn active_invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError>;

    /// Returns every invoice ever generated for the policy, superseded
    /// ones included, ordered by bill date
    async fn invoice_history(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError>;

    /// Atomically supersedes the policy's active invoices and inserts `invoices`
    ///
    /// Either the whole replacement is applied or nothing changes.
    async fn replace_invoices(
        &self,
        policy_id: PolicyId,
        invoices: &[Invoice],
    ) -> Result<(), PortError>;

    // ========================================================================
    // Payments
    // ========================================================================

    /// Returns the policy's payments ordered by transaction date
    async fn payments(&self, policy_id: PolicyId) -> Result<Vec<Payment>, PortError>;

    /// Stores a payment
    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError>;

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Atomically marks the policy canceled and stores the cancellation record
    ///
    /// Returns `PortError::Conflict` if the policy is already canceled.
    async fn record_cancellation(&self, record: &CanceledPolicy) -> Result<(), PortError>;

    /// Returns the cancellation records of a policy
    async fn cancellations(&self, policy_id: PolicyId) -> Result<Vec<CanceledPolicy>, PortError>;
}
