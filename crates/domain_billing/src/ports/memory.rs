//! In-memory implementation of [`AccountingStore`]
//!
//! All state sits behind one `RwLock`, and every mutating method validates
//! its input before taking the write lock once, so each call is atomic and
//! calls are serialized.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use core_kernel::{ContactId, DomainPort, PolicyId, PortError};

use super::AccountingStore;
use crate::cancellation::CanceledPolicy;
use crate::contact::Contact;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::policy::{Policy, PolicyStatus};

#[derive(Debug, Default)]
struct StoreState {
    policies: HashMap<PolicyId, Policy>,
    contacts: HashMap<ContactId, Contact>,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
    cancellations: Vec<CanceledPolicy>,
}

impl StoreState {
    fn require_policy(&self, id: PolicyId) -> Result<&Policy, PortError> {
        self.policies
            .get(&id)
            .ok_or_else(|| PortError::not_found("Policy", id))
    }
}

/// In-memory accounting store
#[derive(Debug, Default)]
pub struct InMemoryAccountingStore {
    state: RwLock<StoreState>,
}

impl InMemoryAccountingStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with contacts and policies
    pub async fn with_records(contacts: Vec<Contact>, policies: Vec<Policy>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write().await;
            for contact in contacts {
                state.contacts.insert(contact.id, contact);
            }
            for policy in policies {
                state.policies.insert(policy.id, policy);
            }
        }
        store
    }
}

impl DomainPort for InMemoryAccountingStore {}

#[async_trait]
impl AccountingStore for InMemoryAccountingStore {
    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        self.state.read().await.require_policy(id).cloned()
    }

    async fn insert_policy(&self, policy: &Policy) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if state.policies.contains_key(&policy.id) {
            return Err(PortError::conflict(format!("policy {} already exists", policy.id)));
        }
        state.policies.insert(policy.id, policy.clone());
        Ok(())
    }

    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, PortError> {
        Ok(self.state.read().await.contacts.get(&id).cloned())
    }

    async fn insert_contact(&self, contact: &Contact) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if state.contacts.contains_key(&contact.id) {
            return Err(PortError::conflict(format!("contact {} already exists", contact.id)));
        }
        state.contacts.insert(contact.id, contact.clone());
        Ok(())
    }

    async fn active_invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError> {
        let mut invoices: Vec<Invoice> = self
            .invoice_history(policy_id)
            .await?
            .into_iter()
            .filter(Invoice::is_active)
            .collect();
        invoices.sort_by_key(|i| i.bill_date);
        Ok(invoices)
    }

    async fn invoice_history(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError> {
        let state = self.state.read().await;
        let mut invoices: Vec<Invoice> = state
            .invoices
            .iter()
            .filter(|i| i.policy_id == policy_id)
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.bill_date);
        Ok(invoices)
    }

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

        let mut state = self.state.write().await;
        state.require_policy(policy_id)?;

        for existing in state
            .invoices
            .iter_mut()
            .filter(|i| i.policy_id == policy_id && i.is_active())
        {
            existing.supersede();
        }
        state.invoices.extend(invoices.iter().cloned());
        Ok(())
    }

    async fn payments(&self, policy_id: PolicyId) -> Result<Vec<Payment>, PortError> {
        let state = self.state.read().await;
        let mut payments: Vec<Payment> = state
            .payments
            .iter()
            .filter(|p| p.policy_id == policy_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| p.transaction_date);
        Ok(payments)
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        state.require_policy(payment.policy_id)?;
        if state.payments.iter().any(|p| p.id == payment.id) {
            return Err(PortError::conflict(format!("payment {} already exists", payment.id)));
        }
        state.payments.push(payment.clone());
        Ok(())
    }

    async fn record_cancellation(&self, record: &CanceledPolicy) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let policy = state
            .policies
            .get_mut(&record.policy_id)
            .ok_or_else(|| PortError::not_found("Policy", record.policy_id))?;

        if policy.status.is_canceled() {
            return Err(PortError::conflict(format!(
                "policy {} is already canceled",
                record.policy_id
            )));
        }
        policy.status = PolicyStatus::Canceled;
        state.cancellations.push(record.clone());
        Ok(())
    }

    async fn cancellations(&self, policy_id: PolicyId) -> Result<Vec<CanceledPolicy>, PortError> {
        let state = self.state.read().await;
        Ok(state
            .cancellations
            .iter()
            .filter(|c| c.policy_id == policy_id)
            .cloned()
            .collect())
    }
}
