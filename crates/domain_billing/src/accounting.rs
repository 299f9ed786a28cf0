//! Policy accounting sessions
//!
//! [`PolicyAccounting`] is the engine's entry point. Opening a session loads
//! a policy and, the first time, generates its installment invoices. The
//! session then answers balance and cancellation-pending queries, accepts
//! or refuses payments, and evaluates cancellation for non-payment.
//!
//! Every query that takes an `as_of` date defaults to today when given
//! `None`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PolicyAccounting, PaymentOutcome};
//!
//! let mut accounting = PolicyAccounting::open(store, policy_id).await?;
//!
//! let balance = accounting.balance(Some(as_of)).await?;
//! match accounting.make_payment(Some(agent_id), Some(as_of), amount).await? {
//!     PaymentOutcome::Recorded(payment) => { /* ... */ }
//!     PaymentOutcome::Refused(reason) => { /* ... */ }
//! }
//! accounting.evaluate_cancel(Some(as_of)).await?;
//! ```

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use core_kernel::{ContactId, Money, PolicyId};

use crate::balance::account_balance;
use crate::cancellation::{CancellationDecision, CanceledPolicy};
use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::generator::build_invoices;
use crate::invoice::Invoice;
use crate::payment::{Payment, PaymentOutcome, PaymentRefusal};
use crate::pending;
use crate::policy::Policy;
use crate::ports::AccountingStore;

/// Accounting session for one policy
pub struct PolicyAccounting {
    store: Arc<dyn AccountingStore>,
    policy: Policy,
    config: BillingConfig,
}

impl std::fmt::Debug for PolicyAccounting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyAccounting")
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PolicyAccounting {
    /// Opens a session with the default configuration
    ///
    /// See [`PolicyAccounting::open_with_config`].
    pub async fn open(
        store: Arc<dyn AccountingStore>,
        policy_id: PolicyId,
    ) -> Result<Self, BillingError> {
        Self::open_with_config(store, policy_id, BillingConfig::default()).await
    }

    /// Opens a session, generating invoices if the policy has none
    ///
    /// Opening a policy that already has active invoices never creates
    /// more.
    ///
    /// # Errors
    ///
    /// - `BillingError::PolicyNotFound` if the policy does not exist
    /// - `BillingError::UnknownBillingSchedule` if invoices had to be
    ///   generated and the billing schedule is not recognized
    #[instrument(skip(store, config))]
    pub async fn open_with_config(
        store: Arc<dyn AccountingStore>,
        policy_id: PolicyId,
        config: BillingConfig,
    ) -> Result<Self, BillingError> {
        let policy = store.get_policy(policy_id).await.map_err(|e| {
            if e.is_not_found() {
                BillingError::PolicyNotFound(policy_id)
            } else {
                BillingError::Store(e)
            }
        })?;

        let accounting = Self { store, policy, config };

        if accounting.store.active_invoices(policy_id).await?.is_empty() {
            accounting.make_invoices().await?;
        }

        Ok(accounting)
    }

    /// The policy as loaded by this session
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The configuration this session applies
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Reloads the policy record from the store
    pub async fn refresh(&mut self) -> Result<&Policy, BillingError> {
        self.policy = self.store.get_policy(self.policy.id).await?;
        Ok(&self.policy)
    }

    /// Active invoices ordered by bill date
    pub async fn invoices(&self) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.store.active_invoices(self.policy.id).await?)
    }

    /// Active invoices billed on or before `date`
    pub async fn invoices_billed_through(&self, date: NaiveDate) -> Result<Vec<Invoice>, BillingError> {
        Ok(self
            .invoices()
            .await?
            .into_iter()
            .filter(|i| i.is_billed_by(date))
            .collect())
    }

    /// Payments ordered by transaction date
    pub async fn payments(&self) -> Result<Vec<Payment>, BillingError> {
        Ok(self.store.payments(self.policy.id).await?)
    }

    /// Cancellation records of the policy
    pub async fn cancellations(&self) -> Result<Vec<CanceledPolicy>, BillingError> {
        Ok(self.store.cancellations(self.policy.id).await?)
    }

    /// Regenerates the policy's invoices
    ///
    /// The schedule is validated before anything is written; on an unknown
    /// schedule the current invoices are left untouched. Otherwise the
    /// current invoices are superseded and the new set is stored in one
    /// atomic replacement.
    #[instrument(skip(self), fields(policy_id = %self.policy.id))]
    pub async fn make_invoices(&self) -> Result<Vec<Invoice>, BillingError> {
        let invoices = match build_invoices(&self.policy, &self.config) {
            Ok(invoices) => invoices,
            Err(e) => {
                warn!(
                    billing_schedule = %self.policy.billing_schedule,
                    error = %e,
                    "refusing to generate invoices"
                );
                return Err(e);
            }
        };

        self.store.replace_invoices(self.policy.id, &invoices).await?;

        info!(
            billing_schedule = %self.policy.billing_schedule,
            installments = invoices.len(),
            annual_premium = %self.policy.annual_premium,
            "generated invoices"
        );
        Ok(invoices)
    }

    /// Account balance as of a date: billed minus paid, both inclusive
    pub async fn balance(&self, as_of: Option<NaiveDate>) -> Result<Money, BillingError> {
        let as_of = resolve_date(as_of);
        let (invoices, payments) = self.load_ledger().await?;
        account_balance(self.policy.currency(), &invoices, &payments, as_of)
    }

    /// Whether the policy is cancellation pending as of a date
    pub async fn is_cancellation_pending(&self, as_of: Option<NaiveDate>) -> Result<bool, BillingError> {
        let as_of = resolve_date(as_of);
        let (invoices, payments) = self.load_ledger().await?;
        pending::is_cancellation_pending(
            self.config.pending_rule,
            self.policy.currency(),
            &invoices,
            &payments,
            as_of,
        )
    }

    /// Attempts to record a payment
    ///
    /// While the policy is cancellation pending only an agent may pay. When
    /// no payer is given the named insured is assumed; if there is none, or
    /// the payer is not a known contact, the payment is refused as
    /// unverifiable. Refusals store nothing.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Money` if `amount` is not in the policy's
    /// currency, and `BillingError::Store` if the store fails.
    #[instrument(skip(self, amount), fields(policy_id = %self.policy.id, amount = %amount))]
    pub async fn make_payment(
        &self,
        contact_id: Option<ContactId>,
        as_of: Option<NaiveDate>,
        amount: Money,
    ) -> Result<PaymentOutcome, BillingError> {
        let as_of = resolve_date(as_of);
        Money::zero(self.policy.currency()).checked_add(&amount)?;

        if self.is_cancellation_pending(Some(as_of)).await? && !self.is_agent(contact_id).await? {
            warn!(%as_of, ?contact_id, "only agents may pay on cancellation pending policies");
            return Ok(PaymentOutcome::Refused(PaymentRefusal::CancellationPending { contact_id }));
        }

        let payer = match contact_id.or(self.policy.named_insured) {
            Some(id) if self.store.get_contact(id).await?.is_some() => id,
            _ => {
                warn!(?contact_id, "cannot verify payer");
                return Ok(PaymentOutcome::Refused(PaymentRefusal::UnverifiablePayer));
            }
        };

        let payment = Payment::new(self.policy.id, payer, amount, as_of);
        self.store.insert_payment(&payment).await?;

        info!(payment_id = %payment.id, contact_id = %payer, %as_of, "recorded payment");
        Ok(PaymentOutcome::Recorded(payment))
    }

    /// Evaluates whether the policy must be canceled for non-payment
    ///
    /// Invoices whose cancel date is on or before `as_of` are walked in
    /// bill-date order. The first one showing a nonzero account balance on
    /// its own cancel date cancels the policy: the status flips to canceled
    /// and a cancellation record dated today is written. A policy that is
    /// already canceled is left alone.
    #[instrument(skip(self), fields(policy_id = %self.policy.id))]
    pub async fn evaluate_cancel(
        &mut self,
        as_of: Option<NaiveDate>,
    ) -> Result<CancellationDecision, BillingError> {
        let as_of = resolve_date(as_of);

        if self.refresh().await?.is_canceled() {
            debug!("policy already canceled");
            return Ok(CancellationDecision::AlreadyCanceled);
        }

        let (invoices, payments) = self.load_ledger().await?;
        let mut lapsed: Vec<&Invoice> = invoices
            .iter()
            .filter(|i| i.is_past_cancel_date(as_of))
            .collect();
        lapsed.sort_by_key(|i| i.bill_date);

        for invoice in lapsed {
            let balance = account_balance(
                self.policy.currency(),
                &invoices,
                &payments,
                invoice.cancel_date,
            )?;
            if balance.is_zero() {
                continue;
            }

            let record = CanceledPolicy::new(
                self.policy.id,
                today(),
                self.config.cancellation_reason.clone(),
                as_of,
                invoice.id,
            );
            match self.store.record_cancellation(&record).await {
                Ok(()) => {}
                // Another session canceled first
                Err(e) if e.is_conflict() => {
                    self.refresh().await?;
                    return Ok(CancellationDecision::AlreadyCanceled);
                }
                Err(e) => return Err(e.into()),
            }
            self.refresh().await?;

            info!(
                invoice_id = %invoice.id,
                cancel_date = %invoice.cancel_date,
                %balance,
                "policy canceled for non-payment"
            );
            return Ok(CancellationDecision::Canceled(record));
        }

        debug!(%as_of, "policy should not cancel");
        Ok(CancellationDecision::RemainsActive)
    }

    async fn load_ledger(&self) -> Result<(Vec<Invoice>, Vec<Payment>), BillingError> {
        let invoices = self.store.active_invoices(self.policy.id).await?;
        let payments = self.store.payments(self.policy.id).await?;
        Ok((invoices, payments))
    }

    async fn is_agent(&self, contact_id: Option<ContactId>) -> Result<bool, BillingError> {
        let Some(id) = contact_id else {
            return Ok(false);
        };
        Ok(self
            .store
            .get_contact(id)
            .await?
            .is_some_and(|contact| contact.is_agent()))
    }
}

fn resolve_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(today)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
