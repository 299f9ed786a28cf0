//! Billing Domain - Policy Accounting Engine
//!
//! This crate keeps the books of individual insurance policies: it splits
//! the annual premium into installment invoices, computes the account
//! balance as of any date, decides who may pay, and cancels policies whose
//! installments go unpaid past their cancel date.
//!
//! # Billing Schedules
//!
//! | Schedule      | Installments | Months apart |
//! |---------------|--------------|--------------|
//! | Annual        | 1            | 12           |
//! | Two-Pay       | 2            | 6            |
//! | Semi-Annual   | 3            | 4            |
//! | Quarterly     | 4            | 3            |
//! | Monthly       | 12           | 1            |
//!
//! # Invoice Lifecycle
//!
//! ```text
//! generated ──> Active ──(regeneration)──> Superseded
//! ```
//!
//! Superseded invoices stay in storage for history but no longer count
//! toward balances or cancellation.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PolicyAccounting, InMemoryAccountingStore};
//!
//! let accounting = PolicyAccounting::open(store, policy_id).await?;
//! let owed = accounting.balance(Some(as_of)).await?;
//! ```

pub mod accounting;
pub mod balance;
pub mod cancellation;
pub mod config;
pub mod contact;
pub mod error;
pub mod generator;
pub mod invoice;
pub mod payment;
pub mod pending;
pub mod policy;
pub mod ports;
pub mod schedule;

pub use accounting::PolicyAccounting;
pub use balance::account_balance;
pub use cancellation::{CancellationDecision, CanceledPolicy};
pub use config::{BillingConfig, PendingRule};
pub use contact::{Contact, ContactRole};
pub use error::BillingError;
pub use generator::build_invoices;
pub use invoice::{Invoice, InvoiceState};
pub use payment::{Payment, PaymentOutcome, PaymentRefusal};
pub use policy::{Policy, PolicyStatus};
pub use ports::memory::InMemoryAccountingStore;
pub use ports::AccountingStore;
pub use schedule::BillingSchedule;
