//! Core Kernel - Foundational types for the policy accounting system
//!
//! This crate provides the building blocks shared by the accounting engine
//! and its storage adapters:
//! - Money types with precise decimal arithmetic and exact allocation
//! - Strongly-typed identifiers for policies, invoices, payments and contacts
//! - The port error type every storage adapter reports through

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{PolicyId, InvoiceId, PaymentId, ContactId, CancellationId};
pub use ports::{PortError, DomainPort};
