//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy accounting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built contacts, dates and amounts
//! - `builders`: Builders for policies and seeded accounting stores
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for money and payment outcomes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
