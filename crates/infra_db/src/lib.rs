//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for the policy accounting
//! engine using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`repositories`] holds the
//! row types and SQL, and [`adapters`] implements the domain's
//! `AccountingStore` port on top of them. Schema migrations live in
//! `migrations/` and are embedded into the binary by [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresAccountingStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/accounting")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresAccountingStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresAccountingStore;
