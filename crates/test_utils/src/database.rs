//! Throwaway PostgreSQL for adapter tests
//!
//! Starts a container per test, applies the accounting migrations and hands
//! out stores bound to it. The container stops when the `TestDatabase` drops.

use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresAccountingStore};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

use domain_billing::AccountingStore;

const IMAGE_TAG: &str = "16-alpine";
const USER: &str = "accounting";
const PASSWORD: &str = "accounting";
const DATABASE: &str = "accounting_test";

/// Accounting tables, children first
const TABLES: [&str; 5] = [
    "canceled_policies",
    "payments",
    "invoices",
    "policies",
    "contacts",
];

type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// Builds a connection URL for the test credentials
pub fn test_database_url(host: &str, port: u16) -> String {
    format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}")
}

/// A migrated PostgreSQL container
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts the container and applies the accounting schema
    ///
    /// # Errors
    ///
    /// Returns an error if Docker is unavailable or migrations fail
    pub async fn start() -> Result<Self, SetupError> {
        let container = Postgres::default()
            .with_user(USER)
            .with_password(PASSWORD)
            .with_db_name(DATABASE)
            .with_tag(IMAGE_TAG)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(5432).await?;
        let url = test_database_url(&host, port);

        let pool = create_pool(
            DatabaseConfig::new(url.clone())
                .max_connections(5)
                .connect_timeout(Duration::from_secs(30)),
        )
        .await?;
        run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// An accounting store over this database
    pub fn store(&self) -> Arc<dyn AccountingStore> {
        Arc::new(PostgresAccountingStore::new(self.pool.clone()))
    }

    /// Empties every accounting table, keeping the schema
    pub async fn truncate(&self) -> Result<(), SetupError> {
        let statement = format!("TRUNCATE TABLE {} CASCADE", TABLES.join(", "));
        sqlx::query(&statement).execute(&self.pool).await?;
        Ok(())
    }
}

/// Starts a database owned by a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, SetupError> {
    TestDatabase::start().await
}
